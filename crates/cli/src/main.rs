use anyhow::Context;
use clap::Parser;
use shimdns_domain::CliOverrides;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "shimdns")]
#[command(version)]
#[command(about = "Answers DNS queries from local records and forwards the rest upstream")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Port to serve DNS on, over both UDP and TCP
    #[arg(short = 'p', long, env = "PORT")]
    port: Option<u16>,

    /// Upstream DNS server (IP or hostname, optional :port)
    #[arg(short = 'u', long, env = "UPSTREAM")]
    upstream: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        port: cli.port,
        upstream: cli.upstream,
        bind_address: cli.bind,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    let services = di::DnsServices::new(&config)?;

    let bind_addr = config.bind_addr()?;
    let (udp_socket, tcp_listener) = server::dns::bind(bind_addr)
        .with_context(|| format!("Failed to bind DNS listeners on {}", bind_addr))?;

    info!(
        port = config.server.port,
        upstream = %config.upstream.address,
        records = services.store.len(),
        "DNS server listening on UDP and TCP"
    );

    let mut listeners = server::start_dns_server(
        udp_socket,
        tcp_listener,
        services.handler,
        server::ListenerSettings::from(&config.server),
    );

    tokio::select! {
        _ = tokio::signal::ctrl_c() => Ok(()),
        result = bootstrap::terminate_signal() => {
            result?;
            info!(signal = "SIGTERM", pid = std::process::id(), "Termination signal received, exiting");
            Ok(())
        }
        _ = async {
            while let Some(result) = listeners.join_next().await {
                match result {
                    Ok(Ok(())) => error!("DNS listener stopped"),
                    Ok(Err(e)) => error!(error = %e, "DNS listener failed"),
                    Err(e) => error!(error = %e, "DNS listener panicked"),
                }
            }
        } => {
            anyhow::bail!("all DNS listeners stopped")
        }
    }
}
