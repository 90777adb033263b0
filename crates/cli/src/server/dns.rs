use shimdns_domain::config::ServerConfig;
use shimdns_domain::Transport;
use shimdns_infrastructure::dns::server::DnsServerHandler;
use shimdns_infrastructure::dns::transport::{read_with_length_prefix, send_with_length_prefix};
use socket2::{Domain, Protocol, Socket, Type};
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Largest datagram a client can send; nothing is cut short before parsing.
const UDP_RECV_BUFFER: usize = 65535;

#[derive(Debug, Clone, Copy)]
pub struct ListenerSettings {
    pub max_tcp_connections: usize,
    pub tcp_idle_timeout: Duration,
}

impl From<&ServerConfig> for ListenerSettings {
    fn from(server: &ServerConfig) -> Self {
        Self {
            max_tcp_connections: server.max_tcp_connections,
            tcp_idle_timeout: Duration::from_secs(server.tcp_idle_timeout),
        }
    }
}

/// Bind the UDP socket and TCP listener for `socket_addr`.
pub fn bind(socket_addr: SocketAddr) -> anyhow::Result<(UdpSocket, TcpListener)> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let udp = create_udp_socket(domain, socket_addr)?;
    let tcp = create_tcp_listener(domain, socket_addr)?;
    Ok((udp, tcp))
}

/// Spawn the UDP loop and the TCP accept loop. Both share `handler`.
pub fn start_dns_server(
    udp_socket: UdpSocket,
    tcp_listener: TcpListener,
    handler: DnsServerHandler,
    settings: ListenerSettings,
) -> JoinSet<anyhow::Result<()>> {
    let handler = Arc::new(handler);
    let mut join_set = JoinSet::new();

    join_set.spawn(run_udp_listener(Arc::new(udp_socket), handler.clone()));
    join_set.spawn(run_tcp_listener(tcp_listener, handler, settings));

    join_set
}

async fn run_udp_listener(
    socket: Arc<UdpSocket>,
    handler: Arc<DnsServerHandler>,
) -> anyhow::Result<()> {
    info!(local_addr = %socket.local_addr()?, "UDP listener started");
    let mut recv_buf = vec![0u8; UDP_RECV_BUFFER];

    loop {
        let (n, from) = match socket.recv_from(&mut recv_buf).await {
            Ok(received) => received,
            Err(e) => {
                warn!(error = %e, "UDP recv error");
                continue;
            }
        };

        let query: Arc<[u8]> = Arc::from(&recv_buf[..n]);
        let handler = handler.clone();
        let socket = socket.clone();
        tokio::spawn(async move {
            if let Some(response) = handler.handle_raw(&query, Transport::Udp, from).await {
                if let Err(e) = socket.send_to(&response, from).await {
                    warn!(client = %from, error = %e, "Failed to send UDP reply");
                }
            }
        });
    }
}

async fn run_tcp_listener(
    listener: TcpListener,
    handler: Arc<DnsServerHandler>,
    settings: ListenerSettings,
) -> anyhow::Result<()> {
    info!(
        local_addr = %listener.local_addr()?,
        max_connections = settings.max_tcp_connections,
        "TCP listener started"
    );
    let permits = Arc::new(Semaphore::new(settings.max_tcp_connections));

    loop {
        let permit = permits.clone().acquire_owned().await?;

        let (stream, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                warn!(error = %e, "TCP accept error");
                continue;
            }
        };

        let handler = handler.clone();
        tokio::spawn(async move {
            serve_tcp_connection(stream, peer, &handler, settings.tcp_idle_timeout).await;
            drop(permit);
        });
    }
}

/// Answer length-prefixed queries until the client closes, goes idle, or
/// sends something unanswerable.
async fn serve_tcp_connection(
    mut stream: TcpStream,
    peer: SocketAddr,
    handler: &DnsServerHandler,
    idle_timeout: Duration,
) {
    loop {
        let query = match tokio::time::timeout(idle_timeout, read_with_length_prefix(&mut stream))
            .await
        {
            Ok(Ok(query)) => query,
            Ok(Err(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
            Ok(Err(e)) => {
                warn!(client = %peer, error = %e, "TCP read error");
                break;
            }
            Err(_) => {
                debug!(client = %peer, "TCP connection idle, closing");
                break;
            }
        };

        let Some(response) = handler.handle_raw(&query, Transport::Tcp, peer).await else {
            break;
        };

        if let Err(e) = send_with_length_prefix(&mut stream, &response).await {
            warn!(client = %peer, error = %e, "Failed to send TCP reply");
            break;
        }
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
