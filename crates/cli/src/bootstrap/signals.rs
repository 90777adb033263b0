/// Resolves once SIGTERM is delivered.
#[cfg(unix)]
pub async fn terminate_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut sigterm = signal(SignalKind::terminate())?;
    sigterm.recv().await;
    Ok(())
}

#[cfg(not(unix))]
pub async fn terminate_signal() -> std::io::Result<()> {
    std::future::pending().await
}
