use async_trait::async_trait;
use shimdns_domain::{DomainError, Transport};

#[async_trait]
pub trait UpstreamForwarder: Send + Sync {
    /// Send `message` to the upstream over `transport` and return the raw reply.
    ///
    /// Exactly one round trip, bounded by the forwarder's timeout. Timeouts and
    /// connection failures surface as [`DomainError::UpstreamUnavailable`].
    async fn forward(&self, message: &[u8], transport: Transport)
        -> Result<Vec<u8>, DomainError>;

    /// Upstream address, for logging.
    fn upstream(&self) -> String;
}
