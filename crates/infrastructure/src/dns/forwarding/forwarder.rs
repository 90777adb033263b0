use crate::dns::transport::create_transport;
use async_trait::async_trait;
use shimdns_application::ports::UpstreamForwarder;
use shimdns_domain::{DomainError, Transport, UpstreamAddr};
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

/// Forwards raw queries to a single upstream server, one round trip each.
pub struct DnsForwarder {
    upstream: UpstreamAddr,
    timeout: Duration,
}

impl DnsForwarder {
    pub fn new(upstream: UpstreamAddr, timeout: Duration) -> Self {
        Self { upstream, timeout }
    }

    async fn resolve_upstream(&self) -> Result<SocketAddr, DomainError> {
        if let Some(addr) = self.upstream.socket_addr() {
            return Ok(addr);
        }

        let (hostname, port) = self
            .upstream
            .unresolved_parts()
            .ok_or_else(|| DomainError::upstream(&self.upstream, "no address"))?;

        let addr = tokio::net::lookup_host((hostname, port))
            .await
            .map_err(|e| DomainError::upstream(&self.upstream, format!("lookup failed: {}", e)))?
            .next()
            .ok_or_else(|| DomainError::upstream(&self.upstream, "hostname has no addresses"))?;

        debug!(upstream = %self.upstream, resolved = %addr, "Upstream hostname resolved");
        Ok(addr)
    }

    async fn round_trip(
        &self,
        message: &[u8],
        transport: Transport,
    ) -> Result<Vec<u8>, DomainError> {
        let server_addr = self.resolve_upstream().await?;
        let response = create_transport(transport, server_addr)
            .send(message, self.timeout)
            .await?;

        if response.bytes.is_empty() {
            return Err(DomainError::upstream(server_addr, "empty response"));
        }

        debug!(
            server = %server_addr,
            protocol = response.protocol_used,
            response_len = response.bytes.len(),
            "Upstream exchange complete"
        );

        Ok(response.bytes)
    }
}

#[async_trait]
impl UpstreamForwarder for DnsForwarder {
    async fn forward(&self, message: &[u8], transport: Transport) -> Result<Vec<u8>, DomainError> {
        tokio::time::timeout(self.timeout, self.round_trip(message, transport))
            .await
            .map_err(|_| {
                DomainError::upstream(
                    &self.upstream,
                    format!("no reply within {}ms", self.timeout.as_millis()),
                )
            })?
    }

    fn upstream(&self) -> String {
        self.upstream.to_string()
    }
}
