pub mod tcp;
pub mod udp;

use async_trait::async_trait;
use shimdns_domain::{DomainError, Transport};
use std::net::SocketAddr;
use std::time::Duration;

pub use tcp::{read_with_length_prefix, send_with_length_prefix};

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub protocol_used: &'static str,
}

/// One request/response exchange with an upstream server.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;
}

pub enum UpstreamTransport {
    Udp(udp::UdpTransport),
    Tcp(tcp::TcpTransport),
}

impl UpstreamTransport {
    pub async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        match self {
            Self::Udp(t) => DnsTransport::send(t, message_bytes, timeout).await,
            Self::Tcp(t) => DnsTransport::send(t, message_bytes, timeout).await,
        }
    }
}

/// Pick the upstream transport matching the one the query arrived on.
pub fn create_transport(transport: Transport, server_addr: SocketAddr) -> UpstreamTransport {
    match transport {
        Transport::Udp => UpstreamTransport::Udp(udp::UdpTransport::new(server_addr)),
        Transport::Tcp => UpstreamTransport::Tcp(tcp::TcpTransport::new(server_addr)),
    }
}
