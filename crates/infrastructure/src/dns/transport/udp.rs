//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). Responses up to 4096 bytes (EDNS(0))
//! are accepted; a truncated (TC) response is relayed to the client unchanged.
//! Only a datagram from the upstream's own address echoing the query id counts
//! as the reply.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use shimdns_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
pub const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let socket = UdpSocket::bind(self.bind_addr()).await.map_err(|e| {
            DomainError::upstream(self.server_addr, format!("Failed to bind UDP socket: {}", e))
        })?;

        let bytes_sent =
            tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| DomainError::upstream(self.server_addr, "Timeout sending UDP query"))?
                .map_err(|e| {
                    DomainError::upstream(
                        self.server_addr,
                        format!("Failed to send UDP query: {}", e),
                    )
                })?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let bytes_received = tokio::time::timeout(
            timeout,
            self.recv_matching_reply(&socket, message_bytes, &mut recv_buf),
        )
        .await
        .map_err(|_| DomainError::upstream(self.server_addr, "Timeout waiting for UDP response"))??;

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            protocol_used: "UDP",
        })
    }
}

impl UdpTransport {
    /// Receive until a datagram arrives from the upstream's exact address
    /// carrying the query's transaction id. Anything else is discarded.
    async fn recv_matching_reply(
        &self,
        socket: &UdpSocket,
        query: &[u8],
        recv_buf: &mut [u8],
    ) -> Result<usize, DomainError> {
        loop {
            let (bytes_received, from_addr) = socket.recv_from(recv_buf).await.map_err(|e| {
                DomainError::upstream(
                    self.server_addr,
                    format!("Failed to receive UDP response: {}", e),
                )
            })?;

            if from_addr != self.server_addr {
                warn!(
                    expected = %self.server_addr,
                    received_from = %from_addr,
                    "Discarding UDP response from unexpected source"
                );
                continue;
            }

            if bytes_received < 2 || query.len() < 2 || recv_buf[..2] != query[..2] {
                warn!(
                    server = %self.server_addr,
                    bytes_received = bytes_received,
                    "Discarding UDP response with mismatched transaction id"
                );
                continue;
            }

            return Ok(bytes_received);
        }
    }
}
