//! TCP Transport for DNS queries (RFC 1035 §4.2.2)
//!
//! Every message is preceded by its length as a 2-byte big-endian integer.
//! A fresh connection is opened per forwarded query and closed afterwards.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use shimdns_domain::DomainError;
use std::io;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tracing::debug;

pub struct TcpTransport {
    server_addr: SocketAddr,
}

impl TcpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    async fn connect(&self, timeout: Duration) -> Result<TcpStream, DomainError> {
        let stream = tokio::time::timeout(timeout, TcpStream::connect(self.server_addr))
            .await
            .map_err(|_| DomainError::upstream(self.server_addr, "Timeout connecting over TCP"))?
            .map_err(|e| {
                DomainError::upstream(self.server_addr, format!("Connection refused: {}", e))
            })?;

        stream.set_nodelay(true).map_err(|e| {
            DomainError::upstream(self.server_addr, format!("Failed to set TCP_NODELAY: {}", e))
        })?;

        Ok(stream)
    }
}

#[async_trait]
impl DnsTransport for TcpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let mut stream = self.connect(timeout).await?;

        tokio::time::timeout(timeout, send_with_length_prefix(&mut stream, message_bytes))
            .await
            .map_err(|_| DomainError::upstream(self.server_addr, "Timeout sending TCP query"))?
            .map_err(|e| {
                DomainError::upstream(self.server_addr, format!("Failed to send TCP query: {}", e))
            })?;

        debug!(
            server = %self.server_addr,
            message_len = message_bytes.len(),
            "TCP query sent"
        );

        let response_bytes = tokio::time::timeout(timeout, read_with_length_prefix(&mut stream))
            .await
            .map_err(|_| {
                DomainError::upstream(self.server_addr, "Timeout waiting for TCP response")
            })?
            .map_err(|e| {
                DomainError::upstream(
                    self.server_addr,
                    format!("Failed to read TCP response: {}", e),
                )
            })?;

        if response_bytes.is_empty() {
            return Err(DomainError::upstream(
                self.server_addr,
                "Zero-length TCP response",
            ));
        }

        debug!(
            server = %self.server_addr,
            response_len = response_bytes.len(),
            "TCP response received"
        );

        Ok(TransportResponse {
            bytes: response_bytes,
            protocol_used: "TCP",
        })
    }
}

/// Write one DNS message with its 2-byte big-endian length prefix.
pub async fn send_with_length_prefix<S>(stream: &mut S, message_bytes: &[u8]) -> io::Result<()>
where
    S: AsyncWriteExt + Unpin,
{
    let length = u16::try_from(message_bytes.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("DNS message too large for TCP: {} bytes", message_bytes.len()),
        )
    })?;

    let mut frame = Vec::with_capacity(message_bytes.len() + 2);
    frame.extend_from_slice(&length.to_be_bytes());
    frame.extend_from_slice(message_bytes);

    stream.write_all(&frame).await?;
    stream.flush().await
}

/// Read one length-prefixed DNS message.
///
/// A peer closing the stream before or inside a frame yields `UnexpectedEof`.
pub async fn read_with_length_prefix<S>(stream: &mut S) -> io::Result<Vec<u8>>
where
    S: AsyncReadExt + Unpin,
{
    let mut len_buf = [0u8; 2];
    stream.read_exact(&mut len_buf).await?;

    let message_len = u16::from_be_bytes(len_buf) as usize;
    let mut message = vec![0u8; message_len];
    stream.read_exact(&mut message).await?;

    Ok(message)
}
