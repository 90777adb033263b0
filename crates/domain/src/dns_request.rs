use super::{DnsQuery, Transport};
use std::net::SocketAddr;
use std::sync::Arc;

/// A parsed inbound query together with the bytes it arrived as.
#[derive(Debug, Clone)]
pub struct DnsRequest {
    pub id: u16,
    pub query: DnsQuery,
    pub transport: Transport,
    pub client: SocketAddr,
    /// Original wire bytes, forwarded upstream unmodified on a local miss.
    pub raw: Arc<[u8]>,
}

impl DnsRequest {
    pub fn new(
        id: u16,
        query: DnsQuery,
        transport: Transport,
        client: SocketAddr,
        raw: impl Into<Arc<[u8]>>,
    ) -> Self {
        Self {
            id,
            query,
            transport,
            client,
            raw: raw.into(),
        }
    }
}
