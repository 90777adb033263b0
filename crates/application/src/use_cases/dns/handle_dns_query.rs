use crate::ports::UpstreamForwarder;
use crate::services::RecordStore;
use shimdns_domain::{DnsRecord, DnsRequest, DomainError};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Outcome of resolving one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DnsResolution {
    /// Matching local records, in store order. Never empty.
    Local(Vec<DnsRecord>),
    /// The upstream's reply, byte for byte.
    Forwarded(Vec<u8>),
}

/// Local-first resolution: answer from the record store when anything
/// matches, otherwise relay the original query to the upstream.
pub struct HandleDnsQueryUseCase {
    store: Arc<RecordStore>,
    forwarder: Arc<dyn UpstreamForwarder>,
}

impl HandleDnsQueryUseCase {
    pub fn new(store: Arc<RecordStore>, forwarder: Arc<dyn UpstreamForwarder>) -> Self {
        Self { store, forwarder }
    }

    pub async fn execute(&self, request: &DnsRequest) -> Result<DnsResolution, DomainError> {
        let query = &request.query;
        let matches = self.store.find(query);

        if !matches.is_empty() {
            info!(
                domain = %query.name,
                record_type = %query.query_type,
                answers = matches.len(),
                "Local record found"
            );
            return Ok(DnsResolution::Local(
                matches.into_iter().cloned().collect(),
            ));
        }

        info!(
            domain = %query.name,
            record_type = %query.query_type,
            upstream = %self.forwarder.upstream(),
            "No local record, forwarding to upstream"
        );

        let start = Instant::now();
        match self
            .forwarder
            .forward(&request.raw, request.transport)
            .await
        {
            Ok(response) => {
                debug!(
                    domain = %query.name,
                    transport = %request.transport,
                    bytes = response.len(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Upstream reply relayed"
                );
                Ok(DnsResolution::Forwarded(response))
            }
            Err(e) => {
                warn!(
                    domain = %query.name,
                    transport = %request.transport,
                    error = %e,
                    "Upstream forward failed"
                );
                Err(e)
            }
        }
    }
}
