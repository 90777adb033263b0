use crate::dns::forwarding::{MessageBuilder, ParsedRequest, RequestParser};
use hickory_proto::op::{Message, ResponseCode};
use shimdns_application::use_cases::{DnsResolution, HandleDnsQueryUseCase};
use shimdns_domain::{DomainError, Transport};
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Turns raw query bytes into raw reply bytes, independent of the listener.
///
/// `None` means nothing should be sent back: the UDP datagram is dropped and a
/// TCP connection is closed.
#[derive(Clone)]
pub struct DnsServerHandler {
    use_case: Arc<HandleDnsQueryUseCase>,
}

impl DnsServerHandler {
    pub fn new(use_case: Arc<HandleDnsQueryUseCase>) -> Self {
        Self { use_case }
    }

    pub async fn handle_raw(
        &self,
        raw: &[u8],
        transport: Transport,
        client: SocketAddr,
    ) -> Option<Vec<u8>> {
        let ParsedRequest { message, request } = match RequestParser::parse(raw, transport, client)
        {
            Ok(parsed) => parsed,
            Err(e) => {
                warn!(client = %client, transport = %transport, error = %e, "Dropping malformed query");
                return None;
            }
        };

        debug!(
            query = %request.query,
            client = %client,
            transport = %transport,
            "DNS query received"
        );

        match self.use_case.execute(&request).await {
            Ok(DnsResolution::Local(records)) => {
                encode_or_drop(MessageBuilder::build_local_response(&message, &records))
            }
            Ok(DnsResolution::Forwarded(bytes)) => Some(bytes),
            Err(e) if e.is_upstream_unavailable() => servfail(&message, &e),
            Err(e) => {
                error!(query = %request.query, error = %e, "Query resolution failed");
                None
            }
        }
    }
}

fn servfail(message: &Message, cause: &DomainError) -> Option<Vec<u8>> {
    debug!(id = message.id(), cause = %cause, "Answering SERVFAIL");
    encode_or_drop(MessageBuilder::build_error_response(
        message,
        ResponseCode::ServFail,
    ))
}

fn encode_or_drop(encoded: Result<Vec<u8>, DomainError>) -> Option<Vec<u8>> {
    match encoded {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            error!(error = %e, "Failed to encode reply, dropping request");
            None
        }
    }
}
