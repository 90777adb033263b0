//! Decoding of inbound query bytes.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType};
use shimdns_domain::{DnsQuery, DnsRequest, DomainError, Transport};
use std::net::SocketAddr;

/// A decoded inbound query: the full message for building replies, and the
/// request handed to the resolution engine.
#[derive(Debug)]
pub struct ParsedRequest {
    pub message: Message,
    pub request: DnsRequest,
}

pub struct RequestParser;

impl RequestParser {
    /// Decode `raw` into a request. Only the first question is considered.
    pub fn parse(
        raw: &[u8],
        transport: Transport,
        client: SocketAddr,
    ) -> Result<ParsedRequest, DomainError> {
        let message = Message::from_vec(raw)
            .map_err(|e| DomainError::InvalidDnsMessage(e.to_string()))?;

        if message.message_type() != MessageType::Query {
            return Err(DomainError::InvalidDnsMessage(
                "expected a query, got a response".to_string(),
            ));
        }

        let question = message
            .queries()
            .first()
            .ok_or_else(|| DomainError::InvalidDnsMessage("no question section".to_string()))?;

        let query = DnsQuery::new(
            &RecordTypeMapper::name_to_string(question.name()),
            RecordTypeMapper::from_hickory(question.query_type()),
        );

        let request = DnsRequest::new(message.id(), query, transport, client, raw);

        Ok(ParsedRequest { message, request })
    }
}
