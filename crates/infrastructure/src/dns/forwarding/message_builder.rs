//! DNS Message Builder
//!
//! Constructs DNS reply messages in wire format using `hickory-proto`: replies
//! synthesized from local records and answerless error replies.

use super::record_type_map::RecordTypeMapper;
use hickory_proto::op::{Message, MessageType, ResponseCode};
use hickory_proto::serialize::binary::{BinEncodable, BinEncoder};
use shimdns_domain::{DnsRecord, DomainError};

/// Builds DNS messages in wire format
pub struct MessageBuilder;

impl MessageBuilder {
    /// Authoritative reply carrying `records` as answers, in order.
    ///
    /// Echoes the ID, opcode, RD flag and question section of `request`.
    pub fn build_local_response(
        request: &Message,
        records: &[DnsRecord],
    ) -> Result<Vec<u8>, DomainError> {
        let mut response = Self::response_for(request);
        response.set_authoritative(true);

        for record in records {
            response.add_answer(RecordTypeMapper::to_record(record)?);
        }

        Self::serialize_message(&response)
    }

    /// Answerless reply with the given response code, e.g. SERVFAIL.
    pub fn build_error_response(
        request: &Message,
        response_code: ResponseCode,
    ) -> Result<Vec<u8>, DomainError> {
        let mut response = Self::response_for(request);
        response.set_response_code(response_code);
        Self::serialize_message(&response)
    }

    fn response_for(request: &Message) -> Message {
        let mut response = Message::new(request.id(), MessageType::Response, request.op_code());
        response.set_recursion_desired(request.recursion_desired());
        response.set_recursion_available(true);
        for query in request.queries() {
            response.add_query(query.clone());
        }
        response
    }

    /// Serialize a Message to wire format bytes
    fn serialize_message(message: &Message) -> Result<Vec<u8>, DomainError> {
        let mut buf = Vec::with_capacity(512);
        let mut encoder = BinEncoder::new(&mut buf);

        message
            .emit(&mut encoder)
            .map_err(|e| DomainError::Serialization(e.to_string()))?;

        Ok(buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hickory_proto::op::{OpCode, Query};
    use hickory_proto::rr::{Name, RecordType as HickoryRecordType};
    use shimdns_domain::{RecordData, RecordType};
    use std::str::FromStr;

    fn request(id: u16, recursion_desired: bool) -> Message {
        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(recursion_desired);
        message.add_query(Query::query(
            Name::from_str("test.com.").unwrap(),
            HickoryRecordType::A,
        ));
        message
    }

    #[test]
    fn test_local_response_header_flags() {
        let record = DnsRecord::new("test.com", RecordData::A("4.3.3.4".parse().unwrap()), 5).unwrap();
        let bytes = MessageBuilder::build_local_response(&request(0x1234, false), &[record]).unwrap();

        assert_eq!(bytes[0..2], [0x12, 0x34]);
        assert_eq!(bytes[2] & 0x80, 0x80, "QR");
        assert_eq!(bytes[2] & 0x04, 0x04, "AA");
        assert_eq!(bytes[2] & 0x01, 0x00, "RD not set by the request");
        assert_eq!(u16::from_be_bytes([bytes[6], bytes[7]]), 1);
        assert_eq!(record_type_of_first_question(&bytes), RecordType::A);
    }

    #[test]
    fn test_error_response_is_not_authoritative() {
        let bytes =
            MessageBuilder::build_error_response(&request(7, true), ResponseCode::ServFail).unwrap();

        assert_eq!(bytes[2] & 0x04, 0x00, "AA");
        assert_eq!(bytes[2] & 0x01, 0x01, "RD copied");
        assert_eq!(bytes[3] & 0x0f, 2, "RCODE SERVFAIL");
        assert_eq!(u16::from_be_bytes([bytes[6], bytes[7]]), 0);
    }

    fn record_type_of_first_question(bytes: &[u8]) -> RecordType {
        let message = Message::from_vec(bytes).unwrap();
        match message.queries()[0].query_type() {
            HickoryRecordType::A => RecordType::A,
            other => panic!("unexpected question type {:?}", other),
        }
    }
}
