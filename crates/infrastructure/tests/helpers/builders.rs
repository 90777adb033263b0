#![allow(dead_code)]
use hickory_proto::op::{Message, MessageType, OpCode, Query};
use hickory_proto::rr::DNSClass;
use hickory_proto::serialize::binary::BinEncodable;
use shimdns_application::services::RecordStore;
use shimdns_application::use_cases::HandleDnsQueryUseCase;
use shimdns_domain::config::local_records::default_records;
use shimdns_domain::{QueryType, RecordType, UpstreamAddr};
use shimdns_infrastructure::dns::{DnsForwarder, DnsServerHandler, RecordTypeMapper};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub struct QueryBuilder;

impl QueryBuilder {
    pub fn a(name: &str) -> Vec<u8> {
        Self::of(name, RecordType::A.into())
    }

    pub fn any(name: &str) -> Vec<u8> {
        Self::of(name, QueryType::Any)
    }

    /// Recursive query with a random id and a single question.
    pub fn of(name: &str, query_type: QueryType) -> Vec<u8> {
        Self::with_id(fastrand::u16(..), name, query_type)
    }

    pub fn with_id(id: u16, name: &str, query_type: QueryType) -> Vec<u8> {
        let mut query = Query::new();
        query.set_name(RecordTypeMapper::name_from_str(name).unwrap());
        query.set_query_type(RecordTypeMapper::to_hickory(&query_type));
        query.set_query_class(DNSClass::IN);

        let mut message = Message::new(id, MessageType::Query, OpCode::Query);
        message.set_recursion_desired(true);
        message.add_query(query);
        message.to_bytes().unwrap()
    }
}

/// Handler over the default record set, forwarding misses to `upstream`.
pub fn handler_for(upstream: SocketAddr, timeout: Duration) -> DnsServerHandler {
    let store = RecordStore::load(&default_records()).unwrap();
    let forwarder = Arc::new(DnsForwarder::new(UpstreamAddr::Resolved(upstream), timeout));
    let use_case = Arc::new(HandleDnsQueryUseCase::new(Arc::new(store), forwarder));
    DnsServerHandler::new(use_case)
}

pub fn client_addr() -> SocketAddr {
    "127.0.0.1:40000".parse().unwrap()
}
