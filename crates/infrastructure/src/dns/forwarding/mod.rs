pub mod forwarder;
pub mod message_builder;
pub mod record_type_map;
pub mod request_parser;

pub use forwarder::DnsForwarder;
pub use message_builder::MessageBuilder;
pub use record_type_map::RecordTypeMapper;
pub use request_parser::{ParsedRequest, RequestParser};
