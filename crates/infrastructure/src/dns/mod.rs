pub mod forwarding;
pub mod server;
pub mod transport;

pub use forwarding::{DnsForwarder, MessageBuilder, RecordTypeMapper, RequestParser};
pub use server::DnsServerHandler;
