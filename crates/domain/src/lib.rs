//! shimdns Domain Layer
pub mod config;
pub mod dns_protocol;
pub mod dns_query;
pub mod dns_record;
pub mod dns_request;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, LocalDnsRecord};
pub use dns_protocol::{Transport, UpstreamAddr, UPSTREAM_PORT};
pub use dns_query::{normalize_name, DnsQuery, QueryType};
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use dns_request::DnsRequest;
pub use errors::DomainError;
