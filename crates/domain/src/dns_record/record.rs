use super::RecordType;
use crate::dns_query::{normalize_name, validate_name, DnsQuery};
use crate::errors::DomainError;
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};
use std::sync::Arc;

/// Type-specific payload of a local record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    A(Ipv4Addr),
    AAAA(Ipv6Addr),
    MX { preference: u16, exchange: Arc<str> },
    TXT(Arc<str>),
}

impl RecordData {
    pub fn record_type(&self) -> RecordType {
        match self {
            RecordData::A(_) => RecordType::A,
            RecordData::AAAA(_) => RecordType::AAAA,
            RecordData::MX { .. } => RecordType::MX,
            RecordData::TXT(_) => RecordType::TXT,
        }
    }
}

impl fmt::Display for RecordData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordData::A(ip) => write!(f, "{}", ip),
            RecordData::AAAA(ip) => write!(f, "{}", ip),
            RecordData::MX {
                preference,
                exchange,
            } => write!(f, "{} {}", preference, exchange),
            RecordData::TXT(text) => write!(f, "\"{}\"", text),
        }
    }
}

/// A single local record. The owner name is stored normalized
/// (lowercase, no trailing dot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: Arc<str>,

    pub data: RecordData,

    pub ttl: u32,
}

impl DnsRecord {
    pub const DEFAULT_TTL: u32 = 5;

    pub const DEFAULT_MX_PREFERENCE: u16 = 10;

    pub fn new(name: &str, data: RecordData, ttl: u32) -> Result<Self, DomainError> {
        let normalized = normalize_name(name);
        validate_name(&normalized).map_err(|e| {
            DomainError::ConfigError(format!("Invalid record name '{}': {}", name, e))
        })?;

        if let RecordData::MX { exchange, .. } = &data {
            validate_name(&normalize_name(exchange)).map_err(|e| {
                DomainError::ConfigError(format!("Invalid MX exchange '{}': {}", exchange, e))
            })?;
        }

        Ok(Self {
            name: normalized.into(),
            data,
            ttl,
        })
    }

    /// Build a record from its textual configuration form.
    ///
    /// Unknown record types and malformed data are configuration bugs and
    /// are reported as [`DomainError::ConfigError`].
    pub fn parse(
        name: &str,
        record_type: &str,
        value: &str,
        preference: Option<u16>,
        ttl: u32,
    ) -> Result<Self, DomainError> {
        let record_type: RecordType = record_type
            .parse()
            .map_err(|e: String| DomainError::ConfigError(format!("{} (record '{}')", e, name)))?;

        let data = match record_type {
            RecordType::A => RecordData::A(value.trim().parse().map_err(|_| {
                DomainError::ConfigError(format!("Invalid IPv4 address '{}' for {}", value, name))
            })?),
            RecordType::AAAA => RecordData::AAAA(value.trim().parse().map_err(|_| {
                DomainError::ConfigError(format!("Invalid IPv6 address '{}' for {}", value, name))
            })?),
            RecordType::MX => RecordData::MX {
                preference: preference.unwrap_or(Self::DEFAULT_MX_PREFERENCE),
                exchange: value.into(),
            },
            RecordType::TXT => RecordData::TXT(value.into()),
        };

        Self::new(name, data, ttl)
    }

    pub fn record_type(&self) -> RecordType {
        self.data.record_type()
    }

    /// Exact owner match (no wildcard or suffix matching); the type must be
    /// equal unless the query asks for `ANY`.
    pub fn matches(&self, query: &DnsQuery) -> bool {
        *self.name == *query.name && query.query_type.matches(self.record_type())
    }
}

impl fmt::Display for DnsRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}. {} IN {} {}",
            self.name,
            self.ttl,
            self.record_type(),
            self.data
        )
    }
}
