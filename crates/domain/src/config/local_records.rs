use crate::dns_record::DnsRecord;
use crate::errors::DomainError;
use serde::{Deserialize, Serialize};

/// One `[[records]]` entry of the configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LocalDnsRecord {
    pub name: String,

    pub record_type: String,

    pub value: String,

    /// MX preference; ignored for other types.
    #[serde(default)]
    pub preference: Option<u16>,

    #[serde(default)]
    pub ttl: Option<u32>,
}

impl LocalDnsRecord {
    pub fn new(name: &str, record_type: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            record_type: record_type.to_string(),
            value: value.to_string(),
            preference: None,
            ttl: None,
        }
    }

    pub fn ttl_or_default(&self) -> u32 {
        self.ttl.unwrap_or(DnsRecord::DEFAULT_TTL)
    }

    pub fn to_record(&self) -> Result<DnsRecord, DomainError> {
        DnsRecord::parse(
            &self.name,
            &self.record_type,
            &self.value,
            self.preference,
            self.ttl_or_default(),
        )
    }
}

/// Records served when the configuration does not list any.
pub fn default_records() -> Vec<LocalDnsRecord> {
    vec![
        LocalDnsRecord::new("example.com", "A", "1.2.3.4"),
        LocalDnsRecord::new("test.com", "A", "4.3.3.4"),
        LocalDnsRecord::new("test.com", "MX", "Hola Mundo Test"),
        LocalDnsRecord::new("redesce.com", "TXT", "Hola Mundo Redes"),
        LocalDnsRecord::new("redesce.com", "A", "99.88.77.66"),
        LocalDnsRecord::new(
            "redesce.com",
            "AAAA",
            "2001:0db8:85a3:0000:0000:8a2e:0370:7334",
        ),
        LocalDnsRecord::new("tecdigital.tec.ac.cr", "TXT", "Record del TD hack"),
        LocalDnsRecord::new("tecdigital.tec.ac.cr", "A", "35.232.39.227"),
        LocalDnsRecord::new(
            "tecdigital.tec.ac.cr",
            "AAAA",
            "2001:0db8:85a3:0000:0000:0000:0000:0000",
        ),
    ]
}
