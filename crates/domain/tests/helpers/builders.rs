#![allow(dead_code)]
use shimdns_domain::{DnsRecord, LocalDnsRecord};

pub struct LocalDnsRecordBuilder {
    name: String,
    record_type: String,
    value: String,
    preference: Option<u16>,
    ttl: Option<u32>,
}

impl LocalDnsRecordBuilder {
    pub fn new() -> Self {
        Self {
            name: "example.com".to_string(),
            record_type: "A".to_string(),
            value: "192.0.2.1".to_string(),
            preference: None,
            ttl: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn record_type(mut self, record_type: &str) -> Self {
        self.record_type = record_type.to_string();
        self
    }

    pub fn value(mut self, value: &str) -> Self {
        self.value = value.to_string();
        self
    }

    pub fn preference(mut self, preference: u16) -> Self {
        self.preference = Some(preference);
        self
    }

    pub fn ttl(mut self, ttl: u32) -> Self {
        self.ttl = Some(ttl);
        self
    }

    pub fn build(self) -> LocalDnsRecord {
        LocalDnsRecord {
            name: self.name,
            record_type: self.record_type,
            value: self.value,
            preference: self.preference,
            ttl: self.ttl,
        }
    }

    pub fn to_record(self) -> DnsRecord {
        self.build().to_record().unwrap()
    }
}

impl Default for LocalDnsRecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}
