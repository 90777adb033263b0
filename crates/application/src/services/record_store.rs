use shimdns_domain::{DnsQuery, DnsRecord, DomainError, LocalDnsRecord};
use tracing::debug;

/// Ordered, immutable set of local records.
///
/// Built once at startup; lookups take `&self` and need no locking.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<DnsRecord>,
}

impl RecordStore {
    pub fn new(records: Vec<DnsRecord>) -> Self {
        Self { records }
    }

    /// Build the store from configuration entries, keeping their order.
    ///
    /// Fails on the first entry with an unknown type or malformed data.
    pub fn load(entries: &[LocalDnsRecord]) -> Result<Self, DomainError> {
        let records = entries
            .iter()
            .map(LocalDnsRecord::to_record)
            .collect::<Result<Vec<_>, _>>()?;

        debug!(records = records.len(), "Record store loaded");
        Ok(Self::new(records))
    }

    /// Every record matching `query`, in store order.
    pub fn find(&self, query: &DnsQuery) -> Vec<&DnsRecord> {
        self.records.iter().filter(|r| r.matches(query)).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DnsRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
