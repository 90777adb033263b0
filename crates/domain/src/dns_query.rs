use super::RecordType;
use std::fmt;
use std::sync::Arc;

const MAX_LABEL_LEN: usize = 63;
const MAX_NAME_LEN: usize = 253;

/// The type asked for in a question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryType {
    Record(RecordType),
    Any,
    /// Any other type code. Never matches a local record.
    Other(u16),
}

impl QueryType {
    pub fn matches(&self, record_type: RecordType) -> bool {
        match self {
            QueryType::Any => true,
            QueryType::Record(rt) => *rt == record_type,
            QueryType::Other(_) => false,
        }
    }
}

impl From<RecordType> for QueryType {
    fn from(record_type: RecordType) -> Self {
        QueryType::Record(record_type)
    }
}

impl fmt::Display for QueryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryType::Record(rt) => write!(f, "{}", rt),
            QueryType::Any => write!(f, "ANY"),
            QueryType::Other(code) => write!(f, "TYPE{}", code),
        }
    }
}

/// The question of an incoming query, with its name normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsQuery {
    pub name: Arc<str>,
    pub query_type: QueryType,
}

impl DnsQuery {
    pub fn new(name: &str, query_type: impl Into<QueryType>) -> Self {
        Self {
            name: normalize_name(name).into(),
            query_type: query_type.into(),
        }
    }
}

impl fmt::Display for DnsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[{}]", self.name, self.query_type)
    }
}

/// Lowercases a domain name and strips a single trailing root dot, so that
/// `EXAMPLE.COM`, `example.com` and `example.com.` compare equal.
pub fn normalize_name(name: &str) -> String {
    name.strip_suffix('.').unwrap_or(name).to_ascii_lowercase()
}

pub(crate) fn validate_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("name is empty".to_string());
    }
    if name.len() > MAX_NAME_LEN {
        return Err(format!("name longer than {} bytes", MAX_NAME_LEN));
    }
    for label in name.split('.') {
        if label.is_empty() {
            return Err("empty label".to_string());
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(format!("label '{}' longer than {} bytes", label, MAX_LABEL_LEN));
        }
    }
    Ok(())
}
