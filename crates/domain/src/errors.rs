use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Upstream {server} unavailable: {reason}")]
    UpstreamUnavailable { server: String, reason: String },

    #[error("Failed to serialize DNS message: {0}")]
    Serialization(String),
}

impl DomainError {
    pub fn upstream(server: impl ToString, reason: impl Into<String>) -> Self {
        DomainError::UpstreamUnavailable {
            server: server.to_string(),
            reason: reason.into(),
        }
    }

    pub fn is_upstream_unavailable(&self) -> bool {
        matches!(self, DomainError::UpstreamUnavailable { .. })
    }
}
