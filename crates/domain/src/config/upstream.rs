use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Upstream resolver, an IP address or hostname. Queried on port 53.
    #[serde(default = "default_address")]
    pub address: String,

    /// Per-query timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            timeout: default_timeout(),
        }
    }
}

fn default_address() -> String {
    "8.8.8.8".to_string()
}

fn default_timeout() -> u64 {
    5
}
