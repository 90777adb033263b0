use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Upper bound on TCP connections served at once.
    #[serde(default = "default_max_tcp_connections")]
    pub max_tcp_connections: usize,

    /// Seconds an idle TCP connection is kept open waiting for the next query.
    #[serde(default = "default_tcp_idle_timeout")]
    pub tcp_idle_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind_address: default_bind_address(),
            max_tcp_connections: default_max_tcp_connections(),
            tcp_idle_timeout: default_tcp_idle_timeout(),
        }
    }
}

fn default_port() -> u16 {
    53
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_max_tcp_connections() -> usize {
    512
}

fn default_tcp_idle_timeout() -> u64 {
    10
}
