use serde::{Deserialize, Serialize};
use std::net::{IpAddr, SocketAddr};
use std::path::Path;

use super::errors::ConfigError;
use super::local_records::{default_records, LocalDnsRecord};
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;
use crate::dns_protocol::UpstreamAddr;

const LOCAL_CONFIG_PATH: &str = "shimdns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/shimdns/config.toml";

/// Main configuration structure for shimdns
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    /// Listener configuration (port, bind address, TCP limits)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream resolver used when no local record matches
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Local records, matched in the order they are listed
    #[serde(default = "default_records")]
    pub records: Vec<LocalDnsRecord>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            upstream: UpstreamConfig::default(),
            logging: LoggingConfig::default(),
            records: default_records(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. shimdns.toml in current directory
    /// 3. /etc/shimdns/config.toml
    /// 4. Default configuration
    ///
    /// Command-line overrides are applied on top of whichever source won.
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path.map(str::to_string).or_else(Self::get_config_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.address = upstream;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    ///
    /// Record entries are checked separately when the record store is built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.upstream.timeout == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        if self.server.max_tcp_connections == 0 {
            return Err(ConfigError::Validation(
                "max_tcp_connections cannot be 0".to_string(),
            ));
        }

        self.bind_addr()?;
        self.upstream_addr()?;
        Ok(())
    }

    /// Socket address the listeners bind, from `bind_address` and `port`.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip: IpAddr = self.server.bind_address.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid bind address '{}': expected an IP address",
                self.server.bind_address
            ))
        })?;
        Ok(SocketAddr::new(ip, self.server.port))
    }

    pub fn upstream_addr(&self) -> Result<UpstreamAddr, ConfigError> {
        self.upstream
            .address
            .parse()
            .map_err(|e: crate::DomainError| ConfigError::Validation(e.to_string()))
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub port: Option<u16>,
    pub upstream: Option<String>,
    pub bind_address: Option<String>,
    pub log_level: Option<String>,
}
