use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::router::RouterConfig;
use super::zones::ForwardZone;

/// Main configuration structure for the relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Routing and lookup bounds
    #[serde(default)]
    pub router: RouterConfig,

    /// Upstream servers for the default route
    #[serde(default)]
    pub default_servers: Vec<String>,

    /// Per-domain forwarding zones
    #[serde(default)]
    pub forward_zones: Vec<ForwardZone>,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. relay-dns.toml in current directory
    /// 3. /etc/relay-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            Self::from_file(path)
        } else if std::path::Path::new("relay-dns.toml").exists() {
            Self::from_file("relay-dns.toml")
        } else if std::path::Path::new("/etc/relay-dns/config.toml").exists() {
            Self::from_file("/etc/relay-dns/config.toml")
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.router.max_name_length == 0 {
            return Err(ConfigError::Validation(
                "max_name_length cannot be 0".to_string(),
            ));
        }

        if self.default_servers.is_empty() && self.forward_zones.is_empty() {
            return Err(ConfigError::Validation(
                "No upstream servers configured".to_string(),
            ));
        }

        for zone in &self.forward_zones {
            zone.validate().map_err(ConfigError::Validation)?;
        }

        Ok(())
    }
}
