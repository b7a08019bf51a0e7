//! # Service configuration
//!
//! ```toml
//! [transport]
//! request_timeout_ms = 10000
//! stream_timeout_ms = 60000
//!
//! [zcl]
//! reply_timeout_ms = 10000
//!
//! [logging]
//! format = "json"
//! level = "debug"
//! ```
//!
//! Every table and key is optional.

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::logging::{LogFormat, LogLevel};
use crate::{Error, Result};

/// Service configuration
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Command multiplexer settings
    pub transport: TransportConfig,
    /// Cluster library settings
    pub zcl: ClusterLibraryConfig,
    /// Log output settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Config = toml::from_str(text).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<()> {
        if self.transport.request_timeout_ms == 0 {
            return Err(Error::Config("request_timeout_ms must be positive".into()));
        }
        if self.transport.stream_timeout_ms == 0 {
            return Err(Error::Config("stream_timeout_ms must be positive".into()));
        }
        if self.zcl.reply_timeout_ms == 0 {
            return Err(Error::Config("reply_timeout_ms must be positive".into()));
        }
        Ok(())
    }
}

/// Command multiplexer settings
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TransportConfig {
    /// Time to wait for the response to a command
    pub request_timeout_ms: u64,
    /// Time to wait for the callbacks of a streaming command
    pub stream_timeout_ms: u64,
}

impl TransportConfig {
    /// Time to wait for the response to a command
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }

    /// Time to wait for the callbacks of a streaming command
    pub fn stream_timeout(&self) -> Duration {
        Duration::from_millis(self.stream_timeout_ms)
    }
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            stream_timeout_ms: 60_000,
        }
    }
}

/// Cluster library settings
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClusterLibraryConfig {
    /// Time to wait for the reply to a cluster request
    pub reply_timeout_ms: u64,
}

impl ClusterLibraryConfig {
    /// Time to wait for the reply to a cluster request
    pub fn reply_timeout(&self) -> Duration {
        Duration::from_millis(self.reply_timeout_ms)
    }
}

impl Default for ClusterLibraryConfig {
    fn default() -> Self {
        Self {
            reply_timeout_ms: 10_000,
        }
    }
}

/// Log output settings
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Line format
    pub format: LogFormat,
    /// Most verbose level written
    pub level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_configuration() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.transport.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.transport.stream_timeout(), Duration::from_secs(60));
        assert_eq!(config.zcl.reply_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn full_configuration() {
        let config = Config::from_toml_str(
            r#"
            [transport]
            request_timeout_ms = 2500
            stream_timeout_ms = 30000

            [zcl]
            reply_timeout_ms = 5000

            [logging]
            format = "json"
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.transport.request_timeout_ms, 2500);
        assert_eq!(config.transport.stream_timeout_ms, 30_000);
        assert_eq!(config.zcl.reply_timeout_ms, 5000);
        assert_eq!(config.logging.format, LogFormat::Json);
        assert_eq!(config.logging.level, LogLevel::Debug);
    }

    #[test]
    fn reject_unknown_keys() {
        let result = Config::from_toml_str("[transport]\nretries = 3\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn reject_zero_timeout() {
        let result = Config::from_toml_str("[zcl]\nreply_timeout_ms = 0\n");
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn missing_file() {
        let result = Config::from_file("/nonexistent/melis.toml");
        assert!(matches!(result, Err(Error::Config(_))));
    }
}
