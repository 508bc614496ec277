//! Configuration loading and validation.
//!
//! Every section is optional; a missing section takes its defaults. The
//! loaded configuration is validated before it is returned.
//!
//! # Example
//!
//! ```no_run
//! use surebet::config::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("surebet.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

mod logging;
mod storage;

pub use logging::{LogFormat, LoggingConfig};
pub use storage::{StorageBackend, StorageConfig};

use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::domain::AnalyzerConfig;
use crate::error::{ConfigError, Result};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Log level and output format.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Arbitrage analysis settings and market catalog.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Where captured quotes are persisted.
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.analyzer
            .validate()
            .map_err(|e| ConfigError::InvalidValue {
                field: "analyzer",
                reason: e.to_string(),
            })?;
        self.storage.validate()?;
        Ok(())
    }

    /// Initialize the tracing subscriber from the logging section.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
