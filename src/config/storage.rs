//! Quote storage configuration.

use serde::Deserialize;
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Storage backend selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Keep records in process memory.
    #[default]
    Memory,
    /// Append rows to a CSV file.
    Csv,
    /// Append one JSON record per line.
    Jsonl,
}

/// Where and how captured quotes are persisted.
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Output directory for file backends.
    #[serde(default = "default_directory")]
    pub directory: PathBuf,

    /// File name prefix; the session id and extension are appended.
    #[serde(default = "default_filename_prefix")]
    pub filename_prefix: String,

    /// Session identifier. Defaults to the local start time.
    #[serde(default)]
    pub session_id: Option<String>,
}

fn default_directory() -> PathBuf {
    PathBuf::from("data")
}

fn default_filename_prefix() -> String {
    "odds".into()
}

impl StorageConfig {
    pub(super) fn validate(&self) -> Result<()> {
        if self.backend == StorageBackend::Memory {
            return Ok(());
        }
        if self.directory.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.directory",
                reason: "cannot be empty for file backends".into(),
            }
            .into());
        }
        if self.filename_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "storage.filename_prefix",
                reason: "cannot be empty for file backends".into(),
            }
            .into());
        }
        if let Some(session) = &self.session_id {
            if session.trim().is_empty() || session.contains(['/', '\\']) {
                return Err(ConfigError::InvalidValue {
                    field: "storage.session_id",
                    reason: format!("'{session}' is not usable in a file name"),
                }
                .into());
            }
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            directory: default_directory(),
            filename_prefix: default_filename_prefix(),
            session_id: None,
        }
    }
}
