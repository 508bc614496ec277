//! Long-format CSV quote store.
//!
//! Each quoted price becomes one row:
//!
//! ```text
//! timestamp,source,match_id,home_team,away_team,market,outcome,odds
//! ```
//!
//! A record with no odds at all still gets a single row with empty
//! `market`, `outcome` and `odds` columns so the capture is not lost.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::SecondsFormat;
use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::QuoteRecord;
use crate::error::StorageError;
use crate::port::QuoteStore;

/// Column header written once at the top of every file.
pub const CSV_HEADER: &str = "timestamp,source,match_id,home_team,away_team,market,outcome,odds";

/// Appends quote records to a CSV file.
#[derive(Debug)]
pub struct CsvQuoteStore {
    path: PathBuf,
    initialized: Mutex<bool>,
}

impl CsvQuoteStore {
    /// Create a store writing to `<directory>/<prefix>_<session_id>.csv`.
    ///
    /// Nothing touches the filesystem until [`QuoteStore::initialize`].
    pub fn new(directory: impl AsRef<Path>, prefix: &str, session_id: &str) -> Self {
        Self::at_path(
            directory
                .as_ref()
                .join(format!("{prefix}_{session_id}.csv")),
        )
    }

    /// Create a store writing to an explicit file path.
    pub fn at_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            initialized: Mutex::new(false),
        }
    }

    /// Get the output file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn append(&self, records: &[QuoteRecord]) -> Result<(), StorageError> {
        let initialized = self.initialized.lock();
        if !*initialized {
            return Err(StorageError::NotInitialized);
        }
        if records.is_empty() {
            return Ok(());
        }

        let mut buf = String::new();
        for record in records {
            write_rows(&mut buf, record);
        }

        let mut file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.write_all(buf.as_bytes())
            .map_err(|e| StorageError::io(&self.path, e))?;

        debug!(records = records.len(), path = %self.path.display(), "Quotes written");
        Ok(())
    }
}

impl QuoteStore for CsvQuoteStore {
    fn initialize(&self) -> Result<(), StorageError> {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        if !self.path.exists() {
            fs::write(&self.path, format!("{CSV_HEADER}\n"))
                .map_err(|e| StorageError::io(&self.path, e))?;
        }

        *initialized = true;
        info!(path = %self.path.display(), "CSV quote store initialized");
        Ok(())
    }

    fn store(&self, record: &QuoteRecord) -> Result<(), StorageError> {
        self.append(std::slice::from_ref(record))
    }

    fn store_batch(&self, records: &[QuoteRecord]) -> Result<(), StorageError> {
        self.append(records)
    }

    fn close(&self) -> Result<(), StorageError> {
        let mut initialized = self.initialized.lock();
        if *initialized {
            *initialized = false;
            info!(path = %self.path.display(), "CSV quote store closed");
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        *self.initialized.lock()
    }
}

fn write_rows(buf: &mut String, record: &QuoteRecord) {
    let prefix = [
        record
            .timestamp()
            .to_rfc3339_opts(SecondsFormat::Micros, true),
        escape(record.source().as_str()),
        escape(record.match_id().as_str()),
        escape(record.home_team()),
        escape(record.away_team()),
    ]
    .join(",");

    if record.odds_count() == 0 {
        buf.push_str(&format!("{prefix},,,\n"));
        return;
    }

    for (market, outcomes) in record.markets() {
        for (outcome, odds) in outcomes {
            buf.push_str(&format!(
                "{prefix},{},{},{odds}\n",
                escape(market),
                escape(outcome)
            ));
        }
    }
}

/// Quote a field if it contains a delimiter, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
