//! JSON Lines quote store.

use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use crate::domain::QuoteRecord;
use crate::error::StorageError;
use crate::port::QuoteStore;

/// Appends one JSON document per quote record.
///
/// Unlike the CSV store the output can be read back with
/// [`JsonlQuoteStore::load`], which runs full record validation again.
#[derive(Debug)]
pub struct JsonlQuoteStore {
    path: PathBuf,
    initialized: Mutex<bool>,
}

impl JsonlQuoteStore {
    /// Create a store writing to `<directory>/<prefix>_<session_id>.jsonl`.
    pub fn new(directory: impl AsRef<Path>, prefix: &str, session_id: &str) -> Self {
        Self::at_path(
            directory
                .as_ref()
                .join(format!("{prefix}_{session_id}.jsonl")),
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

    /// Read every record from a JSON Lines file. Blank lines are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file cannot be read and
    /// [`StorageError::Malformed`] with the 1-based line number of the
    /// first line that is not a valid record.
    pub fn load(path: impl AsRef<Path>) -> Result<Vec<QuoteRecord>, StorageError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| StorageError::io(path, e))?;

        let mut records = Vec::new();
        for (idx, line) in BufReader::new(file).lines().enumerate() {
            let line = line.map_err(|e| StorageError::io(path, e))?;
            if line.trim().is_empty() {
                continue;
            }
            let record =
                serde_json::from_str(&line).map_err(|source| StorageError::Malformed {
                    path: path.display().to_string(),
                    line: idx + 1,
                    source,
                })?;
            records.push(record);
        }
        Ok(records)
    }

    fn append(&self, records: &[QuoteRecord]) -> Result<(), StorageError> {
        let initialized = self.initialized.lock();
        if !*initialized {
            return Err(StorageError::NotInitialized);
        }
        if records.is_empty() {
            return Ok(());
        }

        let mut buf = Vec::new();
        for record in records {
            serde_json::to_writer(&mut buf, record).map_err(StorageError::Encode)?;
            buf.push(b'\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;
        file.write_all(&buf)
            .map_err(|e| StorageError::io(&self.path, e))?;

        debug!(records = records.len(), path = %self.path.display(), "Quotes written");
        Ok(())
    }
}

impl QuoteStore for JsonlQuoteStore {
    fn initialize(&self) -> Result<(), StorageError> {
        let mut initialized = self.initialized.lock();
        if *initialized {
            return Ok(());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
        }
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| StorageError::io(&self.path, e))?;

        *initialized = true;
        info!(path = %self.path.display(), "JSONL quote store initialized");
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
            info!(path = %self.path.display(), "JSONL quote store closed");
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        *self.initialized.lock()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use rust_decimal_macros::dec;

    fn record(source: &str) -> QuoteRecord {
        QuoteRecord::builder()
            .timestamp(Utc.with_ymd_and_hms(2024, 5, 4, 18, 30, 0).unwrap())
            .source(source)
            .match_id("inter_vs_milan")
            .teams("Inter", "Milan")
            .odds("1x2", "home", dec!(2.10))
            .odds("1x2", "draw", dec!(3.40))
            .odds("1x2", "away", dec!(3.20))
            .build()
            .unwrap()
    }

    #[test]
    fn written_records_load_back() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlQuoteStore::new(dir.path(), "odds", "s1");
        let records = vec![record("sisal"), record("snai"), record("eurobet")];

        store.initialize().unwrap();
        store.store(&records[0]).unwrap();
        store.store_batch(&records[1..]).unwrap();
        store.store_batch(&[]).unwrap();
        store.close().unwrap();

        assert_eq!(JsonlQuoteStore::load(store.path()).unwrap(), records);
    }

    #[test]
    fn load_reports_malformed_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.jsonl");
        let good = serde_json::to_string(&record("sisal")).unwrap();
        fs::write(&path, format!("{good}\n\n{{\"not\": \"a record\"}}\n")).unwrap();

        match JsonlQuoteStore::load(&path) {
            Err(StorageError::Malformed { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected malformed error, got {other:?}"),
        }
    }

    #[test]
    fn load_revalidates_odds() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tampered.jsonl");
        let mut value = serde_json::to_value(record("sisal")).unwrap();
        value["markets"]["1x2"]["home"] = serde_json::json!("0");
        fs::write(&path, format!("{value}\n")).unwrap();

        assert!(matches!(
            JsonlQuoteStore::load(&path),
            Err(StorageError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn store_before_initialize_fails() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonlQuoteStore::new(dir.path(), "odds", "s1");
        assert!(matches!(
            store.store(&record("sisal")),
            Err(StorageError::NotInitialized)
        ));
    }
}
