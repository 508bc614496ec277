//! Quote store implementations.
//!
//! - [`MemoryQuoteStore`] - in-process, for tests and one-shot analysis
//! - [`CsvQuoteStore`] - long-format CSV, one row per quoted price
//! - [`JsonlQuoteStore`] - one JSON record per line, readable back

mod csv;
mod jsonl;
mod memory;

pub use csv::{CsvQuoteStore, CSV_HEADER};
pub use jsonl::JsonlQuoteStore;
pub use memory::MemoryQuoteStore;

use chrono::Local;
use tracing::debug;

use crate::config::{StorageBackend, StorageConfig};
use crate::port::QuoteStore;

/// Session identifier from the local clock, e.g. `20240504_183000`.
pub fn session_id() -> String {
    Local::now().format("%Y%m%d_%H%M%S").to_string()
}

/// Build the store selected by `config`.
///
/// The store is returned uninitialized. File-backed stores use
/// `config.session_id` when set, or a fresh [`session_id`] otherwise.
pub fn open_store(config: &StorageConfig) -> Box<dyn QuoteStore> {
    let session = config.session_id.clone().unwrap_or_else(session_id);
    debug!(backend = ?config.backend, session = %session, "Opening quote store");

    match config.backend {
        StorageBackend::Memory => Box::new(MemoryQuoteStore::new()),
        StorageBackend::Csv => Box::new(CsvQuoteStore::new(
            &config.directory,
            &config.filename_prefix,
            &session,
        )),
        StorageBackend::Jsonl => Box::new(JsonlQuoteStore::new(
            &config.directory,
            &config.filename_prefix,
            &session,
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_has_timestamp_shape() {
        let id = session_id();
        assert_eq!(id.len(), 15);
        assert_eq!(id.as_bytes()[8], b'_');
        assert!(id.chars().filter(|c| *c != '_').all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn open_store_honors_backend() {
        let dir = tempfile::tempdir().unwrap();
        let config = StorageConfig {
            backend: StorageBackend::Csv,
            directory: dir.path().to_path_buf(),
            filename_prefix: "odds".into(),
            session_id: Some("fixed".into()),
        };

        let store = open_store(&config);
        store.initialize().unwrap();
        store.close().unwrap();

        assert!(dir.path().join("odds_fixed.csv").exists());
    }
}
