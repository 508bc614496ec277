//! In-memory quote store.

use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::info;

use crate::domain::QuoteRecord;
use crate::error::StorageError;
use crate::port::QuoteStore;

/// Keeps stored records in memory. Records survive `close`.
#[derive(Debug, Default)]
pub struct MemoryQuoteStore {
    records: RwLock<Vec<QuoteRecord>>,
    initialized: AtomicBool,
}

impl MemoryQuoteStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record, in insertion order.
    pub fn records(&self) -> Vec<QuoteRecord> {
        self.records.read().clone()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Check if nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    fn ensure_initialized(&self) -> Result<(), StorageError> {
        if self.initialized.load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(StorageError::NotInitialized)
        }
    }
}

impl QuoteStore for MemoryQuoteStore {
    fn initialize(&self) -> Result<(), StorageError> {
        if !self.initialized.swap(true, Ordering::AcqRel) {
            info!("Memory quote store initialized");
        }
        Ok(())
    }

    fn store(&self, record: &QuoteRecord) -> Result<(), StorageError> {
        self.ensure_initialized()?;
        self.records.write().push(record.clone());
        Ok(())
    }

    fn store_batch(&self, records: &[QuoteRecord]) -> Result<(), StorageError> {
        self.ensure_initialized()?;
        self.records.write().extend_from_slice(records);
        Ok(())
    }

    fn close(&self) -> Result<(), StorageError> {
        if self.initialized.swap(false, Ordering::AcqRel) {
            info!(records = self.len(), "Memory quote store closed");
        }
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Acquire)
    }
}
