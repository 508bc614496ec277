//! Store port for persisting quote records.
//!
//! The analysis core never persists anything itself; callers pick a
//! [`QuoteStore`] implementation and feed it the records they capture.
//!
//! # Implementation Notes
//!
//! - Implementations must be thread-safe (`Send + Sync`)
//! - `store` and `store_batch` fail with [`StorageError::NotInitialized`]
//!   until `initialize` has been called
//! - `initialize` and `close` are idempotent
//! - Storing an empty batch is a no-op
//!
//! [`StorageError::NotInitialized`]: crate::error::StorageError::NotInitialized

use std::ops::Deref;

use tracing::warn;

use crate::domain::QuoteRecord;
use crate::error::StorageError;

/// Storage operations for quote records.
pub trait QuoteStore: Send + Sync {
    /// Prepare the backend (create files, directories, ...).
    fn initialize(&self) -> Result<(), StorageError>;

    /// Persist a single record.
    fn store(&self, record: &QuoteRecord) -> Result<(), StorageError>;

    /// Persist several records in one operation.
    fn store_batch(&self, records: &[QuoteRecord]) -> Result<(), StorageError>;

    /// Release backend resources. Safe to call more than once.
    fn close(&self) -> Result<(), StorageError>;

    /// Whether `initialize` has been called and `close` has not.
    fn is_initialized(&self) -> bool;
}

impl<S: QuoteStore + ?Sized> QuoteStore for Box<S> {
    fn initialize(&self) -> Result<(), StorageError> {
        (**self).initialize()
    }

    fn store(&self, record: &QuoteRecord) -> Result<(), StorageError> {
        (**self).store(record)
    }

    fn store_batch(&self, records: &[QuoteRecord]) -> Result<(), StorageError> {
        (**self).store_batch(records)
    }

    fn close(&self) -> Result<(), StorageError> {
        (**self).close()
    }

    fn is_initialized(&self) -> bool {
        (**self).is_initialized()
    }
}

/// A store that is initialized on open and closed when dropped.
///
/// # Example
///
/// ```
/// use surebet::adapter::store::MemoryQuoteStore;
/// use surebet::port::{QuoteStore, StoreSession};
///
/// let store = MemoryQuoteStore::new();
/// {
///     let session = StoreSession::open(&store).unwrap();
///     assert!(session.is_initialized());
/// }
/// assert!(!store.is_initialized());
/// ```
pub struct StoreSession<'a, S: QuoteStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: QuoteStore + ?Sized> StoreSession<'a, S> {
    /// Initialize `store` and wrap it.
    pub fn open(store: &'a S) -> Result<Self, StorageError> {
        store.initialize()?;
        Ok(Self { store })
    }

    /// Close the store now, reporting any error.
    pub fn finish(self) -> Result<(), StorageError> {
        // Drop will call close() again, which is a no-op.
        self.store.close()
    }
}

impl<S: QuoteStore + ?Sized> Deref for StoreSession<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.store
    }
}

impl<S: QuoteStore + ?Sized> Drop for StoreSession<'_, S> {
    fn drop(&mut self) {
        if let Err(e) = self.store.close() {
            warn!(error = %e, "Failed to close quote store");
        }
    }
}
