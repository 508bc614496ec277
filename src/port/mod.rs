//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! # Available Ports
//!
//! - [`QuoteStore`] - Persistence for captured quote records

mod store;

pub use store::{QuoteStore, StoreSession};
