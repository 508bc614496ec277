//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`quote`] - Builders for quote records with a fixed capture time.
//! - [`config`] - Canonical analyzer and storage configurations.

pub mod config;
pub mod quote;
