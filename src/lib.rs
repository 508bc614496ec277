//! Surebet - Cross-bookmaker arbitrage detection and stake allocation.
//!
//! This crate compares decimal odds quoted by several sources for the same
//! match and finds markets where backing every outcome at its best price
//! returns more than the total stake, whatever the result.
//!
//! # Architecture
//!
//! - **`domain`** - Pure, synchronous analysis core
//!   - `QuoteRecord` - Validated odds from one source for one match
//!   - `MarketCatalog` - Markets and outcomes to evaluate
//!   - `ArbitrageAnalyzer` - Best odds per outcome, margin, stake split
//!
//! - **`port`** - `QuoteStore` trait for persisting captured quotes
//! - **`adapter::store`** - Memory, CSV and JSON Lines stores
//!
//! # Modules
//!
//! - [`config`] - Configuration loading from TOML files
//! - [`domain`] - Quotes, markets, probability and stake math
//! - [`error`] - Error types for the crate
//! - [`port`] - Storage trait
//! - [`adapter`] - Storage implementations
//!
//! # Features
//!
//! - `testkit` - Expose test builders to integration tests
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use surebet::domain::{potential_profit, ArbitrageAnalyzer, QuoteRecord};
//!
//! let records = vec![
//!     QuoteRecord::match_winner("sisal", "Inter", "Milan", dec!(2.50), dec!(3.20), dec!(2.80))?,
//!     QuoteRecord::match_winner("snai", "Inter", "Milan", dec!(2.10), dec!(3.80), dec!(3.20))?,
//! ];
//!
//! let report = ArbitrageAnalyzer::default().find_opportunities(&records)?;
//! assert_eq!(report["1x2"].profit_margin_percent(), dec!(2.43));
//! assert_eq!(potential_profit(&report, dec!(1000))?["1x2"], dec!(24.30));
//! # Ok::<(), surebet::domain::DomainError>(())
//! ```

pub mod adapter;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
