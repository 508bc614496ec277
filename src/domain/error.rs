//! Domain validation errors for quotes and the arbitrage math.
//!
//! Quote invariants are checked once, when a [`QuoteRecord`] is built.
//! The math helpers check their own preconditions on every call and never
//! clamp or coerce their inputs.
//!
//! # Examples
//!
//! ```
//! use surebet::domain::{DomainError, QuoteRecord, QuoteViolation};
//! use rust_decimal_macros::dec;
//!
//! let result = QuoteRecord::builder()
//!     .source("")
//!     .match_id("inter_vs_milan")
//!     .teams("Inter", "Milan")
//!     .odds("1x2", "home", dec!(2.10))
//!     .build();
//!
//! assert!(matches!(
//!     result,
//!     Err(DomainError::InvalidQuote(QuoteViolation::EmptySource))
//! ));
//! ```
//!
//! [`QuoteRecord`]: super::QuoteRecord

use rust_decimal::Decimal;
use thiserror::Error;

/// The specific quote invariant that was violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuoteViolation {
    #[error("source cannot be empty")]
    EmptySource,

    #[error("match id cannot be empty")]
    EmptyMatchId,

    #[error("team names cannot be empty")]
    EmptyTeamName,

    #[error("market and outcome names cannot be empty")]
    EmptyOddsKey,

    /// Odds at or below zero.
    #[error("odds must be positive, got {odds} for {market}/{outcome}")]
    NonPositiveOdds {
        market: String,
        outcome: String,
        odds: Decimal,
    },

    /// Odds in `(0, 1]`: a winning bet would not return more than the stake.
    #[error("odds must be greater than 1.0, got {odds} for {market}/{outcome}")]
    OddsNotAboveEven {
        market: String,
        outcome: String,
        odds: Decimal,
    },

    /// Odds above the supported ceiling.
    #[error("odds must be at most 1000000, got {odds} for {market}/{outcome}")]
    OddsTooLarge {
        market: String,
        outcome: String,
        odds: Decimal,
    },
}

/// Errors that occur when domain invariants or preconditions are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A quote record failed validation at construction.
    #[error("invalid quote: {0}")]
    InvalidQuote(#[from] QuoteViolation),

    /// A math operation received a non-positive odds value.
    #[error("odds must be positive, got {odds}")]
    InvalidOdds {
        /// The rejected odds value.
        odds: Decimal,
    },

    /// A math operation received an input it cannot work with.
    #[error("invalid input: {reason}")]
    InvalidInput {
        /// What was wrong with the input.
        reason: String,
    },

    /// A market specification or catalog is malformed.
    #[error("invalid market: {reason}")]
    InvalidMarket {
        /// What was wrong with the market definition.
        reason: String,
    },
}

impl DomainError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_market(reason: impl Into<String>) -> Self {
        Self::InvalidMarket {
            reason: reason.into(),
        }
    }
}
