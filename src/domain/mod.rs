//! Exchange-agnostic arbitrage domain: quotes, markets and the math.

pub mod analyzer;
pub mod error;
pub mod id;
pub mod market;
pub mod money;
pub mod opportunity;
pub mod probability;
pub mod quote;
pub mod selector;
pub mod stake;

pub use analyzer::{group_by_match, AnalyzerConfig, ArbitrageAnalyzer};
pub use error::{DomainError, QuoteViolation};
pub use id::{MatchId, Source};
pub use market::{MarketCatalog, MarketSpec};
pub use money::{Odds, Probability, Stake};
pub use opportunity::{potential_profit, ArbitrageReport, Opportunity};
pub use probability::{arbitrage_margin, implied_probability};
pub use quote::{
    MarketOdds, OutcomeOdds, QuoteRecord, QuoteRecordBuilder, MAX_DECIMAL_ODDS, MIN_DECIMAL_ODDS,
};
pub use selector::{best_odds, BestOdds, BestOddsByOutcome};
pub use stake::{guaranteed_payout, stake_distribution};
