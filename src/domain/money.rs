//! Numeric types for odds, probabilities and stakes.

use rust_decimal::Decimal;

/// Decimal odds: a winning unit stake returns this multiplier, stake included.
pub type Odds = Decimal;

/// Implied probability (`1 / odds`).
pub type Probability = Decimal;

/// Monetary stake or payout amount.
pub type Stake = Decimal;

/// Decimal places kept for reported percentages and profits.
pub const PERCENT_DP: u32 = 2;

/// Decimal places kept for reported total implied probability.
pub const PROBABILITY_DP: u32 = 4;
