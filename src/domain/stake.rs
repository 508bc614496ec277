//! Stake allocation for equal payout across outcomes.

use rust_decimal::Decimal;

use super::error::DomainError;
use super::money::{Odds, Stake};
use super::probability::{checked_sum, implied_probability};

/// Split `total_stake` so every outcome pays out the same amount.
///
/// With `w = sum(1 / odds_i)`, each stake is `total_stake / (w * odds_i)`,
/// so `stake_i * odds_i == total_stake / w` for every `i` and the stakes
/// sum to `total_stake`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidInput`] if `odds` is empty, holds a
/// non-positive value, `total_stake` is not positive, or the split does
/// not fit the decimal range. Returns [`DomainError::InvalidOdds`] for odds
/// whose reciprocal rounds to zero.
pub fn stake_distribution(odds: &[Odds], total_stake: Stake) -> Result<Vec<Stake>, DomainError> {
    let inverse_sum = inverse_sum(odds, total_stake)?;
    odds.iter()
        .map(|o| {
            inverse_sum
                .checked_mul(*o)
                .and_then(|weight| total_stake.checked_div(weight))
                .ok_or_else(|| out_of_range(total_stake))
        })
        .collect()
}

/// Payout returned by any leg of an equal-payout split: `total_stake / sum(1 / odds_i)`.
///
/// # Errors
///
/// Same preconditions as [`stake_distribution`].
pub fn guaranteed_payout(odds: &[Odds], total_stake: Stake) -> Result<Stake, DomainError> {
    let inverse_sum = inverse_sum(odds, total_stake)?;
    total_stake
        .checked_div(inverse_sum)
        .ok_or_else(|| out_of_range(total_stake))
}

fn inverse_sum(odds: &[Odds], total_stake: Stake) -> Result<Decimal, DomainError> {
    if odds.is_empty() {
        return Err(DomainError::invalid_input("at least one odds value is required"));
    }
    if let Some(bad) = odds.iter().find(|o| **o <= Decimal::ZERO) {
        return Err(DomainError::invalid_input(format!(
            "all odds must be positive, got {bad}"
        )));
    }
    if total_stake <= Decimal::ZERO {
        return Err(DomainError::invalid_input(format!(
            "total stake must be positive, got {total_stake}"
        )));
    }

    let inverses = odds
        .iter()
        .map(|o| implied_probability(*o))
        .collect::<Result<Vec<_>, _>>()?;
    checked_sum(&inverses)
}

fn out_of_range(total_stake: Stake) -> DomainError {
    DomainError::invalid_input(format!(
        "stake split of {total_stake} does not fit the decimal range"
    ))
}
