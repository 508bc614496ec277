//! Implied probability and market margin.

use rust_decimal::Decimal;

use super::error::DomainError;
use super::money::{Odds, Probability};

/// Convert decimal odds into the market-implied probability `1 / odds`.
///
/// # Errors
///
/// Returns [`DomainError::InvalidOdds`] if `odds <= 0` or if the odds are
/// so large that the reciprocal rounds to zero.
pub fn implied_probability(odds: Odds) -> Result<Probability, DomainError> {
    if odds <= Decimal::ZERO {
        return Err(DomainError::InvalidOdds { odds });
    }
    match Decimal::ONE.checked_div(odds) {
        Some(p) if !p.is_zero() => Ok(p),
        _ => Err(DomainError::InvalidOdds { odds }),
    }
}

/// Signed market margin: `sum(probabilities) - 1`.
///
/// Positive is the bookmaker over-round, negative is an arbitrage whose
/// profit per unit staked is the magnitude, zero is a breakeven market.
///
/// # Errors
///
/// Returns [`DomainError::InvalidInput`] if `probabilities` is empty or
/// their sum overflows.
pub fn arbitrage_margin(probabilities: &[Probability]) -> Result<Decimal, DomainError> {
    if probabilities.is_empty() {
        return Err(DomainError::invalid_input(
            "at least one probability is required",
        ));
    }
    Ok(checked_sum(probabilities)? - Decimal::ONE)
}

/// Sum without the panicking `Sum` impl.
pub(crate) fn checked_sum<'a, I>(values: I) -> Result<Decimal, DomainError>
where
    I: IntoIterator<Item = &'a Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(*v)
            .ok_or_else(|| DomainError::invalid_input("sum overflows the decimal range"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn implied_probability_is_reciprocal() {
        assert_eq!(implied_probability(dec!(2.0)).unwrap(), dec!(0.5));
        assert_eq!(implied_probability(dec!(4)).unwrap(), dec!(0.25));
        assert_eq!(
            implied_probability(dec!(1.5)).unwrap().round_dp(4),
            dec!(0.6667)
        );
        assert_eq!(
            implied_probability(dec!(3.0)).unwrap().round_dp(4),
            dec!(0.3333)
        );
    }

    #[test]
    fn implied_probability_rejects_non_positive_odds() {
        assert_eq!(
            implied_probability(dec!(0)),
            Err(DomainError::InvalidOdds { odds: dec!(0) })
        );
        assert_eq!(
            implied_probability(dec!(-1.5)),
            Err(DomainError::InvalidOdds { odds: dec!(-1.5) })
        );
    }

    #[test]
    fn margin_positive_for_bookmaker_over_round() {
        let margin = arbitrage_margin(&[dec!(0.5), dec!(0.35), dec!(0.25)]).unwrap();
        assert_eq!(margin, dec!(0.10));
    }

    #[test]
    fn margin_negative_for_arbitrage() {
        let margin = arbitrage_margin(&[dec!(0.45), dec!(0.30), dec!(0.20)]).unwrap();
        assert_eq!(margin, dec!(-0.05));
    }

    #[test]
    fn margin_exactly_zero_for_efficient_market() {
        let margin = arbitrage_margin(&[dec!(0.5), dec!(0.3), dec!(0.2)]).unwrap();
        assert!(margin.is_zero());
    }

    #[test]
    fn implied_probability_rejects_reciprocals_that_vanish() {
        let huge = dec!(30000000000000000000000000000);
        assert_eq!(
            implied_probability(huge),
            Err(DomainError::InvalidOdds { odds: huge })
        );
    }

    #[test]
    fn margin_overflow_is_an_input_error() {
        let huge = dec!(20000000000000000000000000000);
        assert!(matches!(
            arbitrage_margin(&[huge; 4]),
            Err(DomainError::InvalidInput { .. })
        ));
    }

    #[test]
    fn margin_rejects_empty_input() {
        assert!(matches!(
            arbitrage_margin(&[]),
            Err(DomainError::InvalidInput { .. })
        ));
    }
}
