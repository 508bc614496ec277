//! Arbitrage opportunity report entries.
//!
//! An [`Opportunity`] is built from the best odds of one market once the
//! analyzer has established that their implied probabilities sum to less
//! than one. Derived figures are computed once, at construction.

use std::collections::BTreeMap;
use std::ops::Index;

use rust_decimal::Decimal;
use serde::{Serialize, Serializer};

use super::error::DomainError;
use super::money::{Odds, Stake, PERCENT_DP, PROBABILITY_DP};
use super::probability::{arbitrage_margin, checked_sum, implied_probability};
use super::selector::{BestOdds, BestOddsByOutcome};
use super::stake::{guaranteed_payout, stake_distribution};

/// Margins this close to zero are breakeven; reciprocal odds such as `1/3`
/// are rounded at 28 significant digits and may not sum back to exactly one.
const BREAKEVEN_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 20);

/// A risk-free combination found in one market.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Opportunity {
    market: String,
    margin: Decimal,
    profit_margin_percent: Decimal,
    total_implied_probability: Decimal,
    best_odds: BestOddsByOutcome,
    reference_stake: Stake,
    stake_distribution: BTreeMap<String, Stake>,
}

impl Opportunity {
    /// Price a market from its best odds.
    ///
    /// Returns `Ok(None)` when the margin is zero or positive: a breakeven or
    /// over-round market is not an opportunity.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if `best_odds` is empty or holds non-positive odds.
    pub fn evaluate(
        market: impl Into<String>,
        best_odds: BestOddsByOutcome,
        reference_stake: Stake,
    ) -> Result<Option<Self>, DomainError> {
        let probabilities = best_odds
            .values()
            .map(|b| implied_probability(b.odds))
            .collect::<Result<Vec<_>, _>>()?;
        let margin = arbitrage_margin(&probabilities)?;
        let total_probability = checked_sum(&probabilities)?;

        if margin >= -BREAKEVEN_TOLERANCE {
            return Ok(None);
        }

        let odds: Vec<Odds> = best_odds.values().map(|b| b.odds).collect();
        let stakes = stake_distribution(&odds, reference_stake)?;
        let stake_distribution = best_odds.keys().cloned().zip(stakes).collect();

        Ok(Some(Self {
            market: market.into(),
            margin,
            // margin is in (-1, 0) here
            profit_margin_percent: (margin.abs() * Decimal::ONE_HUNDRED).round_dp(PERCENT_DP),
            total_implied_probability: total_probability.round_dp(PROBABILITY_DP),
            best_odds,
            reference_stake,
            stake_distribution,
        }))
    }

    /// Get the market name.
    pub fn market(&self) -> &str {
        &self.market
    }

    /// Get the unrounded signed margin (always negative).
    pub fn margin(&self) -> Decimal {
        self.margin
    }

    /// Get the profit margin as a percentage, rounded to 2 decimal places.
    pub fn profit_margin_percent(&self) -> Decimal {
        self.profit_margin_percent
    }

    /// Get the summed implied probability, rounded to 4 decimal places.
    pub fn total_implied_probability(&self) -> Decimal {
        self.total_implied_probability
    }

    /// Get the best odds and source per outcome.
    pub fn best_odds(&self) -> &BestOddsByOutcome {
        &self.best_odds
    }

    /// Get the best odds for one outcome.
    pub fn outcome(&self, outcome: &str) -> Option<&BestOdds> {
        self.best_odds.get(outcome)
    }

    /// Get the stake used for the illustrative distribution.
    pub fn reference_stake(&self) -> Stake {
        self.reference_stake
    }

    /// Get the illustrative stake per outcome for [`Self::reference_stake`].
    pub fn stake_distribution(&self) -> &BTreeMap<String, Stake> {
        &self.stake_distribution
    }

    /// Stake per outcome for an arbitrary total stake.
    pub fn stakes_for(&self, total_stake: Stake) -> Result<BTreeMap<String, Stake>, DomainError> {
        let stakes = stake_distribution(&self.odds(), total_stake)?;
        Ok(self.best_odds.keys().cloned().zip(stakes).collect())
    }

    /// Amount returned whichever outcome wins, for an arbitrary total stake.
    pub fn guaranteed_payout(&self, total_stake: Stake) -> Result<Stake, DomainError> {
        guaranteed_payout(&self.odds(), total_stake)
    }

    fn odds(&self) -> Vec<Odds> {
        self.best_odds.values().map(|b| b.odds).collect()
    }
}

/// Outcome of analyzing one match: opportunities found and markets that
/// could not be evaluated, both keyed by market name.
///
/// A market appears in at most one of the two maps. A market in neither
/// was evaluated and holds no opportunity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ArbitrageReport {
    opportunities: BTreeMap<String, Opportunity>,
    #[serde(serialize_with = "serialize_failures")]
    failures: BTreeMap<String, DomainError>,
}

impl ArbitrageReport {
    /// Create an empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn insert_opportunity(&mut self, opportunity: Opportunity) {
        self.opportunities
            .insert(opportunity.market.clone(), opportunity);
    }

    pub(crate) fn insert_failure(&mut self, market: impl Into<String>, error: DomainError) {
        self.failures.insert(market.into(), error);
    }

    /// Opportunities keyed by market name.
    pub fn opportunities(&self) -> &BTreeMap<String, Opportunity> {
        &self.opportunities
    }

    /// Get the opportunity found in one market.
    pub fn get(&self, market: &str) -> Option<&Opportunity> {
        self.opportunities.get(market)
    }

    /// Markets whose evaluation failed, with the error.
    pub fn failures(&self) -> &BTreeMap<String, DomainError> {
        &self.failures
    }

    /// Get the error for one market, if its evaluation failed.
    pub fn failure(&self, market: &str) -> Option<&DomainError> {
        self.failures.get(market)
    }

    /// Check if any market failed to evaluate.
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    /// Number of opportunities.
    pub fn len(&self) -> usize {
        self.opportunities.len()
    }

    /// Check if no opportunity was found.
    pub fn is_empty(&self) -> bool {
        self.opportunities.is_empty()
    }
}

impl Index<&str> for ArbitrageReport {
    type Output = Opportunity;

    /// # Panics
    ///
    /// Panics if the report holds no opportunity for `market`.
    fn index(&self, market: &str) -> &Opportunity {
        &self.opportunities[market]
    }
}

fn serialize_failures<S: Serializer>(
    failures: &BTreeMap<String, DomainError>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_map(failures.iter().map(|(market, e)| (market, e.to_string())))
}

/// Profit per market for a caller-chosen total stake:
/// `total_stake * profit_margin_percent / 100`, rounded to 2 decimal places.
///
/// # Errors
///
/// Returns [`DomainError::InvalidInput`] if the profit for `total_stake`
/// does not fit the decimal range.
pub fn potential_profit(
    report: &ArbitrageReport,
    total_stake: Stake,
) -> Result<BTreeMap<String, Decimal>, DomainError> {
    report
        .opportunities
        .iter()
        .map(|(market, opp)| {
            let profit = total_stake
                .checked_mul(opp.profit_margin_percent)
                .map(|p| p / Decimal::ONE_HUNDRED)
                .ok_or_else(|| {
                    DomainError::invalid_input(format!(
                        "profit for a stake of {total_stake} does not fit the decimal range"
                    ))
                })?;
            Ok((market.clone(), profit.round_dp(PERCENT_DP)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::id::Source;
    use rust_decimal_macros::dec;

    fn best(entries: &[(&str, Odds, &str)]) -> BestOddsByOutcome {
        entries
            .iter()
            .map(|(outcome, odds, source)| {
                (
                    outcome.to_string(),
                    BestOdds {
                        odds: *odds,
                        source: Source::from(*source),
                    },
                )
            })
            .collect()
    }

    #[test]
    fn evaluates_arbitrage_market() {
        let opp = Opportunity::evaluate(
            "1x2",
            best(&[
                ("home", dec!(2.50), "a"),
                ("draw", dec!(3.80), "b"),
                ("away", dec!(3.20), "b"),
            ]),
            dec!(100),
        )
        .unwrap()
        .unwrap();

        assert_eq!(opp.market(), "1x2");
        assert!(opp.margin() < Decimal::ZERO);
        assert_eq!(opp.profit_margin_percent(), dec!(2.43));
        assert_eq!(opp.total_implied_probability(), dec!(0.9757));
        assert_eq!(opp.outcome("draw").unwrap().source.as_str(), "b");
        assert_eq!(opp.stake_distribution().len(), 3);
        assert_eq!(opp.reference_stake(), dec!(100));
    }

    #[test]
    fn over_round_market_is_not_an_opportunity() {
        let result = Opportunity::evaluate(
            "1x2",
            best(&[
                ("home", dec!(2.20), "a"),
                ("draw", dec!(3.50), "b"),
                ("away", dec!(3.40), "b"),
            ]),
            dec!(100),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn breakeven_market_is_not_an_opportunity() {
        let result = Opportunity::evaluate(
            "both_teams_score",
            best(&[("yes", dec!(2.0), "a"), ("no", dec!(2.0), "b")]),
            dec!(100),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn rounding_residue_is_still_breakeven() {
        let result = Opportunity::evaluate(
            "1x2",
            best(&[
                ("home", dec!(3), "a"),
                ("draw", dec!(3), "b"),
                ("away", dec!(3), "b"),
            ]),
            dec!(100),
        )
        .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn empty_best_odds_is_an_input_error() {
        let result = Opportunity::evaluate("empty", BestOddsByOutcome::new(), dec!(100));
        assert!(matches!(result, Err(DomainError::InvalidInput { .. })));
    }

    #[test]
    fn stakes_for_scales_with_total() {
        let opp = Opportunity::evaluate(
            "over_under_2_5",
            best(&[("over", dec!(2.10), "a"), ("under", dec!(2.05), "b")]),
            dec!(100),
        )
        .unwrap()
        .unwrap();

        let stakes = opp.stakes_for(dec!(1000)).unwrap();
        let payout = opp.guaranteed_payout(dec!(1000)).unwrap();
        for (outcome, stake) in &stakes {
            let leg = stake * opp.outcome(outcome).unwrap().odds;
            assert!((leg - payout).abs() < dec!(0.000001));
        }
        assert!(payout > dec!(1000));
    }

    #[test]
    fn potential_profit_uses_rounded_percent() {
        let mut report = ArbitrageReport::new();
        let opp = Opportunity::evaluate(
            "1x2",
            best(&[
                ("home", dec!(2.50), "a"),
                ("draw", dec!(3.80), "b"),
                ("away", dec!(3.20), "b"),
            ]),
            dec!(100),
        )
        .unwrap()
        .unwrap();
        report.insert_opportunity(opp);

        let profits = potential_profit(&report, dec!(1000)).unwrap();
        assert_eq!(profits["1x2"], dec!(24.30));

        assert!(matches!(
            potential_profit(&report, Decimal::MAX),
            Err(DomainError::InvalidInput { .. })
        ));
    }

    #[test]
    fn report_keeps_failures_apart_from_opportunities() {
        let mut report = ArbitrageReport::new();
        report.insert_failure("1x2", DomainError::invalid_input("boom"));

        assert!(report.is_empty());
        assert!(report.has_failures());
        assert!(report.get("1x2").is_none());
        assert!(matches!(
            report.failure("1x2"),
            Some(DomainError::InvalidInput { .. })
        ));

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["failures"]["1x2"], "invalid input: boom");
    }
}
