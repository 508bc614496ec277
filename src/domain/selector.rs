//! Best-price selection across sources.

use std::collections::BTreeMap;

use serde::Serialize;

use super::id::Source;
use super::market::MarketSpec;
use super::money::Odds;
use super::quote::QuoteRecord;

/// The best odds found for one outcome and the source quoting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BestOdds {
    /// Highest quoted odds.
    pub odds: Odds,
    /// Source that quoted them.
    pub source: Source,
}

/// Best odds per outcome, keyed by outcome name.
pub type BestOddsByOutcome = BTreeMap<String, BestOdds>;

/// Pick the highest odds for every outcome of `spec`.
///
/// Only records quoting every outcome of the market take part, and at
/// least two of them are needed for a comparison; otherwise `None`.
///
/// Ties go to the record that appears first in `records`.
pub fn best_odds(spec: &MarketSpec, records: &[QuoteRecord]) -> Option<BestOddsByOutcome> {
    let qualifying: Vec<&QuoteRecord> = records
        .iter()
        .filter(|r| r.quotes_all(spec.name(), spec.outcomes()))
        .collect();

    if qualifying.len() < 2 {
        return None;
    }

    let mut best = BestOddsByOutcome::new();
    for outcome in spec.outcomes() {
        let mut leader: Option<BestOdds> = None;
        for record in &qualifying {
            let Some(odds) = record.odds(spec.name(), outcome) else {
                continue;
            };
            // Strictly greater keeps the first-seen source on ties.
            if leader.as_ref().map_or(true, |l| odds > l.odds) {
                leader = Some(BestOdds {
                    odds,
                    source: record.source().clone(),
                });
            }
        }
        best.insert(outcome.clone(), leader?);
    }
    Some(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::names;
    use rust_decimal_macros::dec;

    fn one_x_two() -> MarketSpec {
        MarketSpec::new(names::MATCH_WINNER, [names::HOME, names::DRAW, names::AWAY])
    }

    fn quote(source: &str, home: Odds, draw: Odds, away: Odds) -> QuoteRecord {
        QuoteRecord::match_winner(source, "Inter", "Milan", home, draw, away).unwrap()
    }

    #[test]
    fn picks_maximum_per_outcome_with_source() {
        let records = vec![
            quote("sisal", dec!(2.20), dec!(3.30), dec!(3.10)),
            quote("snai", dec!(2.05), dec!(3.50), dec!(3.40)),
        ];

        let best = best_odds(&one_x_two(), &records).unwrap();

        assert_eq!(best["home"].odds, dec!(2.20));
        assert_eq!(best["home"].source.as_str(), "sisal");
        assert_eq!(best["draw"].odds, dec!(3.50));
        assert_eq!(best["draw"].source.as_str(), "snai");
        assert_eq!(best["away"].odds, dec!(3.40));
        assert_eq!(best["away"].source.as_str(), "snai");
    }

    #[test]
    fn ties_go_to_first_record() {
        let records = vec![
            quote("first", dec!(2.50), dec!(3.00), dec!(3.00)),
            quote("second", dec!(2.50), dec!(3.10), dec!(3.00)),
        ];

        let best = best_odds(&one_x_two(), &records).unwrap();
        assert_eq!(best["home"].source.as_str(), "first");
        assert_eq!(best["away"].source.as_str(), "first");
        assert_eq!(best["draw"].source.as_str(), "second");

        let reversed: Vec<QuoteRecord> = records.into_iter().rev().collect();
        let best = best_odds(&one_x_two(), &reversed).unwrap();
        assert_eq!(best["home"].source.as_str(), "second");
    }

    #[test]
    fn needs_two_qualifying_records() {
        let records = vec![quote("sisal", dec!(2.20), dec!(3.30), dec!(3.10))];
        assert!(best_odds(&one_x_two(), &records).is_none());
        assert!(best_odds(&one_x_two(), &[]).is_none());
    }

    #[test]
    fn partial_quotes_do_not_qualify() {
        let partial = QuoteRecord::builder()
            .source("partial")
            .match_id("inter_vs_milan")
            .teams("Inter", "Milan")
            .odds(names::MATCH_WINNER, names::HOME, dec!(9.00))
            .odds(names::MATCH_WINNER, names::DRAW, dec!(9.00))
            .build()
            .unwrap();
        let records = vec![
            partial,
            quote("sisal", dec!(2.20), dec!(3.30), dec!(3.10)),
            quote("snai", dec!(2.05), dec!(3.50), dec!(3.40)),
        ];

        let best = best_odds(&one_x_two(), &records).unwrap();
        assert_eq!(best["home"].odds, dec!(2.20));
        assert_eq!(best["draw"].odds, dec!(3.50));

        let only_one_full = vec![records[0].clone(), records[1].clone()];
        assert!(best_odds(&one_x_two(), &only_one_full).is_none());
    }
}
