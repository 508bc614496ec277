//! Builders for quote records used across tests.
//!
//! Every record carries [`fixed_time`] so equality checks and file output
//! do not depend on the clock.

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::market::names;
use crate::domain::{MarketCatalog, Odds, QuoteRecord, QuoteRecordBuilder};

/// Team names shared by the default fixtures.
pub const HOME_TEAM: &str = "Inter";
pub const AWAY_TEAM: &str = "Milan";

/// Capture time used by every fixture.
pub fn fixed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 4, 18, 30, 0)
        .single()
        .unwrap_or_default()
}

/// Builder pre-filled with source, teams, derived match id and [`fixed_time`].
pub fn quote(source: &str) -> QuoteRecordBuilder {
    QuoteRecord::builder()
        .timestamp(fixed_time())
        .source(source)
        .match_id(QuoteRecord::derive_match_id(HOME_TEAM, AWAY_TEAM))
        .teams(HOME_TEAM, AWAY_TEAM)
}

/// A record quoting only the 1X2 market.
///
/// # Panics
///
/// Panics if any odds value is invalid; use [`quote`] to test rejection.
pub fn match_winner(source: &str, home: Odds, draw: Odds, away: Odds) -> QuoteRecord {
    quote(source)
        .odds(names::MATCH_WINNER, names::HOME, home)
        .odds(names::MATCH_WINNER, names::DRAW, draw)
        .odds(names::MATCH_WINNER, names::AWAY, away)
        .build()
        .unwrap_or_else(|e| panic!("invalid fixture odds: {e}"))
}

/// A record quoting a two-way market.
///
/// # Panics
///
/// Panics if either odds value is invalid.
pub fn two_way(
    source: &str,
    market: &str,
    (first, first_odds): (&str, Odds),
    (second, second_odds): (&str, Odds),
) -> QuoteRecord {
    quote(source)
        .odds(market, first, first_odds)
        .odds(market, second, second_odds)
        .build()
        .unwrap_or_else(|e| panic!("invalid fixture odds: {e}"))
}

/// A record quoting every outcome of the football catalog at the same odds.
///
/// # Panics
///
/// Panics if `odds` is invalid.
pub fn full_quote(source: &str, odds: Odds) -> QuoteRecord {
    MarketCatalog::football()
        .markets()
        .iter()
        .fold(quote(source), |builder, spec| {
            builder.market(spec.name(), spec.outcomes().iter().map(|o| (o.clone(), odds)))
        })
        .build()
        .unwrap_or_else(|e| panic!("invalid fixture odds: {e}"))
}
