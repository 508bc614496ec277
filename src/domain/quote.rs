//! Quote records: one provider's odds for one match at one instant.
//!
//! A [`QuoteRecord`] is validated once, when it is built, and is immutable
//! afterwards: fields are private and only exposed through getters. Equality
//! and hashing are derived from every field, so records can be used as set
//! or map keys.
//!
//! The payload maps a market name (`"1x2"`, `"over_under_2_5"`, ...) to the
//! odds quoted for each of its outcomes. An outcome missing from the map
//! means the provider does not quote it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::error::{DomainError, QuoteViolation};
use super::id::{MatchId, Source};
use super::market::names;
use super::money::Odds;

/// Quoted odds must be strictly above this value.
pub const MIN_DECIMAL_ODDS: Decimal = Decimal::ONE;

/// Quoted odds must not exceed this value. Keeps `1 / odds` and the stake
/// math well inside the decimal range.
pub const MAX_DECIMAL_ODDS: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Odds per outcome within one market.
pub type OutcomeOdds = BTreeMap<String, Odds>;

/// Odds per market, then per outcome.
pub type MarketOdds = BTreeMap<String, OutcomeOdds>;

/// A validated, immutable set of odds from one source for one match.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawQuoteRecord")]
pub struct QuoteRecord {
    timestamp: DateTime<Utc>,
    source: Source,
    match_id: MatchId,
    home_team: String,
    away_team: String,
    markets: MarketOdds,
}

/// Unvalidated wire form; every deserialized record passes through
/// [`QuoteRecord::try_new`].
#[derive(Deserialize)]
struct RawQuoteRecord {
    timestamp: DateTime<Utc>,
    source: Source,
    match_id: MatchId,
    home_team: String,
    away_team: String,
    #[serde(default)]
    markets: MarketOdds,
}

impl TryFrom<RawQuoteRecord> for QuoteRecord {
    type Error = DomainError;

    fn try_from(raw: RawQuoteRecord) -> Result<Self, Self::Error> {
        Self::try_new(
            raw.timestamp,
            raw.source,
            raw.match_id,
            raw.home_team,
            raw.away_team,
            raw.markets,
        )
    }
}

impl QuoteRecord {
    /// Create a new builder for constructing a QuoteRecord.
    pub fn builder() -> QuoteRecordBuilder {
        QuoteRecordBuilder::new()
    }

    /// Create a quote record with domain invariant validation.
    ///
    /// # Domain Invariants
    ///
    /// - `source`, `match_id` and both team names must not be blank
    /// - every quoted odds value must be greater than [`MIN_DECIMAL_ODDS`]
    ///   and at most [`MAX_DECIMAL_ODDS`]
    ///
    /// Markets without any quoted outcome are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuote`] naming the first violated invariant.
    pub fn try_new(
        timestamp: DateTime<Utc>,
        source: Source,
        match_id: MatchId,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
        mut markets: MarketOdds,
    ) -> Result<Self, DomainError> {
        markets.retain(|_, outcomes| !outcomes.is_empty());

        let record = Self {
            timestamp,
            source,
            match_id,
            home_team: home_team.into(),
            away_team: away_team.into(),
            markets,
        };
        record.validate()?;
        Ok(record)
    }

    /// Create a record carrying only 1X2 odds.
    ///
    /// The match id is derived from the team names, see [`Self::derive_match_id`].
    pub fn match_winner(
        source: impl Into<Source>,
        home_team: &str,
        away_team: &str,
        home: Odds,
        draw: Odds,
        away: Odds,
    ) -> Result<Self, DomainError> {
        Self::builder()
            .source(source)
            .match_id(Self::derive_match_id(home_team, away_team))
            .teams(home_team, away_team)
            .odds(names::MATCH_WINNER, names::HOME, home)
            .odds(names::MATCH_WINNER, names::DRAW, draw)
            .odds(names::MATCH_WINNER, names::AWAY, away)
            .build()
    }

    /// Derive a match id of the form `home_vs_away`, lower-cased with
    /// spaces replaced by underscores.
    pub fn derive_match_id(home_team: &str, away_team: &str) -> MatchId {
        let slug = |team: &str| team.trim().to_lowercase().replace(' ', "_");
        MatchId::new(format!("{}_vs_{}", slug(home_team), slug(away_team)))
    }

    fn validate(&self) -> Result<(), QuoteViolation> {
        if self.source.is_empty() {
            return Err(QuoteViolation::EmptySource);
        }
        if self.match_id.is_empty() {
            return Err(QuoteViolation::EmptyMatchId);
        }
        if self.home_team.trim().is_empty() || self.away_team.trim().is_empty() {
            return Err(QuoteViolation::EmptyTeamName);
        }

        for (market, outcomes) in &self.markets {
            for (outcome, &odds) in outcomes {
                if market.trim().is_empty() || outcome.trim().is_empty() {
                    return Err(QuoteViolation::EmptyOddsKey);
                }
                if odds <= Decimal::ZERO {
                    return Err(QuoteViolation::NonPositiveOdds {
                        market: market.clone(),
                        outcome: outcome.clone(),
                        odds,
                    });
                }
                if odds <= MIN_DECIMAL_ODDS {
                    return Err(QuoteViolation::OddsNotAboveEven {
                        market: market.clone(),
                        outcome: outcome.clone(),
                        odds,
                    });
                }
                if odds > MAX_DECIMAL_ODDS {
                    return Err(QuoteViolation::OddsTooLarge {
                        market: market.clone(),
                        outcome: outcome.clone(),
                        odds,
                    });
                }
            }
        }
        Ok(())
    }

    /// Get the capture instant.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Get the source (provider) name.
    #[must_use]
    pub const fn source(&self) -> &Source {
        &self.source
    }

    /// Get the match identifier.
    #[must_use]
    pub const fn match_id(&self) -> &MatchId {
        &self.match_id
    }

    /// Get the home team display name.
    #[must_use]
    pub fn home_team(&self) -> &str {
        &self.home_team
    }

    /// Get the away team display name.
    #[must_use]
    pub fn away_team(&self) -> &str {
        &self.away_team
    }

    /// Get the full odds payload.
    #[must_use]
    pub const fn markets(&self) -> &MarketOdds {
        &self.markets
    }

    /// Get the quoted outcomes of one market, if any are quoted.
    #[must_use]
    pub fn market(&self, market: &str) -> Option<&OutcomeOdds> {
        self.markets.get(market)
    }

    /// Get the odds for one outcome, or `None` if this source does not quote it.
    #[must_use]
    pub fn odds(&self, market: &str, outcome: &str) -> Option<Odds> {
        self.markets.get(market)?.get(outcome).copied()
    }

    /// Check whether every listed outcome of `market` is quoted.
    #[must_use]
    pub fn quotes_all<S: AsRef<str>>(&self, market: &str, outcomes: &[S]) -> bool {
        match self.markets.get(market) {
            Some(quoted) => outcomes.iter().all(|o| quoted.contains_key(o.as_ref())),
            None => false,
        }
    }

    /// Total number of quoted odds values across all markets.
    #[must_use]
    pub fn odds_count(&self) -> usize {
        self.markets.values().map(BTreeMap::len).sum()
    }
}

/// Builder for constructing `QuoteRecord` instances.
///
/// # Example
///
/// ```
/// use surebet::domain::QuoteRecord;
/// use rust_decimal_macros::dec;
///
/// let record = QuoteRecord::builder()
///     .source("sisal")
///     .match_id("inter_vs_milan")
///     .teams("Inter", "Milan")
///     .odds("1x2", "home", dec!(2.10))
///     .maybe_odds("1x2", "draw", None)
///     .build()
///     .unwrap();
///
/// assert_eq!(record.odds("1x2", "home"), Some(dec!(2.10)));
/// assert_eq!(record.odds("1x2", "draw"), None);
/// ```
#[derive(Debug, Default)]
pub struct QuoteRecordBuilder {
    timestamp: Option<DateTime<Utc>>,
    source: Option<Source>,
    match_id: Option<MatchId>,
    home_team: Option<String>,
    away_team: Option<String>,
    markets: MarketOdds,
}

impl QuoteRecordBuilder {
    /// Create a new empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the capture instant. Defaults to now.
    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Set the source name.
    pub fn source(mut self, source: impl Into<Source>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Set the match ID.
    pub fn match_id(mut self, match_id: impl Into<MatchId>) -> Self {
        self.match_id = Some(match_id.into());
        self
    }

    /// Set both team names.
    pub fn teams(mut self, home: impl Into<String>, away: impl Into<String>) -> Self {
        self.home_team = Some(home.into());
        self.away_team = Some(away.into());
        self
    }

    /// Quote one outcome.
    pub fn odds(
        mut self,
        market: impl Into<String>,
        outcome: impl Into<String>,
        odds: Odds,
    ) -> Self {
        self.markets
            .entry(market.into())
            .or_default()
            .insert(outcome.into(), odds);
        self
    }

    /// Quote one outcome if a value was captured; `None` leaves it unquoted.
    pub fn maybe_odds(
        self,
        market: impl Into<String>,
        outcome: impl Into<String>,
        odds: Option<Odds>,
    ) -> Self {
        match odds {
            Some(odds) => self.odds(market, outcome, odds),
            None => self,
        }
    }

    /// Quote several outcomes of one market.
    pub fn market<I, K>(mut self, market: impl Into<String>, outcomes: I) -> Self
    where
        I: IntoIterator<Item = (K, Odds)>,
        K: Into<String>,
    {
        let entry = self.markets.entry(market.into()).or_default();
        for (outcome, odds) in outcomes {
            entry.insert(outcome.into(), odds);
        }
        self
    }

    /// Build the QuoteRecord, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidQuote`] if an identity field is missing
    /// or blank, or if any odds value is outside
    /// (`MIN_DECIMAL_ODDS`, `MAX_DECIMAL_ODDS`].
    pub fn build(self) -> Result<QuoteRecord, DomainError> {
        let source = self.source.ok_or(QuoteViolation::EmptySource)?;
        let match_id = self.match_id.ok_or(QuoteViolation::EmptyMatchId)?;
        let (home_team, away_team) = match (self.home_team, self.away_team) {
            (Some(home), Some(away)) => (home, away),
            _ => return Err(QuoteViolation::EmptyTeamName.into()),
        };

        QuoteRecord::try_new(
            self.timestamp.unwrap_or_else(Utc::now),
            source,
            match_id,
            home_team,
            away_team,
            self.markets,
        )
    }
}
