//! Cross-source arbitrage analysis.
//!
//! For every configured market the analyzer keeps the records quoting all
//! of its outcomes, picks the best odds per outcome, and emits an
//! [`Opportunity`] when the implied probabilities sum to less than one.
//! Markets are independent: they are evaluated in parallel and one
//! market's failure never affects another's result.

use std::collections::BTreeMap;

use rayon::prelude::*;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::error::DomainError;
use super::id::MatchId;
use super::market::{MarketCatalog, MarketSpec};
use super::money::Stake;
use super::opportunity::{ArbitrageReport, Opportunity};
use super::quote::QuoteRecord;
use super::selector::best_odds;

/// Configuration for arbitrage analysis.
#[derive(Debug, Clone, Deserialize)]
pub struct AnalyzerConfig {
    /// Total stake used for the illustrative stake distribution.
    #[serde(default = "default_reference_stake")]
    pub reference_stake: Stake,

    /// Minimum rounded profit percentage to report.
    #[serde(default)]
    pub min_profit_percent: Decimal,

    /// Markets to evaluate.
    #[serde(default)]
    pub markets: MarketCatalog,
}

fn default_reference_stake() -> Stake {
    Decimal::ONE_HUNDRED
}

impl AnalyzerConfig {
    /// Check the configuration invariants.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] for a non-positive reference
    /// stake or a negative threshold, and [`DomainError::InvalidMarket`]
    /// for a malformed catalog.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.reference_stake <= Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "reference stake must be positive, got {}",
                self.reference_stake
            )));
        }
        if self.min_profit_percent < Decimal::ZERO {
            return Err(DomainError::invalid_input(format!(
                "minimum profit percent cannot be negative, got {}",
                self.min_profit_percent
            )));
        }
        self.markets.validate()
    }
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            reference_stake: default_reference_stake(),
            min_profit_percent: Decimal::ZERO,
            markets: MarketCatalog::default(),
        }
    }
}

/// Finds arbitrage opportunities across quotes from different sources.
#[derive(Debug, Clone, Default)]
pub struct ArbitrageAnalyzer {
    config: AnalyzerConfig,
}

impl ArbitrageAnalyzer {
    /// Create a new analyzer with the given configuration.
    pub fn new(config: AnalyzerConfig) -> Self {
        Self { config }
    }

    /// Create a new analyzer after validating the configuration.
    ///
    /// # Errors
    ///
    /// See [`AnalyzerConfig::validate`].
    pub fn try_new(config: AnalyzerConfig) -> Result<Self, DomainError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Get the analyzer configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Evaluate every configured market over quotes for a single match.
    ///
    /// Fewer than two records yields an empty report. A market whose
    /// evaluation fails is recorded in [`ArbitrageReport::failures`] and the
    /// remaining markets are still evaluated.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if the records do not all
    /// share one match id.
    pub fn find_opportunities(
        &self,
        records: &[QuoteRecord],
    ) -> Result<ArbitrageReport, DomainError> {
        if let Some(first) = records.first() {
            if let Some(other) = records.iter().find(|r| r.match_id() != first.match_id()) {
                return Err(DomainError::invalid_input(format!(
                    "records span more than one match: '{}' and '{}'",
                    first.match_id(),
                    other.match_id()
                )));
            }
        }

        let mut report = ArbitrageReport::new();
        if records.len() < 2 {
            debug!(records = records.len(), "Not enough quotes to compare");
            return Ok(report);
        }

        let outcomes: Vec<(&str, Result<Option<Opportunity>, DomainError>)> = self
            .config
            .markets
            .markets()
            .par_iter()
            .map(|spec| (spec.name(), self.evaluate_market(spec, records)))
            .collect();

        for (market, outcome) in outcomes {
            match outcome {
                Ok(Some(opp)) => report.insert_opportunity(opp),
                Ok(None) => {}
                Err(e) => {
                    warn!(market, error = %e, "Market evaluation failed");
                    report.insert_failure(market, e);
                }
            }
        }

        Ok(report)
    }

    /// Evaluate one market.
    ///
    /// Returns `Ok(None)` when fewer than two records quote the full market,
    /// when the market is not an arbitrage, or when the profit is below
    /// `min_profit_percent`.
    ///
    /// # Errors
    ///
    /// Propagates [`DomainError`] from the probability and stake math.
    pub fn evaluate_market(
        &self,
        spec: &MarketSpec,
        records: &[QuoteRecord],
    ) -> Result<Option<Opportunity>, DomainError> {
        let Some(best) = best_odds(spec, records) else {
            debug!(market = spec.name(), "Market not quoted by two sources");
            return Ok(None);
        };

        let Some(opp) = Opportunity::evaluate(spec.name(), best, self.config.reference_stake)?
        else {
            debug!(market = spec.name(), "No arbitrage");
            return Ok(None);
        };

        if opp.profit_margin_percent() < self.config.min_profit_percent {
            debug!(
                market = spec.name(),
                profit_percent = %opp.profit_margin_percent(),
                "Arbitrage below reporting threshold"
            );
            return Ok(None);
        }

        info!(
            market = spec.name(),
            profit_percent = %opp.profit_margin_percent(),
            implied_probability = %opp.total_implied_probability(),
            "Arbitrage opportunity found"
        );
        Ok(Some(opp))
    }

    /// Group a mixed collection by match and analyze each group.
    ///
    /// Matches with neither an opportunity nor a failed market are left out.
    /// Records keep their input order within each group, so tie-breaks match
    /// [`Self::find_opportunities`].
    pub fn scan(&self, records: &[QuoteRecord]) -> BTreeMap<MatchId, ArbitrageReport> {
        group_by_match(records)
            .into_iter()
            .filter_map(|(match_id, group)| {
                // Grouping guarantees a single match id per group.
                let report = self.find_opportunities(&group).ok()?;
                (!report.is_empty() || report.has_failures()).then_some((match_id, report))
            })
            .collect()
    }
}

/// Split records by match id, preserving input order within each match.
pub fn group_by_match(records: &[QuoteRecord]) -> BTreeMap<MatchId, Vec<QuoteRecord>> {
    let mut groups: BTreeMap<MatchId, Vec<QuoteRecord>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.match_id().clone())
            .or_default()
            .push(record.clone());
    }
    groups
}
