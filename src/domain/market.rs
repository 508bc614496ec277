//! Market definitions evaluated by the analyzer.
//!
//! - [`MarketSpec`] - A named market and its mutually exclusive outcomes
//! - [`MarketCatalog`] - The ordered set of markets to evaluate
//!
//! Which markets exist is configuration: the analyzer only ever looks odds
//! up by the names listed here.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Market and outcome names used by the default football catalog.
pub mod names {
    pub const MATCH_WINNER: &str = "1x2";
    pub const DOUBLE_CHANCE: &str = "double_chance";
    pub const OVER_UNDER_1_5: &str = "over_under_1_5";
    pub const OVER_UNDER_2_5: &str = "over_under_2_5";
    pub const OVER_UNDER_3_5: &str = "over_under_3_5";
    pub const BOTH_TEAMS_SCORE: &str = "both_teams_score";
    pub const FIRST_HALF: &str = "first_half";
    pub const SECOND_HALF: &str = "second_half";

    pub const HOME: &str = "home";
    pub const DRAW: &str = "draw";
    pub const AWAY: &str = "away";
    pub const HOME_OR_DRAW: &str = "home_or_draw";
    pub const AWAY_OR_DRAW: &str = "away_or_draw";
    pub const HOME_OR_AWAY: &str = "home_or_away";
    pub const OVER: &str = "over";
    pub const UNDER: &str = "under";
    pub const YES: &str = "yes";
    pub const NO: &str = "no";
}

/// A market and the outcomes that must all be quoted for it to be evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawMarketSpec")]
pub struct MarketSpec {
    name: String,
    outcomes: Vec<String>,
}

/// Unvalidated wire form of [`MarketSpec`].
#[derive(Deserialize)]
struct RawMarketSpec {
    name: String,
    #[serde(default)]
    outcomes: Vec<String>,
}

impl TryFrom<RawMarketSpec> for MarketSpec {
    type Error = DomainError;

    fn try_from(raw: RawMarketSpec) -> Result<Self, Self::Error> {
        Self::try_new(raw.name, raw.outcomes)
    }
}

impl MarketSpec {
    /// Create a new market spec.
    pub fn new<I, S>(name: impl Into<String>, outcomes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            outcomes: outcomes.into_iter().map(Into::into).collect(),
        }
    }

    /// Create a new market spec with validation.
    ///
    /// # Domain Invariants
    ///
    /// - `name` must not be blank
    /// - there must be at least two outcomes, none blank, none repeated
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidMarket`] if any invariant is violated.
    pub fn try_new<I, S>(name: impl Into<String>, outcomes: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let spec = Self::new(name, outcomes);
        spec.validate()?;
        Ok(spec)
    }

    /// Check the spec invariants.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.trim().is_empty() {
            return Err(DomainError::invalid_market("market name cannot be empty"));
        }
        if self.outcomes.len() < 2 {
            return Err(DomainError::invalid_market(format!(
                "market '{}' needs at least two outcomes, got {}",
                self.name,
                self.outcomes.len()
            )));
        }

        let mut seen = HashSet::with_capacity(self.outcomes.len());
        for outcome in &self.outcomes {
            if outcome.trim().is_empty() {
                return Err(DomainError::invalid_market(format!(
                    "market '{}' has an empty outcome name",
                    self.name
                )));
            }
            if !seen.insert(outcome.as_str()) {
                return Err(DomainError::invalid_market(format!(
                    "market '{}' lists outcome '{}' twice",
                    self.name, outcome
                )));
            }
        }
        Ok(())
    }

    /// Get the market name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the outcome names in evaluation order.
    #[must_use]
    pub fn outcomes(&self) -> &[String] {
        &self.outcomes
    }

    /// Get the number of outcomes.
    #[must_use]
    pub fn outcome_count(&self) -> usize {
        self.outcomes.len()
    }
}

/// Ordered, validated list of markets with unique names.
///
/// Deserializes from a plain list of specs and is validated on the way in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<MarketSpec>", into = "Vec<MarketSpec>")]
pub struct MarketCatalog {
    markets: Vec<MarketSpec>,
}

impl TryFrom<Vec<MarketSpec>> for MarketCatalog {
    type Error = DomainError;

    fn try_from(markets: Vec<MarketSpec>) -> Result<Self, Self::Error> {
        Self::try_new(markets)
    }
}

impl From<MarketCatalog> for Vec<MarketSpec> {
    fn from(catalog: MarketCatalog) -> Self {
        catalog.markets
    }
}

impl MarketCatalog {
    /// Create a catalog with validation.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidMarket`] if any spec is invalid or two
    /// specs share a name.
    pub fn try_new(markets: Vec<MarketSpec>) -> Result<Self, DomainError> {
        let catalog = Self { markets };
        catalog.validate()?;
        Ok(catalog)
    }

    /// Check every spec and name uniqueness.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut names = HashSet::with_capacity(self.markets.len());
        for spec in &self.markets {
            spec.validate()?;
            if !names.insert(spec.name()) {
                return Err(DomainError::invalid_market(format!(
                    "market '{}' is defined twice",
                    spec.name()
                )));
            }
        }
        Ok(())
    }

    /// Football markets: 1X2, double chance, over/under 1.5/2.5/3.5, both
    /// teams to score and the two half-time 1X2 splits.
    #[must_use]
    pub fn football() -> Self {
        use names::*;

        let three_way = [HOME, DRAW, AWAY];
        let over_under = [OVER, UNDER];

        Self {
            markets: vec![
                MarketSpec::new(MATCH_WINNER, three_way),
                MarketSpec::new(DOUBLE_CHANCE, [HOME_OR_DRAW, AWAY_OR_DRAW, HOME_OR_AWAY]),
                MarketSpec::new(OVER_UNDER_1_5, over_under),
                MarketSpec::new(OVER_UNDER_2_5, over_under),
                MarketSpec::new(OVER_UNDER_3_5, over_under),
                MarketSpec::new(BOTH_TEAMS_SCORE, [YES, NO]),
                MarketSpec::new(FIRST_HALF, three_way),
                MarketSpec::new(SECOND_HALF, three_way),
            ],
        }
    }

    /// Get all market specs in evaluation order.
    #[must_use]
    pub fn markets(&self) -> &[MarketSpec] {
        &self.markets
    }

    /// Find a market spec by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&MarketSpec> {
        self.markets.iter().find(|m| m.name == name)
    }

    /// Number of markets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markets.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markets.is_empty()
    }
}

impl Default for MarketCatalog {
    fn default() -> Self {
        Self::football()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct Wrapper {
        markets: MarketCatalog,
    }

    #[test]
    fn football_catalog_is_valid() {
        let catalog = MarketCatalog::football();
        assert!(catalog.validate().is_ok());
        assert_eq!(catalog.len(), 8);

        let winner = catalog.get(names::MATCH_WINNER).unwrap();
        assert_eq!(winner.outcomes(), ["home", "draw", "away"]);

        let btts = catalog.get(names::BOTH_TEAMS_SCORE).unwrap();
        assert_eq!(btts.outcomes(), ["yes", "no"]);
    }

    #[test]
    fn spec_requires_two_outcomes() {
        let err = MarketSpec::try_new("solo", ["only"]).unwrap_err();
        assert!(matches!(err, DomainError::InvalidMarket { .. }));
    }

    #[test]
    fn spec_rejects_blank_name_and_duplicate_outcomes() {
        assert!(MarketSpec::try_new(" ", ["a", "b"]).is_err());
        assert!(MarketSpec::try_new("m", ["a", "a"]).is_err());
        assert!(MarketSpec::try_new("m", ["a", ""]).is_err());
        assert!(MarketSpec::try_new("m", ["a", "b"]).is_ok());
    }

    #[test]
    fn catalog_rejects_duplicate_names() {
        let result = MarketCatalog::try_new(vec![
            MarketSpec::new("m", ["a", "b"]),
            MarketSpec::new("m", ["c", "d"]),
        ]);
        assert!(matches!(result, Err(DomainError::InvalidMarket { .. })));
    }

    #[test]
    fn catalog_deserializes_from_toml_table_array() {
        let wrapper: Wrapper = toml::from_str(
            r#"
            [[markets]]
            name = "1x2"
            outcomes = ["home", "draw", "away"]

            [[markets]]
            name = "both_teams_score"
            outcomes = ["yes", "no"]
            "#,
        )
        .unwrap();

        assert_eq!(wrapper.markets.len(), 2);
        assert_eq!(wrapper.markets.markets()[1].name(), "both_teams_score");
    }

    #[test]
    fn deserialization_rejects_market_without_outcomes() {
        let err = toml::from_str::<Wrapper>(
            r#"
            [[markets]]
            name = "1x2"
            outcomes = []
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("needs at least two outcomes"));
    }

    #[test]
    fn deserialization_rejects_duplicate_market_names() {
        let err = toml::from_str::<Wrapper>(
            r#"
            [[markets]]
            name = "both_teams_score"
            outcomes = ["yes", "no"]

            [[markets]]
            name = "both_teams_score"
            outcomes = ["yes", "no"]
            "#,
        )
        .unwrap_err();

        assert!(err.to_string().contains("defined twice"));
    }

    #[test]
    fn catalog_serializes_as_plain_list() {
        let catalog = MarketCatalog::try_new(vec![MarketSpec::new("m", ["a", "b"])]).unwrap();
        let json = serde_json::to_value(&catalog).unwrap();
        assert_eq!(json, serde_json::json!([{ "name": "m", "outcomes": ["a", "b"] }]));
    }
}
