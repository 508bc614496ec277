use std::io::Write;

use rust_decimal_macros::dec;
use tempfile::NamedTempFile;

use surebet::config::{Config, LogFormat, StorageBackend};
use surebet::domain::market::names;
use surebet::domain::ArbitrageAnalyzer;
use surebet::error::{ConfigError, Error};

fn write_temp_config(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create temp config");
    file.write_all(contents.as_bytes()).expect("write temp config");
    file
}

#[test]
fn config_loads_full_file() {
    let toml = r#"
[logging]
level = "debug"
format = "json"

[analyzer]
reference_stake = 500
min_profit_percent = 1

[[analyzer.markets]]
name = "1x2"
outcomes = ["home", "draw", "away"]

[[analyzer.markets]]
name = "over_under_2_5"
outcomes = ["over", "under"]

[storage]
backend = "csv"
directory = "captures"
filename_prefix = "sisal_odds"
session_id = "20240504_183000"
"#;

    let file = write_temp_config(toml);
    let result = Config::load(file.path());

    let config = result.expect("config should load");
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert_eq!(config.analyzer.reference_stake, dec!(500));
    assert_eq!(config.analyzer.min_profit_percent, dec!(1));
    assert_eq!(config.analyzer.markets.len(), 2);
    assert!(config.analyzer.markets.get(names::OVER_UNDER_2_5).is_some());
    assert_eq!(config.storage.backend, StorageBackend::Csv);
    assert_eq!(config.storage.session_id.as_deref(), Some("20240504_183000"));

    assert!(ArbitrageAnalyzer::try_new(config.analyzer).is_ok());
}

#[test]
fn config_rejects_negative_threshold() {
    let toml = r#"
[analyzer]
min_profit_percent = -0.5
"#;

    let file = write_temp_config(toml);
    let result = Config::load(file.path());

    match result {
        Err(Error::Config(ConfigError::InvalidValue {
            field: "analyzer",
            reason,
        })) => assert!(reason.contains("minimum profit percent cannot be negative")),
        Err(err) => panic!("Expected invalid threshold error, got {err}"),
        Ok(config) => panic!(
            "Expected negative threshold to be rejected, got {}",
            config.analyzer.min_profit_percent
        ),
    }
}

#[test]
fn config_rejects_duplicate_markets() {
    let toml = r#"
[[analyzer.markets]]
name = "both_teams_score"
outcomes = ["yes", "no"]

[[analyzer.markets]]
name = "both_teams_score"
outcomes = ["yes", "no"]
"#;

    let file = write_temp_config(toml);
    let result = Config::load(file.path());

    match result {
        Err(Error::Config(ConfigError::Parse(err))) => {
            assert!(err.to_string().contains("defined twice"))
        }
        Err(err) => panic!("Expected duplicate market error, got {err}"),
        Ok(config) => panic!(
            "Expected duplicate markets to be rejected, got {} markets",
            config.analyzer.markets.len()
        ),
    }
}

#[test]
fn config_rejects_unknown_backend() {
    let toml = r#"
[storage]
backend = "postgres"
"#;

    let file = write_temp_config(toml);
    let result = Config::load(file.path());

    assert!(matches!(result, Err(Error::Config(ConfigError::Parse(_)))));
}

#[test]
fn config_missing_file_is_read_error() {
    let dir = tempfile::tempdir().expect("create temp dir");
    let result = Config::load(dir.path().join("missing.toml"));
    assert!(matches!(result, Err(Error::Config(ConfigError::ReadFile(_)))));
}
