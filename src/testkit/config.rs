//! Canonical test configurations.

use std::path::Path;

use rust_decimal::Decimal;

use crate::config::{StorageBackend, StorageConfig};
use crate::domain::{AnalyzerConfig, MarketCatalog, MarketSpec};

/// Analyzer config limited to the given markets, default stake and threshold.
pub fn analyzer(markets: Vec<MarketSpec>) -> AnalyzerConfig {
    AnalyzerConfig {
        markets: MarketCatalog::try_new(markets)
            .unwrap_or_else(|e| panic!("invalid fixture catalog: {e}")),
        ..AnalyzerConfig::default()
    }
}

/// Analyzer config over the football catalog with a reporting threshold.
pub fn analyzer_with_threshold(min_profit_percent: Decimal) -> AnalyzerConfig {
    AnalyzerConfig {
        min_profit_percent,
        ..AnalyzerConfig::default()
    }
}

/// File storage config with a fixed session id.
pub fn file_storage(backend: StorageBackend, directory: &Path) -> StorageConfig {
    StorageConfig {
        backend,
        directory: directory.to_path_buf(),
        filename_prefix: "odds".into(),
        session_id: Some("test_session".into()),
    }
}
