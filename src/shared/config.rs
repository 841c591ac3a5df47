use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::shared::errors::{AppError, RouterError};
use crate::shared::types::{Address, FeeTier, Token, DEFAULT_FEE_TIER};

/// How to choose between several viable two-hop intermediates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntermediateSelection {
    /// First viable intermediate in token-list order
    #[default]
    FirstViable,
    /// Intermediate with the highest quoted output
    BestOutput,
}

/// Which fee the quote calculator deducts per hop
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteFeePolicy {
    /// Flat 0.3% regardless of the pool's tier
    #[default]
    Flat,
    /// The pool's own fee tier
    Pool,
}

/// Route discovery and quoting policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Tiers tried in priority order for every pool lookup
    pub fee_tiers: Vec<FeeTier>,
    pub intermediate_selection: IntermediateSelection,
    pub quote_fee: QuoteFeePolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            fee_tiers: vec![DEFAULT_FEE_TIER],
            intermediate_selection: IntermediateSelection::default(),
            quote_fee: QuoteFeePolicy::default(),
        }
    }
}

/// Pool entry as written in the market file; tokens are referenced by symbol or address
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolEntry {
    pub address: Address,
    pub token0: String,
    pub token1: String,
    #[serde(default)]
    pub fee: Option<FeeTier>,
    #[serde(default)]
    pub fee_percent: Option<f64>,
    pub price: f64,
    #[serde(default)]
    pub tvl: Option<f64>,
}

impl PoolEntry {
    /// Resolve `fee` (ppm) or `fee_percent`; both present must agree
    pub fn fee_tier(&self) -> Result<FeeTier, RouterError> {
        let invalid = |reason: String| RouterError::InvalidPool {
            address: self.address.to_string(),
            reason,
        };

        match (self.fee, self.fee_percent) {
            (Some(fee), Some(percent)) if !fee.matches_percent(percent) => Err(invalid(format!(
                "fee {} ppm disagrees with fee_percent {}",
                fee.ppm(),
                percent
            ))),
            (Some(fee), _) => Ok(fee),
            (None, Some(percent)) => FeeTier::from_percent(percent).map_err(|e| invalid(e.to_string())),
            (None, None) => Err(invalid("missing fee".to_string())),
        }
    }
}

/// Full market file: routing policy plus the token and pool lists
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    #[serde(default)]
    pub router: RouterConfig,
    #[serde(default)]
    pub tokens: Vec<Token>,
    #[serde(default)]
    pub pools: Vec<PoolEntry>,
}

/// Market config loader
pub struct ConfigLoader;

impl ConfigLoader {
    pub fn parse(content: &str) -> Result<MarketConfig, AppError> {
        let config: MarketConfig = toml::from_str(content)?;
        Ok(config)
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<MarketConfig, AppError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AppError::ConfigError(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::parse(&content)
    }
}
