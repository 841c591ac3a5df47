use std::fmt;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::shared::config::{ConfigLoader, MarketConfig};
use crate::shared::errors::AppError;

const DEMO_MARKET_TOML: &str = include_str!("../../config/demo_market.toml");

/// Built-in demo market (ETH, USDC, DAI, WBTC and four pools)
pub fn demo_market() -> Result<MarketConfig, AppError> {
    ConfigLoader::parse(DEMO_MARKET_TOML)
}

/// Where the token list and pool set come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarketSource {
    Demo,
    File(PathBuf),
}

impl MarketSource {
    pub fn from_path(path: Option<PathBuf>) -> Self {
        path.map_or(MarketSource::Demo, MarketSource::File)
    }

    pub async fn load(&self) -> Result<MarketConfig, AppError> {
        let config = match self {
            MarketSource::Demo => demo_market()?,
            MarketSource::File(path) => {
                debug!("Reading market file {}", path.display());
                let content = tokio::fs::read_to_string(path).await.map_err(|e| {
                    AppError::ConfigError(format!("Failed to read config file {}: {}", path.display(), e))
                })?;
                ConfigLoader::parse(&content)?
            }
        };

        if config.tokens.is_empty() {
            return Err(AppError::MarketError(format!("{} has no tokens", self)));
        }

        info!(
            source = %self,
            tokens = config.tokens.len(),
            pools = config.pools.len(),
            "Loaded market"
        );
        Ok(config)
    }
}

impl fmt::Display for MarketSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarketSource::Demo => write!(f, "demo market"),
            MarketSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}
