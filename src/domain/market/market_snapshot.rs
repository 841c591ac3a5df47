//! Immutable view of the token list and pool set used for one or more quotes

use std::collections::HashSet;

use crate::domain::pool::PoolManager;
use crate::shared::config::MarketConfig;
use crate::shared::errors::RouterError;
use crate::shared::types::{parse_address, Address, Pool, Token};

#[derive(Debug, Clone, Default)]
pub struct MarketSnapshot {
    tokens: Vec<Token>,
    pools: PoolManager,
}

impl MarketSnapshot {
    pub fn new(tokens: Vec<Token>, pools: Vec<Pool>) -> Result<Self, RouterError> {
        let mut seen = HashSet::with_capacity(tokens.len());
        for token in &tokens {
            if !seen.insert(token.address) {
                return Err(RouterError::InvalidInput(format!(
                    "duplicate token address {} ({})",
                    token.address, token.symbol
                )));
            }
        }

        let mut manager = PoolManager::default();
        for pool in pools {
            if manager.get_pool_by_address(&pool.address).is_some() {
                return Err(RouterError::InvalidPool {
                    address: pool.address.to_string(),
                    reason: format!("duplicate pool address ({})", pool.pair_label()),
                });
            }
            manager.add_pool(pool);
        }

        Ok(Self {
            tokens,
            pools: manager,
        })
    }

    /// Build from a market file, resolving pool token references against the token list
    pub fn from_config(config: &MarketConfig) -> Result<Self, RouterError> {
        let tokens = config.tokens.clone();
        let lookup = |reference: &str| {
            tokens
                .iter()
                .find(|token| token.matches_reference(reference))
                .cloned()
                .ok_or_else(|| RouterError::TokenNotFound(reference.to_string()))
        };

        let mut pools = Vec::with_capacity(config.pools.len());
        for entry in &config.pools {
            let token0 = lookup(&entry.token0)?;
            let token1 = lookup(&entry.token1)?;
            let pool = Pool::new(entry.address, token0, token1, entry.fee_tier()?, entry.price)?
                .with_tvl(entry.tvl);
            pools.push(pool);
        }

        Self::new(tokens, pools)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn pools(&self) -> &PoolManager {
        &self.pools
    }

    pub fn token(&self, address: &Address) -> Option<&Token> {
        self.tokens.iter().find(|token| token.address == *address)
    }

    /// Resolve an address or symbol; the first symbol match in list order wins
    pub fn resolve_token(&self, reference: &str) -> Result<&Token, RouterError> {
        if let Ok(address) = parse_address(reference) {
            return self
                .token(&address)
                .ok_or_else(|| RouterError::TokenNotFound(reference.to_string()));
        }
        self.tokens
            .iter()
            .find(|token| token.symbol.eq_ignore_ascii_case(reference.trim()))
            .ok_or_else(|| RouterError::TokenNotFound(reference.to_string()))
    }
}
