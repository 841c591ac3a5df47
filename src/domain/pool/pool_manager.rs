//! Pool manager for liquidity pool lookups

use std::sync::Arc;

use crate::shared::types::{Address, FeeTier, Pool};

/// Read-only pool set. Lookups return the first match in insertion order.
#[derive(Debug, Clone, Default)]
pub struct PoolManager {
    pools: Vec<Arc<Pool>>,
}

impl PoolManager {
    pub fn new(pools: Vec<Pool>) -> Self {
        Self {
            pools: pools.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn add_pool(&mut self, pool: Pool) {
        self.pools.push(Arc::new(pool));
    }

    pub fn get_pools(&self) -> &[Arc<Pool>] {
        &self.pools
    }

    pub fn len(&self) -> usize {
        self.pools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pools.is_empty()
    }

    pub fn get_pool_by_address(&self, address: &Address) -> Option<&Arc<Pool>> {
        self.pools.iter().find(|pool| pool.address == *address)
    }

    /// Pool for the unordered pair at exactly this fee tier
    pub fn get_pool_by_tokens(&self, a: &Address, b: &Address, fee: FeeTier) -> Option<&Arc<Pool>> {
        self.pools
            .iter()
            .find(|pool| pool.fee == fee && pool.connects(a, b))
    }

    /// Pool for the pair at the first tier (in priority order) that has one
    pub fn find_pool(&self, a: &Address, b: &Address, fee_tiers: &[FeeTier]) -> Option<&Arc<Pool>> {
        fee_tiers
            .iter()
            .find_map(|fee| self.get_pool_by_tokens(a, b, *fee))
    }

    /// Every pool touching `token`
    pub fn pools_for_token<'a>(&'a self, token: &'a Address) -> impl Iterator<Item = &'a Arc<Pool>> + 'a {
        self.pools.iter().filter(move |pool| pool.contains(token))
    }
}
