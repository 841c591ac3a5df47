//! Pool domain - liquidity pool lookups

mod pool_manager;

pub use pool_manager::PoolManager;
