//! Infrastructure layer - market data sources

pub mod market_source;

pub use market_source::{demo_market, MarketSource};
