//! dex-router - route finding and swap quotes over constant-price liquidity pools
//! Built with Domain-Driven Design principles

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod report;
pub mod shared;

// Re-export main types for convenience
pub use application::{QuoteService, QuoteSession};
pub use domain::market::MarketSnapshot;
pub use domain::pool::PoolManager;
pub use domain::routing::{find_route, get_quote, Quote, Route, RouteFinder};
pub use shared::errors::{AppError, RouterError};
