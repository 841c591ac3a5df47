//! Market domain - token list and pool set snapshots

mod market_snapshot;

pub use market_snapshot::MarketSnapshot;
