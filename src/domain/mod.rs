//! Domain layer - core routing logic and entities

pub mod execution;
pub mod market;
pub mod pool;
pub mod routing;
