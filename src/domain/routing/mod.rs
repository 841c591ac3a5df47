//! Routing domain - route discovery and quoting

pub mod quote_calculator;
pub mod route_finder;
pub mod swap_route;

pub use quote_calculator::{get_quote, Quote, QuoteCalculator, FLAT_QUOTE_FEE};
pub use route_finder::{find_route, RouteFinder};
pub use swap_route::{Hop, Route};
