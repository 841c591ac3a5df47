//! Constant-price quote calculation over a route

use crate::domain::routing::swap_route::{Hop, Route};
use crate::shared::config::QuoteFeePolicy;
use crate::shared::errors::RouterError;
use crate::shared::utils::{generate_id, validate_amount};

/// Per-hop fee deducted under `QuoteFeePolicy::Flat`, independent of the pool's tier
pub const FLAT_QUOTE_FEE: f64 = 0.003;

/// Estimated output for a route, in human-readable token units
#[derive(Debug, Clone, PartialEq)]
pub struct Quote {
    pub id: String,
    pub route: Route,
    pub amount_in: f64,
    pub amount_out: f64,
    /// Running amount after each hop; the last entry equals `amount_out`
    pub hop_amounts: Vec<f64>,
}

impl Quote {
    /// Output per unit of input
    pub fn effective_price(&self) -> f64 {
        self.amount_out / self.amount_in
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct QuoteCalculator {
    fee_policy: QuoteFeePolicy,
}

impl QuoteCalculator {
    pub fn new(fee_policy: QuoteFeePolicy) -> Self {
        Self { fee_policy }
    }

    pub fn fee_policy(&self) -> QuoteFeePolicy {
        self.fee_policy
    }

    fn hop_fee(&self, hop: &Hop) -> f64 {
        match self.fee_policy {
            QuoteFeePolicy::Flat => FLAT_QUOTE_FEE,
            QuoteFeePolicy::Pool => hop.pool.fee.as_fraction(),
        }
    }

    /// Fold the amount through each hop: price, then fee
    pub fn get_quote(&self, route: &Route, amount_in: f64) -> Result<Quote, RouterError> {
        validate_amount(amount_in)?;
        route.validate()?;

        let mut current = amount_in;
        let mut hop_amounts = Vec::with_capacity(route.len());
        for hop in &route.hops {
            let raw_out = current * hop.price()?;
            current = raw_out * (1.0 - self.hop_fee(hop));
            if !current.is_finite() {
                return Err(RouterError::InvalidAmount(format!(
                    "quote for {} overflows at {} -> {}",
                    amount_in,
                    hop.symbol_in(),
                    hop.symbol_out()
                )));
            }
            hop_amounts.push(current);
        }

        Ok(Quote {
            id: generate_id(),
            route: route.clone(),
            amount_in,
            amount_out: current,
            hop_amounts,
        })
    }

    pub fn quote_amount(&self, route: &Route, amount_in: f64) -> Result<f64, RouterError> {
        self.get_quote(route, amount_in).map(|quote| quote.amount_out)
    }
}

/// Quote with the flat fee
pub fn get_quote(route: &Route, amount_in: f64) -> Result<f64, RouterError> {
    QuoteCalculator::default().quote_amount(route, amount_in)
}
