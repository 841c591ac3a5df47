//! Application services and use cases

use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};
use tracing::{debug, info, warn};

use crate::domain::execution::{SwapCall, SwapRequest, TransactionBuilder};
use crate::domain::market::MarketSnapshot;
use crate::domain::routing::{Quote, QuoteCalculator, Route, RouteFinder};
use crate::shared::config::RouterConfig;
use crate::shared::errors::RouterError;
use crate::shared::types::Token;
use crate::shared::utils::validate_amount;

/// Quote plus the router call that would execute it
#[derive(Debug, Clone)]
pub struct PreparedSwap {
    pub quote: Quote,
    pub token_in: Token,
    pub token_out: Token,
    pub call: SwapCall,
}

/// Entry point for route finding and quoting over the current market snapshot.
///
/// Every call works on the snapshot that was current when it started; a snapshot
/// swapped in mid-call is only seen by later calls.
pub struct QuoteService {
    snapshot: RwLock<Arc<MarketSnapshot>>,
    config: RouterConfig,
    finder: RouteFinder,
    calculator: QuoteCalculator,
}

impl QuoteService {
    pub fn new(snapshot: MarketSnapshot, config: RouterConfig) -> Self {
        info!(
            tokens = snapshot.tokens().len(),
            pools = snapshot.pools().len(),
            fee_tiers = ?config.fee_tiers,
            selection = ?config.intermediate_selection,
            quote_fee = ?config.quote_fee,
            "Quote service ready"
        );

        Self {
            snapshot: RwLock::new(Arc::new(snapshot)),
            finder: RouteFinder::new(&config),
            calculator: QuoteCalculator::new(config.quote_fee),
            config,
        }
    }

    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    pub fn snapshot(&self) -> Arc<MarketSnapshot> {
        let guard = self.snapshot.read().unwrap_or_else(|poisoned| poisoned.into_inner());
        Arc::clone(&guard)
    }

    pub fn replace_snapshot(&self, snapshot: MarketSnapshot) {
        info!(
            tokens = snapshot.tokens().len(),
            pools = snapshot.pools().len(),
            "Replacing market snapshot"
        );
        let mut guard = self.snapshot.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Arc::new(snapshot);
    }

    /// Route between two tokens given by address or symbol
    pub fn find_route(&self, token_in: &str, token_out: &str) -> Result<Route, RouterError> {
        let snapshot = self.snapshot();
        self.route_in(&snapshot, token_in, token_out)
            .map(|(_, _, route)| route)
    }

    pub fn get_quote(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<Quote, RouterError> {
        let snapshot = self.snapshot();
        self.quote_in(&snapshot, token_in, token_out, amount_in)
            .map(|(_, _, quote)| quote)
    }

    /// Output amount only
    pub fn quote_amount(&self, token_in: &str, token_out: &str, amount_in: f64) -> Result<f64, RouterError> {
        self.get_quote(token_in, token_out, amount_in)
            .map(|quote| quote.amount_out)
    }

    pub fn prepare_swap(
        &self,
        token_in: &str,
        token_out: &str,
        amount_in: f64,
        request: &SwapRequest,
        now: DateTime<Utc>,
    ) -> Result<PreparedSwap, RouterError> {
        let snapshot = self.snapshot();
        let (token_in, token_out, quote) = self.quote_in(&snapshot, token_in, token_out, amount_in)?;
        let call = TransactionBuilder::build_swap(&quote, &token_in, &token_out, request, now)?;

        info!(
            quote_id = %quote.id,
            method = call.method(),
            amount_in = %call.amount_in(),
            amount_out_minimum = %call.amount_out_minimum(),
            "Swap prepared"
        );

        Ok(PreparedSwap {
            quote,
            token_in,
            token_out,
            call,
        })
    }

    fn route_in(
        &self,
        snapshot: &MarketSnapshot,
        token_in: &str,
        token_out: &str,
    ) -> Result<(Token, Token, Route), RouterError> {
        let from = snapshot.resolve_token(token_in)?.clone();
        let to = snapshot.resolve_token(token_out)?.clone();

        match self
            .finder
            .find_route(&from.address, &to.address, snapshot.pools(), snapshot.tokens())?
        {
            Some(route) => {
                debug!(route = %route, hops = route.len(), "Route selected");
                Ok((from, to, route))
            }
            None => {
                warn!(token_in = %from.symbol, token_out = %to.symbol, "No route found");
                Err(RouterError::NoRoute)
            }
        }
    }

    fn quote_in(
        &self,
        snapshot: &MarketSnapshot,
        token_in: &str,
        token_out: &str,
        amount_in: f64,
    ) -> Result<(Token, Token, Quote), RouterError> {
        validate_amount(amount_in)?;
        let (from, to, route) = self.route_in(snapshot, token_in, token_out)?;
        let quote = self.calculator.get_quote(&route, amount_in)?;

        info!(
            quote_id = %quote.id,
            route = %quote.route,
            amount_in,
            amount_out = quote.amount_out,
            "Quote calculated"
        );
        Ok((from, to, quote))
    }
}
