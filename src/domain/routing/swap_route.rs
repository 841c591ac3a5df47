//! Swap route representation

use std::fmt;
use std::sync::Arc;

use crate::shared::errors::RouterError;
use crate::shared::types::{Address, Pool};

/// Directional traversal of a single pool
#[derive(Debug, Clone, PartialEq)]
pub struct Hop {
    pub pool: Arc<Pool>,
    pub token_in: Address,
    pub token_out: Address,
}

impl Hop {
    pub fn new(pool: Arc<Pool>, token_in: Address, token_out: Address) -> Self {
        Self {
            pool,
            token_in,
            token_out,
        }
    }

    /// Hop tokens must be the pool's two tokens, in either order
    pub fn validate(&self) -> Result<(), RouterError> {
        if self.token_in == self.token_out || !self.pool.connects(&self.token_in, &self.token_out) {
            return Err(RouterError::RouteIntegrity(format!(
                "hop {} -> {} does not match pool {} ({})",
                self.token_in,
                self.token_out,
                self.pool.address,
                self.pool.pair_label()
            )));
        }
        Ok(())
    }

    /// token_out per token_in. Pool prices are token1 per token0, so the reverse direction inverts.
    pub fn price(&self) -> Result<f64, RouterError> {
        self.validate()?;
        if self.pool.token0.address == self.token_in {
            Ok(self.pool.price)
        } else {
            Ok(1.0 / self.pool.price)
        }
    }

    pub fn symbol_in(&self) -> &str {
        self.pool.token(&self.token_in).map_or("?", |t| t.symbol.as_str())
    }

    pub fn symbol_out(&self) -> &str {
        self.pool.token(&self.token_out).map_or("?", |t| t.symbol.as_str())
    }
}

/// Ordered hops from the input token to the output token
#[derive(Debug, Clone, PartialEq)]
pub struct Route {
    pub hops: Vec<Hop>,
}

impl Route {
    pub fn new(hops: Vec<Hop>) -> Self {
        Self { hops }
    }

    pub fn direct(hop: Hop) -> Self {
        Self { hops: vec![hop] }
    }

    pub fn two_hop(first: Hop, second: Hop) -> Self {
        Self {
            hops: vec![first, second],
        }
    }

    pub fn len(&self) -> usize {
        self.hops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hops.is_empty()
    }

    pub fn is_direct(&self) -> bool {
        self.hops.len() == 1
    }

    pub fn token_in(&self) -> Option<Address> {
        self.hops.first().map(|hop| hop.token_in)
    }

    pub fn token_out(&self) -> Option<Address> {
        self.hops.last().map(|hop| hop.token_out)
    }

    /// Every token visited, input first
    pub fn path_tokens(&self) -> Vec<Address> {
        let mut tokens = Vec::with_capacity(self.hops.len() + 1);
        if let Some(first) = self.hops.first() {
            tokens.push(first.token_in);
        }
        tokens.extend(self.hops.iter().map(|hop| hop.token_out));
        tokens
    }

    /// Non-empty, every hop matches its pool, hops chain
    pub fn validate(&self) -> Result<(), RouterError> {
        if self.hops.is_empty() {
            return Err(RouterError::NoRoute);
        }
        for hop in &self.hops {
            hop.validate()?;
        }
        for pair in self.hops.windows(2) {
            if pair[0].token_out != pair[1].token_in {
                return Err(RouterError::RouteIntegrity(format!(
                    "hop ends at {} but next hop starts at {}",
                    pair[0].token_out, pair[1].token_in
                )));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(first) = self.hops.first() else {
            return write!(f, "<empty route>");
        };
        write!(f, "{}", first.symbol_in())?;
        for hop in &self.hops {
            write!(f, " -({})-> {}", hop.pool.fee, hop.symbol_out())?;
        }
        Ok(())
    }
}
