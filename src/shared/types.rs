//! Common types used across the application

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::errors::RouterError;

pub use alloy_primitives::Address;

/// Fee tier used for route discovery when nothing else is configured
pub const DEFAULT_FEE_TIER: FeeTier = FeeTier::MEDIUM;

/// Fee percentages closer than this are considered the same tier
pub const FEE_PERCENT_TOLERANCE: f64 = 0.001;

const PPM_PER_PERCENT: f64 = 10_000.0;
const PPM_SCALE: u32 = 1_000_000;

/// Parse a `0x`-prefixed address; checksum casing is not enforced
pub fn parse_address(s: &str) -> Result<Address, RouterError> {
    let trimmed = s.trim();
    if !trimmed.starts_with("0x") && !trimmed.starts_with("0X") {
        return Err(RouterError::InvalidInput(format!("address must start with 0x: {}", s)));
    }
    trimmed
        .parse()
        .map_err(|e| RouterError::InvalidInput(format!("invalid address {}: {}", s, e)))
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Token {
    pub address: Address,
    pub symbol: String,
    pub decimals: u8,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
}

fn default_chain_id() -> u64 {
    1
}

impl Token {
    pub fn new(address: Address, symbol: &str, decimals: u8) -> Self {
        Self {
            address,
            symbol: symbol.to_string(),
            decimals,
            name: None,
            chain_id: default_chain_id(),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    /// Matches either the address or the symbol (case-insensitive)
    pub fn matches_reference(&self, reference: &str) -> bool {
        let reference = reference.trim();
        if let Ok(address) = parse_address(reference) {
            return address == self.address;
        }
        self.symbol.eq_ignore_ascii_case(reference)
    }
}

/// Pool fee tier in parts-per-million (3000 = 0.3%)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct FeeTier(u32);

impl FeeTier {
    pub const LOWEST: FeeTier = FeeTier(100);
    pub const LOW: FeeTier = FeeTier(500);
    pub const MEDIUM: FeeTier = FeeTier(3000);
    pub const HIGH: FeeTier = FeeTier(10_000);

    pub fn new(ppm: u32) -> Result<Self, RouterError> {
        if ppm >= PPM_SCALE {
            return Err(RouterError::InvalidInput(format!(
                "fee tier {} ppm must be below 100%",
                ppm
            )));
        }
        Ok(Self(ppm))
    }

    /// Convert a percentage such as `0.3` into a tier
    pub fn from_percent(percent: f64) -> Result<Self, RouterError> {
        if !percent.is_finite() || percent < 0.0 {
            return Err(RouterError::InvalidInput(format!("invalid fee percentage {}", percent)));
        }
        Self::new((percent * PPM_PER_PERCENT).round() as u32)
    }

    pub fn ppm(&self) -> u32 {
        self.0
    }

    pub fn as_percent(&self) -> f64 {
        self.0 as f64 / PPM_PER_PERCENT
    }

    pub fn as_fraction(&self) -> f64 {
        self.0 as f64 / PPM_SCALE as f64
    }

    pub fn matches_percent(&self, percent: f64) -> bool {
        (self.as_percent() - percent).abs() < FEE_PERCENT_TOLERANCE
    }
}

impl TryFrom<u32> for FeeTier {
    type Error = RouterError;

    fn try_from(ppm: u32) -> Result<Self, Self::Error> {
        Self::new(ppm)
    }
}

impl From<FeeTier> for u32 {
    fn from(fee: FeeTier) -> Self {
        fee.0
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}%", self.as_percent())
    }
}

/// Liquidity pool snapshot. `price` is token1 per token0.
#[derive(Debug, Clone, PartialEq)]
pub struct Pool {
    pub address: Address,
    pub token0: Token,
    pub token1: Token,
    pub fee: FeeTier,
    pub price: f64,
    pub tvl: Option<f64>,
}

impl Pool {
    pub fn new(
        address: Address,
        token0: Token,
        token1: Token,
        fee: FeeTier,
        price: f64,
    ) -> Result<Self, RouterError> {
        let invalid = |reason: String| RouterError::InvalidPool {
            address: address.to_string(),
            reason,
        };

        if token0.address == token1.address {
            return Err(invalid(format!("both sides are {}", token0.symbol)));
        }
        if !price.is_finite() || price <= 0.0 {
            return Err(invalid(format!("price must be positive, got {}", price)));
        }
        FeeTier::new(fee.ppm()).map_err(|e| invalid(e.to_string()))?;

        Ok(Self {
            address,
            token0,
            token1,
            fee,
            price,
            tvl: None,
        })
    }

    pub fn with_tvl(mut self, tvl: Option<f64>) -> Self {
        self.tvl = tvl;
        self
    }

    pub fn contains(&self, token: &Address) -> bool {
        self.token0.address == *token || self.token1.address == *token
    }

    /// Unordered pair match
    pub fn connects(&self, a: &Address, b: &Address) -> bool {
        (self.token0.address == *a && self.token1.address == *b)
            || (self.token0.address == *b && self.token1.address == *a)
    }

    pub fn token(&self, address: &Address) -> Option<&Token> {
        if self.token0.address == *address {
            Some(&self.token0)
        } else if self.token1.address == *address {
            Some(&self.token1)
        } else {
            None
        }
    }

    pub fn pair_label(&self) -> String {
        format!("{}/{}", self.token0.symbol, self.token1.symbol)
    }
}
