// src/report.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::application::services::PreparedSwap;
use crate::domain::execution::{encode_path_hex, SwapCall};
use crate::domain::routing::{Quote, Route};
use crate::shared::errors::RouterError;
use crate::shared::types::{Pool, Token};
use crate::shared::utils::raw_to_ui;

#[derive(Debug, Serialize)]
pub struct TokenReport {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub chain_id: u64,
}

impl From<&Token> for TokenReport {
    fn from(token: &Token) -> Self {
        Self {
            address: token.address.to_string(),
            symbol: token.symbol.clone(),
            decimals: token.decimals,
            name: token.name.clone(),
            chain_id: token.chain_id,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PoolReport {
    pub address: String,
    pub pair: String,
    pub token0: String,
    pub token1: String,
    pub fee_ppm: u32,
    pub fee_percent: f64,
    /// token1 per token0
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tvl: Option<f64>,
}

impl From<&Pool> for PoolReport {
    fn from(pool: &Pool) -> Self {
        Self {
            address: pool.address.to_string(),
            pair: pool.pair_label(),
            token0: pool.token0.address.to_string(),
            token1: pool.token1.address.to_string(),
            fee_ppm: pool.fee.ppm(),
            fee_percent: pool.fee.as_percent(),
            price: pool.price,
            tvl: pool.tvl,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HopReport {
    pub pool: String,
    pub token_in: String,
    pub token_out: String,
    pub fee_ppm: u32,
    /// Amount after this hop; absent for plain route reports
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_out: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub path: String,
    pub hops: Vec<HopReport>,
}

impl RouteReport {
    pub fn new(route: &Route) -> Self {
        Self::with_amounts(route, &[])
    }

    fn with_amounts(route: &Route, amounts: &[f64]) -> Self {
        let hops = route
            .hops
            .iter()
            .enumerate()
            .map(|(i, hop)| HopReport {
                pool: hop.pool.address.to_string(),
                token_in: hop.symbol_in().to_string(),
                token_out: hop.symbol_out().to_string(),
                fee_ppm: hop.pool.fee.ppm(),
                amount_out: amounts.get(i).copied(),
            })
            .collect();

        Self {
            path: route.to_string(),
            hops,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QuoteReport {
    pub quote_id: String,
    pub token_in: String,
    pub token_out: String,
    pub amount_in: f64,
    pub amount_out: f64,
    pub effective_price: f64,
    pub route: RouteReport,
    pub timestamp: DateTime<Utc>,
}

impl QuoteReport {
    pub fn new(quote: &Quote, timestamp: DateTime<Utc>) -> Self {
        let (token_in, token_out) = match (quote.route.hops.first(), quote.route.hops.last()) {
            (Some(first), Some(last)) => (first.symbol_in().to_string(), last.symbol_out().to_string()),
            _ => (String::new(), String::new()),
        };

        Self {
            quote_id: quote.id.clone(),
            token_in,
            token_out,
            amount_in: quote.amount_in,
            amount_out: quote.amount_out,
            effective_price: quote.effective_price(),
            route: RouteReport::with_amounts(&quote.route, &quote.hop_amounts),
            timestamp,
        }
    }
}

/// Raw amounts are decimal strings so uint256 values survive JSON consumers
#[derive(Debug, Serialize)]
pub struct SwapReport {
    pub quote: QuoteReport,
    pub method: String,
    pub recipient: String,
    pub amount_in_raw: String,
    pub amount_out_minimum_raw: String,
    pub amount_out_minimum: String,
    pub deadline: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fee_ppm: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl SwapReport {
    pub fn new(prepared: &PreparedSwap, timestamp: DateTime<Utc>) -> Result<Self, RouterError> {
        let call = &prepared.call;
        let (recipient, fee_ppm, path) = match call {
            SwapCall::ExactInputSingle(p) => (p.recipient, Some(p.fee.ppm()), None),
            SwapCall::ExactInput(p) => (p.recipient, None, Some(encode_path_hex(&prepared.quote.route)?)),
        };

        Ok(Self {
            quote: QuoteReport::new(&prepared.quote, timestamp),
            method: call.method().to_string(),
            recipient: recipient.to_string(),
            amount_in_raw: call.amount_in().to_string(),
            amount_out_minimum_raw: call.amount_out_minimum().to_string(),
            amount_out_minimum: raw_to_ui(call.amount_out_minimum(), prepared.token_out.decimals)?,
            deadline: call.deadline(),
            fee_ppm,
            path,
        })
    }
}

pub fn to_json<T: Serialize>(report: &T) -> serde_json::Result<String> {
    serde_json::to_string_pretty(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::QuoteService;
    use crate::domain::execution::SwapRequest;
    use crate::domain::market::MarketSnapshot;
    use crate::infrastructure::demo_market;
    use crate::shared::config::RouterConfig;
    use crate::shared::types::Address;

    fn service() -> QuoteService {
        let snapshot = MarketSnapshot::from_config(&demo_market().unwrap()).unwrap();
        QuoteService::new(snapshot, RouterConfig::default())
    }

    #[test]
    fn test_quote_report_json() {
        let quote = service().get_quote("ETH", "DAI", 1.0).unwrap();
        let report = QuoteReport::new(&quote, Utc::now());
        assert_eq!(report.token_in, "ETH");
        assert_eq!(report.token_out, "DAI");
        assert_eq!(report.route.hops.len(), 1);

        let json: serde_json::Value = serde_json::from_str(&to_json(&report).unwrap()).unwrap();
        assert_eq!(json["route"]["hops"][0]["fee_ppm"], 3000);
        assert!(json["route"]["hops"][0]["amount_out"].as_f64().unwrap() > 1600.0);
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn test_route_report_omits_amounts() {
        let route = service().find_route("USDC", "DAI").unwrap();
        let json = to_json(&RouteReport::new(&route)).unwrap();
        assert!(!json.contains("amount_out"));
        assert!(json.contains("USDC -(0.30%)-> ETH -(0.30%)-> DAI"));
    }

    #[test]
    fn test_swap_report_multi_hop() {
        let prepared = service()
            .prepare_swap("USDC", "DAI", 1000.0, &SwapRequest::new(Address::new([9; 20])), Utc::now())
            .unwrap();
        let report = SwapReport::new(&prepared, Utc::now()).unwrap();

        assert_eq!(report.method, "exactInput");
        assert_eq!(report.amount_in_raw, "1000000000");
        assert!(report.fee_ppm.is_none());
        // token | fee | token | fee | token
        assert_eq!(report.path.unwrap().len(), 2 + 2 * (20 * 3 + 3 * 2));
    }

    #[test]
    fn test_pool_and_token_reports() {
        let snapshot = MarketSnapshot::from_config(&demo_market().unwrap()).unwrap();
        let pool = PoolReport::from(snapshot.pools().get_pools()[0].as_ref());
        assert_eq!(pool.pair, "ETH/USDC");
        assert_eq!(pool.fee_ppm, 3000);

        let token = TokenReport::from(&snapshot.tokens()[1]);
        assert_eq!(token.symbol, "USDC");
        assert_eq!(token.decimals, 6);
    }
}
