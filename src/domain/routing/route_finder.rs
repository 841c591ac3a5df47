//! One- and two-hop route discovery over a pool set

use tracing::{debug, warn};

use crate::domain::pool::PoolManager;
use crate::domain::routing::quote_calculator::QuoteCalculator;
use crate::domain::routing::swap_route::{Hop, Route};
use crate::shared::config::{IntermediateSelection, RouterConfig};
use crate::shared::errors::RouterError;
use crate::shared::types::{Address, FeeTier, Token, DEFAULT_FEE_TIER};

/// Output is linear in the input under constant-price quoting, so any positive amount ranks routes the same
const SCORING_AMOUNT: f64 = 1.0;

#[derive(Debug, Clone)]
pub struct RouteFinder {
    fee_tiers: Vec<FeeTier>,
    selection: IntermediateSelection,
    scorer: QuoteCalculator,
}

impl Default for RouteFinder {
    fn default() -> Self {
        Self::new(&RouterConfig::default())
    }
}

impl RouteFinder {
    pub fn new(config: &RouterConfig) -> Self {
        let fee_tiers = if config.fee_tiers.is_empty() {
            warn!("No fee tiers configured, falling back to {}", DEFAULT_FEE_TIER);
            vec![DEFAULT_FEE_TIER]
        } else {
            config.fee_tiers.clone()
        };

        Self {
            fee_tiers,
            selection: config.intermediate_selection,
            scorer: QuoteCalculator::new(config.quote_fee),
        }
    }

    pub fn fee_tiers(&self) -> &[FeeTier] {
        &self.fee_tiers
    }

    /// Direct pool first, then the two-hop fallback through `candidates`.
    /// `Ok(None)` means no route exists; identical tokens are rejected.
    pub fn find_route(
        &self,
        token_in: &Address,
        token_out: &Address,
        pools: &PoolManager,
        candidates: &[Token],
    ) -> Result<Option<Route>, RouterError> {
        if token_in == token_out {
            return Err(RouterError::InvalidInput(format!(
                "token_in and token_out are both {}",
                token_in
            )));
        }

        if let Some(pool) = pools.find_pool(token_in, token_out, &self.fee_tiers) {
            debug!(pool = %pool.address, fee = %pool.fee, "Direct pool found");
            return Ok(Some(Route::direct(Hop::new(pool.clone(), *token_in, *token_out))));
        }

        let mut viable = candidates
            .iter()
            .map(|token| token.address)
            .filter(|mid| mid != token_in && mid != token_out)
            .filter_map(|mid| {
                let first = pools.find_pool(token_in, &mid, &self.fee_tiers)?;
                let second = pools.find_pool(&mid, token_out, &self.fee_tiers)?;
                Some(Route::two_hop(
                    Hop::new(first.clone(), *token_in, mid),
                    Hop::new(second.clone(), mid, *token_out),
                ))
            });

        let route = match self.selection {
            IntermediateSelection::FirstViable => viable.next(),
            IntermediateSelection::BestOutput => {
                let mut best: Option<(f64, Route)> = None;
                for route in viable {
                    let score = self.scorer.quote_amount(&route, SCORING_AMOUNT)?;
                    if best.as_ref().map_or(true, |(top, _)| score > *top) {
                        best = Some((score, route));
                    }
                }
                best.map(|(_, route)| route)
            }
        };

        match &route {
            Some(route) => debug!(route = %route, "Two-hop route found"),
            None => debug!(%token_in, %token_out, "No route found"),
        }
        Ok(route)
    }
}

/// Route search at the default fee tier, taking the first viable intermediate
pub fn find_route(
    token_in: &Address,
    token_out: &Address,
    pools: &PoolManager,
    candidates: &[Token],
) -> Result<Option<Route>, RouterError> {
    RouteFinder::default().find_route(token_in, token_out, pools, candidates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::routing::quote_calculator::get_quote;
    use crate::shared::types::Pool;

    fn token(byte: u8, symbol: &str) -> Token {
        Token::new(Address::new([byte; 20]), symbol, 18)
    }

    fn pool(id: u8, t0: &Token, t1: &Token, fee: FeeTier, price: f64) -> Pool {
        Pool::new(Address::new([id; 20]), t0.clone(), t1.clone(), fee, price).unwrap()
    }

    struct Market {
        eth: Token,
        usdc: Token,
        dai: Token,
        wbtc: Token,
    }

    fn market() -> Market {
        Market {
            eth: token(1, "ETH"),
            usdc: token(2, "USDC"),
            dai: token(3, "DAI"),
            wbtc: token(4, "WBTC"),
        }
    }

    impl Market {
        fn tokens(&self) -> Vec<Token> {
            vec![self.eth.clone(), self.usdc.clone(), self.dai.clone(), self.wbtc.clone()]
        }
    }

    #[test]
    fn test_direct_route() {
        let m = market();
        let pools = PoolManager::new(vec![pool(0xa0, &m.eth, &m.usdc, FeeTier::MEDIUM, 1640.0)]);

        let route = find_route(&m.usdc.address, &m.eth.address, &pools, &m.tokens())
            .unwrap()
            .unwrap();
        assert!(route.is_direct());
        assert_eq!(route.hops[0].token_in, m.usdc.address);
        assert_eq!(route.hops[0].token_out, m.eth.address);
    }

    #[test]
    fn test_two_hop_route_and_quote() {
        let m = market();
        let pools = PoolManager::new(vec![
            pool(0xa0, &m.eth, &m.usdc, FeeTier::MEDIUM, 1640.0),
            pool(0xa1, &m.usdc, &m.dai, FeeTier::MEDIUM, 1.001),
        ]);

        let route = find_route(&m.eth.address, &m.dai.address, &pools, &m.tokens())
            .unwrap()
            .unwrap();
        assert_eq!(route.path_tokens(), vec![m.eth.address, m.usdc.address, m.dai.address]);

        let amount_out = get_quote(&route, 1.0).unwrap();
        let expected = 1640.0 * 0.997 * 1.001 * 0.997;
        assert!((amount_out - expected).abs() < 1e-6);
    }

    #[test]
    fn test_same_token_rejected() {
        let m = market();
        let pools = PoolManager::default();
        assert!(matches!(
            find_route(&m.eth.address, &m.eth.address, &pools, &m.tokens()),
            Err(RouterError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_no_route() {
        let m = market();
        let pools = PoolManager::new(vec![
            pool(0xa0, &m.eth, &m.usdc, FeeTier::MEDIUM, 1640.0),
            pool(0xa1, &m.dai, &m.wbtc, FeeTier::MEDIUM, 0.00003),
        ]);
        assert_eq!(find_route(&m.eth.address, &m.dai.address, &pools, &m.tokens()), Ok(None));
    }

    #[test]
    fn test_default_tier_only() {
        let m = market();
        let pools = PoolManager::new(vec![pool(0xa0, &m.dai, &m.usdc, FeeTier::LOW, 1.001)]);

        assert_eq!(find_route(&m.dai.address, &m.usdc.address, &pools, &m.tokens()), Ok(None));

        let finder = RouteFinder::new(&RouterConfig {
            fee_tiers: vec![FeeTier::MEDIUM, FeeTier::LOW],
            ..Default::default()
        });
        let route = finder
            .find_route(&m.dai.address, &m.usdc.address, &pools, &m.tokens())
            .unwrap()
            .unwrap();
        assert_eq!(route.hops[0].pool.fee, FeeTier::LOW);
    }

    #[test]
    fn test_candidates_limit_intermediates() {
        let m = market();
        let pools = PoolManager::new(vec![
            pool(0xa0, &m.eth, &m.usdc, FeeTier::MEDIUM, 1640.0),
            pool(0xa1, &m.usdc, &m.dai, FeeTier::MEDIUM, 1.001),
        ]);
        let without_usdc = vec![m.eth.clone(), m.dai.clone(), m.wbtc.clone()];
        assert_eq!(find_route(&m.eth.address, &m.dai.address, &pools, &without_usdc), Ok(None));
    }

    #[test]
    fn test_first_viable_vs_best_output() {
        let m = market();
        // ETH -> USDC -> DAI yields ~1631.8, ETH -> WBTC -> DAI yields ~1687.0
        let pools = PoolManager::new(vec![
            pool(0xa0, &m.eth, &m.usdc, FeeTier::MEDIUM, 1640.0),
            pool(0xa1, &m.usdc, &m.dai, FeeTier::MEDIUM, 1.001),
            pool(0xa2, &m.wbtc, &m.eth, FeeTier::MEDIUM, 17.5),
            pool(0xa3, &m.wbtc, &m.dai, FeeTier::MEDIUM, 29_700.0),
        ]);

        let first = find_route(&m.eth.address, &m.dai.address, &pools, &m.tokens())
            .unwrap()
            .unwrap();
        assert_eq!(first.hops[0].token_out, m.usdc.address);

        let finder = RouteFinder::new(&RouterConfig {
            intermediate_selection: IntermediateSelection::BestOutput,
            ..Default::default()
        });
        let best = finder
            .find_route(&m.eth.address, &m.dai.address, &pools, &m.tokens())
            .unwrap()
            .unwrap();
        assert_eq!(best.hops[0].token_out, m.wbtc.address);
        assert!(get_quote(&best, 1.0).unwrap() > get_quote(&first, 1.0).unwrap());
        // unit scoring ranks the same as any request amount
        assert!(get_quote(&best, 250.0).unwrap() > get_quote(&first, 250.0).unwrap());
    }

    #[test]
    fn test_route_finding_is_deterministic() {
        let m = market();
        let pools = PoolManager::new(vec![
            pool(0xa0, &m.eth, &m.usdc, FeeTier::MEDIUM, 1640.0),
            pool(0xa1, &m.usdc, &m.dai, FeeTier::MEDIUM, 1.001),
            pool(0xa2, &m.eth, &m.wbtc, FeeTier::MEDIUM, 0.057),
            pool(0xa3, &m.wbtc, &m.dai, FeeTier::MEDIUM, 29_000.0),
        ]);

        let first = find_route(&m.eth.address, &m.dai.address, &pools, &m.tokens()).unwrap();
        let second = find_route(&m.eth.address, &m.dai.address, &pools, &m.tokens()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_fee_tiers_fall_back_to_default() {
        let finder = RouteFinder::new(&RouterConfig {
            fee_tiers: vec![],
            ..Default::default()
        });
        assert_eq!(finder.fee_tiers(), &[DEFAULT_FEE_TIER]);
    }
}
