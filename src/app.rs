// src/app.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::{debug, info};

use crate::application::commands::{describe_error, Cli, CommandExecutor, Commands, RouterArgs};
use crate::application::services::QuoteService;
use crate::domain::market::MarketSnapshot;
use crate::infrastructure::MarketSource;
use crate::shared::config::{IntermediateSelection, MarketConfig, QuoteFeePolicy, RouterConfig};
use crate::shared::errors::AppError;
use crate::shared::types::FeeTier;

#[derive(Debug, Clone)]
pub struct AppCfg {
    pub json: bool,
    pub source: MarketSource,
    pub market: MarketConfig,
    /// Router policy after CLI overrides
    pub router: RouterConfig,
}

impl AppCfg {
    /// Priority: CLI args > market file > defaults
    pub async fn from_cli(cli: &Cli) -> Result<Self> {
        let source = MarketSource::from_path(cli.config.clone());
        let market = source
            .load()
            .await
            .with_context(|| format!("Failed to load market from {}", source))?;
        let router = apply_router_overrides(market.router.clone(), &cli.router)?;

        Ok(Self {
            json: cli.json,
            source,
            market,
            router,
        })
    }
}

pub fn apply_router_overrides(mut router: RouterConfig, args: &RouterArgs) -> Result<RouterConfig> {
    if let Some(tiers) = &args.fee_tiers {
        router.fee_tiers = tiers
            .iter()
            .map(|&ppm| FeeTier::new(ppm))
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid --fee-tiers")?;
    }
    if args.best_output {
        router.intermediate_selection = IntermediateSelection::BestOutput;
    }
    if args.pool_fee {
        router.quote_fee = QuoteFeePolicy::Pool;
    }
    Ok(router)
}

pub async fn run(app_cfg: AppCfg, command: Commands) -> Result<()> {
    info!("Starting dex-router with {}", app_cfg.source);
    debug!("Router configuration: {:?}", app_cfg.router);

    let snapshot = MarketSnapshot::from_config(&app_cfg.market)
        .with_context(|| format!("Invalid market data in {}", app_cfg.source))?;
    let service = Arc::new(QuoteService::new(snapshot, app_cfg.router.clone()));

    match CommandExecutor::execute(command, service, app_cfg.json).await {
        Ok(()) => Ok(()),
        Err(AppError::Router(err)) => Err(anyhow::anyhow!(describe_error(&err))),
        Err(err) => Err(err.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_overrides_config() {
        let file = RouterConfig {
            fee_tiers: vec![FeeTier::LOW],
            ..Default::default()
        };

        let unchanged = apply_router_overrides(file.clone(), &RouterArgs::default()).unwrap();
        assert_eq!(unchanged, file);

        let args = RouterArgs {
            fee_tiers: Some(vec![3000, 10000]),
            best_output: true,
            pool_fee: true,
        };
        let merged = apply_router_overrides(file, &args).unwrap();
        assert_eq!(merged.fee_tiers, vec![FeeTier::MEDIUM, FeeTier::HIGH]);
        assert_eq!(merged.intermediate_selection, IntermediateSelection::BestOutput);
        assert_eq!(merged.quote_fee, QuoteFeePolicy::Pool);
    }

    #[test]
    fn test_invalid_fee_tier_override() {
        let args = RouterArgs {
            fee_tiers: Some(vec![2_000_000]),
            ..Default::default()
        };
        assert!(apply_router_overrides(RouterConfig::default(), &args).is_err());
    }

    #[tokio::test]
    async fn test_run_demo_quote() {
        let cli = Cli::try_parse_from(["dex-router", "--pool-fee", "quote", "ETH", "USDC", "1"]).unwrap();
        let app_cfg = AppCfg::from_cli(&cli).await.unwrap();
        assert_eq!(app_cfg.source, MarketSource::Demo);
        assert_eq!(app_cfg.router.quote_fee, QuoteFeePolicy::Pool);
        run(app_cfg, cli.command).await.unwrap();
    }

    #[tokio::test]
    async fn test_run_no_route_message() {
        let cli = Cli::try_parse_from(["dex-router", "route", "WBTC", "DAI"]).unwrap();
        let app_cfg = AppCfg::from_cli(&cli).await.unwrap();
        let err = run(app_cfg, cli.command).await.unwrap_err();
        assert_eq!(err.to_string(), "No route found between the given tokens");
    }
}
