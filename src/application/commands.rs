//! CLI commands and handlers
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use crate::application::services::QuoteService;
use crate::domain::execution::{SwapRequest, DEFAULT_DEADLINE_MINUTES, DEFAULT_SLIPPAGE_BPS};
use crate::report::{to_json, PoolReport, QuoteReport, RouteReport, SwapReport, TokenReport};
use crate::shared::errors::{AppError, RouterError};
use crate::shared::types::parse_address;
use crate::shared::utils::{format_token_amount, parse_amount, truncate_middle};

#[derive(Parser, Debug)]
#[command(name = "dex-router")]
#[command(version, about = "Route finding and swap quotes over a constant-price pool snapshot")]
pub struct Cli {
    /// Market file (tokens, pools, router policy); the built-in demo market when omitted
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON reports instead of text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub router: RouterArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Router policy overrides; each one replaces the config file value when given
#[derive(Args, Debug, Clone, Default)]
pub struct RouterArgs {
    /// Fee tiers in ppm, tried in order (e.g. 3000,500)
    #[arg(long, global = true, value_delimiter = ',')]
    pub fee_tiers: Option<Vec<u32>>,

    /// Pick the intermediate with the best quoted output
    #[arg(long, global = true)]
    pub best_output: bool,

    /// Deduct each pool's own fee instead of the flat 0.3%
    #[arg(long, global = true)]
    pub pool_fee: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List known tokens
    Tokens,

    /// List pools in the market snapshot
    Pools {
        /// Limit number of pools to show
        #[arg(short, long, default_value_t = 10)]
        limit: usize,

        /// Only pools trading this token (symbol or address)
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Find a route between two tokens (symbol or address)
    Route {
        token_in: String,
        token_out: String,
    },

    /// Quote an exact-input swap
    Quote {
        token_in: String,
        token_out: String,
        /// Input amount in human units (e.g. 1.5)
        amount: String,
    },

    /// Quote and build router call parameters without sending anything
    Prepare {
        token_in: String,
        token_out: String,
        amount: String,

        /// Slippage tolerance in basis points
        #[arg(long, default_value_t = DEFAULT_SLIPPAGE_BPS)]
        slippage_bps: u32,

        /// Deadline in minutes from now
        #[arg(long, default_value_t = DEFAULT_DEADLINE_MINUTES)]
        deadline_mins: u32,

        /// Address receiving the output tokens
        #[arg(long)]
        recipient: String,
    },
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub async fn execute(command: Commands, service: Arc<QuoteService>, json: bool) -> Result<(), AppError> {
        match command {
            Commands::Tokens => Self::execute_tokens_command(&service, json),
            Commands::Pools { limit, token } => {
                Self::execute_pools_command(&service, limit, token.as_deref(), json)
            }
            Commands::Route { token_in, token_out } => {
                Self::execute_route_command(&service, &token_in, &token_out, json)
            }
            Commands::Quote { token_in, token_out, amount } => {
                Self::execute_quote_command(&service, &token_in, &token_out, &amount, json)
            }
            Commands::Prepare {
                token_in,
                token_out,
                amount,
                slippage_bps,
                deadline_mins,
                recipient,
            } => {
                let recipient = parse_address(&recipient)?;
                let request = SwapRequest::new(recipient)
                    .with_slippage_bps(slippage_bps)
                    .with_deadline_minutes(deadline_mins);
                Self::execute_prepare_command(&service, &token_in, &token_out, &amount, &request, json)
            }
        }
    }

    fn execute_tokens_command(service: &QuoteService, json: bool) -> Result<(), AppError> {
        let snapshot = service.snapshot();
        let reports: Vec<TokenReport> = snapshot.tokens().iter().map(TokenReport::from).collect();
        if json {
            println!("{}", to_json(&reports)?);
            return Ok(());
        }

        for token in &reports {
            println!(
                "{:<6} {}  decimals={}  {}",
                token.symbol,
                token.address,
                token.decimals,
                token.name.as_deref().unwrap_or("")
            );
        }
        Ok(())
    }

    fn execute_pools_command(
        service: &QuoteService,
        limit: usize,
        token: Option<&str>,
        json: bool,
    ) -> Result<(), AppError> {
        let snapshot = service.snapshot();
        let pools: Vec<_> = match token {
            Some(reference) => {
                let token = snapshot.resolve_token(reference)?;
                snapshot.pools().pools_for_token(&token.address).collect()
            }
            None => snapshot.pools().get_pools().iter().collect(),
        };
        let total = pools.len();
        let reports: Vec<PoolReport> = pools
            .into_iter()
            .take(limit)
            .map(|p| PoolReport::from(p.as_ref()))
            .collect();
        if json {
            println!("{}", to_json(&reports)?);
            return Ok(());
        }

        println!("Pools: {} (shown: {})", total, reports.len());
        for (i, pool) in reports.iter().enumerate() {
            println!(
                "{:>3}. {:<10} fee {:.2}%  price {}  ({})",
                i + 1,
                pool.pair,
                pool.fee_percent,
                format_token_amount(pool.price, 6),
                truncate_middle(&pool.address, 6, 4)
            );
        }
        Ok(())
    }

    fn execute_route_command(
        service: &QuoteService,
        token_in: &str,
        token_out: &str,
        json: bool,
    ) -> Result<(), AppError> {
        let route = service.find_route(token_in, token_out)?;
        let report = RouteReport::new(&route);
        if json {
            println!("{}", to_json(&report)?);
        } else {
            println!("{}", report.path);
        }
        Ok(())
    }

    fn execute_quote_command(
        service: &QuoteService,
        token_in: &str,
        token_out: &str,
        amount: &str,
        json: bool,
    ) -> Result<(), AppError> {
        let amount_in = parse_amount(amount)?;
        let quote = service.get_quote(token_in, token_out, amount_in)?;
        let report = QuoteReport::new(&quote, Utc::now());
        if json {
            println!("{}", to_json(&report)?);
            return Ok(());
        }

        println!(
            "{} {} -> {} {}",
            format_token_amount(report.amount_in, 6),
            report.token_in,
            format_token_amount(report.amount_out, 6),
            report.token_out
        );
        println!("Route: {}", report.route.path);
        println!("Price: {} {} per {}", format_token_amount(report.effective_price, 6), report.token_out, report.token_in);
        Ok(())
    }

    fn execute_prepare_command(
        service: &QuoteService,
        token_in: &str,
        token_out: &str,
        amount: &str,
        request: &SwapRequest,
        json: bool,
    ) -> Result<(), AppError> {
        let amount_in = parse_amount(amount)?;
        let now = Utc::now();
        let prepared = service.prepare_swap(token_in, token_out, amount_in, request, now)?;
        let report = SwapReport::new(&prepared, now)?;
        if json {
            println!("{}", to_json(&report)?);
            return Ok(());
        }

        info!(quote_id = %report.quote.quote_id, "Printing prepared swap");
        println!("Method:          {}", report.method);
        println!("Route:           {}", report.quote.route.path);
        println!("Amount in:       {} ({} raw)", format_token_amount(report.quote.amount_in, 6), report.amount_in_raw);
        println!("Quoted out:      {}", format_token_amount(report.quote.amount_out, 6));
        println!(
            "Minimum out:     {} ({} raw, {} bps slippage)",
            report.amount_out_minimum, report.amount_out_minimum_raw, request.slippage_bps
        );
        println!("Recipient:       {}", report.recipient);
        println!("Deadline:        {}", report.deadline);
        match (&report.fee_ppm, &report.path) {
            (Some(fee), _) => println!("Fee tier:        {} ppm", fee),
            (_, Some(path)) => println!("Path:            {}", path),
            _ => {}
        }
        Ok(())
    }
}

/// Turn a router error into the exit message shown to the user
pub fn describe_error(err: &RouterError) -> String {
    match err {
        RouterError::NoRoute => "No route found between the given tokens".to_string(),
        other if other.is_user_facing() => other.to_string(),
        other => format!("Internal routing error: {}", other),
    }
}
