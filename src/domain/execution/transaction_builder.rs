//! Router call parameters for a quoted swap

use alloy_primitives::aliases::U160;
use alloy_primitives::{Bytes, U256};
use chrono::{DateTime, Duration, Utc};

use crate::domain::execution::path_encoder::encode_path;
use crate::domain::routing::Quote;
use crate::shared::errors::RouterError;
use crate::shared::types::{Address, FeeTier, Token};
use crate::shared::utils::ui_to_raw;

pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
pub const DEFAULT_DEADLINE_MINUTES: u32 = 20;
const BPS_SCALE: u32 = 10_000;

/// Caller-side swap settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwapRequest {
    pub recipient: Address,
    pub slippage_bps: u32,
    pub deadline_minutes: u32,
}

impl SwapRequest {
    pub fn new(recipient: Address) -> Self {
        Self {
            recipient,
            slippage_bps: DEFAULT_SLIPPAGE_BPS,
            deadline_minutes: DEFAULT_DEADLINE_MINUTES,
        }
    }

    pub fn with_slippage_bps(mut self, slippage_bps: u32) -> Self {
        self.slippage_bps = slippage_bps;
        self
    }

    pub fn with_deadline_minutes(mut self, deadline_minutes: u32) -> Self {
        self.deadline_minutes = deadline_minutes;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactInputSingleParams {
    pub token_in: Address,
    pub token_out: Address,
    pub fee: FeeTier,
    pub recipient: Address,
    pub deadline: i64,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
    pub sqrt_price_limit_x96: U160,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExactInputParams {
    pub path: Bytes,
    pub recipient: Address,
    pub deadline: i64,
    pub amount_in: U256,
    pub amount_out_minimum: U256,
}

/// Router method to call: single pool or packed multi-hop path
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwapCall {
    ExactInputSingle(ExactInputSingleParams),
    ExactInput(ExactInputParams),
}

impl SwapCall {
    pub fn method(&self) -> &'static str {
        match self {
            SwapCall::ExactInputSingle(_) => "exactInputSingle",
            SwapCall::ExactInput(_) => "exactInput",
        }
    }

    pub fn amount_in(&self) -> U256 {
        match self {
            SwapCall::ExactInputSingle(p) => p.amount_in,
            SwapCall::ExactInput(p) => p.amount_in,
        }
    }

    pub fn amount_out_minimum(&self) -> U256 {
        match self {
            SwapCall::ExactInputSingle(p) => p.amount_out_minimum,
            SwapCall::ExactInput(p) => p.amount_out_minimum,
        }
    }

    pub fn deadline(&self) -> i64 {
        match self {
            SwapCall::ExactInputSingle(p) => p.deadline,
            SwapCall::ExactInput(p) => p.deadline,
        }
    }
}

/// Calculate minimum output amount with slippage protection
pub fn calculate_min_out(amount_out: U256, slippage_bps: u32) -> Result<U256, RouterError> {
    if slippage_bps > BPS_SCALE {
        return Err(RouterError::InvalidInput(format!(
            "slippage {} bps exceeds 100%",
            slippage_bps
        )));
    }
    let scale = U256::from(BPS_SCALE);
    let kept = U256::from(BPS_SCALE - slippage_bps);
    // Split before multiplying so amounts near uint256::MAX cannot overflow
    Ok(amount_out / scale * kept + amount_out % scale * kept / scale)
}

/// Translate a quote into router call parameters. Nothing is signed or sent.
pub struct TransactionBuilder;

impl TransactionBuilder {
    pub fn build_swap(
        quote: &Quote,
        token_in: &Token,
        token_out: &Token,
        request: &SwapRequest,
        now: DateTime<Utc>,
    ) -> Result<SwapCall, RouterError> {
        quote.route.validate()?;

        if quote.route.token_in() != Some(token_in.address)
            || quote.route.token_out() != Some(token_out.address)
        {
            return Err(RouterError::InvalidInput(format!(
                "quote route {} does not trade {} for {}",
                quote.route, token_in.symbol, token_out.symbol
            )));
        }

        let amount_in = ui_to_raw(quote.amount_in, token_in.decimals)?;
        let amount_out = ui_to_raw(quote.amount_out, token_out.decimals)?;
        let amount_out_minimum = calculate_min_out(amount_out, request.slippage_bps)?;
        let deadline = (now + Duration::minutes(request.deadline_minutes as i64)).timestamp();

        let call = if quote.route.is_direct() {
            let hop = &quote.route.hops[0];
            SwapCall::ExactInputSingle(ExactInputSingleParams {
                token_in: hop.token_in,
                token_out: hop.token_out,
                fee: hop.pool.fee,
                recipient: request.recipient,
                deadline,
                amount_in,
                amount_out_minimum,
                sqrt_price_limit_x96: U160::ZERO,
            })
        } else {
            SwapCall::ExactInput(ExactInputParams {
                path: encode_path(&quote.route)?,
                recipient: request.recipient,
                deadline,
                amount_in,
                amount_out_minimum,
            })
        };

        Ok(call)
    }
}
