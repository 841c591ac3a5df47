//! Execution domain - router call preparation for quoted swaps

pub mod path_encoder;
pub mod transaction_builder;

pub use path_encoder::{encode_path, encode_path_hex};
pub use transaction_builder::{
    calculate_min_out, ExactInputParams, ExactInputSingleParams, SwapCall, SwapRequest,
    TransactionBuilder, DEFAULT_DEADLINE_MINUTES, DEFAULT_SLIPPAGE_BPS,
};
