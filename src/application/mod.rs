//! Application layer - use cases and services

pub mod commands;
pub mod quote_session;
pub mod services;

pub use commands::{Cli, CommandExecutor, Commands, RouterArgs};
pub use quote_session::{QuoteSession, QuoteTicket, SessionResult};
pub use services::{PreparedSwap, QuoteService};
