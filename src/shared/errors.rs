//! Error handling for the application

use thiserror::Error;

/// Routing and quoting errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RouterError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("No route found")]
    NoRoute,

    #[error("Route integrity violated: {0}")]
    RouteIntegrity(String),

    #[error("Token not found: {0}")]
    TokenNotFound(String),

    #[error("Invalid pool {address}: {reason}")]
    InvalidPool { address: String, reason: String },
}

impl RouterError {
    /// Whether the error comes from caller input rather than a broken invariant
    pub fn is_user_facing(&self) -> bool {
        !matches!(self, RouterError::RouteIntegrity(_))
    }
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Market data error: {0}")]
    MarketError(String),

    #[error("Output error: {0}")]
    OutputError(String),

    #[error(transparent)]
    Router(#[from] RouterError),
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::ConfigError(err.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        AppError::ConfigError(format!("Failed to parse config file: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::OutputError(err.to_string())
    }
}
