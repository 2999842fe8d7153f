//! Error types

use thiserror::Error;

use crate::Exchange;

/// Core error types
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("{0} not found")]
    SymbolNotFound(String),
}

/// Price feed errors
#[derive(Debug, Clone, Error)]
pub enum PriceFeedError {
    #[error("Could not reach {exchange} API: {reason}")]
    ConnectionFailed { exchange: Exchange, reason: String },

    #[error("{exchange} API returned status {status}")]
    BadStatus { exchange: Exchange, status: u16 },

    #[error("{exchange} response could not be parsed: {reason}")]
    InvalidBody { exchange: Exchange, reason: String },

    #[error("Price refresh task failed: {0}")]
    TaskFailed(String),
}

impl PriceFeedError {
    /// Exchange the failure is attributed to, if any
    pub fn exchange(&self) -> Option<Exchange> {
        match self {
            PriceFeedError::ConnectionFailed { exchange, .. }
            | PriceFeedError::BadStatus { exchange, .. }
            | PriceFeedError::InvalidBody { exchange, .. } => Some(*exchange),
            PriceFeedError::TaskFailed(_) => None,
        }
    }
}

/// Result type alias
pub type PriceFeedResult<T> = Result<T, PriceFeedError>;
