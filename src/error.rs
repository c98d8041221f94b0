//! Error types for the parlay bot

use thiserror::Error;

pub type Result<T> = std::result::Result<T, BotError>;

/// Crate-level error type
///
/// Upstream stat-source failures are caught at the aggregator boundary and
/// converted into "no contribution"; they should never reach a caller of the
/// aggregation API.
#[derive(Error, Debug)]
pub enum BotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error: {0}")]
    Api(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
