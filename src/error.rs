//! Error types for the ranking core
//!
//! Every error raised by the store, the rater and the aggregator is
//! recoverable: callers decide whether to re-prompt the user or abandon the
//! single operation that failed.

use std::path::PathBuf;

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, RankingError>;

/// Custom error types for specific ranking scenarios
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("Invalid input: {reason}")]
    InvalidInput { reason: String },

    #[error("Item already exists: {name}")]
    DuplicateItem { name: String },

    #[error("Item not found: {name}")]
    UnknownItem { name: String },

    #[error("Malformed score data: {reason}")]
    MalformedData { reason: String },

    #[error("Item {name} has no rating for dimension {dimension}")]
    MissingDimension { name: String, dimension: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Failed to access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl RankingError {
    pub(crate) fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            reason: reason.into(),
        }
    }

    pub(crate) fn unknown_item(name: &str) -> Self {
        Self::UnknownItem {
            name: name.to_string(),
        }
    }

    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedData {
            reason: reason.into(),
        }
    }
}
