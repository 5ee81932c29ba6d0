//! Residency Ranker - pairwise Elo ranking of residency programs
//!
//! This crate rates items pairwise on several dimensions with Elo updates
//! and ranks them by a weighted sum of their per-dimension ratings.

pub mod config;
pub mod error;
pub mod persistence;
pub mod rating;
pub mod session;
pub mod types;

// Re-export commonly used types and traits
pub use error::{RankingError, Result};
pub use types::*;

// Re-export key components
pub use rating::{EloRater, PairwiseRater, RatingStore};
pub use session::{ComparisonJudge, RankingSession};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
