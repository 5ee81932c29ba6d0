//! Rating core: storage, Elo updates and weighted aggregation
//!
//! This module provides the in-memory rating store, the pairwise Elo
//! update (backed by the skillratings crate) and the weighted ranking.

pub mod aggregate;
pub mod elo;
pub mod storage;

// Re-export commonly used types
pub use aggregate::{overall_score, rank, weighted_score};
pub use elo::{apply_outcome, EloRater, EloSettings, PairwiseRater, PairwiseUpdate};
pub use storage::{RatingStore, ScoreSnapshot};
