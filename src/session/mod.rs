//! Session orchestration
//!
//! This module ties the stores, the rater and the weights together and
//! accepts comparison decisions one at a time through a judge.

pub mod judge;
pub mod ranking;

// Re-export commonly used types
pub use judge::{ComparisonJudge, ScriptedJudge};
pub use ranking::{AdditionReport, RankingSession};
