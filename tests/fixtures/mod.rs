//! Test fixtures shared by the integration tests

#![allow(dead_code)]

use residency_ranker::session::{RankingSession, ScriptedJudge};
use residency_ranker::{Dimension, DimensionWeights, RatingStore, Winner};
use std::path::PathBuf;

/// Store holding `names`, all at default ratings
pub fn store_with(names: &[&str]) -> RatingStore {
    let mut store = RatingStore::default();
    for name in names {
        store.add_item(name).expect("fixture names are valid");
    }
    store
}

/// Weights that only count prestige
pub fn prestige_only_weights() -> DimensionWeights {
    DimensionWeights::empty()
        .with(Dimension::Prestige, 1.0)
        .and_then(|w| w.with(Dimension::Vibes, 0.0))
        .and_then(|w| w.with(Dimension::Location, 0.0))
        .expect("weights are valid")
}

/// Session where `names` were added in order with every comparison skipped
pub fn session_with(names: &[&str]) -> RankingSession {
    let mut session = RankingSession::default();
    for name in names {
        session
            .add_item(name, &mut ScriptedJudge::default())
            .expect("fixture names are valid");
    }
    session
}

/// Judge under which the newly added item wins every comparison
pub fn newcomer_always_wins(comparisons: usize) -> ScriptedJudge {
    ScriptedJudge::repeating(Winner::First, comparisons)
}

/// Judge under which the newly added item loses every comparison
pub fn newcomer_always_loses(comparisons: usize) -> ScriptedJudge {
    ScriptedJudge::repeating(Winner::Second, comparisons)
}

/// Unique scratch file path for this test process
pub fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "residency-ranker-it-{}-{}.json",
        std::process::id(),
        name
    ))
}
