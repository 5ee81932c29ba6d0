//! Property-based tests for the rating core.
//!
//! # Invariants tested
//!
//! - **Relabeling:** swapping the two items and the winner gives the same ratings.
//! - **Step direction:** the winner never loses rating and the loser never gains.
//! - **Zero sum:** one comparison does not change the pair's total rating.
//! - **Linearity:** scaling every weight scales the overall score.
//! - **Ordering:** rankings are sorted by descending score.
//! - **Snapshots:** replacing a store with its own snapshot changes nothing.

mod fixtures;

use proptest::prelude::*;
use residency_ranker::rating::{apply_outcome, overall_score, rank};
use residency_ranker::{Dimension, DimensionWeights, RatingStore, Winner};

fn rating() -> impl Strategy<Value = f64> {
    400.0..1600.0f64
}

fn dimension() -> impl Strategy<Value = Dimension> {
    prop_oneof![
        Just(Dimension::Prestige),
        Just(Dimension::Vibes),
        Just(Dimension::Location),
    ]
}

fn winner() -> impl Strategy<Value = Winner> {
    prop_oneof![Just(Winner::First), Just(Winner::Second)]
}

fn weight() -> impl Strategy<Value = f64> {
    0.0..2.0f64
}

/// Store with items `item0..itemN` holding the given prestige/vibes/location ratings
fn store_from(ratings: &[(f64, f64, f64)]) -> RatingStore {
    let mut store = RatingStore::default();
    for (i, (prestige, vibes, location)) in ratings.iter().enumerate() {
        let name = format!("item{}", i);
        store.add_item(&name).unwrap();
        store.set_rating(&name, Dimension::Prestige, *prestige).unwrap();
        store.set_rating(&name, Dimension::Vibes, *vibes).unwrap();
        store.set_rating(&name, Dimension::Location, *location).unwrap();
    }
    store
}

fn pair_store(a: f64, b: f64, dimension: Dimension) -> RatingStore {
    let mut store = fixtures::store_with(&["A", "B"]);
    store.set_rating("A", dimension, a).unwrap();
    store.set_rating("B", dimension, b).unwrap();
    store
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn relabeling_gives_same_ratings(
        a in rating(),
        b in rating(),
        dimension in dimension(),
        winner in winner(),
        k in 1.0..64.0f64,
    ) {
        let mut forward = pair_store(a, b, dimension);
        let mut swapped = pair_store(a, b, dimension);

        apply_outcome(&mut forward, "A", "B", winner, dimension, k).unwrap();
        apply_outcome(&mut swapped, "B", "A", winner.swapped(), dimension, k).unwrap();

        for name in ["A", "B"] {
            let lhs = forward.rating(name, dimension).unwrap();
            let rhs = swapped.rating(name, dimension).unwrap();
            prop_assert!((lhs - rhs).abs() < 1e-9, "{}: {} vs {}", name, lhs, rhs);
        }
    }

    #[test]
    fn steps_follow_the_winner(
        a in rating(),
        b in rating(),
        dimension in dimension(),
        winners in prop::collection::vec(winner(), 1..20),
    ) {
        let mut store = pair_store(a, b, dimension);

        for winner in winners {
            let update = apply_outcome(&mut store, "A", "B", winner, dimension, 32.0).unwrap();
            match winner {
                Winner::First => {
                    prop_assert!(update.first.delta() > 0.0);
                    prop_assert!(update.second.delta() < 0.0);
                }
                Winner::Second => {
                    prop_assert!(update.first.delta() < 0.0);
                    prop_assert!(update.second.delta() > 0.0);
                }
            }
            prop_assert!(update.first.delta().abs() <= 32.0);
        }
    }

    #[test]
    fn comparisons_are_zero_sum(
        a in rating(),
        b in rating(),
        dimension in dimension(),
        winner in winner(),
    ) {
        let mut store = pair_store(a, b, dimension);
        apply_outcome(&mut store, "A", "B", winner, dimension, 32.0).unwrap();

        let total = store.rating("A", dimension).unwrap() + store.rating("B", dimension).unwrap();
        prop_assert!((total - (a + b)).abs() < 1e-9);
    }

    #[test]
    fn overall_score_is_linear_in_weights(
        ratings in (rating(), rating(), rating()),
        weights in (weight(), weight(), weight()),
        scale in 0.0..10.0f64,
    ) {
        let store = store_from(&[ratings]);
        let base = DimensionWeights::empty()
            .with(Dimension::Prestige, weights.0)
            .and_then(|w| w.with(Dimension::Vibes, weights.1))
            .and_then(|w| w.with(Dimension::Location, weights.2))
            .unwrap();
        let scaled = DimensionWeights::empty()
            .with(Dimension::Prestige, weights.0 * scale)
            .and_then(|w| w.with(Dimension::Vibes, weights.1 * scale))
            .and_then(|w| w.with(Dimension::Location, weights.2 * scale))
            .unwrap();

        let base_score = overall_score("item0", &store, &base).unwrap();
        let scaled_score = overall_score("item0", &store, &scaled).unwrap();
        prop_assert!((scaled_score - base_score * scale).abs() < 1e-6);
    }

    #[test]
    fn rankings_are_sorted_descending(
        ratings in prop::collection::vec((rating(), rating(), rating()), 0..25),
        weights in (weight(), weight(), weight()),
    ) {
        let store = store_from(&ratings);
        let weights = DimensionWeights::empty()
            .with(Dimension::Prestige, weights.0)
            .and_then(|w| w.with(Dimension::Vibes, weights.1))
            .and_then(|w| w.with(Dimension::Location, weights.2))
            .unwrap();

        let ranking = rank(&store, &weights).unwrap();
        prop_assert_eq!(ranking.len(), store.len());
        for pair in ranking.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn snapshot_replacement_is_identity(
        ratings in prop::collection::vec((rating(), rating(), rating()), 0..25),
    ) {
        let mut store = store_from(&ratings);
        let before = store.clone();

        let snapshot = store.snapshot();
        store.replace_all(snapshot).unwrap();

        prop_assert_eq!(store, before);
    }
}
