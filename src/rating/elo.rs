//! Elo rating updates for pairwise comparisons
//!
//! This module applies a single binary comparison outcome to two items on
//! one dimension, using the Elo implementation from the skillratings crate.

use crate::error::{RankingError, Result};
use crate::rating::storage::RatingStore;
use crate::types::{Dimension, RatingChange, Winner};
use serde::{Deserialize, Serialize};
use skillratings::elo::{elo, EloConfig, EloRating};
use tracing::debug;

/// Maximum rating swing per comparison unless configured otherwise
pub const DEFAULT_K_FACTOR: f64 = 32.0;

/// Both rating changes produced by one comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairwiseUpdate {
    pub first: RatingChange,
    pub second: RatingChange,
}

/// Trait for updating a store from pairwise comparison outcomes
pub trait PairwiseRater {
    /// Apply one comparison on `dimension` between two existing items
    fn apply_outcome(
        &self,
        store: &mut RatingStore,
        first: &str,
        second: &str,
        winner: Winner,
        dimension: Dimension,
    ) -> Result<PairwiseUpdate>;
}

/// Configuration for the Elo rater
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EloSettings {
    pub k_factor: f64,
}

impl Default for EloSettings {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
        }
    }
}

impl EloSettings {
    /// Validate configuration parameters
    pub fn validate(&self) -> Result<()> {
        if !self.k_factor.is_finite() || self.k_factor <= 0.0 {
            return Err(RankingError::Configuration {
                message: format!("k-factor must be positive, got {}", self.k_factor),
            });
        }
        Ok(())
    }
}

/// Elo rater with a fixed k-factor
#[derive(Debug, Clone, Default)]
pub struct EloRater {
    settings: EloSettings,
}

impl EloRater {
    pub fn new(settings: EloSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self { settings })
    }

    pub fn k_factor(&self) -> f64 {
        self.settings.k_factor
    }
}

impl PairwiseRater for EloRater {
    fn apply_outcome(
        &self,
        store: &mut RatingStore,
        first: &str,
        second: &str,
        winner: Winner,
        dimension: Dimension,
    ) -> Result<PairwiseUpdate> {
        apply_outcome(store, first, second, winner, dimension, self.settings.k_factor)
    }
}

/// Update both items' ratings on `dimension` from one comparison
///
/// Both new ratings are computed from the ratings read before either is
/// written, so the result does not depend on update order. Exactly two
/// entries of the store change.
pub fn apply_outcome(
    store: &mut RatingStore,
    first: &str,
    second: &str,
    winner: Winner,
    dimension: Dimension,
    k_factor: f64,
) -> Result<PairwiseUpdate> {
    if first == second {
        return Err(RankingError::invalid_input(format!(
            "cannot compare '{}' with itself",
            first
        )));
    }

    let first_rating = store.rating(first, dimension)?;
    let second_rating = store.rating(second, dimension)?;

    let (first_new, second_new) = elo(
        &EloRating {
            rating: first_rating,
        },
        &EloRating {
            rating: second_rating,
        },
        &winner.outcome(),
        &EloConfig { k: k_factor },
    );

    store.set_rating(first, dimension, first_new.rating)?;
    store.set_rating(second, dimension, second_new.rating)?;

    debug!(
        "{} comparison {:?} won: '{}' {:.2} -> {:.2}, '{}' {:.2} -> {:.2}",
        dimension,
        winner,
        first,
        first_rating,
        first_new.rating,
        second,
        second_rating,
        second_new.rating
    );

    Ok(PairwiseUpdate {
        first: RatingChange {
            name: first.to_string(),
            dimension,
            old_rating: first_rating,
            new_rating: first_new.rating,
        },
        second: RatingChange {
            name: second.to_string(),
            dimension,
            old_rating: second_rating,
            new_rating: second_new.rating,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_store() -> RatingStore {
        let mut store = RatingStore::default();
        store.add_item("A").unwrap();
        store.add_item("B").unwrap();
        store.add_item("C").unwrap();
        store
    }

    #[test]
    fn test_equal_ratings_move_by_half_k() {
        let mut store = create_test_store();

        let update =
            apply_outcome(&mut store, "A", "B", Winner::First, Dimension::Prestige, 32.0).unwrap();

        assert_eq!(store.rating("A", Dimension::Prestige).unwrap(), 1016.0);
        assert_eq!(store.rating("B", Dimension::Prestige).unwrap(), 984.0);
        assert_eq!(update.first.delta(), 16.0);
        assert_eq!(update.second.delta(), -16.0);
    }

    #[test]
    fn test_only_two_entries_change() {
        let mut store = create_test_store();
        let before = store.clone();

        apply_outcome(&mut store, "B", "C", Winner::Second, Dimension::Vibes, 32.0).unwrap();

        for (name, record) in before.iter() {
            for (dimension, rating) in record.iter() {
                let after = store.rating(name, dimension).unwrap();
                let touched = dimension == Dimension::Vibes && (name == "B" || name == "C");
                if touched {
                    assert_ne!(after, rating);
                } else {
                    assert_eq!(after, rating);
                }
            }
        }
        assert!(store.rating("C", Dimension::Vibes).unwrap() > 1000.0);
    }

    #[test]
    fn test_upset_moves_more_than_expected_win() {
        let mut store = create_test_store();
        store.set_rating("A", Dimension::Location, 1200.0).unwrap();

        let expected_win =
            apply_outcome(&mut store.clone(), "A", "B", Winner::First, Dimension::Location, 32.0)
                .unwrap();
        let upset =
            apply_outcome(&mut store, "A", "B", Winner::Second, Dimension::Location, 32.0)
                .unwrap();

        assert!(expected_win.first.delta() > 0.0);
        assert!(expected_win.first.delta() < 16.0);
        assert!(upset.second.delta() > 16.0);
        assert!(upset.first.delta() < -16.0);
    }

    #[test]
    fn test_k_factor_scales_change() {
        let mut store = create_test_store();
        apply_outcome(&mut store, "A", "B", Winner::First, Dimension::Prestige, 10.0).unwrap();
        assert_eq!(store.rating("A", Dimension::Prestige).unwrap(), 1005.0);
        assert_eq!(store.rating("B", Dimension::Prestige).unwrap(), 995.0);
    }

    #[test]
    fn test_unknown_items_are_rejected() {
        let mut store = create_test_store();
        let before = store.clone();

        let result = apply_outcome(&mut store, "A", "Z", Winner::First, Dimension::Prestige, 32.0);
        assert!(matches!(result, Err(RankingError::UnknownItem { name }) if name == "Z"));

        let result = apply_outcome(&mut store, "Z", "A", Winner::First, Dimension::Prestige, 32.0);
        assert!(matches!(result, Err(RankingError::UnknownItem { .. })));

        assert_eq!(store, before);
    }

    #[test]
    fn test_self_comparison_is_rejected() {
        let mut store = create_test_store();
        let result = apply_outcome(&mut store, "A", "A", Winner::First, Dimension::Prestige, 32.0);
        assert!(matches!(result, Err(RankingError::InvalidInput { .. })));
    }

    #[test]
    fn test_settings_validation() {
        assert!(EloRater::new(EloSettings::default()).is_ok());
        assert!(EloRater::new(EloSettings { k_factor: 0.0 }).is_err());
        assert!(EloRater::new(EloSettings { k_factor: -4.0 }).is_err());
        assert!(EloRater::new(EloSettings {
            k_factor: f64::INFINITY
        })
        .is_err());
    }

    #[test]
    fn test_rater_uses_configured_k() {
        let rater = EloRater::new(EloSettings { k_factor: 64.0 }).unwrap();
        let mut store = create_test_store();

        rater
            .apply_outcome(&mut store, "A", "C", Winner::Second, Dimension::Vibes)
            .unwrap();

        assert_eq!(rater.k_factor(), 64.0);
        assert_eq!(store.rating("A", Dimension::Vibes).unwrap(), 968.0);
        assert_eq!(store.rating("C", Dimension::Vibes).unwrap(), 1032.0);
    }
}
