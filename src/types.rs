//! Common types used throughout the ranking core

use crate::error::{RankingError, Result};
use serde::{Deserialize, Serialize};
use skillratings::Outcomes;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Unique, case-sensitive identifier for a ranked item (a residency program)
pub type ItemName = String;

/// Rating every dimension starts at for a newly added item
pub const DEFAULT_RATING: f64 = 1000.0;

/// Axis along which two items are compared
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Prestige,
    Vibes,
    Location,
}

impl Dimension {
    /// Every recognized dimension, in display order
    pub const ALL: [Dimension; 3] = [Dimension::Prestige, Dimension::Vibes, Dimension::Location];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Prestige => "prestige",
            Dimension::Vibes => "vibes",
            Dimension::Location => "location",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = RankingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "prestige" => Ok(Dimension::Prestige),
            "vibes" => Ok(Dimension::Vibes),
            "location" => Ok(Dimension::Location),
            other => Err(RankingError::invalid_input(format!(
                "unknown dimension '{}' (expected prestige, vibes or location)",
                other
            ))),
        }
    }
}

/// Per-dimension ratings of a single item
///
/// A record built through [`ScoreRecord::with_default`] is complete. Records
/// decoded from external data may be partial; the store rejects those before
/// they are accepted.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreRecord(BTreeMap<Dimension, f64>);

impl ScoreRecord {
    /// Create a record with every dimension set to `rating`
    pub fn with_default(rating: f64) -> Self {
        Self(Dimension::ALL.iter().map(|d| (*d, rating)).collect())
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    pub fn set(&mut self, dimension: Dimension, rating: f64) {
        self.0.insert(dimension, rating);
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, r)| (*d, *r))
    }

    /// Recognized dimensions this record has no rating for
    pub fn missing_dimensions(&self) -> Vec<Dimension> {
        Dimension::ALL
            .iter()
            .filter(|d| !self.0.contains_key(*d))
            .copied()
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_dimensions().is_empty()
    }
}

impl FromIterator<(Dimension, f64)> for ScoreRecord {
    fn from_iter<T: IntoIterator<Item = (Dimension, f64)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Relative importance of each dimension in the overall score
///
/// Weights are raw multipliers: they are not required to sum to one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DimensionWeights(BTreeMap<Dimension, f64>);

impl Default for DimensionWeights {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Dimension::Prestige, 0.5),
            (Dimension::Vibes, 0.2),
            (Dimension::Location, 0.3),
        ]))
    }
}

impl DimensionWeights {
    /// Weights with no dimension configured
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn get(&self, dimension: Dimension) -> Option<f64> {
        self.0.get(&dimension).copied()
    }

    /// Set the weight of one dimension
    ///
    /// Weights must be finite and non-negative.
    pub fn set(&mut self, dimension: Dimension, weight: f64) -> Result<()> {
        validate_weight(dimension, weight)?;
        self.0.insert(dimension, weight);
        Ok(())
    }

    /// Builder-style variant of [`DimensionWeights::set`]
    pub fn with(mut self, dimension: Dimension, weight: f64) -> Result<Self> {
        self.set(dimension, weight)?;
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Dimension, f64)> + '_ {
        self.0.iter().map(|(d, w)| (*d, *w))
    }

    /// Check every configured weight
    pub fn validate(&self) -> Result<()> {
        for (dimension, weight) in self.iter() {
            validate_weight(dimension, weight)?;
        }
        Ok(())
    }
}

fn validate_weight(dimension: Dimension, weight: f64) -> Result<()> {
    if !weight.is_finite() || weight < 0.0 {
        return Err(RankingError::invalid_input(format!(
            "weight for {} must be a finite non-negative number, got {}",
            dimension, weight
        )));
    }
    Ok(())
}

/// Which side of a pairwise comparison won
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Winner {
    First,
    Second,
}

impl Winner {
    /// Map a free-form answer onto one of the two compared items
    ///
    /// Returns `None` when the answer names neither item. Callers treat that
    /// as a skipped comparison rather than an error.
    pub fn resolve(first: &str, second: &str, answer: &str) -> Option<Winner> {
        let answer = answer.trim();
        if answer == first {
            Some(Winner::First)
        } else if answer == second {
            Some(Winner::Second)
        } else {
            None
        }
    }

    /// The same result seen from the other side
    pub fn swapped(self) -> Winner {
        match self {
            Winner::First => Winner::Second,
            Winner::Second => Winner::First,
        }
    }

    /// Outcome from the first item's point of view
    pub(crate) fn outcome(self) -> Outcomes {
        match self {
            Winner::First => Outcomes::WIN,
            Winner::Second => Outcomes::LOSS,
        }
    }
}

/// A single comparison the orchestrator needs decided
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRequest {
    pub dimension: Dimension,
    /// The item being introduced
    pub first: ItemName,
    /// The pre-existing item it is compared against
    pub second: ItemName,
}

/// Rating change of one item on one dimension
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingChange {
    pub name: ItemName,
    pub dimension: Dimension,
    pub old_rating: f64,
    pub new_rating: f64,
}

impl RatingChange {
    pub fn delta(&self) -> f64 {
        self.new_rating - self.old_rating
    }
}

/// One row of the overall ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankEntry {
    pub name: ItemName,
    pub score: f64,
}
