//! Rating system configuration

use crate::rating::elo::{EloSettings, DEFAULT_K_FACTOR};
use crate::types::DEFAULT_RATING;
use serde::{Deserialize, Serialize};

/// Parameters of the Elo update and of newly added items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    /// Maximum rating swing per comparison
    pub k_factor: f64,
    /// Rating every dimension of a new item starts at
    pub default_rating: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            default_rating: DEFAULT_RATING,
        }
    }
}

impl RatingSettings {
    pub fn elo(&self) -> EloSettings {
        EloSettings {
            k_factor: self.k_factor,
        }
    }
}
