//! Weighted aggregation of per-dimension ratings
//!
//! The overall score of an item is the raw weighted sum of its ratings over
//! the dimensions that carry a weight. Weights are not normalised.

use crate::error::{RankingError, Result};
use crate::rating::storage::RatingStore;
use crate::types::{DimensionWeights, RankEntry, ScoreRecord};

/// Weighted sum of one record's ratings
///
/// Dimensions without a weight are ignored. A weighted dimension the record
/// has no rating for is an error rather than a zero contribution.
pub fn weighted_score(name: &str, record: &ScoreRecord, weights: &DimensionWeights) -> Result<f64> {
    let mut total = 0.0;
    for (dimension, weight) in weights.iter() {
        let rating = record
            .get(dimension)
            .ok_or_else(|| RankingError::MissingDimension {
                name: name.to_string(),
                dimension: dimension.to_string(),
            })?;
        total += rating * weight;
    }
    Ok(total)
}

/// Overall score of the item called `name`
pub fn overall_score(name: &str, store: &RatingStore, weights: &DimensionWeights) -> Result<f64> {
    let record = store
        .get(name)
        .ok_or_else(|| RankingError::unknown_item(name))?;
    weighted_score(name, record, weights)
}

/// Every item in the store with its overall score, best first
///
/// Items with equal scores keep their store order.
pub fn rank(store: &RatingStore, weights: &DimensionWeights) -> Result<Vec<RankEntry>> {
    let mut entries = store
        .iter()
        .map(|(name, record)| {
            Ok(RankEntry {
                name: name.to_string(),
                score: weighted_score(name, record, weights)?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    entries.sort_by(|a, b| b.score.total_cmp(&a.score));

    Ok(entries)
}
