//! Ranking session state and orchestration
//!
//! A session owns the local (working) store, the global (reference) store
//! and the dimension weights. Comparisons are applied to both stores in
//! lockstep when global updates are enabled.

use crate::config::AppConfig;
use crate::error::Result;
use crate::rating::aggregate;
use crate::rating::elo::{EloRater, PairwiseRater, PairwiseUpdate};
use crate::rating::storage::RatingStore;
use crate::session::judge::ComparisonJudge;
use crate::types::{ComparisonRequest, Dimension, DimensionWeights, ItemName, RankEntry, Winner};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Summary of introducing one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdditionReport {
    /// Stored (trimmed) name of the new item
    pub name: ItemName,
    /// Comparisons that produced a rating update
    pub applied: usize,
    /// Comparisons the judge declined to decide
    pub skipped: usize,
}

/// Local and global stores plus weights, driven one call at a time
#[derive(Debug, Clone)]
pub struct RankingSession<R: PairwiseRater = EloRater> {
    local: RatingStore,
    global: RatingStore,
    weights: DimensionWeights,
    rater: R,
    update_global: bool,
}

impl RankingSession<EloRater> {
    /// Build a session from configuration and already loaded stores
    pub fn from_config(config: &AppConfig, local: RatingStore, global: RatingStore) -> Result<Self> {
        let rater = EloRater::new(config.rating.elo())?;
        config.weights.validate()?;
        Ok(Self::new(rater, config.weights.clone())
            .with_stores(local, global)
            .with_global_updates(config.storage.update_global))
    }
}

impl Default for RankingSession<EloRater> {
    fn default() -> Self {
        Self::new(EloRater::default(), DimensionWeights::default())
    }
}

impl<R: PairwiseRater> RankingSession<R> {
    /// Create a session with empty stores
    pub fn new(rater: R, weights: DimensionWeights) -> Self {
        Self {
            local: RatingStore::default(),
            global: RatingStore::default(),
            weights,
            rater,
            update_global: true,
        }
    }

    pub fn with_stores(mut self, local: RatingStore, global: RatingStore) -> Self {
        self.local = local;
        self.global = global;
        self
    }

    pub fn with_global_updates(mut self, enabled: bool) -> Self {
        self.update_global = enabled;
        self
    }

    pub fn local(&self) -> &RatingStore {
        &self.local
    }

    pub fn global(&self) -> &RatingStore {
        &self.global
    }

    pub fn weights(&self) -> &DimensionWeights {
        &self.weights
    }

    pub fn updates_global(&self) -> bool {
        self.update_global
    }

    pub fn set_global_updates(&mut self, enabled: bool) {
        self.update_global = enabled;
    }

    /// Change the weight of one dimension
    pub fn set_weight(&mut self, dimension: Dimension, weight: f64) -> Result<()> {
        self.weights.set(dimension, weight)?;
        info!("Weight for {} set to {}", dimension, weight);
        Ok(())
    }

    /// Add an item and compare it against every existing item
    ///
    /// For `n` existing items this asks the judge `n * 3` times, once per
    /// opponent and dimension, and applies each decided comparison. The
    /// item is also seeded into the global store if it is missing there.
    pub fn add_item<J>(&mut self, name: &str, judge: &mut J) -> Result<AdditionReport>
    where
        J: ComparisonJudge + ?Sized,
    {
        let name = self.local.add_item(name)?;
        if self.global.ensure_item(&name) {
            info!("Seeded '{}' into the global store", name);
        }

        let opponents: Vec<ItemName> = self
            .local
            .names()
            .filter(|existing| *existing != name)
            .map(str::to_string)
            .collect();

        let mut report = AdditionReport {
            name: name.clone(),
            applied: 0,
            skipped: 0,
        };

        for opponent in &opponents {
            for dimension in Dimension::ALL {
                let request = ComparisonRequest {
                    dimension,
                    first: name.clone(),
                    second: opponent.clone(),
                };
                match judge.judge(&request) {
                    Some(winner) => {
                        self.compare(&name, opponent, dimension, winner)?;
                        report.applied += 1;
                    }
                    None => {
                        warn!(
                            "No winner given for {} between '{}' and '{}', skipping",
                            dimension, name, opponent
                        );
                        report.skipped += 1;
                    }
                }
            }
        }

        info!(
            "Introduced '{}': {} comparisons applied, {} skipped",
            report.name, report.applied, report.skipped
        );
        Ok(report)
    }

    /// Apply one comparison between two existing local items
    ///
    /// When global updates are enabled the same outcome is applied to the
    /// global store, seeding either item there first if needed.
    pub fn compare(
        &mut self,
        first: &str,
        second: &str,
        dimension: Dimension,
        winner: Winner,
    ) -> Result<PairwiseUpdate> {
        let update = self
            .rater
            .apply_outcome(&mut self.local, first, second, winner, dimension)?;

        if self.update_global {
            self.global.ensure_item(first);
            self.global.ensure_item(second);
            self.rater
                .apply_outcome(&mut self.global, first, second, winner, dimension)?;
        }

        Ok(update)
    }

    /// Apply a comparison whose winner is given by name
    ///
    /// An answer naming neither item is tolerated: nothing changes and
    /// `Ok(None)` is returned.
    pub fn compare_by_name(
        &mut self,
        first: &str,
        second: &str,
        dimension: Dimension,
        answer: &str,
    ) -> Result<Option<PairwiseUpdate>> {
        match Winner::resolve(first, second, answer) {
            Some(winner) => self.compare(first, second, dimension, winner).map(Some),
            None => {
                warn!(
                    "Answer '{}' names neither '{}' nor '{}', comparison skipped",
                    answer.trim(),
                    first,
                    second
                );
                Ok(None)
            }
        }
    }

    /// Remove an item from the local store
    ///
    /// The global store is a shared reference and keeps the item.
    pub fn remove_item(&mut self, name: &str) -> Result<()> {
        self.local.remove_item(name)?;
        Ok(())
    }

    /// Overall score of one local item under the current weights
    pub fn overall_score(&self, name: &str) -> Result<f64> {
        aggregate::overall_score(name, &self.local, &self.weights)
    }

    /// Local items ranked by overall score, best first
    pub fn rankings(&self) -> Result<Vec<RankEntry>> {
        aggregate::rank(&self.local, &self.weights)
    }

    /// Replace the local store with an uploaded JSON payload
    ///
    /// On failure the local store is unchanged.
    pub fn import_local(&mut self, json: &str) -> Result<()> {
        self.local.import_json(json)?;
        info!("Imported {} items into the local store", self.local.len());
        Ok(())
    }

    /// Local store as pretty-printed JSON
    pub fn export_local(&self) -> Result<String> {
        self.local.to_json_pretty()
    }
}
