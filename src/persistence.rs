//! Reading and writing score files
//!
//! Score files hold a JSON object mapping item names to their
//! per-dimension ratings, the same shape the store imports and exports.

use crate::error::{RankingError, Result};
use crate::rating::storage::RatingStore;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// File name the local store is exported under
pub const LOCAL_SCORES_FILE: &str = "local_scores.json";

/// File name of the shared reference scores
pub const GLOBAL_SCORES_FILE: &str = "global_scores.json";

/// Read a score file into a new store
pub fn read_store(path: &Path, default_rating: f64) -> Result<RatingStore> {
    let contents = fs::read_to_string(path).map_err(|source| RankingError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut store = RatingStore::new(default_rating);
    store.import_json(&contents)?;
    info!("Loaded {} items from {}", store.len(), path.display());
    Ok(store)
}

/// Read a score file, or start empty if it does not exist yet
///
/// Any other failure, including malformed contents, is returned.
pub fn read_store_or_empty(path: &Path, default_rating: f64) -> Result<RatingStore> {
    match read_store(path, default_rating) {
        Err(RankingError::Io { source, .. }) if source.kind() == ErrorKind::NotFound => {
            info!("No scores at {}, starting empty", path.display());
            Ok(RatingStore::new(default_rating))
        }
        other => other,
    }
}

/// Load the global reference scores
///
/// The global store is a soft dependency: any failure is logged and an
/// empty store is returned.
pub fn load_global_or_empty(path: &Path, default_rating: f64) -> RatingStore {
    match read_store(path, default_rating) {
        Ok(store) => store,
        Err(e) => {
            warn!(
                "Failed to load global scores, continuing with an empty global store: {}",
                e
            );
            RatingStore::new(default_rating)
        }
    }
}

/// Write `store` as pretty-printed JSON
pub fn write_store(path: &Path, store: &RatingStore) -> Result<()> {
    let json = store.to_json_pretty()?;
    fs::write(path, json).map_err(|source| RankingError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    info!("Saved {} items to {}", store.len(), path.display());
    Ok(())
}
