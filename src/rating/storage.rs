//! In-memory rating storage
//!
//! This module holds the per-item, per-dimension ratings that comparisons
//! update and the aggregator reads. Items keep their insertion order, which
//! is also the order ties are listed in when ranking.

use crate::error::{RankingError, Result};
use crate::types::{Dimension, ItemName, ScoreRecord, DEFAULT_RATING};
use serde::de::{self, Deserialize, Deserializer, MapAccess, Visitor};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::ser::PrettyFormatter;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

/// Immutable copy of a store's contents, in store order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScoreSnapshot {
    entries: Vec<(ItemName, ScoreRecord)>,
}

impl ScoreSnapshot {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&ScoreRecord> {
        self.entries
            .iter()
            .find(|(entry_name, _)| entry_name == name)
            .map(|(_, record)| record)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoreRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Parse a JSON object of `name -> {dimension: rating}`
    ///
    /// Only the shape is checked here; repeated names, names with
    /// surrounding whitespace and incomplete records are rejected when the
    /// snapshot is handed to [`RatingStore::replace_all`].
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| RankingError::malformed(e.to_string()))
    }

    /// Serialize as a JSON object indented with four spaces
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(b"    "));
        self.serialize(&mut serializer)
            .map_err(|e| RankingError::malformed(format!("failed to serialize scores: {}", e)))?;
        String::from_utf8(buffer)
            .map_err(|e| RankingError::malformed(format!("serialized scores are not UTF-8: {}", e)))
    }
}

impl Serialize for ScoreSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, record) in &self.entries {
            map.serialize_entry(name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ScoreSnapshot {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_map(SnapshotVisitor)
    }
}

/// Collects object entries in document order, keeping repeated keys
struct SnapshotVisitor;

impl<'de> Visitor<'de> for SnapshotVisitor {
    type Value = ScoreSnapshot;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a JSON object of item name to score record")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> std::result::Result<Self::Value, A::Error> {
        let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(name) = map.next_key::<ItemName>()? {
            let value: serde_json::Value = map.next_value()?;
            let record: ScoreRecord = serde_json::from_value(value).map_err(|e| {
                de::Error::custom(format!("invalid score record for '{}': {}", name, e))
            })?;
            entries.push((name, record));
        }
        Ok(ScoreSnapshot { entries })
    }
}

impl IntoIterator for ScoreSnapshot {
    type Item = (ItemName, ScoreRecord);
    type IntoIter = std::vec::IntoIter<(ItemName, ScoreRecord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(ItemName, ScoreRecord)> for ScoreSnapshot {
    fn from_iter<T: IntoIterator<Item = (ItemName, ScoreRecord)>>(iter: T) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

/// Mapping from item name to its per-dimension ratings
///
/// Every record held by the store has a rating for every recognized
/// dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStore {
    entries: Vec<(ItemName, ScoreRecord)>,
    index: HashMap<ItemName, usize>,
    default_rating: f64,
}

impl Default for RatingStore {
    fn default() -> Self {
        Self::new(DEFAULT_RATING)
    }
}

impl RatingStore {
    /// Create an empty store whose new items start at `default_rating`
    pub fn new(default_rating: f64) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::new(),
            default_rating,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&ScoreRecord> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Item names in store order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ScoreRecord)> {
        self.entries.iter().map(|(n, r)| (n.as_str(), r))
    }

    /// Add a new item with every dimension at the default rating
    ///
    /// The name is trimmed before it is stored. Returns the stored name.
    pub fn add_item(&mut self, name: &str) -> Result<ItemName> {
        let name = name.trim();
        if name.is_empty() {
            return Err(RankingError::invalid_input("item name cannot be empty"));
        }
        if self.contains(name) {
            return Err(RankingError::DuplicateItem {
                name: name.to_string(),
            });
        }

        self.push(name.to_string(), ScoreRecord::with_default(self.default_rating));
        info!("Added item '{}' at rating {}", name, self.default_rating);
        Ok(name.to_string())
    }

    /// Insert `name` with default ratings unless it is already present
    ///
    /// Returns whether an item was inserted.
    pub fn ensure_item(&mut self, name: &str) -> bool {
        if self.contains(name) {
            return false;
        }
        self.push(name.to_string(), ScoreRecord::with_default(self.default_rating));
        debug!("Seeded item '{}' with default ratings", name);
        true
    }

    /// Remove an item and its ratings
    pub fn remove_item(&mut self, name: &str) -> Result<ScoreRecord> {
        let position = self
            .index
            .remove(name)
            .ok_or_else(|| RankingError::unknown_item(name))?;
        let (_, record) = self.entries.remove(position);
        self.reindex();
        info!("Removed item '{}'", name);
        Ok(record)
    }

    /// Current rating of `name` on `dimension`
    pub fn rating(&self, name: &str, dimension: Dimension) -> Result<f64> {
        let record = self.get(name).ok_or_else(|| RankingError::unknown_item(name))?;
        record
            .get(dimension)
            .ok_or_else(|| RankingError::MissingDimension {
                name: name.to_string(),
                dimension: dimension.to_string(),
            })
    }

    /// Overwrite the rating of an existing item on one dimension
    pub fn set_rating(&mut self, name: &str, dimension: Dimension, rating: f64) -> Result<()> {
        let position = *self
            .index
            .get(name)
            .ok_or_else(|| RankingError::unknown_item(name))?;
        self.entries[position].1.set(dimension, rating);
        Ok(())
    }

    /// Replace the whole contents of the store
    ///
    /// All records are validated before anything changes: on error the
    /// store keeps its previous contents.
    pub fn replace_all<I>(&mut self, records: I) -> Result<()>
    where
        I: IntoIterator<Item = (ItemName, ScoreRecord)>,
    {
        let mut entries = Vec::new();
        let mut index = HashMap::new();

        for (name, record) in records {
            if name.trim().is_empty() {
                return Err(RankingError::malformed("item name cannot be empty"));
            }
            if name.trim() != name {
                return Err(RankingError::malformed(format!(
                    "item name '{}' has leading or trailing whitespace",
                    name
                )));
            }
            let missing = record.missing_dimensions();
            if !missing.is_empty() {
                let missing: Vec<&str> = missing.iter().map(|d| d.as_str()).collect();
                return Err(RankingError::malformed(format!(
                    "item '{}' is missing ratings for: {}",
                    name,
                    missing.join(", ")
                )));
            }
            if let Some((dimension, rating)) = record.iter().find(|(_, r)| !r.is_finite()) {
                return Err(RankingError::malformed(format!(
                    "item '{}' has a non-finite {} rating ({})",
                    name, dimension, rating
                )));
            }
            if index.insert(name.clone(), entries.len()).is_some() {
                return Err(RankingError::malformed(format!(
                    "item '{}' appears more than once",
                    name
                )));
            }
            entries.push((name, record));
        }

        info!(
            "Replaced store contents: {} items (previously {})",
            entries.len(),
            self.entries.len()
        );
        self.entries = entries;
        self.index = index;
        Ok(())
    }

    /// Parse a JSON payload and replace the store with it
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        let snapshot = ScoreSnapshot::from_json(text)?;
        self.replace_all(snapshot)
    }

    /// Immutable copy of the current contents
    pub fn snapshot(&self) -> ScoreSnapshot {
        ScoreSnapshot {
            entries: self.entries.clone(),
        }
    }

    /// Serialize the current contents as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String> {
        self.snapshot().to_json_pretty()
    }

    fn push(&mut self, name: ItemName, record: ScoreRecord) {
        self.index.insert(name.clone(), self.entries.len());
        self.entries.push((name, record));
    }

    fn reindex(&mut self) {
        self.index = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (name, _))| (name.clone(), i))
            .collect();
    }
}
