//! Main application configuration
//!
//! This module defines the configuration structures for the ranker,
//! including TOML file and environment variable loading and validation.

use crate::config::rating::RatingSettings;
use crate::persistence::{GLOBAL_SCORES_FILE, LOCAL_SCORES_FILE};
use crate::types::{Dimension, DimensionWeights};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub service: ServiceSettings,
    pub rating: RatingSettings,
    pub weights: DimensionWeights,
    pub storage: StorageSettings,
}

/// Service-level settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceSettings {
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

/// Where score files live and whether the global store is maintained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Working (local) scores, read at startup and written on exit
    pub local_scores_path: PathBuf,
    /// Shared reference scores, loaded once at startup
    pub global_scores_path: PathBuf,
    /// Apply every comparison to the global store as well
    pub update_global: bool,
}

impl Default for ServiceSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            local_scores_path: PathBuf::from(LOCAL_SCORES_FILE),
            global_scores_path: PathBuf::from(GLOBAL_SCORES_FILE),
            update_global: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables with fallback to defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let mut config: AppConfig = toml::from_str(&contents)
            .with_context(|| format!("Invalid config file {}", path.display()))?;
        config.apply_env()?;
        validate_config(&config)?;
        Ok(config)
    }

    fn apply_env(&mut self) -> Result<()> {
        if let Ok(log_level) = env::var("LOG_LEVEL") {
            self.service.log_level = log_level;
        }

        if let Ok(k) = env::var("RANKER_K_FACTOR") {
            self.rating.k_factor = k
                .parse()
                .map_err(|_| anyhow!("Invalid RANKER_K_FACTOR value: {}", k))?;
        }
        if let Ok(rating) = env::var("RANKER_DEFAULT_RATING") {
            self.rating.default_rating = rating
                .parse()
                .map_err(|_| anyhow!("Invalid RANKER_DEFAULT_RATING value: {}", rating))?;
        }

        for dimension in Dimension::ALL {
            let key = format!("RANKER_WEIGHT_{}", dimension.as_str().to_uppercase());
            if let Ok(value) = env::var(&key) {
                let weight: f64 = value
                    .parse()
                    .map_err(|_| anyhow!("Invalid {} value: {}", key, value))?;
                self.weights.set(dimension, weight)?;
            }
        }

        if let Ok(path) = env::var("RANKER_LOCAL_SCORES") {
            self.storage.local_scores_path = PathBuf::from(path);
        }
        if let Ok(path) = env::var("RANKER_GLOBAL_SCORES") {
            self.storage.global_scores_path = PathBuf::from(path);
        }
        if let Ok(update) = env::var("RANKER_UPDATE_GLOBAL") {
            self.storage.update_global = update
                .parse()
                .map_err(|_| anyhow!("Invalid RANKER_UPDATE_GLOBAL value: {}", update))?;
        }

        Ok(())
    }
}

/// Validate configuration values
pub fn validate_config(config: &AppConfig) -> Result<()> {
    match config.service.log_level.to_lowercase().as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => {}
        _ => return Err(anyhow!("Invalid log level: {}", config.service.log_level)),
    }

    config.rating.elo().validate()?;
    if !config.rating.default_rating.is_finite() {
        return Err(anyhow!("Default rating must be a finite number"));
    }

    config.weights.validate()?;

    if config.storage.local_scores_path.as_os_str().is_empty() {
        return Err(anyhow!("Local scores path cannot be empty"));
    }
    if config.storage.global_scores_path.as_os_str().is_empty() {
        return Err(anyhow!("Global scores path cannot be empty"));
    }

    Ok(())
}
