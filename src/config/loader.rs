//! Regime loading functionality.
//!
//! This module provides the [`RegimeLoader`] type for loading regimes from
//! YAML files, and the [`RegimeCatalog`] they are collected into.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::presets;
use super::types::{RegimeId, TaxConfig};

/// The set of regimes available to callers, keyed by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegimeCatalog {
    regimes: BTreeMap<RegimeId, TaxConfig>,
}

impl RegimeCatalog {
    /// Builds a catalog holding the 2025 and 2026 presets.
    pub fn builtin() -> Self {
        Self::from_configs(RegimeId::ALL.into_iter().map(presets::preset))
    }

    /// Builds a catalog from configurations. Later entries replace earlier
    /// ones with the same identifier.
    pub fn from_configs<I: IntoIterator<Item = TaxConfig>>(configs: I) -> Self {
        let regimes = configs
            .into_iter()
            .map(|config| (config.id, config))
            .collect();
        Self { regimes }
    }

    /// Gets a regime by identifier.
    ///
    /// # Example
    ///
    /// ```
    /// use pit_engine::config::{RegimeCatalog, RegimeId};
    ///
    /// let catalog = RegimeCatalog::builtin();
    /// let config = catalog.get(RegimeId::Proposed2026)?;
    /// assert_eq!(config.brackets.len(), 5);
    /// # Ok::<(), pit_engine::error::EngineError>(())
    /// ```
    pub fn get(&self, id: RegimeId) -> EngineResult<&TaxConfig> {
        self.regimes
            .get(&id)
            .ok_or_else(|| EngineError::RegimeNotFound {
                id: id.to_string(),
            })
    }

    /// Returns the identifiers in the catalog, oldest first.
    pub fn ids(&self) -> Vec<RegimeId> {
        self.regimes.keys().copied().collect()
    }

    /// Iterates over the regimes, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &TaxConfig> {
        self.regimes.values()
    }

    /// Returns the number of regimes.
    pub fn len(&self) -> usize {
        self.regimes.len()
    }

    /// Returns true when the catalog holds no regimes.
    pub fn is_empty(&self) -> bool {
        self.regimes.is_empty()
    }
}

impl Default for RegimeCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Loads regimes from a directory of YAML files.
///
/// # Directory Structure
///
/// ```text
/// config/regimes/
/// ├── 2025.yaml   # Current regulations
/// └── 2026.yaml   # Proposed regulations
/// ```
///
/// Every `*.yaml` file is parsed as one [`TaxConfig`] and validated.
///
/// # Example
///
/// ```no_run
/// use pit_engine::config::{RegimeId, RegimeLoader};
///
/// let catalog = RegimeLoader::load("./config/regimes")?;
/// let config = catalog.get(RegimeId::Current2025)?;
/// println!("Loaded regime: {}", config.name);
/// # Ok::<(), pit_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RegimeLoader;

impl RegimeLoader {
    /// Loads every regime file in `path` into a catalog.
    ///
    /// Returns an error if:
    /// - The directory is missing or holds no `.yaml` files
    /// - Any file contains invalid YAML or misses a required field
    /// - Any regime fails [`TaxConfig::validate`]
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<RegimeCatalog> {
        let dir = path.as_ref();
        let dir_str = dir.display().to_string();

        if !dir.is_dir() {
            return Err(EngineError::ConfigNotFound { path: dir_str });
        }

        let entries = fs::read_dir(dir).map_err(|_| EngineError::ConfigNotFound {
            path: dir_str.clone(),
        })?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: dir_str.clone(),
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                files.push(path);
            }
        }
        // Directory order is platform dependent
        files.sort();

        if files.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no regime files found)", dir_str),
            });
        }

        let mut configs = Vec::with_capacity(files.len());
        for file in &files {
            let config = Self::load_file(file)?;
            debug!(regime = %config.id, path = %file.display(), "Loaded tax regime");
            configs.push(config);
        }

        Ok(RegimeCatalog::from_configs(configs))
    }

    /// Loads and validates a single regime file.
    pub fn load_file<P: AsRef<Path>>(path: P) -> EngineResult<TaxConfig> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        let config = Self::parse(&content).map_err(|e| match e {
            EngineError::ConfigParseError { message, .. } => EngineError::ConfigParseError {
                path: path_str.clone(),
                message,
            },
            other => other,
        })?;
        Ok(config)
    }

    /// Parses and validates a regime from YAML text.
    pub fn parse(content: &str) -> EngineResult<TaxConfig> {
        let config: TaxConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }
}
