//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading engine defaults
//! and named band sets from YAML files.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use tracing::info;

use crate::error::{EngineError, EngineResult};
use crate::models::BandSet;

use super::types::{EngineConfig, ThresholdsConfig};

/// Loads and provides access to engine configuration.
///
/// # Directory Structure
///
/// The configuration directory should have the following structure:
/// ```text
/// config/default/
/// ├── engine.yaml       # Session topic, attendance policy and band set
/// └── thresholds.yaml   # Named band sets
/// ```
///
/// # Example
///
/// ```no_run
/// use course_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
///
/// let bands = loader.band_set("attendance").unwrap();
/// println!("Bands: {}", bands.bands().len());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: EngineConfig,
    band_sets: BTreeMap<String, BandSet>,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Arguments
    ///
    /// * `path` - Path to the configuration directory (e.g., "./config/default")
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A band set has no bands, or two bands with the same threshold
    /// - `engine.yaml` names a band set that `thresholds.yaml` does not define
    ///
    /// # Example
    ///
    /// ```no_run
    /// use course_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/default")?;
    /// # Ok::<(), course_engine::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let config = Self::load_yaml::<EngineConfig>(&path.join("engine.yaml"))?;
        let thresholds = Self::load_yaml::<ThresholdsConfig>(&path.join("thresholds.yaml"))?;

        let band_sets = thresholds
            .band_sets
            .into_iter()
            .map(|(name, bands)| BandSet::new(name.clone(), bands).map(|set| (name, set)))
            .collect::<EngineResult<BTreeMap<_, _>>>()?;

        let loader = Self { config, band_sets };
        loader.band_set(&loader.config.attendance_band_set)?;

        info!(
            path = %path.display(),
            band_sets = ?loader.band_sets.keys().collect::<Vec<_>>(),
            attendance_band_set = %loader.config.attendance_band_set,
            "Configuration loaded"
        );

        Ok(loader)
    }

    /// Returns the built-in configuration without touching the filesystem.
    ///
    /// Provides the `attendance` and `attendance_compact` band sets and the
    /// default [`EngineConfig`].
    ///
    /// # Example
    ///
    /// ```
    /// use course_engine::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::builtin();
    /// let label = loader.attendance_bands().unwrap().bands()[0].label.clone();
    /// assert_eq!(label, "Excelente");
    /// ```
    pub fn builtin() -> Self {
        let band_sets = [BandSet::attendance(), BandSet::attendance_compact()]
            .into_iter()
            .map(|set| (set.name().to_string(), set))
            .collect();

        Self {
            config: EngineConfig::default(),
            band_sets,
        }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Returns the engine defaults.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Gets a band set by its name.
    ///
    /// # Returns
    ///
    /// Returns the band set if found, or `BandSetNotFound` error.
    pub fn band_set(&self, name: &str) -> EngineResult<&BandSet> {
        self.band_sets
            .get(name)
            .ok_or_else(|| EngineError::BandSetNotFound {
                name: name.to_string(),
            })
    }

    /// Gets the band set configured for attendance classification.
    pub fn attendance_bands(&self) -> EngineResult<&BandSet> {
        self.band_set(&self.config.attendance_band_set)
    }

    /// Returns the names of all loaded band sets, in alphabetical order.
    pub fn band_set_names(&self) -> impl Iterator<Item = &str> {
        self.band_sets.keys().map(String::as_str)
    }
}
