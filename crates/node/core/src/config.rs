//! Podium configuration handling.

use std::{fs, path::Path};

use eyre::{Result, WrapErr};
use podium_store::StoreConfig;
use serde::{Deserialize, Serialize};

use crate::args::{LoadArgs, StoreArgs};

/// Default number of upserts driven by the load generator.
pub const DEFAULT_LOAD_COUNT: u64 = 100_000;

/// Default smallest generated delta.
pub const DEFAULT_MIN_SCORE: i64 = 10;

/// Default largest generated delta.
pub const DEFAULT_MAX_SCORE: i64 = 1_000;

/// Configuration for the podium binary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PodiumConfig {
    /// Ranking store configuration.
    pub store: StoreConfig,

    /// Load generator configuration.
    pub load: LoadConfig,
}

/// Load generator configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadConfig {
    /// Number of upserts, one per id starting at 0.
    pub count: u64,

    /// Smallest generated delta, inclusive.
    pub min_score: i64,

    /// Largest generated delta, inclusive.
    pub max_score: i64,

    /// Worker threads; 0 lets rayon pick.
    pub threads: usize,

    /// RNG seed. Unset draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            count: DEFAULT_LOAD_COUNT,
            min_score: DEFAULT_MIN_SCORE,
            max_score: DEFAULT_MAX_SCORE,
            threads: 0,
            seed: None,
        }
    }
}

impl PodiumConfig {
    /// Load the configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .wrap_err_with(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .wrap_err_with(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Save the configuration to `path`, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).wrap_err("Failed to create config directory")?;
        }

        fs::write(path, self.to_toml()?)
            .wrap_err_with(|| format!("Failed to write config file {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).wrap_err("Failed to serialize config")
    }

    /// Apply command line overrides.
    pub fn apply_args(&mut self, store: &StoreArgs, load: &LoadArgs) {
        store.apply(&mut self.store);
        load.apply(&mut self.load);
    }
}
