//! Ranking store configuration.

use serde::{Deserialize, Serialize};

use crate::StoreError;

/// Default bound on the magnitude of a single delta.
pub const DEFAULT_MAX_DELTA: u64 = 1_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Largest accepted `|delta|` per upsert, inclusive.
    pub max_delta: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_delta: DEFAULT_MAX_DELTA,
        }
    }
}

impl StoreConfig {
    pub fn with_max_delta(max_delta: u64) -> Self {
        Self { max_delta }
    }

    /// Rejects deltas whose magnitude exceeds the configured bound.
    pub fn check_delta(&self, delta: i64) -> Result<(), StoreError> {
        if delta.unsigned_abs() > self.max_delta {
            return Err(StoreError::ScoreOutOfBounds {
                delta,
                bound: self.max_delta,
            });
        }
        Ok(())
    }
}
