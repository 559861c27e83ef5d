use std::sync::Arc;

use auto_impl::auto_impl;
use podium_store::{RankedEntry, RankingStore, Standing};
use tracing::warn;

use crate::ServiceError;

/// Leaderboard operations exposed to callers.
#[auto_impl(&, Arc, Box)]
pub trait Leaderboard: Send + Sync {
    /// Adds `delta` to the score of `id`, creating it on first use.
    fn upsert(&self, id: u64, delta: i64) -> Result<Standing, ServiceError>;

    /// Entries ranked `start..=end` that hold a positive score.
    fn range(&self, start: i32, end: i32) -> Result<Vec<RankedEntry>, ServiceError>;

    /// Up to `high` entries above `id`, the entry, and up to `low` below it.
    fn window(&self, id: u64, high: i32, low: i32) -> Vec<RankedEntry>;

    fn contains(&self, id: u64) -> bool;
}

/// [`Leaderboard`] backed by a shared [`RankingStore`].
#[derive(Debug, Clone, Default)]
pub struct RankingService {
    store: Arc<RankingStore>,
}

impl RankingService {
    pub fn new(store: Arc<RankingStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<RankingStore> {
        &self.store
    }
}

impl From<Arc<RankingStore>> for RankingService {
    fn from(store: Arc<RankingStore>) -> Self {
        Self::new(store)
    }
}

impl Leaderboard for RankingService {
    fn upsert(&self, id: u64, delta: i64) -> Result<Standing, ServiceError> {
        let result = self
            .store
            .config()
            .check_delta(delta)
            .and_then(|()| self.store.upsert(id, delta));
        result.map_err(|err| {
            warn!(id, delta, %err, "rejected upsert");
            ServiceError::from(err)
        })
    }

    fn range(&self, start: i32, end: i32) -> Result<Vec<RankedEntry>, ServiceError> {
        self.store.range(start, end).map_err(|err| {
            warn!(start, end, %err, "rejected range");
            ServiceError::from(err)
        })
    }

    fn window(&self, id: u64, high: i32, low: i32) -> Vec<RankedEntry> {
        self.store.window(id, high, low)
    }

    fn contains(&self, id: u64) -> bool {
        self.store.contains(id)
    }
}
