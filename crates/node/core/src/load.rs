//! Synthetic load generator.
//!
//! Drives one upsert per id in `0..count` with a random delta, split into
//! contiguous id ranges across a dedicated rayon pool. Deltas are clipped to
//! the store bound so every generated upsert is admissible.

use std::time::{Duration, Instant};

use podium_service::Leaderboard;
use rand::{Rng, SeedableRng, rngs::StdRng};
use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use crate::config::LoadConfig;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("invalid score range: min {min} is greater than max {max}")]
    InvalidScoreRange { min: i64, max: i64 },
    #[error("failed to build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Outcome of one load run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadReport {
    pub accepted: u64,
    pub rejected: u64,
    pub threads: usize,
    pub elapsed: Duration,
}

impl LoadReport {
    pub fn attempted(&self) -> u64 {
        self.accepted + self.rejected
    }

    /// Upserts per second.
    pub fn throughput(&self) -> f64 {
        let secs = self.elapsed.as_secs_f64();
        if secs > 0.0 {
            self.attempted() as f64 / secs
        } else {
            0.0
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            accepted: self.accepted + other.accepted,
            rejected: self.rejected + other.rejected,
            ..self
        }
    }
}

/// Run the load described by `config` against `board`.
pub fn run_load<L: Leaderboard>(
    board: &L,
    config: &LoadConfig,
    max_delta: u64,
) -> Result<LoadReport, LoadError> {
    if config.min_score > config.max_score {
        return Err(LoadError::InvalidScoreRange {
            min: config.min_score,
            max: config.max_score,
        });
    }
    let bound = i64::try_from(max_delta).unwrap_or(i64::MAX);
    let low = config.min_score.clamp(-bound, bound);
    let high = config.max_score.clamp(-bound, bound);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(config.threads)
        .thread_name(|i| format!("podium-load-{i}"))
        .build()?;
    let threads = pool.current_num_threads();
    let chunks = (threads as u64).max(1);
    let chunk_len = config.count.div_ceil(chunks);

    let started = Instant::now();
    let report = pool.install(|| {
        (0..chunks)
            .into_par_iter()
            .map(|chunk| {
                let first = chunk.saturating_mul(chunk_len);
                let last = first.saturating_add(chunk_len).min(config.count);
                let mut rng = match config.seed {
                    Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(chunk)),
                    None => StdRng::from_os_rng(),
                };

                let mut report = LoadReport::default();
                for id in first..last {
                    match board.upsert(id, rng.random_range(low..=high)) {
                        Ok(_) => report.accepted += 1,
                        Err(_) => report.rejected += 1,
                    }
                }
                debug!(chunk, first, last, accepted = report.accepted, "load chunk done");
                report
            })
            .reduce(LoadReport::default, LoadReport::merge)
    });

    Ok(LoadReport {
        threads,
        elapsed: started.elapsed(),
        ..report
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use podium_service::RankingService;
    use podium_store::{RankingStore, StoreConfig};

    use super::*;

    fn config(count: u64, threads: usize, seed: u64) -> LoadConfig {
        LoadConfig {
            count,
            threads,
            seed: Some(seed),
            ..LoadConfig::default()
        }
    }

    #[test]
    fn every_id_is_loaded_once() {
        let service = RankingService::default();
        let report = run_load(&service, &config(1_000, 4, 1), 1_000).unwrap();

        assert_eq!(report.accepted, 1_000);
        assert_eq!(report.rejected, 0);
        assert_eq!(report.threads, 4);
        assert_eq!(service.store().len(), 1_000);
        assert!(service.contains(999));
        assert!(!service.contains(1_000));
    }

    #[test]
    fn seeded_runs_are_reproducible() {
        let a = RankingService::default();
        let b = RankingService::default();
        run_load(&a, &config(500, 3, 99), 1_000).unwrap();
        run_load(&b, &config(500, 3, 99), 1_000).unwrap();

        assert_eq!(a.range(1, 500).unwrap(), b.range(1, 500).unwrap());
    }

    #[test]
    fn deltas_are_clipped_to_the_bound() {
        let store = Arc::new(RankingStore::with_config(StoreConfig::with_max_delta(50)));
        let service = RankingService::new(Arc::clone(&store));
        let load = LoadConfig {
            min_score: 100,
            max_score: 900_000,
            ..config(64, 2, 5)
        };

        let report = run_load(&service, &load, store.config().max_delta).unwrap();
        assert_eq!(report.rejected, 0);
        assert!(service.range(1, 64).unwrap().iter().all(|e| e.score == 50));
    }

    #[test]
    fn inverted_score_range_is_rejected() {
        let load = LoadConfig {
            min_score: 10,
            max_score: 5,
            ..LoadConfig::default()
        };
        assert!(matches!(
            run_load(&RankingService::default(), &load, 1_000),
            Err(LoadError::InvalidScoreRange { min: 10, max: 5 })
        ));
    }

    #[test]
    fn empty_load_touches_nothing() {
        let service = RankingService::default();
        let report = run_load(&service, &config(0, 2, 0), 1_000).unwrap();
        assert_eq!(report.attempted(), 0);
        assert_eq!(report.throughput(), 0.0);
        assert!(service.store().is_empty());
    }
}
