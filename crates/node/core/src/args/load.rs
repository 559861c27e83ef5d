use clap::Args;

use crate::config::LoadConfig;

/// Load generator overrides.
#[derive(Debug, Default, Args, Clone, PartialEq, Eq)]
#[command(next_help_heading = "Load")]
pub struct LoadArgs {
    /// Number of upserts to drive.
    #[arg(long, value_name = "N")]
    pub count: Option<u64>,

    /// Smallest generated score delta.
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub min_score: Option<i64>,

    /// Largest generated score delta.
    #[arg(long, value_name = "SCORE", allow_negative_numbers = true)]
    pub max_score: Option<i64>,

    /// Seed for reproducible runs.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Worker threads; 0 uses one per core.
    #[arg(long, value_name = "T")]
    pub threads: Option<usize>,
}

impl LoadArgs {
    pub fn apply(&self, config: &mut LoadConfig) {
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(min_score) = self.min_score {
            config.min_score = min_score;
        }
        if let Some(max_score) = self.max_score {
            config.max_score = max_score;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(threads) = self.threads {
            config.threads = threads;
        }
    }
}
