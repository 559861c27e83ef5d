use clap::Args;
use podium_store::StoreConfig;

/// Ranking store overrides.
#[derive(Debug, Default, Args, Clone, PartialEq, Eq)]
#[command(next_help_heading = "Store")]
pub struct StoreArgs {
    /// Largest accepted score delta magnitude per upsert.
    #[arg(long = "store.max-delta", global = true, value_name = "DELTA")]
    pub max_delta: Option<u64>,
}

impl StoreArgs {
    pub fn apply(&self, config: &mut StoreConfig) {
        if let Some(max_delta) = self.max_delta {
            config.max_delta = max_delta;
        }
    }
}
