//! Podium CLI definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use eyre::Result;
use podium_node_core::args::{LoadArgs, LogArgs, StoreArgs};
use podium_node_core::config::PodiumConfig;

/// Podium - in-memory leaderboard engine
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct PodiumCli {
    /// Logging configuration (applies to all subcommands).
    #[command(flatten)]
    pub(crate) logs: LogArgs,

    /// Store overrides (applies to all subcommands).
    #[command(flatten)]
    pub(crate) store: StoreArgs,

    /// TOML configuration file with `[store]` and `[load]` tables.
    #[arg(long, global = true, value_name = "PATH", env = "PODIUM_CONFIG")]
    pub(crate) config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub(crate) command: PodiumCommands,
}

/// Available podium commands.
#[derive(Debug, Subcommand)]
pub(crate) enum PodiumCommands {
    /// Bulk load a fresh store with random scores, then inspect it.
    Load(LoadCommand),
    /// Print the effective configuration as TOML.
    Config,
}

/// Arguments for the `load` command.
#[derive(Debug, Args)]
pub(crate) struct LoadCommand {
    #[command(flatten)]
    pub(crate) load: LoadArgs,

    /// Print the top K entries after loading.
    #[arg(long, value_name = "K", default_value_t = 10)]
    pub(crate) top: i32,

    /// Print the window around this id after loading.
    #[arg(long, value_name = "ID")]
    pub(crate) around: Option<u64>,

    /// Entries above `--around` to include.
    #[arg(long, value_name = "H", default_value_t = 5, requires = "around", allow_negative_numbers = true)]
    pub(crate) high: i32,

    /// Entries below `--around` to include.
    #[arg(long, value_name = "L", default_value_t = 5, requires = "around", allow_negative_numbers = true)]
    pub(crate) low: i32,
}

impl PodiumCli {
    /// Effective configuration: the file (or defaults) plus CLI overrides.
    pub(crate) fn resolve_config(&self) -> Result<PodiumConfig> {
        let mut config = match &self.config {
            Some(path) => PodiumConfig::load(path)?,
            None => PodiumConfig::default(),
        };
        let load = match &self.command {
            PodiumCommands::Load(cmd) => cmd.load.clone(),
            PodiumCommands::Config => LoadArgs::default(),
        };
        config.apply_args(&self.store, &load);
        Ok(config)
    }
}
