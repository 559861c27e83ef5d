//! Podium operator binary.

mod cli;

use std::sync::Arc;

use clap::Parser;
use eyre::{Result, WrapErr};
use podium_node_core::{config::PodiumConfig, load::run_load, logging::init_logging};
use podium_service::{Leaderboard, RankingService};
use podium_store::{RankedEntry, RankingStore};
use tracing::info;

use crate::cli::{LoadCommand, PodiumCli, PodiumCommands};

fn main() -> Result<()> {
    let cli = PodiumCli::parse();
    init_logging(&cli.logs).wrap_err("Failed to initialize logging")?;

    let config = cli.resolve_config()?;
    match &cli.command {
        PodiumCommands::Load(cmd) => load(&config, cmd),
        PodiumCommands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

fn load(config: &PodiumConfig, cmd: &LoadCommand) -> Result<()> {
    let store = Arc::new(RankingStore::with_config(config.store));
    let service = RankingService::new(Arc::clone(&store));

    let report = run_load(&service, &config.load, config.store.max_delta)
        .wrap_err("Load run failed")?;
    info!(
        accepted = report.accepted,
        rejected = report.rejected,
        threads = report.threads,
        elapsed_ms = report.elapsed.as_millis() as u64,
        throughput = report.throughput(),
        "load complete"
    );

    println!("top {}", cmd.top);
    print_rows(&service.range(1, cmd.top)?);

    if let Some(id) = cmd.around {
        println!("window around {id} (-{} / +{})", cmd.high, cmd.low);
        print_rows(&service.window(id, cmd.high, cmd.low));
    }

    Ok(())
}

fn print_rows(rows: &[RankedEntry]) {
    for row in rows {
        println!("{:>8}  {:>20}  {:>12}", row.rank, row.id, row.score);
    }
}
