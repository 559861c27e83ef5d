//! Logging configuration for the podium binary.

use eyre::{Result, eyre};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::args::LogArgs;

/// Build the log filter for `args`.
///
/// The filter is built with the following precedence:
/// 1. If `--quiet` is set, only errors are shown
/// 2. Otherwise, start with `RUST_LOG` if set, or the level implied by `-v`
/// 3. Apply any custom directives from `--log.filter`
pub fn build_filter(args: &LogArgs) -> EnvFilter {
    if args.quiet {
        return EnvFilter::new("error");
    }

    let mut filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.level()));

    if let Some(custom_filter) = &args.filter {
        for directive in custom_filter.split(',') {
            if let Ok(d) = directive.parse() {
                filter = filter.add_directive(d);
            }
        }
    }

    filter
}

/// Initialize the global subscriber from command line arguments.
pub fn init_logging(args: &LogArgs) -> Result<()> {
    let filter = build_filter(args);
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = if args.json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    installed.map_err(|err| eyre!("Failed to install log subscriber: {err}"))?;

    info!(version = crate::version::VERSION, "podium starting");
    Ok(())
}
