//! Version information for the podium binary.

/// The version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

