//! Podium node infrastructure.
//!
//! - [`args`] - CLI argument groups for logging, store and load overrides
//! - [`config`] - TOML configuration loading and saving
//! - [`logging`] - Logging initialization
//! - [`load`] - Parallel synthetic load generator
//! - [`version`] - Version information

pub mod args;
pub mod config;
pub mod load;
pub mod logging;
pub mod version;
