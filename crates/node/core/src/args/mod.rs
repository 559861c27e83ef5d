//! CLI argument structs for podium infrastructure configuration.
//!
//! Each struct is a clap `Args` group with its own help heading. Store and
//! load arguments are overrides: a flag left unset keeps the value from the
//! configuration file.

mod load;
mod log;
mod store;

pub use load::LoadArgs;
pub use log::LogArgs;
pub use store::StoreArgs;
