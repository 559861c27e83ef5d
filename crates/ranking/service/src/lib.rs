//! Leaderboard façade.
//!
//! [`RankingService`] checks delta bounds before touching the store and maps
//! [`podium_store::StoreError`] into [`ServiceError`]. It holds no state of
//! its own, so clones share one leaderboard.

mod error;
mod service;

pub use error::ServiceError;
pub use service::{Leaderboard, RankingService};
