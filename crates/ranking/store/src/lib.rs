//! Identity-indexed ranking store.
//!
//! [`RankingStore`] maps `u64` ids to accumulated `i64` scores and keeps them
//! ranked by score descending, then id ascending. Ranks are 1-based and
//! structural: every known id occupies a rank slot, while range and window
//! queries only report entries with a positive score.
//!
//! ```
//! use podium_store::{RankingStore, Standing};
//!
//! let store = RankingStore::new();
//! store.upsert(7, 40).unwrap();
//! assert_eq!(store.upsert(3, 90).unwrap(), Standing { score: 90, rank: 1 });
//!
//! let top = store.range(1, 10).unwrap();
//! assert_eq!(top.iter().map(|e| e.id).collect::<Vec<_>>(), vec![3, 7]);
//! ```

mod config;
mod entry;
mod error;
mod store;

pub use config::{DEFAULT_MAX_DELTA, StoreConfig};
pub use entry::{Entry, RankedEntry, Standing};
pub use error::StoreError;
pub use store::RankingStore;
