//! Indexed skip list for rank-ordered populations.
//!
//! [`IndexedSkipList`] keeps its entries sorted by `Ord` and answers both
//! "what rank is this entry" ([`IndexedSkipList::rank_of`]) and "which
//! entry holds this rank" ([`IndexedSkipList::node_at_rank`]) in O(log n).
//! Every node records how many bottom-level entries it spans, which is what
//! makes positional queries logarithmic.
//!
//! Nodes are owned by a slab arena and addressed by [`NodeRef`] handles.
//! Entries are never mutated in place: changing an entry's ordering key means
//! removing its node and inserting a new one.
//!
//! ```
//! use podium_skiplist::IndexedSkipList;
//!
//! let mut list = IndexedSkipList::new();
//! let b = list.insert(20);
//! let a = list.insert(10);
//!
//! assert_eq!(list.rank_of(a), Ok(1));
//! assert_eq!(list.rank_of(b), Ok(2));
//! assert_eq!(list.node_at_rank(2), Some(b));
//!
//! assert!(list.remove(a));
//! assert_eq!(list.rank_of(b), Ok(1));
//! ```

mod error;
mod iter;
mod list;
mod node;

pub use error::SkipListError;
pub use iter::Iter;
pub use list::{IndexedSkipList, MAX_LEVEL};
pub use node::NodeRef;
