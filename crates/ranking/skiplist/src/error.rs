//! Skip list error types.

use thiserror::Error;

use crate::NodeRef;

/// Contract violations reported by [`IndexedSkipList`](crate::IndexedSkipList).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SkipListError {
    /// Rank lookups are only defined for bottom-level entries.
    #[error("rank is only defined for bottom-level nodes, {0:?} is an index node")]
    IndexNode(NodeRef),
    /// The handle names a header, or a node that has since been removed.
    #[error("node {0:?} is not a live entry")]
    DanglingNode(NodeRef),
}
