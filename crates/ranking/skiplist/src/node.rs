//! Arena-resident skip list nodes and the handles that address them.

/// Stable handle to a node owned by an [`IndexedSkipList`](crate::IndexedSkipList).
///
/// A handle stays valid until the node it names is removed. The arena reuses
/// slots, so each handle also carries the allocation stamp of its node; a
/// handle whose stamp no longer matches the slot's occupant is stale and the
/// list treats it as absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeRef {
    pub(crate) slot: usize,
    pub(crate) stamp: u64,
}

/// A node on one level of the list.
///
/// Bottom-level nodes carry the payload; index nodes carry a clone of it,
/// used only for ordering during descent. Headers carry nothing and always
/// sort first.
#[derive(Debug)]
pub(crate) struct Node<T> {
    pub(crate) item: Option<T>,
    pub(crate) stamp: u64,
    pub(crate) next: Option<NodeRef>,
    pub(crate) prev: Option<NodeRef>,
    pub(crate) above: Option<NodeRef>,
    pub(crate) below: Option<NodeRef>,
    /// Bottom-level entries covered from this node up to the next node on
    /// the same level. Bottom headers cover nothing.
    pub(crate) span: usize,
}

impl<T> Node<T> {
    pub(crate) fn entry(item: T, stamp: u64) -> Self {
        Self {
            item: Some(item),
            stamp,
            next: None,
            prev: None,
            above: None,
            below: None,
            span: 1,
        }
    }

    pub(crate) fn header(stamp: u64, span: usize) -> Self {
        Self {
            item: None,
            stamp,
            next: None,
            prev: None,
            above: None,
            below: None,
            span,
        }
    }

    #[inline]
    pub(crate) fn is_header(&self) -> bool {
        self.item.is_none()
    }

    #[inline]
    pub(crate) fn is_index(&self) -> bool {
        self.below.is_some()
    }
}

impl<T: Ord> Node<T> {
    /// Whether this node sorts strictly before `value`.
    #[inline]
    pub(crate) fn precedes(&self, value: &T) -> bool {
        match &self.item {
            None => true,
            Some(item) => item < value,
        }
    }
}
