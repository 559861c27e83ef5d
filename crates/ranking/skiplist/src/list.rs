//! The indexed skip list.
//!
//! ```text
//! level 2:  H2 ───────────────────────► 30
//! level 1:  H1 ──────────► 10 ────────► 30 ──────────► 50
//! level 0:  H0 ──► 05 ──► 10 ──► 20 ──► 30 ──► 40 ──► 50
//! ```
//!
//! Every level is a doubly linked list that starts with a header. Each node
//! on level L>0 sits `above` its twin on level L-1. A node's `span` counts
//! the bottom-level entries from that node up to (not including) the next
//! node on its level, so summing spans along a descent gives ranks in
//! O(log n).

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use slab::Slab;

use crate::error::SkipListError;
use crate::iter::Iter;
use crate::node::{Node, NodeRef};

/// Upper bound on index levels a single tower may reach.
pub const MAX_LEVEL: usize = 64;

/// Probability that a tower grows by one more level.
const PROMOTION_PROBABILITY: f64 = 0.5;

/// Skip list ordered by `T::cmp`, with rank-by-node and node-by-rank lookups.
///
/// Nodes live in a slab arena; all relations are [`NodeRef`] handles, so the
/// list is the sole owner of every node and towers can be relinked freely.
pub struct IndexedSkipList<T, R = StdRng> {
    nodes: Slab<Node<T>>,
    /// Bottom-level header.
    head: NodeRef,
    /// Header of the topmost level.
    top: NodeRef,
    /// Number of index levels above the bottom level.
    levels: usize,
    len: usize,
    next_stamp: u64,
    rng: R,
}

impl<T: Ord + Clone> IndexedSkipList<T> {
    /// Creates an empty list with an OS-seeded RNG.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }
}

impl<T: Ord + Clone> Default for IndexedSkipList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord + Clone, R: Rng> IndexedSkipList<T, R> {
    /// Creates an empty list drawing tower heights from `rng`.
    pub fn with_rng(rng: R) -> Self {
        let mut nodes = Slab::new();
        let head = NodeRef {
            slot: nodes.insert(Node::header(0, 0)),
            stamp: 0,
        };
        let top = NodeRef {
            slot: nodes.insert(Node::header(1, 0)),
            stamp: 1,
        };
        let mut list = Self {
            nodes,
            head,
            top,
            levels: 1,
            len: 0,
            next_stamp: 2,
            rng,
        };
        list.link_below(top, head);
        list
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of index levels above the bottom level.
    #[inline]
    pub fn levels(&self) -> usize {
        self.levels
    }

    /// Inserts `value` and returns the handle of its bottom-level node.
    pub fn insert(&mut self, value: T) -> NodeRef {
        let tower = self.random_level();
        self.grow_to(tower);

        let mut current = self.top;
        let mut level = self.levels;
        let mut upper: Option<NodeRef> = None;
        // (left neighbour, new node) per level, top-down
        let mut touched: Vec<NodeRef> = Vec::with_capacity(2 * (tower + 1));

        loop {
            current = self.advance(current, &value);
            let Some(below) = self.node(current).below else {
                break;
            };
            if level <= tower {
                let created = self.place_after(current, upper, value.clone());
                touched.push(current);
                touched.push(created);
                upper = Some(created);
            }
            current = below;
            level -= 1;
        }

        let bottom = self.place_after(current, upper, value);
        touched.push(current);
        touched.push(bottom);

        let mut origin = bottom;
        while let Some(node) = touched.pop() {
            self.node_mut(node).span = self.recount(node);
            origin = node;
        }
        self.propagate_from(origin, Adjust::Increment);

        self.len += 1;
        bottom
    }

    /// Removes the tower containing `node`.
    ///
    /// Returns `false` if the handle is stale or names a header.
    pub fn remove(&mut self, node: NodeRef) -> bool {
        match self.resolve(node) {
            Some(n) if !n.is_header() => {}
            _ => return false,
        }

        let mut current = node;
        while let Some(above) = self.node(current).above {
            current = above;
        }

        let mut left = None;
        let mut cursor = Some(current);
        while let Some(replica) = cursor {
            let Node {
                prev, next, below, ..
            } = self.nodes.remove(replica.slot);

            if let Some(prev) = prev {
                self.node_mut(prev).next = next;
            }
            if let Some(next) = next {
                self.node_mut(next).prev = prev;
            }
            if let Some(below) = below {
                self.node_mut(below).above = None;
            }
            if let Some(prev) = prev {
                self.node_mut(prev).span = self.recount(prev);
            }

            left = prev;
            cursor = below;
        }

        if let Some(left) = left {
            self.propagate_from(left, Adjust::Decrement);
        }

        self.len -= 1;
        true
    }

    /// 1-based position of the bottom-level entry `node`.
    pub fn rank_of(&self, node: NodeRef) -> Result<usize, SkipListError> {
        let resolved = self
            .resolve(node)
            .filter(|n| !n.is_header())
            .ok_or(SkipListError::DanglingNode(node))?;
        if resolved.is_index() {
            return Err(SkipListError::IndexNode(node));
        }

        let mut rank = 1;
        let mut cursor = node;
        loop {
            let current = self.node(cursor);
            if let Some(above) = current.above {
                cursor = above;
                continue;
            }
            match current.prev {
                Some(prev) => {
                    rank += self.node(prev).span;
                    cursor = prev;
                }
                None => break,
            }
        }
        Ok(rank)
    }

    /// Bottom-level node at 1-based `rank`, if any.
    pub fn node_at_rank(&self, rank: usize) -> Option<NodeRef> {
        if rank < 1 || rank > self.len {
            return None;
        }

        let mut cursor = self.top;
        let mut remaining = rank;
        loop {
            let current = self.node(cursor);
            if current.span < remaining {
                remaining -= current.span;
                cursor = current.next?;
                continue;
            }
            if remaining == 1 && current.below.is_none() {
                return Some(cursor);
            }
            cursor = current.below?;
        }
    }

    /// Drops every entry. Outstanding handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.head = self.alloc(Node::header(0, 0));
        self.top = self.alloc(Node::header(0, 0));
        self.link_below(self.top, self.head);
        self.levels = 1;
        self.len = 0;
    }

    /// Last node on `from`'s level that sorts before `value`.
    fn advance(&self, mut from: NodeRef, value: &T) -> NodeRef {
        while let Some(next) = self.node(from).next {
            if !self.node(next).precedes(value) {
                break;
            }
            from = next;
        }
        from
    }

    /// Allocates an entry for `value`, links it after `anchor` and under
    /// `upper` when the tower already has a node above.
    fn place_after(&mut self, anchor: NodeRef, upper: Option<NodeRef>, value: T) -> NodeRef {
        let created = self.alloc(Node::entry(value, 0));
        self.link_after(anchor, created);
        if let Some(upper) = upper {
            self.link_below(upper, created);
        }
        created
    }

    /// Draws a tower height: one more level per successful fair coin flip.
    fn random_level(&mut self) -> usize {
        let mut level = 0;
        while level < MAX_LEVEL && self.rng.random_bool(PROMOTION_PROBABILITY) {
            level += 1;
        }
        level
    }

    /// Stacks new headers on top until the list has `level` index levels.
    fn grow_to(&mut self, level: usize) {
        while level > self.levels {
            let mut total = 0;
            let mut cursor = Some(self.top);
            while let Some(node) = cursor {
                let node = self.node(node);
                total += node.span;
                cursor = node.next;
            }

            let header = self.alloc(Node::header(0, total));
            self.node_mut(header).below = Some(self.top);
            self.node_mut(self.top).above = Some(header);
            self.top = header;
            self.levels += 1;
        }
    }

    /// Span of `node` from the level beneath it: the spans of its twin and of
    /// every following node up to the next one that has its own twin above.
    fn recount(&self, node: NodeRef) -> usize {
        let current = self.node(node);
        let Some(mut cursor) = current.below else {
            return current.span;
        };

        let mut total = 0;
        loop {
            let lower = self.node(cursor);
            total += lower.span;
            match lower.next {
                Some(next) if self.node(next).above.is_none() => cursor = next,
                _ => break,
            }
        }
        total
    }

    /// Walks from `origin` to the top header, adjusting the span of every
    /// ancestor entered through an `above` link.
    fn propagate_from(&mut self, origin: NodeRef, adjust: Adjust) {
        let mut cursor = Some(origin);
        while let Some(node) = cursor {
            let current = self.node(node);
            cursor = match (current.above, current.prev) {
                (Some(above), _) => {
                    let span = &mut self.node_mut(above).span;
                    *span = match adjust {
                        Adjust::Increment => *span + 1,
                        Adjust::Decrement => span.saturating_sub(1),
                    };
                    Some(above)
                }
                (None, prev) => prev,
            };
        }
    }
}

impl<T, R> IndexedSkipList<T, R> {
    /// The payload of a live entry node.
    pub fn get(&self, node: NodeRef) -> Option<&T> {
        self.resolve(node).and_then(|n| n.item.as_ref())
    }

    /// Whether `node` names a live, non-header node.
    pub fn contains_node(&self, node: NodeRef) -> bool {
        self.resolve(node).is_some_and(|n| !n.is_header())
    }

    /// Whether `node` is an index replica rather than a bottom-level entry.
    pub fn is_index(&self, node: NodeRef) -> bool {
        self.resolve(node).is_some_and(Node::is_index)
    }

    /// First bottom-level entry.
    pub fn first(&self) -> Option<NodeRef> {
        self.node(self.head).next
    }

    /// Following node on the same level.
    pub fn next(&self, node: NodeRef) -> Option<NodeRef> {
        self.resolve(node)?.next
    }

    /// Preceding node on the same level; never a header.
    pub fn prev(&self, node: NodeRef) -> Option<NodeRef> {
        self.resolve(node)?
            .prev
            .filter(|prev| !self.node(*prev).is_header())
    }

    /// Entries in rank order.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(&self.nodes, self.first())
    }

    /// Entries in rank order, starting at `node` inclusive.
    pub fn iter_from(&self, node: NodeRef) -> Iter<'_, T> {
        let start = self.resolve(node).filter(|n| !n.is_header()).map(|_| node);
        Iter::new(&self.nodes, start)
    }

    #[inline]
    fn resolve(&self, node: NodeRef) -> Option<&Node<T>> {
        self.nodes.get(node.slot).filter(|n| n.stamp == node.stamp)
    }

    /// Internal links always name live nodes.
    #[inline]
    fn node(&self, node: NodeRef) -> &Node<T> {
        &self.nodes[node.slot]
    }

    #[inline]
    fn node_mut(&mut self, node: NodeRef) -> &mut Node<T> {
        &mut self.nodes[node.slot]
    }

    fn alloc(&mut self, mut node: Node<T>) -> NodeRef {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        node.stamp = stamp;
        NodeRef {
            slot: self.nodes.insert(node),
            stamp,
        }
    }

    fn link_after(&mut self, anchor: NodeRef, node: NodeRef) {
        let next = self.node(anchor).next;
        {
            let inserted = self.node_mut(node);
            inserted.next = next;
            inserted.prev = Some(anchor);
        }
        if let Some(next) = next {
            self.node_mut(next).prev = Some(node);
        }
        self.node_mut(anchor).next = Some(node);
    }

    fn link_below(&mut self, upper: NodeRef, node: NodeRef) {
        let below = self.node(upper).below;
        {
            let inserted = self.node_mut(node);
            inserted.above = Some(upper);
            inserted.below = below;
        }
        if let Some(below) = below {
            self.node_mut(below).above = Some(node);
        }
        self.node_mut(upper).below = Some(node);
    }
}

impl<T: fmt::Debug, R> fmt::Debug for IndexedSkipList<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IndexedSkipList")
            .field("len", &self.len)
            .field("levels", &self.levels)
            .field("entries", &DebugEntries(self))
            .finish()
    }
}

struct DebugEntries<'a, T, R>(&'a IndexedSkipList<T, R>);

impl<T: fmt::Debug, R> fmt::Debug for DebugEntries<'_, T, R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.0.iter().map(|(_, item)| item))
            .finish()
    }
}

#[derive(Clone, Copy)]
enum Adjust {
    Increment,
    Decrement,
}
