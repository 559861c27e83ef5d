use std::iter::FusedIterator;

use slab::Slab;

use crate::node::{Node, NodeRef};

/// Bottom-level walk in rank order, yielding each entry with its handle.
pub struct Iter<'a, T> {
    nodes: &'a Slab<Node<T>>,
    cursor: Option<NodeRef>,
}

impl<'a, T> Iter<'a, T> {
    pub(crate) fn new(nodes: &'a Slab<Node<T>>, start: Option<NodeRef>) -> Self {
        Self {
            nodes,
            cursor: start,
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeRef, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.cursor?;
        let node = self.nodes.get(current.slot)?;
        self.cursor = node.next;
        node.item.as_ref().map(|item| (current, item))
    }
}

impl<T> FusedIterator for Iter<'_, T> {}
