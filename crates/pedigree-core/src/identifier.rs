//! Node identifiers.
//!
//! Nodes are stored in an arena and referenced by [`NodeId`] handles. Partner
//! and twin links hold handles rather than references, so a deleted node is
//! observed as a failed lookup instead of a dangling pointer.

use std::fmt;

/// Stable handle to a node for the node's whole lifetime.
///
/// # Examples
///
/// ```
/// use pedigree_core::identifier::{IdGenerator, NodeId};
///
/// let mut ids = IdGenerator::default();
/// let first = ids.next_id();
/// let second = ids.next_id();
/// assert_ne!(first, second);
/// assert_eq!(first, NodeId::new(0));
/// assert_eq!(second.to_string(), "node-1");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u32);

impl NodeId {
    /// Creates a handle from its raw value.
    pub fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw handle value.
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Monotonic allocator for [`NodeId`] handles.
///
/// Handles are never reused, even after the node they named is deleted.
#[derive(Debug, Default, Clone)]
pub struct IdGenerator {
    next: u32,
}

impl IdGenerator {
    /// Returns a fresh handle.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next);
        self.next += 1;
        id
    }

    /// Makes sure future handles never collide with `id`.
    pub fn reserve(&mut self, id: NodeId) {
        if id.0 >= self.next {
            self.next = id.0 + 1;
        }
    }
}
