//! Node arena.
//!
//! [`NodeStore`] owns every individual of a diagram, keyed by [`NodeId`] and
//! kept in insertion order. Insertion order is also hit-testing order, so the
//! first node appended wins when glyphs overlap.

use indexmap::IndexMap;
use log::{debug, warn};

use pedigree_core::{
    geometry::{Bounds, Point},
    identifier::{IdGenerator, NodeId},
    node::{Node, ShapeKind},
};

/// Insertion-ordered table of nodes with handle allocation.
#[derive(Debug, Default, Clone)]
pub struct NodeStore {
    nodes: IndexMap<NodeId, Node>,
    ids: IdGenerator,
}

impl NodeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a default-sized node with a fresh handle.
    pub fn create(&mut self, kind: ShapeKind, position: Point) -> NodeId {
        let id = self.ids.next_id();
        self.nodes.insert(id, Node::new(id, kind, position));
        debug!(node_id = id.raw(), kind = kind.name(); "Node created");
        id
    }

    /// Allocates a handle for a node the caller will build itself.
    pub fn allocate_id(&mut self) -> NodeId {
        self.ids.next_id()
    }

    /// Inserts a caller-built node.
    ///
    /// A node already stored under the same handle is replaced in place.
    pub fn append(&mut self, node: Node) -> NodeId {
        let id = node.id();
        self.ids.reserve(id);
        if self.nodes.insert(id, node).is_some() {
            warn!(node_id = id.raw(); "Node appended twice, replacing previous entry");
        } else {
            debug!(node_id = id.raw(); "Node appended");
        }
        id
    }

    /// Removes a node, keeping the order of the remaining ones.
    ///
    /// Partner and twin links pointing at the removed node are left alone;
    /// lookups through them simply stop resolving.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.nodes.shift_remove(&id);
        if removed.is_some() {
            debug!(node_id = id.raw(); "Node removed");
        }
        removed
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates nodes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Resolves a node's marriage partner.
    ///
    /// Returns `None` when the node is unmarried or its partner no longer exists.
    pub fn partner_of(&self, node: &Node) -> Option<&Node> {
        let partner_id = node.marriage_partner()?;
        let Some(partner) = self.get(partner_id) else {
            debug!(
                node_id = node.id().raw(),
                partner_id = partner_id.raw();
                "Marriage partner no longer exists, treating node as unmarried"
            );
            return None;
        };
        if partner.marriage_partner() != Some(node.id()) {
            warn!(
                node_id = node.id().raw(),
                partner_id = partner_id.raw();
                "Marriage partner link is not mutual"
            );
        }
        Some(partner)
    }

    /// Resolves a node's twin, `None` if it has none or the twin no longer exists.
    pub fn twin_of(&self, node: &Node) -> Option<&Node> {
        node.twin().and_then(|twin_id| self.get(twin_id))
    }

    /// Sets `a` and `b` as each other's marriage partner.
    ///
    /// Returns false, changing nothing, if either node is missing.
    pub fn link_partners(&mut self, a: NodeId, b: NodeId) -> bool {
        if !(self.contains(a) && self.contains(b)) {
            return false;
        }
        if let Some(node) = self.get_mut(a) {
            node.set_marriage_partner(Some(b));
        }
        if let Some(node) = self.get_mut(b) {
            node.set_marriage_partner(Some(a));
        }
        true
    }

    /// Sets `a` and `b` as each other's twin.
    ///
    /// Returns false, changing nothing, if either node is missing.
    pub fn link_twins(&mut self, a: NodeId, b: NodeId) -> bool {
        if !(self.contains(a) && self.contains(b)) {
            return false;
        }
        if let Some(node) = self.get_mut(a) {
            node.set_twin(Some(b));
        }
        if let Some(node) = self.get_mut(b) {
            node.set_twin(Some(a));
        }
        true
    }

    /// Returns the first non-legend node whose glyph contains the diagram-space point.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.iter()
            .filter(|node| !node.is_in_legend())
            .find(|node| node.contains(point))
            .map(Node::id)
    }

    /// Multiplies every node's position, size and border by `factor`.
    pub fn scale_nodes(&mut self, factor: f32) {
        for node in self.nodes.values_mut() {
            node.set_position(node.position().scale(factor));
            node.set_size(node.size() * factor);
            node.set_border(node.border() * factor);
        }
        debug!(factor, count = self.nodes.len(); "Nodes rescaled");
    }

    /// Smallest bounds containing every node, `None` for an empty store.
    pub fn bounds(&self) -> Option<Bounds> {
        self.iter()
            .map(Node::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
    }
}
