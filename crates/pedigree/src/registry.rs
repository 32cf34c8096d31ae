//! Connection registry.
//!
//! [`ConnectionRegistry`] owns every relationship edge of a diagram in two
//! insertion-ordered lists, one for two-party connections and one for twin
//! connections. It does not validate edges: duplicates and self-loops are
//! stored as given, and edges pointing at deleted nodes stay until removed.

use log::{debug, info};

use pedigree_core::{camera::Camera, identifier::NodeId};

use crate::{
    connection::{Connection, ConnectionKind, TwinConnection, TwinKind},
    nodes::NodeStore,
    router::Router,
    surface::Surface,
};

#[derive(Debug, Default, Clone)]
pub struct ConnectionRegistry {
    connections: Vec<Connection>,
    twins: Vec<TwinConnection>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a two-party connection.
    pub fn create_connection(&mut self, node_a: NodeId, node_b: NodeId, kind: ConnectionKind) {
        debug!(
            node_a = node_a.raw(),
            node_b = node_b.raw(),
            kind = kind.name();
            "Connection created"
        );
        self.connections.push(Connection::new(node_a, node_b, kind));
    }

    /// Appends a twin connection.
    pub fn create_twins_connection(
        &mut self,
        parent: NodeId,
        twin_a: NodeId,
        twin_b: NodeId,
        kind: TwinKind,
    ) {
        debug!(
            parent = parent.raw(),
            twin_a = twin_a.raw(),
            twin_b = twin_b.raw(),
            kind = kind.name();
            "Twin connection created"
        );
        self.twins
            .push(TwinConnection::new(parent, twin_a, twin_b, kind));
    }

    /// Removes every connection and twin connection that references `id`.
    ///
    /// Calling it again for the same node is a no-op.
    pub fn remove_connection(&mut self, id: NodeId) {
        let before = self.connections.len() + self.twins.len();
        self.connections.retain(|connection| !connection.touches(id));
        self.twins.retain(|twins| !twins.touches(id));
        let removed = before - (self.connections.len() + self.twins.len());

        if removed > 0 {
            debug!(node_id = id.raw(), removed = removed; "Connections removed");
        }
    }

    /// Two-party connections with `id` at either end, in insertion order.
    pub fn get_connections(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.connections
            .iter()
            .filter(move |connection| connection.touches(id))
    }

    /// Twin connections with `id` as parent or either twin, in insertion order.
    pub fn get_twins_connections(&self, id: NodeId) -> impl Iterator<Item = &TwinConnection> {
        self.twins.iter().filter(move |twins| twins.touches(id))
    }

    /// All two-party connections in insertion order.
    pub fn connections(&self) -> &[Connection] {
        &self.connections
    }

    /// All twin connections in insertion order.
    pub fn twins_connections(&self) -> &[TwinConnection] {
        &self.twins
    }

    pub fn len(&self) -> usize {
        self.connections.len() + self.twins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty() && self.twins.is_empty()
    }

    /// Routes every edge and hands it to `surface`, two-party connections
    /// first, each list in insertion order.
    ///
    /// Edges referencing a node that no longer exists are skipped. Returns the
    /// number of edges drawn.
    pub fn draw_connections(
        &self,
        nodes: &NodeStore,
        router: &Router,
        camera: &Camera,
        surface: &mut impl Surface,
    ) -> usize {
        let mut drawn = 0;

        for connection in &self.connections {
            match router.route(connection, nodes, camera) {
                Some(route) => {
                    surface.draw_connection(connection.kind(), &route);
                    drawn += 1;
                }
                None => debug!(
                    node_a = connection.node_a().raw(),
                    node_b = connection.node_b().raw();
                    "Skipping connection with a missing node"
                ),
            }
        }

        for twins in &self.twins {
            match router.route_twins(twins, nodes, camera) {
                Some(route) => {
                    surface.draw_twins(twins.kind(), &route);
                    drawn += 1;
                }
                None => debug!(
                    parent = twins.parent().raw();
                    "Skipping twin connection with a missing node"
                ),
            }
        }

        info!(drawn = drawn, total = self.len(); "Connections drawn");
        drawn
    }
}

#[cfg(test)]
mod tests {
    use pedigree_core::{geometry::Point, node::ShapeKind};

    use super::*;
    use crate::router::{Route, TwinRoute};

    #[derive(Default)]
    struct RecordingSurface {
        connections: Vec<(ConnectionKind, Vec<Point>)>,
        twins: Vec<(TwinKind, TwinRoute)>,
    }

    impl Surface for RecordingSurface {
        fn draw_connection(&mut self, kind: ConnectionKind, route: &Route) {
            self.connections.push((kind, route.points()));
        }

        fn draw_twins(&mut self, kind: TwinKind, route: &TwinRoute) {
            self.twins.push((kind, *route));
        }
    }

    fn family() -> (NodeStore, [NodeId; 4]) {
        let mut store = NodeStore::new();
        let father = store.create(ShapeKind::Male, Point::new(0.0, 0.0));
        let mother = store.create(ShapeKind::Female, Point::new(120.0, 0.0));
        let son = store.create(ShapeKind::Male, Point::new(0.0, 300.0));
        let daughter = store.create(ShapeKind::Female, Point::new(150.0, 300.0));
        (store, [father, mother, son, daughter])
    }

    #[test]
    fn test_empty_registry_draws_nothing() {
        let (store, _) = family();
        let registry = ConnectionRegistry::new();
        let mut surface = RecordingSurface::default();

        let drawn =
            registry.draw_connections(&store, &Router::default(), &Camera::default(), &mut surface);
        assert_eq!(drawn, 0);
        assert!(surface.connections.is_empty());
        assert!(surface.twins.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let [a, b, c, d] = family().1;
        let mut registry = ConnectionRegistry::new();
        registry.create_connection(a, b, ConnectionKind::Partnership);
        registry.create_connection(c, d, ConnectionKind::Sibling);
        registry.create_connection(a, b, ConnectionKind::Partnership);

        let kinds: Vec<ConnectionKind> = registry
            .connections()
            .iter()
            .map(Connection::kind)
            .collect();
        assert_eq!(
            kinds,
            vec![
                ConnectionKind::Partnership,
                ConnectionKind::Sibling,
                ConnectionKind::Partnership
            ]
        );
        assert_eq!(registry.len(), 3);
    }

    #[test]
    fn test_remove_connection_clears_both_lists() {
        let [father, mother, son, daughter] = family().1;
        let mut registry = ConnectionRegistry::new();
        registry.create_connection(father, mother, ConnectionKind::Partnership);
        registry.create_connection(son, daughter, ConnectionKind::Sibling);
        registry.create_connection(mother, son, ConnectionKind::Consanguineous);
        registry.create_twins_connection(mother, son, daughter, TwinKind::Identical);

        registry.remove_connection(son);

        assert_eq!(
            registry.connections(),
            &[Connection::new(father, mother, ConnectionKind::Partnership)]
        );
        assert!(registry.twins_connections().is_empty());

        registry.remove_connection(son);
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_remove_adjacent_matches() {
        let [a, b, c, _] = family().1;
        let mut registry = ConnectionRegistry::new();
        registry.create_connection(a, b, ConnectionKind::Partnership);
        registry.create_connection(a, c, ConnectionKind::Sibling);
        registry.create_connection(b, c, ConnectionKind::Sibling);

        registry.remove_connection(a);
        assert_eq!(
            registry.connections(),
            &[Connection::new(b, c, ConnectionKind::Sibling)]
        );
    }

    #[test]
    fn test_get_connections_filters_by_node() {
        let [a, b, c, d] = family().1;
        let mut registry = ConnectionRegistry::new();
        registry.create_connection(a, b, ConnectionKind::Partnership);
        registry.create_connection(c, d, ConnectionKind::Sibling);
        registry.create_connection(b, a, ConnectionKind::Separation);
        registry.create_twins_connection(c, b, d, TwinKind::Identical);

        let for_a: Vec<Connection> = registry.get_connections(a).copied().collect();
        assert_eq!(
            for_a,
            vec![
                Connection::new(a, b, ConnectionKind::Partnership),
                Connection::new(b, a, ConnectionKind::Separation),
            ]
        );
        assert_eq!(registry.get_twins_connections(a).count(), 0);
    }

    #[test]
    fn test_get_connections_without_matches() {
        let [a, b, c, _] = family().1;
        let mut registry = ConnectionRegistry::new();
        assert_eq!(registry.get_connections(a).count(), 0);

        registry.create_connection(b, c, ConnectionKind::Sibling);
        assert_eq!(registry.get_connections(a).count(), 0);
        assert_eq!(registry.get_connections(NodeId::new(99)).count(), 0);
    }

    #[test]
    fn test_get_twins_connections_matches_every_slot() {
        let [parent, twin_a, twin_b, other] = family().1;
        let mut registry = ConnectionRegistry::new();
        registry.create_twins_connection(parent, twin_a, twin_b, TwinKind::Identical);
        registry.create_twins_connection(other, twin_b, parent, TwinKind::NonIdentical);

        let kinds = |id| {
            registry
                .get_twins_connections(id)
                .map(TwinConnection::kind)
                .collect::<Vec<_>>()
        };
        assert_eq!(kinds(parent), vec![TwinKind::Identical, TwinKind::NonIdentical]);
        assert_eq!(kinds(twin_a), vec![TwinKind::Identical]);
        assert_eq!(kinds(twin_b), vec![TwinKind::Identical, TwinKind::NonIdentical]);
        assert_eq!(kinds(other), vec![TwinKind::NonIdentical]);
        assert_eq!(registry.get_connections(parent).count(), 0);
    }

    #[test]
    fn test_draw_connections_in_order_with_kinds() {
        let (store, [father, mother, son, daughter]) = family();
        let mut registry = ConnectionRegistry::new();
        registry.create_twins_connection(father, son, daughter, TwinKind::NonIdentical);
        registry.create_connection(father, mother, ConnectionKind::Separation);
        registry.create_connection(son, daughter, ConnectionKind::Sibling);

        let mut surface = RecordingSurface::default();
        let drawn =
            registry.draw_connections(&store, &Router::default(), &Camera::default(), &mut surface);

        assert_eq!(drawn, 3);
        assert_eq!(surface.connections[0].0, ConnectionKind::Separation);
        assert_eq!(surface.connections[0].1.len(), 2);
        assert_eq!(surface.connections[1].0, ConnectionKind::Sibling);
        assert_eq!(surface.connections[1].1.len(), 3);
        assert_eq!(surface.twins.len(), 1);
        assert_eq!(surface.twins[0].0, TwinKind::NonIdentical);
    }

    #[test]
    fn test_draw_skips_edges_with_missing_nodes() {
        let (mut store, [father, mother, son, daughter]) = family();
        let mut registry = ConnectionRegistry::new();
        registry.create_connection(father, mother, ConnectionKind::Partnership);
        registry.create_twins_connection(mother, son, daughter, TwinKind::Identical);

        store.remove(daughter);

        let mut surface = RecordingSurface::default();
        let drawn =
            registry.draw_connections(&store, &Router::default(), &Camera::default(), &mut surface);
        assert_eq!(drawn, 1);
        assert!(surface.twins.is_empty());
        assert_eq!(registry.len(), 2);
    }
}
