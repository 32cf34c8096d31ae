//! The render/manager layer.
//!
//! [`Diagram`] owns the node store, the connection registry, the camera and
//! the interaction controller, and keeps them consistent: deleting a node
//! removes its edges, connecting a partnership links both partners, and every
//! state change marks the diagram dirty until the host calls
//! [`Diagram::take_redraw`].

use std::path::Path;

use log::{debug, info};

use pedigree_core::{
    camera::Camera,
    geometry::Point,
    identifier::NodeId,
    node::{Node, ShapeKind},
};

use crate::{
    config::AppConfig,
    connection::{Connection, ConnectionKind, TwinConnection, TwinKind},
    error::PedigreeError,
    export::svg::SvgSurface,
    interaction::{InteractionController, Response},
    nodes::NodeStore,
    registry::ConnectionRegistry,
    router::Router,
    surface::Surface,
};

/// An interactive pedigree diagram.
///
/// # Examples
///
/// ```
/// use pedigree::{Diagram, config::AppConfig};
/// use pedigree::connection::ConnectionKind;
/// use pedigree::geometry::Point;
/// use pedigree::node::ShapeKind;
///
/// let mut diagram = Diagram::new(AppConfig::default());
/// let father = diagram.create_node(ShapeKind::Male, Point::new(0.0, 0.0));
/// let mother = diagram.create_node(ShapeKind::Female, Point::new(120.0, 0.0));
/// diagram.connect(father, mother, ConnectionKind::Partnership);
///
/// let svg = diagram.render_svg().unwrap();
/// assert!(svg.contains("polyline"));
/// ```
#[derive(Debug, Clone)]
pub struct Diagram {
    config: AppConfig,
    nodes: NodeStore,
    registry: ConnectionRegistry,
    router: Router,
    camera: Camera,
    controller: InteractionController,
    dirty: bool,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

impl Diagram {
    pub fn new(config: AppConfig) -> Self {
        let interaction = config.interaction().clone();
        let camera = Camera::with_scale_limits(interaction.min_scale(), interaction.max_scale());

        Self {
            router: Router::new(config.routing().clone()),
            controller: InteractionController::new(interaction),
            nodes: NodeStore::new(),
            registry: ConnectionRegistry::new(),
            camera,
            config,
            dirty: false,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn nodes(&self) -> &NodeStore {
        &self.nodes
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Mutable access to a node. Marks the diagram dirty.
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.dirty = true;
        self.nodes.get_mut(id)
    }

    pub fn registry(&self) -> &ConnectionRegistry {
        &self.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn controller(&self) -> &InteractionController {
        &self.controller
    }

    /// Creates a default-sized node.
    pub fn create_node(&mut self, kind: ShapeKind, position: Point) -> NodeId {
        self.dirty = true;
        self.nodes.create(kind, position)
    }

    /// Allocates a handle for [`Diagram::append_node`].
    pub fn allocate_id(&mut self) -> NodeId {
        self.nodes.allocate_id()
    }

    /// Inserts a caller-built node.
    pub fn append_node(&mut self, node: Node) -> NodeId {
        self.dirty = true;
        self.nodes.append(node)
    }

    /// Removes a node together with every connection that references it.
    ///
    /// Returns the removed node, `None` if it did not exist. Connections are
    /// cleaned up either way.
    pub fn delete_node(&mut self, id: NodeId) -> Option<Node> {
        let removed = self.nodes.remove(id);
        self.registry.remove_connection(id);
        if removed.is_some() && self.controller.drag().map(|drag| drag.node()) == Some(id) {
            self.controller.reset(self.camera.offset());
        }
        self.dirty = true;
        info!(node_id = id.raw(), existed = removed.is_some(); "Node deleted");
        removed
    }

    /// Registers a connection. A partnership also makes both nodes each
    /// other's marriage partner.
    ///
    /// Earlier partners are not unlinked: if `node_a` was married to another
    /// node, that node keeps pointing at `node_a`, and [`NodeStore::partner_of`]
    /// reports it as not mutual. Clear stale links with [`Diagram::node_mut`]
    /// before re-partnering.
    pub fn connect(&mut self, node_a: NodeId, node_b: NodeId, kind: ConnectionKind) {
        if kind == ConnectionKind::Partnership && !self.nodes.link_partners(node_a, node_b) {
            debug!(
                node_a = node_a.raw(),
                node_b = node_b.raw();
                "Partnership with a missing node, partner links not set"
            );
        }
        self.registry.create_connection(node_a, node_b, kind);
        self.dirty = true;
    }

    /// Registers a twin connection and makes the twins each other's twin.
    pub fn connect_twins(&mut self, parent: NodeId, twin_a: NodeId, twin_b: NodeId, kind: TwinKind) {
        if !self.nodes.link_twins(twin_a, twin_b) {
            debug!(
                twin_a = twin_a.raw(),
                twin_b = twin_b.raw();
                "Twin connection with a missing node, twin links not set"
            );
        }
        self.registry
            .create_twins_connection(parent, twin_a, twin_b, kind);
        self.dirty = true;
    }

    /// Removes every connection touching `id`, keeping the node.
    pub fn remove_connection(&mut self, id: NodeId) {
        self.registry.remove_connection(id);
        self.dirty = true;
    }

    pub fn connections(&self) -> &[Connection] {
        self.registry.connections()
    }

    pub fn twins_connections(&self) -> &[TwinConnection] {
        self.registry.twins_connections()
    }

    /// Connections with `id` at either end, in insertion order.
    pub fn get_connections(&self, id: NodeId) -> impl Iterator<Item = &Connection> {
        self.registry.get_connections(id)
    }

    /// Twin connections with `id` as parent or twin, in insertion order.
    pub fn get_twins_connections(&self, id: NodeId) -> impl Iterator<Item = &TwinConnection> {
        self.registry.get_twins_connections(id)
    }

    pub fn pointer_down(&mut self, pointer: Point) -> Response {
        let response = self.controller.pointer_down(pointer, &self.nodes, &self.camera);
        self.track(response)
    }

    pub fn pointer_move(&mut self, pointer: Point) -> Response {
        let response = self
            .controller
            .pointer_move(pointer, &mut self.nodes, &mut self.camera);
        self.track(response)
    }

    pub fn pointer_up(&mut self) -> Response {
        let response = self.controller.pointer_up(&self.camera);
        self.track(response)
    }

    pub fn wheel(&mut self, cursor: Point, delta: f32) -> Response {
        let response = self.controller.wheel(cursor, delta, &mut self.camera);
        self.track(response)
    }

    /// Enables or disables panning by dragging empty space.
    pub fn set_pan_enabled(&mut self, pan_enabled: bool) {
        self.controller.set_pan_enabled(pan_enabled);
    }

    /// Multiplies every node's position, size and border by `factor`.
    pub fn scale_nodes(&mut self, factor: f32) {
        self.nodes.scale_nodes(factor);
        self.dirty = true;
    }

    /// Sets the pan offset directly, replacing the committed pan baseline.
    pub fn set_offset(&mut self, offset: Point) {
        self.camera.set_offset(offset);
        self.controller.reset(offset);
        self.dirty = true;
    }

    /// Returns whether a redraw was requested since the last call, and clears it.
    pub fn take_redraw(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Draws connections, then nodes, onto `surface`.
    ///
    /// Returns the number of connections drawn.
    pub fn draw(&self, surface: &mut impl Surface) -> usize {
        let drawn = self
            .registry
            .draw_connections(&self.nodes, &self.router, &self.camera, surface);
        for node in self.nodes.iter() {
            surface.draw_node(node, self.camera.apply_offset(node.position()));
        }
        drawn
    }

    /// Renders the diagram into an SVG document string.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::InvalidColor`] if a configured style color does not parse.
    pub fn render_svg(&self) -> Result<String, PedigreeError> {
        Ok(self.svg_document()?.to_string())
    }

    /// Renders the diagram and writes it to an SVG file.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::InvalidColor`] for an invalid style color, or
    /// [`PedigreeError::Io`] if the file cannot be written.
    pub fn write_svg(&self, path: impl AsRef<Path>) -> Result<(), PedigreeError> {
        let doc = self.svg_document()?;
        SvgSurface::write_document(&doc, path)
    }

    fn svg_document(&self) -> Result<svg::Document, PedigreeError> {
        let mut surface = SvgSurface::new(self.config.style())?;
        self.draw(&mut surface);
        Ok(surface.finish(&self.camera, self.nodes.bounds()))
    }

    fn track(&mut self, response: Response) -> Response {
        self.dirty |= response.needs_redraw();
        response
    }
}
