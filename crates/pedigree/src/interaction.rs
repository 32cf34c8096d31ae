//! Pointer and wheel interaction.
//!
//! [`InteractionController`] turns raw device-space input into node drags,
//! diagram pans and zoom steps. Each pointer-down starts exactly one gesture:
//!
//! - **Node drag** when the pointer lands on a non-legend node. The first node
//!   in insertion order wins.
//! - **Diagram pan** otherwise, if panning is enabled.
//!
//! Pointer-up always ends the gesture, wherever the pointer is.
//!
//! Every entry point returns a [`Response`] telling the host whether to redraw
//! and which [`DiagramEvent`]s happened, so no callback wiring is needed.

use log::{debug, trace};

use pedigree_core::{camera::Camera, geometry::Point, identifier::NodeId};

use crate::{config::InteractionConfig, nodes::NodeStore};

/// Something a host may want to react to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DiagramEvent {
    /// A pointer-down landed on this node.
    NodeClicked(NodeId),
    /// A pointer-down landed on empty space.
    DiagramClicked,
    /// This node was moved by a drag step.
    NodeDragged(NodeId),
    /// The zoom changed; carries the new scale.
    Scaled(f32),
}

/// Outcome of one interaction step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Response {
    redraw: bool,
    events: Vec<DiagramEvent>,
}

impl Response {
    /// A response that changes nothing.
    pub fn none() -> Self {
        Self::default()
    }

    /// A response that only requests a redraw.
    pub fn redraw() -> Self {
        Self {
            redraw: true,
            events: Vec::new(),
        }
    }

    fn with_event(mut self, event: DiagramEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Returns true if the host should redraw.
    pub fn needs_redraw(&self) -> bool {
        self.redraw
    }

    pub fn events(&self) -> &[DiagramEvent] {
        &self.events
    }

    pub fn into_events(self) -> Vec<DiagramEvent> {
        self.events
    }
}

/// A node being dragged and where on it the pointer grabbed it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    node: NodeId,
    grab_offset: Point,
}

impl DragState {
    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Pointer position minus node position at pointer-down, in diagram space.
    pub fn grab_offset(&self) -> Point {
        self.grab_offset
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct PanState {
    first_cursor: Point,
}

/// Rounds `value` to the nearest multiple of `unit`, halves rounding up.
pub fn snap_to_grid(value: f32, unit: f32) -> f32 {
    (value / unit + 0.5).floor() * unit
}

/// Gesture state machine for node dragging, panning and zooming.
#[derive(Debug, Clone, Default)]
pub struct InteractionController {
    config: InteractionConfig,
    drag: Option<DragState>,
    pan: Option<PanState>,
    /// Camera offset committed by the last finished pan.
    pan_baseline: Point,
}

impl InteractionController {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// The active node drag, if any.
    pub fn drag(&self) -> Option<&DragState> {
        self.drag.as_ref()
    }

    /// Returns true while an empty-space gesture is in progress.
    pub fn is_panning(&self) -> bool {
        self.pan.is_some()
    }

    /// Enables or disables panning. Takes effect on the next gesture.
    pub fn set_pan_enabled(&mut self, pan_enabled: bool) {
        self.config = self.config.clone().with_pan_enabled(pan_enabled);
    }

    /// Starts a gesture at the device-space pointer position.
    pub fn pointer_down(&mut self, pointer: Point, nodes: &NodeStore, camera: &Camera) -> Response {
        self.drag = None;
        self.pan = None;

        let target = camera.to_diagram(pointer);
        let hit = nodes
            .hit_test(target)
            .and_then(|id| nodes.get(id).map(|node| (id, node.position())));

        match hit {
            Some((id, position)) => {
                let grab_offset = target.sub_point(position);
                self.drag = Some(DragState { node: id, grab_offset });
                debug!(node_id = id.raw(), grab_offset:?; "Node drag started");
                Response::redraw().with_event(DiagramEvent::NodeClicked(id))
            }
            None => {
                if self.config.pan_enabled() {
                    self.pan = Some(PanState {
                        first_cursor: pointer,
                    });
                    trace!(pointer:?; "Pan started");
                }
                Response::redraw().with_event(DiagramEvent::DiagramClicked)
            }
        }
    }

    /// Continues the current gesture.
    ///
    /// A drag moves the node to the pointer minus the grab offset, snapped to
    /// the grid, and levels its twin to the same height. A pan moves the camera
    /// offset by the pointer travel since pointer-down, converted to diagram
    /// units. Without a gesture nothing happens.
    pub fn pointer_move(
        &mut self,
        pointer: Point,
        nodes: &mut NodeStore,
        camera: &mut Camera,
    ) -> Response {
        if let Some(drag) = self.drag {
            return self.drag_node(drag, pointer, nodes, camera);
        }

        let Some(pan) = self.pan else {
            return Response::none();
        };

        let delta = camera.device_delta_to_diagram(pointer.sub_point(pan.first_cursor));
        camera.set_offset(self.pan_baseline.add_point(delta));
        trace!(offset:? = camera.offset(); "Diagram panned");
        Response::redraw()
    }

    /// Ends the current gesture, committing the pan offset as the new baseline.
    pub fn pointer_up(&mut self, camera: &Camera) -> Response {
        if self.pan.take().is_some() {
            self.pan_baseline = camera.offset();
            debug!(offset:? = self.pan_baseline; "Pan committed");
        }
        if let Some(drag) = self.drag.take() {
            debug!(node_id = drag.node.raw(); "Node drag finished");
        }
        Response::none()
    }

    /// Zooms around the device-space cursor by `1 + delta * zoom_sensitivity`.
    pub fn wheel(&mut self, cursor: Point, delta: f32, camera: &mut Camera) -> Response {
        // large zoom-out steps would flip the sign; let the scale clamp stop them
        let factor = (1.0 + delta * self.config.zoom_sensitivity()).max(f32::EPSILON);
        let applied = camera.zoom_at(cursor, factor);
        if applied == 1.0 {
            trace!(delta; "Wheel step did not change the scale");
            return Response::none();
        }

        debug!(factor = applied, scale = camera.scale(); "Zoomed");
        Response::redraw().with_event(DiagramEvent::Scaled(camera.scale()))
    }

    /// Forgets any gesture in progress and resets the pan baseline to `offset`.
    pub fn reset(&mut self, offset: Point) {
        self.drag = None;
        self.pan = None;
        self.pan_baseline = offset;
    }

    fn drag_node(
        &mut self,
        drag: DragState,
        pointer: Point,
        nodes: &mut NodeStore,
        camera: &Camera,
    ) -> Response {
        let unit = self.config.grid_unit();
        let raw = camera.to_diagram(pointer).sub_point(drag.grab_offset);
        let snapped = Point::new(snap_to_grid(raw.x(), unit), snap_to_grid(raw.y(), unit));

        let Some(node) = nodes.get_mut(drag.node) else {
            debug!(node_id = drag.node.raw(); "Dragged node no longer exists, ending drag");
            self.drag = None;
            return Response::none();
        };
        node.set_position(snapped);
        let twin = node.twin();

        if let Some(twin_node) = twin.and_then(|twin_id| nodes.get_mut(twin_id)) {
            twin_node.set_y(snapped.y());
        }

        trace!(node_id = drag.node.raw(), position:? = snapped; "Node dragged");
        Response::redraw().with_event(DiagramEvent::NodeDragged(drag.node))
    }
}
