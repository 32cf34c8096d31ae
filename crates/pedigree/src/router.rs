//! Connection routing.
//!
//! The [`Router`] turns a typed edge plus the nodes it references into the
//! ordered anchor points a line-drawing primitive connects. It never draws.
//!
//! Every computation happens in diagram space. The camera offset is added
//! exactly once, to each returned point, after the geometry is complete. The
//! zoom part of the camera is left to the drawing surface.
//!
//! # Routing rules
//!
//! - Partnership, separation and consanguineous edges: a straight line between
//!   the two node centers.
//! - Sibling edges: an elbow from the anchor node (`node_a`) to `node_b`. The
//!   vertical run sits midway between the anchor and its marriage partner if it
//!   has one, otherwise midway between the anchor and `node_b`:
//!
//! ```text
//!   [partner]    x2    [node_a]
//!       ○────────┬────────□
//!                │
//!                └────────○
//!                      [node_b]
//! ```
//!
//! - Twin edges: both twins converge on an apex above them, and a stem connects
//!   the apex to the parent, attaching between the parental couple when the
//!   parent is married.

use log::trace;

use pedigree_core::{camera::Camera, geometry::Point, node::Node};

use crate::{
    config::{RoutingConfig, TwinStem},
    connection::{Connection, ConnectionKind, TwinConnection},
    nodes::NodeStore,
};

/// Anchor points of a routed two-party connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Route {
    /// Two points: the centers of both nodes.
    Straight { from: Point, to: Point },
    /// Three anchors: anchor center, the bend at the anchor's height, target center.
    Elbow {
        anchor: Point,
        bend: Point,
        target: Point,
    },
}

impl Route {
    /// Anchor points in drawing order.
    pub fn points(&self) -> Vec<Point> {
        match *self {
            Self::Straight { from, to } => vec![from, to],
            Self::Elbow {
                anchor,
                bend,
                target,
            } => vec![anchor, bend, target],
        }
    }

    /// Polyline to stroke, with the elbow's corner below the bend made explicit.
    pub fn polyline(&self) -> Vec<Point> {
        match *self {
            Self::Straight { from, to } => vec![from, to],
            Self::Elbow {
                anchor,
                bend,
                target,
            } => vec![anchor, bend, bend.with_y(target.y()), target],
        }
    }

    fn translate(self, offset: Point) -> Self {
        match self {
            Self::Straight { from, to } => Self::Straight {
                from: from.add_point(offset),
                to: to.add_point(offset),
            },
            Self::Elbow {
                anchor,
                bend,
                target,
            } => Self::Elbow {
                anchor: anchor.add_point(offset),
                bend: bend.add_point(offset),
                target: target.add_point(offset),
            },
        }
    }
}

/// Anchor points of a routed twin connection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TwinRoute {
    apex: Point,
    twin_a: Point,
    twin_b: Point,
    stem: [Point; 3],
}

impl TwinRoute {
    /// Convergence point of the two twin lines.
    pub fn apex(&self) -> Point {
        self.apex
    }

    /// Center of the first twin.
    pub fn twin_a(&self) -> Point {
        self.twin_a
    }

    /// Center of the second twin.
    pub fn twin_b(&self) -> Point {
        self.twin_b
    }

    /// The three points leading from the apex to the parent; the last one is
    /// the parent's center.
    pub fn stem(&self) -> [Point; 3] {
        self.stem
    }

    /// All six anchor points: apex, both twins, then the stem.
    pub fn points(&self) -> [Point; 6] {
        [
            self.apex,
            self.twin_a,
            self.twin_b,
            self.stem[0],
            self.stem[1],
            self.stem[2],
        ]
    }

    /// Polylines to stroke: the twin fork, then the stem to the parent.
    pub fn polylines(&self) -> [Vec<Point>; 2] {
        [
            vec![self.twin_a, self.apex, self.twin_b],
            vec![self.apex, self.stem[0], self.stem[1], self.stem[2]],
        ]
    }

    /// Crossbar joining the midpoints of both fork arms, drawn for identical twins.
    pub fn crossbar(&self) -> (Point, Point) {
        (
            self.apex.midpoint(self.twin_a),
            self.apex.midpoint(self.twin_b),
        )
    }

    fn translate(self, offset: Point) -> Self {
        Self {
            apex: self.apex.add_point(offset),
            twin_a: self.twin_a.add_point(offset),
            twin_b: self.twin_b.add_point(offset),
            stem: self.stem.map(|point| point.add_point(offset)),
        }
    }
}

/// Pure geometry for connection routes.
#[derive(Debug, Clone, Default)]
pub struct Router {
    config: RoutingConfig,
}

impl Router {
    pub fn new(config: RoutingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Routes a two-party connection.
    ///
    /// Returns `None` if either endpoint no longer exists.
    pub fn route(&self, connection: &Connection, nodes: &NodeStore, camera: &Camera) -> Option<Route> {
        let node_a = nodes.get(connection.node_a())?;
        let node_b = nodes.get(connection.node_b())?;

        let route = match connection.kind() {
            ConnectionKind::Partnership
            | ConnectionKind::Separation
            | ConnectionKind::Consanguineous => {
                let [from, to] = straight_points(node_a, node_b);
                Route::Straight { from, to }
            }
            ConnectionKind::Sibling => {
                let partner = nodes.partner_of(node_a);
                let [anchor, bend, target] = sibling_points(node_a, partner, node_b);
                Route::Elbow {
                    anchor,
                    bend,
                    target,
                }
            }
        };

        trace!(
            kind = connection.kind().name(),
            node_a = node_a.id().raw(),
            node_b = node_b.id().raw(),
            route:?;
            "Connection routed"
        );

        Some(route.translate(camera.offset()))
    }

    /// Routes a twin connection.
    ///
    /// Returns `None` if the parent or either twin no longer exists.
    pub fn route_twins(
        &self,
        twins: &TwinConnection,
        nodes: &NodeStore,
        camera: &Camera,
    ) -> Option<TwinRoute> {
        let parent = nodes.get(twins.parent())?;
        let twin_a = nodes.get(twins.twin_a())?;
        let twin_b = nodes.get(twins.twin_b())?;

        let twin_a_center = twin_a.center();
        let twin_b_center = twin_b.center();

        let apex_x = (twin_a_center.x() + twin_b_center.x()) / 2.0;
        let apex_y = self.stem_height(twin_a_center.y(), twin_b_center.y());
        let apex = Point::new(apex_x, apex_y);

        let parent_center = parent.center();
        let stem = match nodes.partner_of(parent) {
            None => {
                let knee_y = (apex_y + parent_center.y()) / 2.0;
                [
                    Point::new(apex_x, knee_y),
                    Point::new(parent_center.x(), knee_y),
                    parent_center,
                ]
            }
            Some(partner) => {
                let couple_x = couple_midpoint_x(parent, partner);
                [
                    Point::new(couple_x, apex_y),
                    Point::new(couple_x, parent_center.y()),
                    parent_center,
                ]
            }
        };

        let route = TwinRoute {
            apex,
            twin_a: twin_a_center,
            twin_b: twin_b_center,
            stem,
        };

        trace!(
            kind = twins.kind().name(),
            parent = parent.id().raw(),
            route:?;
            "Twin connection routed"
        );

        Some(route.translate(camera.offset()))
    }

    /// Height of the twin apex from both twins' center heights.
    fn stem_height(&self, y_a: f32, y_b: f32) -> f32 {
        let rise = self.config.twin_rise();
        let candidate_a = y_a - rise;
        let candidate_b = y_b - rise;

        match self.config.twin_stem() {
            TwinStem::Min => candidate_a.min(candidate_b),
            TwinStem::LegacyBitwise => (to_int32(candidate_a) | to_int32(candidate_b)) as f32,
        }
    }
}

/// Centers of both nodes, in diagram space.
pub fn straight_points(node_a: &Node, node_b: &Node) -> [Point; 2] {
    [node_a.center(), node_b.center()]
}

/// Elbow anchors for a sibling edge, in diagram space.
///
/// `partner` is the anchor's resolved marriage partner. `node_b`'s own
/// partner is deliberately not consulted.
pub fn sibling_points(anchor: &Node, partner: Option<&Node>, node_b: &Node) -> [Point; 3] {
    let start = anchor.center();
    let far = partner.unwrap_or(node_b);
    let bend = Point::new(couple_midpoint_x(anchor, far), start.y());
    [start, bend, node_b.center()]
}

/// X coordinate midway in the gap between `anchor`'s left edge and `far`'s right edge.
pub fn couple_midpoint_x(anchor: &Node, far: &Node) -> f32 {
    let shift = (anchor.x() - far.far_x()) / 2.0;
    far.far_x() + shift
}

/// ECMAScript `ToInt32`: truncate toward zero, then wrap modulo 2^32.
fn to_int32(value: f32) -> i32 {
    if !value.is_finite() {
        return 0;
    }
    let truncated = f64::from(value).trunc();
    truncated.rem_euclid(4_294_967_296.0) as u32 as i32
}
