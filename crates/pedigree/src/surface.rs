//! Drawing abstraction for routed diagrams.
//!
//! Routing produces anchor points; a [`Surface`] strokes them. Points handed
//! to a surface already include the camera's pan offset. Applying the zoom is
//! the surface's job.

use pedigree_core::{geometry::Point, node::Node};

use crate::{
    connection::{ConnectionKind, TwinKind},
    router::{Route, TwinRoute},
};

/// A target that routed connections and node glyphs are drawn onto.
///
/// See [`crate::export::svg::SvgSurface`] for the built-in SVG implementation.
pub trait Surface {
    /// Strokes a routed two-party connection.
    ///
    /// The kind selects the line style; the geometry of all straight kinds is
    /// identical.
    fn draw_connection(&mut self, kind: ConnectionKind, route: &Route);

    /// Strokes a routed twin connection.
    fn draw_twins(&mut self, kind: TwinKind, route: &TwinRoute);

    /// Draws a node glyph with its top-left corner at `origin`.
    ///
    /// `origin` already includes the pan offset. Surfaces that only draw lines
    /// can rely on the default, which draws nothing.
    fn draw_node(&mut self, node: &Node, origin: Point) {
        let _ = (node, origin);
    }
}
