//! Pedigree individuals.
//!
//! A [`Node`] is plain positioned data: top-left corner, edge length of its
//! bounding square, border width and the identity links that routing reads.
//! The glyph drawn for an individual is selected by [`ShapeKind`], which keeps
//! geometry independent from how a sex-specific symbol looks.

use std::str::FromStr;

use crate::{
    geometry::{Bounds, Point, Size},
    identifier::NodeId,
};

/// Default edge length of a node's bounding square.
pub const DEFAULT_NODE_SIZE: f32 = 60.0;

/// Default border (stroke) width of a node glyph.
pub const DEFAULT_NODE_BORDER: f32 = 3.0;

/// Glyph variant of an individual.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// Square glyph.
    Male,
    /// Circle glyph inscribed in the bounding square.
    Female,
    /// Diamond glyph through the midpoints of the bounding square's edges.
    #[default]
    Unknown,
}

impl ShapeKind {
    /// Returns true if `point` lies inside the glyph drawn in `bounds`.
    ///
    /// Points on the outline count as inside.
    ///
    /// # Examples
    ///
    /// ```
    /// use pedigree_core::geometry::{Bounds, Point, Size};
    /// use pedigree_core::node::ShapeKind;
    ///
    /// let bounds = Bounds::new_from_top_left(Point::new(0.0, 0.0), Size::square(60.0));
    /// let corner = Point::new(2.0, 2.0);
    ///
    /// assert!(ShapeKind::Male.contains(bounds, corner));
    /// assert!(!ShapeKind::Female.contains(bounds, corner));
    /// assert!(!ShapeKind::Unknown.contains(bounds, corner));
    /// ```
    pub fn contains(self, bounds: Bounds, point: Point) -> bool {
        let center = bounds.center();
        let dx = point.x() - center.x();
        let dy = point.y() - center.y();
        let half_width = bounds.width() / 2.0;
        let half_height = bounds.height() / 2.0;

        match self {
            Self::Male => bounds.contains(point),
            Self::Female => {
                if half_width <= 0.0 || half_height <= 0.0 {
                    return false;
                }
                (dx / half_width).powi(2) + (dy / half_height).powi(2) <= 1.0
            }
            Self::Unknown => {
                if half_width <= 0.0 || half_height <= 0.0 {
                    return false;
                }
                dx.abs() / half_width + dy.abs() / half_height <= 1.0
            }
        }
    }

    /// Returns the lowercase name of this variant.
    pub fn name(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Unknown => "unknown",
        }
    }
}

impl FromStr for ShapeKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Self::Male),
            "female" => Ok(Self::Female),
            "unknown" => Ok(Self::Unknown),
            _ => Err(format!(
                "invalid sex `{s}`, valid values: male, female, unknown"
            )),
        }
    }
}

/// A positioned individual.
///
/// `marriage_partner` and `twin` are expected to be mutual; the caller that
/// sets them keeps both sides in sync. Readers treat a link to a node that no
/// longer exists as no link at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    id: NodeId,
    kind: ShapeKind,
    position: Point,
    size: f32,
    border: f32,
    marriage_partner: Option<NodeId>,
    twin: Option<NodeId>,
    in_legend: bool,
}

impl Node {
    /// Creates a node with the default size and border at `position` (top-left corner).
    pub fn new(id: NodeId, kind: ShapeKind, position: Point) -> Self {
        Self {
            id,
            kind,
            position,
            size: DEFAULT_NODE_SIZE,
            border: DEFAULT_NODE_BORDER,
            marriage_partner: None,
            twin: None,
            in_legend: false,
        }
    }

    /// Sets the edge length of the bounding square (builder style).
    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    /// Sets the border width (builder style).
    pub fn with_border(mut self, border: f32) -> Self {
        self.border = border;
        self
    }

    /// Marks the node as a legend entry (builder style).
    pub fn with_in_legend(mut self, in_legend: bool) -> Self {
        self.in_legend = in_legend;
        self
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    /// Top-left corner in diagram space.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn x(&self) -> f32 {
        self.position.x()
    }

    pub fn y(&self) -> f32 {
        self.position.y()
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn border(&self) -> f32 {
        self.border
    }

    pub fn marriage_partner(&self) -> Option<NodeId> {
        self.marriage_partner
    }

    pub fn twin(&self) -> Option<NodeId> {
        self.twin
    }

    /// Legend entries are drawn but never dragged.
    pub fn is_in_legend(&self) -> bool {
        self.in_legend
    }

    /// Right edge of the bounding square (`x + size`).
    pub fn far_x(&self) -> f32 {
        self.position.x() + self.size
    }

    /// Geometric center of the bounding square in diagram space.
    pub fn center(&self) -> Point {
        let half = self.size / 2.0;
        Point::new(self.position.x() + half, self.position.y() + half)
    }

    /// Bounding square in diagram space.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_top_left(self.position, Size::square(self.size))
    }

    /// Returns true if the diagram-space `point` lies inside this node's glyph.
    pub fn contains(&self, point: Point) -> bool {
        self.kind.contains(self.bounds(), point)
    }

    pub fn set_kind(&mut self, kind: ShapeKind) {
        self.kind = kind;
    }

    pub fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    pub fn set_y(&mut self, y: f32) {
        self.position = self.position.with_y(y);
    }

    pub fn set_size(&mut self, size: f32) {
        self.size = size;
    }

    pub fn set_border(&mut self, border: f32) {
        self.border = border;
    }

    pub fn set_marriage_partner(&mut self, partner: Option<NodeId>) {
        self.marriage_partner = partner;
    }

    pub fn set_twin(&mut self, twin: Option<NodeId>) {
        self.twin = twin;
    }

    pub fn set_in_legend(&mut self, in_legend: bool) {
        self.in_legend = in_legend;
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;

    use super::*;

    fn node_at(x: f32, y: f32, kind: ShapeKind) -> Node {
        Node::new(NodeId::new(1), kind, Point::new(x, y))
    }

    #[test]
    fn test_node_defaults() {
        let node = node_at(0.0, 0.0, ShapeKind::Male);
        assert_approx_eq!(f32, node.size(), 60.0);
        assert_approx_eq!(f32, node.border(), 3.0);
        assert_eq!(node.marriage_partner(), None);
        assert_eq!(node.twin(), None);
        assert!(!node.is_in_legend());
    }

    #[test]
    fn test_node_center_and_far_edge() {
        let node = node_at(200.0, 0.0, ShapeKind::Female);
        assert_eq!(node.center(), Point::new(230.0, 30.0));
        assert_approx_eq!(f32, node.far_x(), 260.0);
    }

    #[test]
    fn test_node_builder() {
        let node = node_at(10.0, 10.0, ShapeKind::Unknown)
            .with_size(40.0)
            .with_border(1.0)
            .with_in_legend(true);
        assert_eq!(node.center(), Point::new(30.0, 30.0));
        assert_approx_eq!(f32, node.border(), 1.0);
        assert!(node.is_in_legend());
    }

    #[test]
    fn test_set_y_keeps_x() {
        let mut node = node_at(45.0, 15.0, ShapeKind::Male);
        node.set_y(90.0);
        assert_eq!(node.position(), Point::new(45.0, 90.0));
    }

    #[test]
    fn test_square_hit_test() {
        let node = node_at(0.0, 0.0, ShapeKind::Male);
        assert!(node.contains(Point::new(1.0, 59.0)));
        assert!(!node.contains(Point::new(61.0, 30.0)));
    }

    #[test]
    fn test_circle_hit_test() {
        let node = node_at(0.0, 0.0, ShapeKind::Female);
        assert!(node.contains(Point::new(30.0, 30.0)));
        assert!(node.contains(Point::new(59.0, 30.0)));
        assert!(!node.contains(Point::new(3.0, 3.0)));
    }

    #[test]
    fn test_diamond_hit_test() {
        let node = node_at(0.0, 0.0, ShapeKind::Unknown);
        assert!(node.contains(Point::new(30.0, 1.0)));
        assert!(node.contains(Point::new(15.0, 30.0)));
        assert!(!node.contains(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_zero_size_never_hit() {
        let node = node_at(0.0, 0.0, ShapeKind::Female).with_size(0.0);
        assert!(!node.contains(Point::new(0.0, 0.0)));
    }

    #[test]
    fn test_shape_kind_from_str() {
        assert_eq!("male".parse::<ShapeKind>().unwrap(), ShapeKind::Male);
        assert_eq!("female".parse::<ShapeKind>().unwrap(), ShapeKind::Female);
        assert_eq!(ShapeKind::Unknown.name(), "unknown");
        assert!("other".parse::<ShapeKind>().unwrap_err().contains("invalid sex"));
    }
}
