//! Geometric primitives.
//!
//! Diagram space follows the canvas convention: `x` grows to the right and
//! `y` grows downward. Node positions are top-left corners; routing anchors
//! are node centers.
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```

/// A 2D coordinate, in diagram or device space depending on context.
///
/// ```
/// # use pedigree_core::geometry::Point;
/// let a = Point::new(10.0, 20.0);
/// let b = Point::new(30.0, 20.0);
///
/// assert_eq!(a.midpoint(b), Point::new(20.0, 20.0));
/// assert_eq!(b.sub_point(a).hypot(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn x(self) -> f32 {
        self.x
    }

    pub fn y(self) -> f32 {
        self.y
    }

    /// Same point with `x` replaced.
    pub fn with_x(self, x: f32) -> Self {
        Self { x, ..self }
    }

    /// Same point with `y` replaced.
    pub fn with_y(self, y: f32) -> Self {
        Self { y, ..self }
    }

    pub fn is_zero(self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }

    pub fn add_point(self, other: Point) -> Self {
        Self::new(self.x + other.x, self.y + other.y)
    }

    pub fn sub_point(self, other: Point) -> Self {
        Self::new(self.x - other.x, self.y - other.y)
    }

    pub fn midpoint(self, other: Point) -> Self {
        Self::new((self.x + other.x) / 2.0, (self.y + other.y) / 2.0)
    }

    /// Multiplies both coordinates by `factor`.
    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }

    /// Length of the vector from the origin to this point.
    pub fn hypot(self) -> f32 {
        self.x.hypot(self.y)
    }
}

/// Width and height of an axis-aligned box.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f32,
    height: f32,
}

impl Size {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// A square with the given edge length, the footprint of every node.
    pub fn square(edge: f32) -> Self {
        Self::new(edge, edge)
    }

    pub fn width(self) -> f32 {
        self.width
    }

    pub fn height(self) -> f32 {
        self.height
    }

    pub fn scale(self, factor: f32) -> Self {
        Self::new(self.width * factor, self.height * factor)
    }
}

/// Axis-aligned box anchored at its top-left corner.
///
/// ```
/// # use pedigree_core::geometry::{Bounds, Point, Size};
/// let bounds = Bounds::new_from_top_left(Point::new(10.0, 20.0), Size::square(60.0));
/// assert_eq!(bounds.max_x(), 70.0);
/// assert_eq!(bounds.center(), Point::new(40.0, 50.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    origin: Point,
    size: Size,
}

impl Bounds {
    pub fn new_from_top_left(top_left: Point, size: Size) -> Self {
        Self {
            origin: top_left,
            size,
        }
    }

    pub fn min_x(self) -> f32 {
        self.origin.x
    }

    pub fn min_y(self) -> f32 {
        self.origin.y
    }

    pub fn max_x(self) -> f32 {
        self.origin.x + self.size.width
    }

    pub fn max_y(self) -> f32 {
        self.origin.y + self.size.height
    }

    pub fn width(self) -> f32 {
        self.size.width
    }

    pub fn height(self) -> f32 {
        self.size.height
    }

    pub fn min_point(self) -> Point {
        self.origin
    }

    pub fn to_size(self) -> Size {
        self.size
    }

    pub fn center(self) -> Point {
        Point::new(
            self.origin.x + self.size.width / 2.0,
            self.origin.y + self.size.height / 2.0,
        )
    }

    /// Returns true if `point` is inside or on the edge.
    pub fn contains(self, point: Point) -> bool {
        (self.min_x()..=self.max_x()).contains(&point.x)
            && (self.min_y()..=self.max_y()).contains(&point.y)
    }

    /// Smallest bounds covering both.
    pub fn merge(&self, other: &Self) -> Self {
        let top_left = Point::new(
            self.min_x().min(other.min_x()),
            self.min_y().min(other.min_y()),
        );
        let max_x = self.max_x().max(other.max_x());
        let max_y = self.max_y().max(other.max_y());
        Self::new_from_top_left(
            top_left,
            Size::new(max_x - top_left.x, max_y - top_left.y),
        )
    }
}
