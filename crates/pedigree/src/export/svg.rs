//! SVG drawing surface.
//!
//! [`SvgSurface`] strokes routes with per-kind line styles and draws node
//! glyphs. Everything is collected into one group whose transform is the
//! camera zoom, so the points handed in stay in offset diagram space.
//!
//! | Kind             | Drawing                                         |
//! |------------------|-------------------------------------------------|
//! | partnership      | single line                                     |
//! | separation       | single line crossed by two slashes at its middle |
//! | consanguineous   | two parallel lines                              |
//! | sibling          | elbow polyline                                  |
//! | twins            | fork and stem, plus a crossbar when identical   |

use std::{fs::File, io::Write, path::Path};

use log::{debug, error, info};
use svg::{self, Document, node::element as svg_element};

use pedigree_core::{
    apply_stroke,
    camera::Camera,
    color::Color,
    draw::StrokeDefinition,
    geometry::{Bounds, Point},
    node::{DEFAULT_NODE_BORDER, Node, ShapeKind},
};

use crate::{
    config::StyleConfig,
    connection::{ConnectionKind, TwinKind},
    error::PedigreeError,
    router::{Route, TwinRoute},
    surface::Surface,
};

/// Empty space around the drawn content, in device units.
const MARGIN: f32 = 50.0;

/// Distance between the two lines of a consanguineous connection.
const DOUBLE_LINE_GAP: f32 = 6.0;

/// Half length of a separation slash.
const SLASH_HALF_LENGTH: f32 = 8.0;

/// Distance between the two separation slashes.
const SLASH_SPACING: f32 = 6.0;

/// Collects drawn elements into an SVG document.
pub struct SvgSurface {
    line_stroke: StrokeDefinition,
    node_stroke: StrokeDefinition,
    background: Option<Color>,
    elements: Vec<Box<dyn svg::Node>>,
}

impl SvgSurface {
    /// Creates an empty surface styled by `style`.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::InvalidColor`] if a configured color does not parse.
    pub fn new(style: &StyleConfig) -> Result<Self, PedigreeError> {
        Ok(Self {
            line_stroke: StrokeDefinition::new(style.line_color()?, style.line_width()),
            node_stroke: StrokeDefinition::new(style.node_stroke_color()?, DEFAULT_NODE_BORDER),
            background: style.background_color()?,
            elements: Vec::new(),
        })
    }

    /// Number of top-level elements drawn so far.
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Builds the document.
    ///
    /// `content` is the diagram-space area to show, usually the node bounds;
    /// it is shifted by the camera offset and zoomed before sizing the canvas.
    pub fn finish(self, camera: &Camera, content: Option<Bounds>) -> Document {
        let device_bounds = content
            .map(|bounds| {
                let top_left = camera.to_device(bounds.min_point());
                Bounds::new_from_top_left(top_left, bounds.to_size().scale(camera.scale()))
            })
            .unwrap_or_default();

        let width = MARGIN.mul_add(2.0, device_bounds.width());
        let height = MARGIN.mul_add(2.0, device_bounds.height());
        let min_x = device_bounds.min_x() - MARGIN;
        let min_y = device_bounds.min_y() - MARGIN;

        debug!(width, height; "SVG dimensions computed");

        let mut doc = Document::new()
            .set("viewBox", format!("{min_x} {min_y} {width} {height}"))
            .set("width", width)
            .set("height", height);

        if let Some(background) = &self.background {
            doc = doc.add(
                svg_element::Rectangle::new()
                    .set("x", min_x)
                    .set("y", min_y)
                    .set("width", width)
                    .set("height", height)
                    .set("fill", background)
                    .set("fill-opacity", background.alpha()),
            );
        }

        let translation = camera.translation();
        let group = self.elements.into_iter().fold(
            svg_element::Group::new().set(
                "transform",
                format!(
                    "translate({}, {}) scale({})",
                    translation.x(),
                    translation.y(),
                    camera.scale()
                ),
            ),
            |group, element| group.add(element),
        );

        doc.add(group)
    }

    /// Writes a finished document to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`PedigreeError::Io`] if the file cannot be created or written.
    pub fn write_document(doc: &Document, path: impl AsRef<Path>) -> Result<(), PedigreeError> {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Writing SVG file");

        let mut file = File::create(path).map_err(|err| {
            error!(path = path.display().to_string(), err:err; "Failed to create SVG file");
            err
        })?;
        write!(file, "{doc}").map_err(|err| {
            error!(path = path.display().to_string(), err:err; "Failed to write SVG content");
            err
        })?;
        Ok(())
    }

    fn stroke_polyline(&mut self, points: &[Point]) {
        let line = svg_element::Polyline::new().set("points", points_attribute(points));
        self.elements.push(Box::new(apply_stroke!(line, &self.line_stroke)));
    }

    fn stroke_segment(&mut self, from: Point, to: Point) {
        self.stroke_polyline(&[from, to]);
    }

    fn draw_separation_marks(&mut self, from: Point, to: Point) {
        let Some((direction, normal)) = unit_frame(from, to) else {
            return;
        };
        let middle = from.midpoint(to);
        let arm = normal
            .scale(SLASH_HALF_LENGTH)
            .add_point(direction.scale(SLASH_HALF_LENGTH / 2.0));

        for side in [-0.5, 0.5] {
            let center = middle.add_point(direction.scale(side * SLASH_SPACING));
            self.stroke_segment(center.sub_point(arm), center.add_point(arm));
        }
    }

    fn draw_double_line(&mut self, from: Point, to: Point) {
        let Some((_, normal)) = unit_frame(from, to) else {
            self.stroke_segment(from, to);
            return;
        };
        let shift = normal.scale(DOUBLE_LINE_GAP / 2.0);
        self.stroke_segment(from.add_point(shift), to.add_point(shift));
        self.stroke_segment(from.sub_point(shift), to.sub_point(shift));
    }
}

impl Surface for SvgSurface {
    fn draw_connection(&mut self, kind: ConnectionKind, route: &Route) {
        match (kind, *route) {
            (ConnectionKind::Separation, Route::Straight { from, to }) => {
                self.stroke_segment(from, to);
                self.draw_separation_marks(from, to);
            }
            (ConnectionKind::Consanguineous, Route::Straight { from, to }) => {
                self.draw_double_line(from, to);
            }
            _ => self.stroke_polyline(&route.polyline()),
        }
    }

    fn draw_twins(&mut self, kind: TwinKind, route: &TwinRoute) {
        for polyline in route.polylines() {
            self.stroke_polyline(&polyline);
        }
        if kind == TwinKind::Identical {
            let (left, right) = route.crossbar();
            self.stroke_segment(left, right);
        }
    }

    fn draw_node(&mut self, node: &Node, origin: Point) {
        let size = node.size();
        let half = size / 2.0;
        let stroke = self.node_stroke.with_width(node.border());

        let glyph: Box<dyn svg::Node> = match node.kind() {
            ShapeKind::Male => Box::new(
                apply_stroke!(
                    svg_element::Rectangle::new()
                        .set("x", origin.x())
                        .set("y", origin.y())
                        .set("width", size)
                        .set("height", size),
                    &stroke
                )
                .set("fill", "white"),
            ),
            ShapeKind::Female => Box::new(
                apply_stroke!(
                    svg_element::Circle::new()
                        .set("cx", origin.x() + half)
                        .set("cy", origin.y() + half)
                        .set("r", half),
                    &stroke
                )
                .set("fill", "white"),
            ),
            ShapeKind::Unknown => {
                let center = origin.add_point(Point::new(half, half));
                let corners = [
                    center.with_y(origin.y()),
                    center.with_x(origin.x() + size),
                    center.with_y(origin.y() + size),
                    center.with_x(origin.x()),
                ];
                Box::new(
                    apply_stroke!(
                        svg_element::Polygon::new().set("points", points_attribute(&corners)),
                        &stroke
                    )
                    .set("fill", "white"),
                )
            }
        };

        let group = svg_element::Group::new()
            .set("id", node.id().to_string())
            .add(glyph);
        self.elements.push(Box::new(group));
    }
}

fn points_attribute(points: &[Point]) -> String {
    points
        .iter()
        .map(|point| format!("{},{}", point.x(), point.y()))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unit direction from `from` to `to` and its left-hand normal, `None` for a
/// zero-length segment.
fn unit_frame(from: Point, to: Point) -> Option<(Point, Point)> {
    let delta = to.sub_point(from);
    let length = delta.hypot();
    if length <= f32::EPSILON {
        return None;
    }
    let direction = delta.scale(1.0 / length);
    Some((direction, Point::new(-direction.y(), direction.x())))
}
