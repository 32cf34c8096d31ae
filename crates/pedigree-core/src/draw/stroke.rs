//! Stroke definitions for connection lines and glyph outlines.
//!
//! | Field   | SVG attribute               |
//! |---------|-----------------------------|
//! | `color` | `stroke`, `stroke-opacity`  |
//! | `width` | `stroke-width`              |
//! | `cap`   | `stroke-linecap`            |
//! | `join`  | `stroke-linejoin`           |

use std::str::FromStr;

use crate::color::Color;

/// How open line ends are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeCap {
    #[default]
    Butt,
    Round,
    Square,
}

impl StrokeCap {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Butt => "butt",
            Self::Round => "round",
            Self::Square => "square",
        }
    }
}

impl FromStr for StrokeCap {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "butt" => Ok(Self::Butt),
            "round" => Ok(Self::Round),
            "square" => Ok(Self::Square),
            _ => Err(format!(
                "invalid line cap `{s}`, valid values: butt, round, square"
            )),
        }
    }
}

/// How the corners of an elbow or fork are drawn.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StrokeJoin {
    #[default]
    Miter,
    Round,
    Bevel,
}

impl StrokeJoin {
    pub fn to_svg_value(self) -> &'static str {
        match self {
            Self::Miter => "miter",
            Self::Round => "round",
            Self::Bevel => "bevel",
        }
    }
}

impl FromStr for StrokeJoin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "miter" => Ok(Self::Miter),
            "round" => Ok(Self::Round),
            "bevel" => Ok(Self::Bevel),
            _ => Err(format!(
                "invalid line join `{s}`, valid values: miter, round, bevel"
            )),
        }
    }
}

/// Color, width and end treatment of a drawn line.
///
/// # Examples
///
/// ```
/// use pedigree_core::color::Color;
/// use pedigree_core::draw::{StrokeCap, StrokeDefinition};
///
/// let outline = StrokeDefinition::new(Color::default(), 3.0).with_cap(StrokeCap::Square);
/// assert_eq!(outline.width(), 3.0);
/// assert_eq!(outline.cap(), StrokeCap::Square);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeDefinition {
    color: Color,
    width: f32,
    cap: StrokeCap,
    join: StrokeJoin,
}

impl StrokeDefinition {
    pub fn new(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            cap: StrokeCap::default(),
            join: StrokeJoin::default(),
        }
    }

    pub fn with_cap(mut self, cap: StrokeCap) -> Self {
        self.cap = cap;
        self
    }

    pub fn with_join(mut self, join: StrokeJoin) -> Self {
        self.join = join;
        self
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn cap(&self) -> StrokeCap {
        self.cap
    }

    pub fn join(&self) -> StrokeJoin {
        self.join
    }

    /// Copy of this stroke with another width, e.g. a node's own border width.
    pub fn with_width(&self, width: f32) -> Self {
        Self {
            width,
            ..self.clone()
        }
    }
}

impl Default for StrokeDefinition {
    fn default() -> Self {
        Self::new(Color::default(), 1.0)
    }
}

/// Sets the stroke attributes of an SVG element and disables its fill.
///
/// Set `fill` again afterwards for closed glyphs.
///
/// ```
/// use pedigree_core::draw::StrokeDefinition;
/// use svg::node::element as svg_element;
///
/// let stroke = StrokeDefinition::default();
/// let line = svg_element::Polyline::new().set("points", "0,0 10,10");
/// let line = pedigree_core::apply_stroke!(line, &stroke);
/// ```
#[macro_export]
macro_rules! apply_stroke {
    ($element:expr, $stroke:expr) => {{
        let stroke = $stroke;
        $element
            .set("fill", "none")
            .set("stroke", stroke.color().to_string())
            .set("stroke-opacity", stroke.color().alpha())
            .set("stroke-width", stroke.width())
            .set("stroke-linecap", stroke.cap().to_svg_value())
            .set("stroke-linejoin", stroke.join().to_svg_value())
    }};
}
