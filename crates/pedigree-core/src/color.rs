//! CSS colors for lines, glyph outlines and the canvas background.

use std::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::DynamicColor;

/// A parsed CSS color, e.g. `"navy"`, `"#336699"` or `"rgb(0 0 0 / 50%)"`.
///
/// Displays in CSS syntax, so it can be written straight into SVG attributes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color(DynamicColor);

impl Color {
    /// Parses a CSS color string.
    ///
    /// ```
    /// use pedigree_core::color::Color;
    ///
    /// assert!(Color::new("#336699").is_ok());
    /// assert!(Color::new("sky").is_err());
    /// ```
    pub fn new(css: &str) -> Result<Self, String> {
        DynamicColor::from_str(css)
            .map(Self)
            .map_err(|err| format!("invalid color `{css}`: {err}"))
    }

    /// Parses `css` if present, black otherwise.
    pub fn parse_or_black(css: Option<&str>) -> Result<Self, String> {
        css.map_or_else(|| Ok(Self::default()), Self::new)
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        Self(self.0.with_alpha(alpha))
    }

    /// Opacity between 0.0 and 1.0.
    pub fn alpha(&self) -> f32 {
        self.0.components[3]
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
