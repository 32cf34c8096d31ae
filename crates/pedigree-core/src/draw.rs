//! Stroke styling shared by connection lines and node glyphs.

mod stroke;

pub use stroke::{StrokeCap, StrokeDefinition, StrokeJoin};
