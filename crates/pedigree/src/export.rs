//! Output backends for pedigree diagrams.
//!
//! A backend is a [`Surface`](crate::surface::Surface) that collects routed
//! connections and node glyphs and turns them into a document.
//!
//! # Available Backends
//!
//! - [`svg`]: SVG output via [`svg::SvgSurface`]

/// SVG export backend.
pub mod svg;
