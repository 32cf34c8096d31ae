//! Pedigree - connection routing and interaction for pedigree diagrams.
//!
//! Given individuals positioned in diagram space and typed relationship edges
//! between them, this crate computes the polylines that connect them
//! (partnership, sibling, separation, consanguineous and twin lines) and
//! drives direct manipulation of the diagram: node dragging with grid snap,
//! panning and cursor-centered zoom.
//!
//! [`Diagram`] is the usual entry point. The lower layers are public for hosts
//! that want to drive routing or drawing themselves:
//!
//! - [`nodes::NodeStore`]: node arena with hit testing
//! - [`registry::ConnectionRegistry`]: the edge lists
//! - [`router::Router`]: pure routing geometry
//! - [`interaction::InteractionController`]: gesture state machine
//! - [`surface::Surface`]: drawing collaborator, implemented for SVG by
//!   [`export::svg::SvgSurface`]

pub mod config;
pub mod connection;
pub mod export;
pub mod interaction;
pub mod nodes;
pub mod registry;
pub mod router;
pub mod surface;

mod diagram;
mod error;

pub use pedigree_core::{camera, color, draw, geometry, identifier, node};

pub use diagram::Diagram;
pub use error::PedigreeError;
