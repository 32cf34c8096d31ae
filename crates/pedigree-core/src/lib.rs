//! Pedigree Core Types and Definitions
//!
//! This crate provides the foundational types shared by the pedigree diagram
//! engine. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Identifiers**: Arena handles for nodes ([`identifier::NodeId`])
//! - **Nodes**: Positioned individuals and their glyph variants ([`node`] module)
//! - **Camera**: The pan/zoom viewport transform ([`camera::Camera`])
//! - **Colors**: Color handling with CSS color support ([`color::Color`])
//! - **Draw**: Stroke definitions for drawn lines ([`draw`] module)

pub mod camera;
pub mod color;
pub mod draw;
pub mod geometry;
pub mod identifier;
pub mod node;
