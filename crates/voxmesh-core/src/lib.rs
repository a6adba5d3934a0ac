//! Core types, configuration, and errors shared by the voxmesh crates.
//!
//! This crate provides the foundational pieces used throughout the extractor:
//! - Cell coordinates and face/axis types
//! - Field configuration (TOML or builder)
//! - Bounding boxes for emitted geometry
//! - The engine-wide error taxonomy

pub mod config;
pub mod coords;
pub mod error;
pub mod math;
pub mod types;

pub use config::{DensityRule, FieldConfig};
pub use coords::CellPos;
pub use error::{Error, Result};
pub use math::Aabb;
pub use types::{Axis, Face};

/// Engine-wide constants
pub mod constants {
    /// Largest accepted `fieldBits`. A 1024^3 grid is already a gigabyte of cells.
    pub const MAX_FIELD_BITS: u32 = 10;
    /// Floats per vertex in a mesh buffer.
    pub const FLOATS_PER_VERTEX: usize = 3;
    /// Floats per triangle in a mesh buffer (3 vertices x 3 components).
    pub const FLOATS_PER_TRIANGLE: usize = 9;
    /// Triangles per emitted quad.
    pub const TRIANGLES_PER_QUAD: usize = 2;
}
