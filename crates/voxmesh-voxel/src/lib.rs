//! Occupancy storage for the voxmesh surface extractor.

pub mod grid;

pub use grid::{GridIndexing, OccupancyGrid};
