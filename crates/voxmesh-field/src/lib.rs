//! Procedural occupancy fields for the voxmesh surface extractor.
//!
//! This is the build phase: a [`FieldSampler`] turns a [`FieldConfig`] into a
//! filled [`OccupancyGrid`] that the mesher then reads without mutation.
//!
//! [`FieldConfig`]: voxmesh_core::FieldConfig
//! [`OccupancyGrid`]: voxmesh_voxel::OccupancyGrid

pub mod sampler;

pub use sampler::{build_occupancy, FieldSampler};
