//! Voxel-to-mesh surface extraction.
//!
//! Two strategies produce the same output contract, a [`MeshBuffer`] of
//! flat triangle positions:
//! - [`FaceCullMesher`] walks an occupancy grid and emits one quad per exposed
//!   cell face.
//! - [`IsosurfaceAdapter`] normalizes vertex/triangle/quad output from any
//!   [`IsosurfaceProvider`] (for example the built-in [`SurfaceNets`]).
//!
//! # Example
//!
//! ```
//! use voxmesh_core::FieldConfig;
//! use voxmesh_mesh::{generate_field_mesh, MeshOptions};
//!
//! let config = FieldConfig::default().with_field_bits(4);
//! let mesh = generate_field_mesh(&config, &MeshOptions::default()).unwrap();
//! assert_eq!(mesh.len() % 9, 0);
//! ```

pub mod buffer;
pub mod cancel;
pub mod cull;
pub mod export;
pub mod iso;
pub mod pipeline;
pub mod quad;
pub mod surface_nets;

pub use buffer::{MeshBuffer, Triangle, TriangleSink};
pub use cancel::CancelToken;
pub use cull::{FaceCullMesher, FaceMask, MeshMode};
pub use export::{write_raw, write_stl};
pub use iso::{
    normalize_iso_mesh, IsoMesh, IsosurfaceAdapter, IsosurfaceProvider, LevelSetParams,
    DEFAULT_WORLD_SCALE,
};
pub use pipeline::{generate_field_mesh, generate_isosurface_mesh, MeshOptions};
pub use quad::{emit_quad, Quad};
pub use surface_nets::{SurfaceNets, MAX_LATTICE_POINTS};
