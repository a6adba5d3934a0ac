//! One-call generation entry points.

use voxmesh_core::{FieldConfig, Result};
use voxmesh_field::FieldSampler;

use crate::buffer::MeshBuffer;
use crate::cancel::CancelToken;
use crate::cull::{FaceCullMesher, MeshMode};
use crate::iso::{IsosurfaceAdapter, IsosurfaceProvider, LevelSetParams};

/// Execution options of a field meshing call.
#[derive(Clone, Debug, Default)]
pub struct MeshOptions {
    pub mode: MeshMode,
    pub cancel: Option<CancelToken>,
}

impl MeshOptions {
    pub fn with_mode(mut self, mode: MeshMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

/// Build the occupancy grid for `config` and face-cull it.
///
/// The grid is built, frozen, meshed and dropped within the call.
pub fn generate_field_mesh(config: &FieldConfig, options: &MeshOptions) -> Result<MeshBuffer> {
    let _span = tracing::debug_span!("generate_field_mesh", bits = config.field_bits).entered();

    let grid = FieldSampler::new(config.clone())?.build_grid()?;

    let mut mesher = FaceCullMesher::new(config.scale)?.with_mode(options.mode);
    if let Some(token) = &options.cancel {
        mesher = mesher.with_cancel_token(token.clone());
    }
    mesher.mesh(&grid)
}

/// Extract a sphere isosurface through `provider` and normalize it.
pub fn generate_isosurface_mesh<P: IsosurfaceProvider>(
    provider: P,
    params: &LevelSetParams,
    world_scale: f32,
) -> Result<MeshBuffer> {
    IsosurfaceAdapter::new(provider)
        .with_world_scale(world_scale)?
        .generate(params)
}
