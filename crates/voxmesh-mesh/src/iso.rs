//! Isosurface provider seam.
//!
//! A provider turns level-set parameters into an indexed mesh of vertices,
//! triangles and quads. [`IsosurfaceAdapter`] validates that output and
//! resolves it into the flat triangle format. Provider output is never trusted:
//! one bad index or non-finite vertex fails the whole call.

use glam::Vec3;
use voxmesh_core::{Error, Result};

use crate::buffer::{MeshBuffer, Triangle};

/// World-space scale the reference sphere pipeline applies to provider output.
pub const DEFAULT_WORLD_SCALE: f32 = 10.0;

/// Parameters of an implicit sphere level set.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LevelSetParams {
    pub center: Vec3,
    pub radius: f32,
    /// Lattice spacing of the sampled distance field.
    pub voxel_size: f32,
    /// Narrow band half-width, in voxels.
    pub band_width: f32,
}

impl Default for LevelSetParams {
    fn default() -> Self {
        Self {
            center: Vec3::new(1.5, 2.0, 3.0),
            radius: 50.0,
            voxel_size: 4.0,
            band_width: 4.0,
        }
    }
}

impl LevelSetParams {
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_voxel_size(mut self, voxel_size: f32) -> Self {
        self.voxel_size = voxel_size;
        self
    }

    pub fn with_band_width(mut self, band_width: f32) -> Self {
        self.band_width = band_width;
        self
    }

    /// Reject non-finite or non-positive parameters.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(Error::config("center", self.center, "must be finite"));
        }
        for (field, value) in [
            ("radius", self.radius),
            ("voxelSize", self.voxel_size),
            ("bandWidth", self.band_width),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::config(field, value, "must be positive and finite"));
            }
        }
        Ok(())
    }
}

/// Indexed provider output.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct IsoMesh {
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[u32; 3]>,
    pub quads: Vec<[u32; 4]>,
}

impl IsoMesh {
    /// Number of triangles after quad splitting.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len() + 2 * self.quads.len()
    }
}

/// Level-set extraction capability.
pub trait IsosurfaceProvider {
    fn extract(&self, params: &LevelSetParams) -> Result<IsoMesh>;
}

impl<F> IsosurfaceProvider for F
where
    F: Fn(&LevelSetParams) -> Result<IsoMesh>,
{
    fn extract(&self, params: &LevelSetParams) -> Result<IsoMesh> {
        self(params)
    }
}

/// Wraps a provider and normalizes its output into a [`MeshBuffer`].
#[derive(Clone, Debug)]
pub struct IsosurfaceAdapter<P> {
    provider: P,
    world_scale: f32,
}

impl<P: IsosurfaceProvider> IsosurfaceAdapter<P> {
    /// Adapter that keeps provider coordinates as they are.
    pub fn new(provider: P) -> Self {
        Self {
            provider,
            world_scale: 1.0,
        }
    }

    /// Multiply every resolved position by `world_scale`.
    pub fn with_world_scale(mut self, world_scale: f32) -> Result<Self> {
        if !(world_scale.is_finite() && world_scale > 0.0) {
            return Err(Error::config(
                "worldScale",
                world_scale,
                "must be positive and finite",
            ));
        }
        self.world_scale = world_scale;
        Ok(self)
    }

    pub fn world_scale(&self) -> f32 {
        self.world_scale
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Run the provider and resolve its output.
    pub fn generate(&self, params: &LevelSetParams) -> Result<MeshBuffer> {
        let _span = tracing::trace_span!("iso.generate", radius = params.radius).entered();

        params.validate()?;
        let raw = self.provider.extract(params)?;
        let mesh = normalize_iso_mesh(&raw, self.world_scale)?;

        tracing::debug!(
            vertices = raw.vertices.len(),
            triangles = raw.triangles.len(),
            quads = raw.quads.len(),
            output = mesh.triangle_count(),
            "normalized isosurface"
        );
        Ok(mesh)
    }
}

/// Resolve an indexed mesh into flat triangles scaled by `world_scale`.
///
/// Triangles keep their order and come first; each quad `(a, b, c, d)` then
/// becomes `(a, b, c)` and `(a, c, d)`.
pub fn normalize_iso_mesh(mesh: &IsoMesh, world_scale: f32) -> Result<MeshBuffer> {
    for (i, v) in mesh.vertices.iter().enumerate() {
        if !v.iter().all(|c| c.is_finite()) {
            return Err(Error::ExternalProvider(format!(
                "vertex {i} is not finite: {v:?}"
            )));
        }
    }

    let vertex = |kind: &str, primitive: usize, index: u32| -> Result<Vec3> {
        let raw = mesh.vertices.get(index as usize).ok_or_else(|| {
            Error::ExternalProvider(format!(
                "{kind} {primitive} references vertex {index} of {}",
                mesh.vertices.len()
            ))
        })?;
        let scaled = Vec3::from_array(*raw) * world_scale;
        if !scaled.is_finite() {
            return Err(Error::ExternalProvider(format!(
                "vertex {index} of {kind} {primitive} overflows at world scale {world_scale}"
            )));
        }
        Ok(scaled)
    };

    let mut out = MeshBuffer::with_triangle_capacity(mesh.triangle_count());

    for (i, &[a, b, c]) in mesh.triangles.iter().enumerate() {
        out.push_triangle(Triangle::new(
            vertex("triangle", i, a)?,
            vertex("triangle", i, b)?,
            vertex("triangle", i, c)?,
        ));
    }

    for (i, &[a, b, c, d]) in mesh.quads.iter().enumerate() {
        let [a, b, c, d] = [
            vertex("quad", i, a)?,
            vertex("quad", i, b)?,
            vertex("quad", i, c)?,
            vertex("quad", i, d)?,
        ];
        out.push_triangle(Triangle::new(a, b, c));
        out.push_triangle(Triangle::new(a, c, d));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> IsoMesh {
        IsoMesh {
            vertices: vec![
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [0.0, 1.0, 0.0],
            ],
            triangles: Vec::new(),
            quads: vec![[0, 1, 2, 3]],
        }
    }

    fn square_provider(_: &LevelSetParams) -> Result<IsoMesh> {
        Ok(unit_square())
    }

    #[test]
    fn quad_splits_along_first_diagonal() {
        let mesh = normalize_iso_mesh(&unit_square(), 1.0).unwrap();
        assert_eq!(
            mesh.as_slice(),
            &[
                0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 1.0, 0.0, //
                0.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0, 1.0, 0.0,
            ]
        );
    }

    #[test]
    fn triangles_precede_quads() {
        let mut raw = unit_square();
        raw.triangles.push([3, 2, 1]);
        let mesh = normalize_iso_mesh(&raw, 1.0).unwrap();
        assert_eq!(mesh.triangle_count(), 3);
        let first = mesh.triangles().next().unwrap();
        assert_eq!(first.v0, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn world_scale_multiplies_positions() {
        let mesh = normalize_iso_mesh(&unit_square(), 10.0).unwrap();
        let bounds = mesh.bounds().unwrap();
        assert_eq!(bounds.max, Vec3::new(10.0, 10.0, 0.0));
    }

    #[test]
    fn bad_index_is_rejected() {
        let mut raw = unit_square();
        raw.quads.push([0, 1, 2, 4]);
        let err = normalize_iso_mesh(&raw, 1.0).unwrap_err();
        match err {
            Error::ExternalProvider(msg) => assert!(msg.contains("quad 1"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn non_finite_vertex_is_rejected() {
        let mut raw = unit_square();
        raw.vertices[2][1] = f32::NAN;
        assert!(matches!(
            normalize_iso_mesh(&raw, 1.0),
            Err(Error::ExternalProvider(_))
        ));
    }

    #[test]
    fn scaled_overflow_is_rejected() {
        let mut raw = unit_square();
        raw.vertices[1] = [1e38, 0.0, 0.0];
        let err = normalize_iso_mesh(&raw, 10.0).unwrap_err();
        match err {
            Error::ExternalProvider(msg) => assert!(msg.contains("vertex 1"), "{msg}"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(normalize_iso_mesh(&raw, 1.0).is_ok());
    }

    #[test]
    fn adapter_runs_closure_providers() {
        let adapter = IsosurfaceAdapter::new(square_provider);
        let mesh = adapter.generate(&LevelSetParams::default()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);

        let failing = IsosurfaceAdapter::new(|_: &LevelSetParams| -> Result<IsoMesh> {
            Err(Error::ExternalProvider("backend unavailable".into()))
        });
        assert!(failing.generate(&LevelSetParams::default()).is_err());
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let adapter = IsosurfaceAdapter::new(square_provider);
        let params = LevelSetParams::default().with_radius(-1.0);
        assert!(matches!(
            adapter.generate(&params),
            Err(Error::Configuration { field: "radius", .. })
        ));
        assert!(IsosurfaceAdapter::new(square_provider)
            .with_world_scale(0.0)
            .is_err());
    }
}
