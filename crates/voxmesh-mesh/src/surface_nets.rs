//! Built-in sphere isosurface provider.
//!
//! Samples the signed distance `|p - center| - radius` on a regular lattice
//! around the sphere, places one vertex in every lattice cell whose corners
//! change sign (at the mean of its edge crossings), and connects the four cells
//! around every sign-changing lattice edge with one quad.

use glam::{IVec3, Vec3};
use hashbrown::HashMap;
use voxmesh_core::{Axis, Error, Result};

use crate::iso::{IsoMesh, IsosurfaceProvider, LevelSetParams};

/// Largest lattice side, in sample points, a single extraction may use.
pub const MAX_LATTICE_POINTS: usize = 256;

const CORNERS: [IVec3; 8] = [
    IVec3::new(0, 0, 0),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 1, 0),
    IVec3::new(1, 1, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(1, 0, 1),
    IVec3::new(0, 1, 1),
    IVec3::new(1, 1, 1),
];

/// Cell edges as pairs of indices into [`CORNERS`].
const EDGES: [(usize, usize); 12] = [
    (0, 1),
    (2, 3),
    (4, 5),
    (6, 7),
    (0, 2),
    (1, 3),
    (4, 6),
    (5, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

/// Naive surface nets over a sphere's distance field.
#[derive(Clone, Copy, Debug, Default)]
pub struct SurfaceNets;

/// Sampled distance field.
struct Lattice {
    origin: Vec3,
    spacing: f32,
    side: i32,
    values: Vec<f32>,
}

impl Lattice {
    fn sample(params: &LevelSetParams) -> Result<Self> {
        let spacing = params.voxel_size;
        let padding = params.band_width.max(1.0) * spacing;
        let half = ((params.radius + padding) / spacing).ceil() + 1.0;
        let side = 2.0 * half + 1.0;
        if side > MAX_LATTICE_POINTS as f32 {
            let points = side.min(u32::MAX as f32) as u128;
            return Err(Error::Allocation {
                cells: points.pow(3),
            });
        }

        let side = side as i32;
        let origin = params.center - Vec3::splat(half * spacing);
        let mut values = Vec::with_capacity((side * side * side) as usize);
        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    let p = origin + IVec3::new(x, y, z).as_vec3() * spacing;
                    values.push((p - params.center).length() - params.radius);
                }
            }
        }

        Ok(Self {
            origin,
            spacing,
            side,
            values,
        })
    }

    #[inline]
    fn value(&self, p: IVec3) -> f32 {
        self.values[(p.x + p.y * self.side + p.z * self.side * self.side) as usize]
    }

    #[inline]
    fn position(&self, p: IVec3) -> Vec3 {
        self.origin + p.as_vec3() * self.spacing
    }

    /// Mean of the edge crossings of the cell with minimum corner `cell`, or
    /// `None` when the cell has no crossing.
    fn cell_vertex(&self, cell: IVec3) -> Option<Vec3> {
        let values = CORNERS.map(|c| self.value(cell + c));
        let mut sum = Vec3::ZERO;
        let mut crossings = 0;
        for (a, b) in EDGES {
            let (va, vb) = (values[a], values[b]);
            if (va < 0.0) == (vb < 0.0) {
                continue;
            }
            let t = va / (va - vb);
            let pa = self.position(cell + CORNERS[a]);
            let pb = self.position(cell + CORNERS[b]);
            sum += pa.lerp(pb, t);
            crossings += 1;
        }
        (crossings > 0).then(|| sum / crossings as f32)
    }
}

impl IsosurfaceProvider for SurfaceNets {
    fn extract(&self, params: &LevelSetParams) -> Result<IsoMesh> {
        let _span = tracing::trace_span!("surface_nets.extract").entered();

        params.validate()?;
        let lattice = Lattice::sample(params)?;
        let side = lattice.side;

        let mut mesh = IsoMesh::default();
        let mut cell_vertices: HashMap<IVec3, u32> = HashMap::new();
        for z in 0..side - 1 {
            for y in 0..side - 1 {
                for x in 0..side - 1 {
                    let cell = IVec3::new(x, y, z);
                    if let Some(v) = lattice.cell_vertex(cell) {
                        cell_vertices.insert(cell, mesh.vertices.len() as u32);
                        mesh.vertices.push(v.to_array());
                    }
                }
            }
        }

        for z in 0..side {
            for y in 0..side {
                for x in 0..side {
                    let p = IVec3::new(x, y, z);
                    for axis in Axis::ALL {
                        if let Some(quad) = edge_quad(&lattice, &cell_vertices, p, axis) {
                            mesh.quads.push(quad);
                        }
                    }
                }
            }
        }

        tracing::debug!(
            lattice = side,
            vertices = mesh.vertices.len(),
            quads = mesh.quads.len(),
            "extracted surface nets"
        );
        Ok(mesh)
    }
}

/// Quad around the lattice edge `p -> p + axis`, wound so its normal points
/// from the inside corner to the outside corner.
fn edge_quad(
    lattice: &Lattice,
    cell_vertices: &HashMap<IVec3, u32>,
    p: IVec3,
    axis: Axis,
) -> Option<[u32; 4]> {
    let (u, w) = axis.tangents();
    let (du, dw) = (u.step(), w.step());
    let last = lattice.side - 2;

    let along = p.to_array()[axis.index()];
    let pu = p.to_array()[u.index()];
    let pw = p.to_array()[w.index()];
    if along > last || !(1..=last).contains(&pu) || !(1..=last).contains(&pw) {
        return None;
    }

    let inside = lattice.value(p) < 0.0;
    if inside == (lattice.value(p + axis.step()) < 0.0) {
        return None;
    }

    let a = *cell_vertices.get(&(p - du - dw))?;
    let b = *cell_vertices.get(&(p - dw))?;
    let c = *cell_vertices.get(&p)?;
    let d = *cell_vertices.get(&(p - du))?;
    Some(if inside { [a, b, c, d] } else { [a, d, c, b] })
}
