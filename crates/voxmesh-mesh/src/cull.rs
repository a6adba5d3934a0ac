//! Face-culling mesher.
//!
//! Every occupied interior cell (all coordinates in `[1, N-2]`) is tested
//! against its six face neighbors; each neighbor that is empty gets exactly one
//! quad on the shared face. Edge cells are never meshed, so all neighbor reads
//! stay inside the grid. Coplanar faces are not merged.

use bitflags::bitflags;
use rayon::prelude::*;
use voxmesh_core::constants::TRIANGLES_PER_QUAD;
use voxmesh_core::{CellPos, Error, Face, Result};
use voxmesh_voxel::OccupancyGrid;

use crate::buffer::{MeshBuffer, TriangleSink};
use crate::cancel::CancelToken;
use crate::quad::Quad;

bitflags! {
    /// Set of cell faces, one bit per [`Face::index`].
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct FaceMask: u8 {
        const POS_X = 1 << 0;
        const NEG_X = 1 << 1;
        const POS_Y = 1 << 2;
        const NEG_Y = 1 << 3;
        const POS_Z = 1 << 4;
        const NEG_Z = 1 << 5;
    }
}

impl FaceMask {
    #[inline]
    pub const fn from_face(face: Face) -> Self {
        Self::from_bits_retain(1 << face.index())
    }

    /// Faces in the set, in meshing order.
    pub fn faces(self) -> impl Iterator<Item = Face> {
        Face::ALL
            .into_iter()
            .filter(move |&face| self.contains(Self::from_face(face)))
    }

    #[inline]
    pub const fn count(self) -> u32 {
        self.bits().count_ones()
    }
}

/// Execution strategy of a meshing pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeshMode {
    /// One thread, cells in lexicographic `x, y, z` order.
    #[default]
    Sequential,
    /// One rayon task per x-slab. Slab segments are concatenated in slab
    /// order, so the output matches [`MeshMode::Sequential`] exactly.
    Parallel,
}

/// Emits one quad per exposed face of every occupied interior cell.
#[derive(Clone, Debug)]
pub struct FaceCullMesher {
    scale: f32,
    mode: MeshMode,
    cancel: Option<CancelToken>,
}

impl FaceCullMesher {
    /// Create a mesher for cells of world-space edge `scale`.
    pub fn new(scale: f32) -> Result<Self> {
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::config("scale", scale, "must be positive and finite"));
        }
        Ok(Self {
            scale,
            mode: MeshMode::default(),
            cancel: None,
        })
    }

    /// Set the execution strategy.
    pub fn with_mode(mut self, mode: MeshMode) -> Self {
        self.mode = mode;
        self
    }

    /// Check `token` between slabs and abort once it is cancelled.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn mode(&self) -> MeshMode {
        self.mode
    }

    /// Faces of `cell` whose neighbor is empty, regardless of the cell's own state.
    pub fn exposed_faces(grid: &OccupancyGrid, cell: CellPos) -> Result<FaceMask> {
        let mut mask = FaceMask::empty();
        for face in Face::ALL {
            if !grid.get_cell(cell.neighbor(face))? {
                mask |= FaceMask::from_face(face);
            }
        }
        Ok(mask)
    }

    /// Mesh the whole grid.
    ///
    /// Any failure, including cancellation, discards everything built so far.
    pub fn mesh(&self, grid: &OccupancyGrid) -> Result<MeshBuffer> {
        let _span = tracing::trace_span!("cull.mesh", size = grid.size(), mode = ?self.mode).entered();

        let last = grid.size() as i32 - 1;
        let slabs = 1..last.max(1);

        let mesh = match self.mode {
            MeshMode::Sequential => {
                let mut mesh = MeshBuffer::new();
                for x in slabs {
                    self.check_cancelled()?;
                    self.mesh_slab(grid, x, &mut mesh)?;
                }
                mesh
            }
            MeshMode::Parallel => {
                let segments = slabs
                    .into_par_iter()
                    .map(|x| {
                        self.check_cancelled()?;
                        let mut segment = MeshBuffer::new();
                        self.mesh_slab(grid, x, &mut segment)?;
                        Ok(segment)
                    })
                    .collect::<Result<Vec<_>>>()?;

                let total = segments.iter().map(MeshBuffer::triangle_count).sum();
                let mut mesh = MeshBuffer::with_triangle_capacity(total);
                for mut segment in segments {
                    mesh.append(&mut segment);
                }
                mesh
            }
        };

        tracing::debug!(
            triangles = mesh.triangle_count(),
            quads = mesh.triangle_count() / TRIANGLES_PER_QUAD,
            "face-cull mesh complete"
        );
        Ok(mesh)
    }

    /// Mesh the whole grid into any sink.
    ///
    /// The sink is written only after meshing succeeded.
    pub fn mesh_into<S: TriangleSink + ?Sized>(&self, grid: &OccupancyGrid, sink: &mut S) -> Result<()> {
        let mesh = self.mesh(grid)?;
        mesh.write_into(sink);
        Ok(())
    }

    fn check_cancelled(&self) -> Result<()> {
        match &self.cancel {
            Some(token) => token.check(),
            None => Ok(()),
        }
    }

    /// Emit the quads of every interior cell with the given x coordinate.
    fn mesh_slab(&self, grid: &OccupancyGrid, x: i32, out: &mut MeshBuffer) -> Result<()> {
        let last = grid.size() as i32 - 1;
        for y in 1..last {
            for z in 1..last {
                let cell = CellPos::new(x, y, z);
                if !grid.get_cell(cell)? {
                    continue;
                }
                let center = cell.center(self.scale);
                for face in Self::exposed_faces(grid, cell)?.faces() {
                    Quad::on_cell(center, face, self.scale).emit(out);
                }
            }
        }
        Ok(())
    }
}
