//! Lattice coordinates.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

use crate::types::Face;

/// Integer cell coordinate in an occupancy grid.
///
/// Coordinates are signed so that neighbor arithmetic never wraps; whether a
/// position lies inside a particular grid is decided by the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl CellPos {
    /// Create a new cell position
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The cell across the given face.
    #[inline]
    pub fn neighbor(self, face: Face) -> Self {
        Self::from(self.to_ivec3() + face.delta())
    }

    /// The six face neighbors, in [`Face::ALL`] order.
    pub fn neighbors(self) -> [CellPos; 6] {
        Face::ALL.map(|face| self.neighbor(face))
    }

    /// World-space center of the cell for a given cell size.
    #[inline]
    pub fn center(self, scale: f32) -> Vec3 {
        self.to_ivec3().as_vec3() * scale
    }

    /// Convert to glam IVec3
    #[inline]
    pub const fn to_ivec3(self) -> IVec3 {
        IVec3::new(self.x, self.y, self.z)
    }
}

impl From<IVec3> for CellPos {
    fn from(v: IVec3) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}
