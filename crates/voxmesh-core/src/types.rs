//! Axis and face types.

use glam::{IVec3, Vec3};
use serde::{Deserialize, Serialize};

/// One of the three lattice axes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

impl Axis {
    /// All axes in meshing order.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Returns the `[0..3)` index of this axis.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Axis for an index, wrapping modulo 3.
    #[inline]
    pub const fn from_index(index: usize) -> Self {
        match index % 3 {
            0 => Self::X,
            1 => Self::Y,
            _ => Self::Z,
        }
    }

    /// The two tangent axes `(d+1) mod 3` and `(d+2) mod 3`.
    ///
    /// `self`, `u`, `v` always form a right-handed basis.
    #[inline]
    pub const fn tangents(self) -> (Self, Self) {
        let d = self.index();
        (Self::from_index(d + 1), Self::from_index(d + 2))
    }

    /// Unit vector along the axis.
    #[inline]
    pub fn unit(self) -> Vec3 {
        match self {
            Self::X => Vec3::X,
            Self::Y => Vec3::Y,
            Self::Z => Vec3::Z,
        }
    }

    /// Integer unit step along the axis.
    #[inline]
    pub fn step(self) -> IVec3 {
        match self {
            Self::X => IVec3::X,
            Self::Y => IVec3::Y,
            Self::Z => IVec3::Z,
        }
    }
}

/// One of the six faces of a cell: an axis plus the side along it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Face {
    /// Axis the face is perpendicular to.
    pub axis: Axis,
    /// `true` for the face on the `+axis` side.
    pub positive: bool,
}

impl Face {
    /// All six faces in meshing order: per axis, positive side first.
    pub const ALL: [Self; 6] = [
        Self::new(Axis::X, true),
        Self::new(Axis::X, false),
        Self::new(Axis::Y, true),
        Self::new(Axis::Y, false),
        Self::new(Axis::Z, true),
        Self::new(Axis::Z, false),
    ];

    #[inline]
    pub const fn new(axis: Axis, positive: bool) -> Self {
        Self { axis, positive }
    }

    /// Returns the `[0..6)` index of this face in [`Face::ALL`].
    #[inline]
    pub const fn index(self) -> usize {
        self.axis.index() * 2 + if self.positive { 0 } else { 1 }
    }

    /// `+1.0` on the positive side, `-1.0` on the negative side.
    #[inline]
    pub fn sign(self) -> f32 {
        if self.positive {
            1.0
        } else {
            -1.0
        }
    }

    /// Outward unit normal.
    #[inline]
    pub fn normal(self) -> Vec3 {
        self.axis.unit() * self.sign()
    }

    /// Integer offset to the neighbor across this face.
    #[inline]
    pub fn delta(self) -> IVec3 {
        if self.positive {
            self.axis.step()
        } else {
            -self.axis.step()
        }
    }

    /// The face on the other side of the same axis.
    #[inline]
    pub const fn opposite(self) -> Self {
        Self::new(self.axis, !self.positive)
    }
}
