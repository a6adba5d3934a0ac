//! Quad construction and triangulation.
//!
//! A quad is centered on a cell face. Its tangents are `V0` along axis
//! `(d+1) mod 3` and `V1` along `(d+2) mod 3`, each of half the quad size, with
//! `V0` negated on the negative side. The corners are
//! `C+V0+V1, C-V0+V1, C+V0-V1, C-V0-V1` and the fixed diagonal split is
//! `(0, 1, 2)` and `(1, 3, 2)`. With that sign convention both triangles wind
//! counter-clockwise when seen from outside the cell, so `(v1-v0) x (v2-v0)`
//! points along the face's outward normal.

use glam::Vec3;
use voxmesh_core::{Axis, Face};

use crate::buffer::{Triangle, TriangleSink};

/// Corner indices of the two triangles of a quad.
pub const QUAD_TRIANGLES: [[usize; 3]; 2] = [[0, 1, 2], [1, 3, 2]];

/// A square face patch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Quad {
    /// Center of the patch.
    pub center: Vec3,
    /// Which face the patch covers; decides the facing.
    pub face: Face,
    /// Edge length.
    pub size: f32,
}

impl Quad {
    #[inline]
    pub const fn new(center: Vec3, face: Face, size: f32) -> Self {
        Self { center, face, size }
    }

    /// The quad covering `face` of a cube of edge `size` centered at `cell_center`.
    #[inline]
    pub fn on_cell(cell_center: Vec3, face: Face, size: f32) -> Self {
        Self::new(cell_center + face.normal() * (size * 0.5), face, size)
    }

    /// The four corners, in construction order.
    pub fn corners(&self) -> [Vec3; 4] {
        let half = self.size * 0.5;
        let (u, v) = self.face.axis.tangents();
        let v0 = u.unit() * (half * self.face.sign());
        let v1 = v.unit() * half;
        let c = self.center;
        [c + v0 + v1, c - v0 + v1, c + v0 - v1, c - v0 - v1]
    }

    /// The two outward-wound triangles.
    pub fn triangles(&self) -> [Triangle; 2] {
        let corners = self.corners();
        QUAD_TRIANGLES.map(|[a, b, c]| Triangle::new(corners[a], corners[b], corners[c]))
    }

    /// Append both triangles to a sink.
    #[inline]
    pub fn emit<S: TriangleSink + ?Sized>(&self, sink: &mut S) {
        let [first, second] = self.triangles();
        sink.push_triangle(first);
        sink.push_triangle(second);
    }
}

/// Emit the quad centered at `center` on the `positive` or negative side of `axis`.
#[inline]
pub fn emit_quad<S: TriangleSink + ?Sized>(
    sink: &mut S,
    center: Vec3,
    axis: Axis,
    positive: bool,
    size: f32,
) {
    Quad::new(center, Face::new(axis, positive), size).emit(sink);
}
