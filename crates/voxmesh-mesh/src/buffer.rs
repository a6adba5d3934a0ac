//! The flat triangle buffer shared by every extraction strategy.
//!
//! A [`MeshBuffer`] is an ordered run of `f32`s grouped as
//! `(v0.x, v0.y, v0.z, v1.x, v1.y, v1.z, v2.x, v2.y, v2.z)` per triangle. No
//! normal is stored: the vertex order of each triangle is its facing.

use glam::Vec3;
use voxmesh_core::constants::{FLOATS_PER_TRIANGLE, FLOATS_PER_VERTEX};
use voxmesh_core::{Aabb, Error, Result};

/// A single triangle, in winding order.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Triangle {
    pub v0: Vec3,
    pub v1: Vec3,
    pub v2: Vec3,
}

impl Triangle {
    #[inline]
    pub const fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Build from 9 consecutive floats.
    #[inline]
    fn from_floats(f: &[f32]) -> Self {
        Self {
            v0: Vec3::new(f[0], f[1], f[2]),
            v1: Vec3::new(f[3], f[4], f[5]),
            v2: Vec3::new(f[6], f[7], f[8]),
        }
    }

    #[inline]
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Unnormalized winding normal `(v1 - v0) x (v2 - v0)`.
    #[inline]
    pub fn normal(&self) -> Vec3 {
        (self.v1 - self.v0).cross(self.v2 - self.v0)
    }

    /// Unit winding normal, or zero for a degenerate triangle.
    #[inline]
    pub fn unit_normal(&self) -> Vec3 {
        self.normal().normalize_or_zero()
    }

    #[inline]
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }
}

/// Destination for emitted triangles.
///
/// Implemented by [`MeshBuffer`] (flat output) and `Vec<Triangle>`
/// (structured output) so one meshing pass can feed either format.
pub trait TriangleSink {
    fn push_triangle(&mut self, triangle: Triangle);

    /// Hint that `additional` more triangles are coming.
    fn reserve_triangles(&mut self, _additional: usize) {}
}

impl TriangleSink for Vec<Triangle> {
    #[inline]
    fn push_triangle(&mut self, triangle: Triangle) {
        self.push(triangle);
    }

    fn reserve_triangles(&mut self, additional: usize) {
        self.reserve(additional);
    }
}

/// Flat, ordered triangle positions. Length is always a multiple of 9.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshBuffer {
    data: Vec<f32>,
}

impl MeshBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffer with room for `triangles` triangles.
    pub fn with_triangle_capacity(triangles: usize) -> Self {
        Self {
            data: Vec::with_capacity(triangles * FLOATS_PER_TRIANGLE),
        }
    }

    /// Wrap an existing float vector; fails unless it holds whole triangles.
    pub fn from_vec(data: Vec<f32>) -> Result<Self> {
        if data.len() % FLOATS_PER_TRIANGLE != 0 {
            return Err(Error::InvalidBuffer { len: data.len() });
        }
        Ok(Self { data })
    }

    #[inline]
    pub fn push_triangle(&mut self, triangle: Triangle) {
        for v in triangle.vertices() {
            self.data.extend_from_slice(&v.to_array());
        }
    }

    /// Move every triangle of `other` to the end of this buffer.
    pub fn append(&mut self, other: &mut MeshBuffer) {
        self.data.append(&mut other.data);
    }

    /// Number of floats.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.data.len() / FLOATS_PER_TRIANGLE
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.data.len() / FLOATS_PER_VERTEX
    }

    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Native-endian byte view, ready for a vertex buffer upload.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.data)
    }

    /// Give up the buffer as a plain vector.
    #[inline]
    pub fn into_vec(self) -> Vec<f32> {
        self.data
    }

    /// Structured view of the triangles, in buffer order.
    pub fn triangles(&self) -> impl ExactSizeIterator<Item = Triangle> + '_ {
        self.data
            .chunks_exact(FLOATS_PER_TRIANGLE)
            .map(Triangle::from_floats)
    }

    /// Convert to the structured-list format.
    pub fn into_triangles(self) -> Vec<Triangle> {
        self.triangles().collect()
    }

    /// Replay every triangle into another sink.
    pub fn write_into<S: TriangleSink + ?Sized>(&self, sink: &mut S) {
        sink.reserve_triangles(self.triangle_count());
        for triangle in self.triangles() {
            sink.push_triangle(triangle);
        }
    }

    /// Bounds of all vertices, or `None` when empty.
    pub fn bounds(&self) -> Option<Aabb> {
        Aabb::from_points(
            self.data
                .chunks_exact(FLOATS_PER_VERTEX)
                .map(Vec3::from_slice),
        )
    }
}

impl TriangleSink for MeshBuffer {
    #[inline]
    fn push_triangle(&mut self, triangle: Triangle) {
        MeshBuffer::push_triangle(self, triangle);
    }

    fn reserve_triangles(&mut self, additional: usize) {
        self.data.reserve(additional * FLOATS_PER_TRIANGLE);
    }
}

impl From<MeshBuffer> for Vec<f32> {
    fn from(buffer: MeshBuffer) -> Self {
        buffer.data
    }
}
