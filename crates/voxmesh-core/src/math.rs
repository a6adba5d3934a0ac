//! Bounding boxes for emitted geometry.

use glam::Vec3;

/// Axis-aligned box spanned by the vertices of a mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    #[inline]
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Degenerate box around a single point.
    #[inline]
    pub const fn from_point(point: Vec3) -> Self {
        Self::new(point, point)
    }

    /// Smallest box containing all points, or `None` for an empty iterator.
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = Self::from_point(points.next()?);
        Some(points.fold(first, |mut bounds, point| {
            bounds.grow(point);
            bounds
        }))
    }

    /// Grow the box until it covers `point`.
    #[inline]
    pub fn grow(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    #[inline]
    pub fn center(&self) -> Vec3 {
        self.min.lerp(self.max, 0.5)
    }

    /// Edge lengths along each axis.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}
