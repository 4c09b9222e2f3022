//! Fixed-capacity point set used by the GJK algorithm.

use std::ops::Index;

use glam::Vec3;

/// Maximum number of points a 3D simplex can hold (tetrahedron).
pub const SIMPLEX_CAPACITY: usize = 4;

/// A 0- to 3-simplex stored inline, most recently pushed point first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Simplex {
    points: [Vec3; SIMPLEX_CAPACITY],
    len: usize,
}

impl Default for Simplex {
    fn default() -> Self {
        Self::new()
    }
}

impl Simplex {
    pub const fn new() -> Self {
        Self {
            points: [Vec3::ZERO; SIMPLEX_CAPACITY],
            len: 0,
        }
    }

    /// Prepend a point, dropping the oldest one once four are held.
    #[inline]
    pub fn push_front(&mut self, point: Vec3) {
        self.points = [point, self.points[0], self.points[1], self.points[2]];
        self.len = (self.len + 1).min(SIMPLEX_CAPACITY);
    }

    /// Replace the contents with `points`, in order.
    ///
    /// # Panics
    ///
    /// Panics if more than four points are given.
    #[inline]
    pub fn assign(&mut self, points: &[Vec3]) {
        assert!(
            points.len() <= SIMPLEX_CAPACITY,
            "simplex holds at most {SIMPLEX_CAPACITY} points, got {}",
            points.len()
        );
        self.points[..points.len()].copy_from_slice(points);
        for stale in &mut self.points[points.len()..] {
            *stale = Vec3::ZERO;
        }
        self.len = points.len();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn as_slice(&self) -> &[Vec3] {
        &self.points[..self.len]
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Vec3> {
        self.as_slice().iter()
    }

    /// Mean of the held points, or zero when empty.
    pub fn centroid(&self) -> Vec3 {
        if self.len == 0 {
            return Vec3::ZERO;
        }
        self.iter().copied().sum::<Vec3>() / self.len as f32
    }
}

impl Index<usize> for Simplex {
    type Output = Vec3;

    #[inline]
    fn index(&self, index: usize) -> &Vec3 {
        assert!(
            index < self.len,
            "simplex index {index} out of range for size {}",
            self.len
        );
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a Simplex {
    type Item = &'a Vec3;
    type IntoIter = std::slice::Iter<'a, Vec3>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
