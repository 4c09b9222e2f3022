//! Collider shapes and their support functions.

use glam::Vec3;

use crate::ecs::components::physics::Shape;
use crate::error::{PhysicsError, Result};

/// Axis-aligned bounding box for broadphase collision detection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsAabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl PhysicsAabb {
    /// Box spanning `center ± half_size` on every axis.
    #[inline]
    pub fn from_center_half_size(center: Vec3, half_size: f32) -> Self {
        let half = Vec3::splat(half_size.abs());
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Tight bounds of a point set. `None` for an empty set.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self {
            min: *first,
            max: *first,
        };
        for p in rest {
            aabb.min = aabb.min.min(*p);
            aabb.max = aabb.max.max(*p);
        }
        Some(aabb)
    }

    /// Test whether two AABBs overlap. Touching boxes count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &PhysicsAabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

/// Anything that can answer "which of your points lies furthest along `direction`".
///
/// The direction need not be normalized. GJK only ever talks to shapes
/// through this trait.
pub trait SupportMap {
    fn find_furthest_point(&self, direction: Vec3) -> Result<Vec3>;
}

/// Support point of the Minkowski difference `a - b`.
#[inline]
pub fn minkowski_support<A, B>(a: &A, b: &B, direction: Vec3) -> Result<Vec3>
where
    A: SupportMap + ?Sized,
    B: SupportMap + ?Sized,
{
    Ok(a.find_furthest_point(direction)? - b.find_furthest_point(-direction)?)
}

/// Linear scan for the vertex with the largest projection on `direction`.
/// The first maximal vertex wins.
#[inline]
fn furthest_vertex(vertices: &[Vec3], direction: Vec3) -> Result<Vec3> {
    let (first, rest) = vertices
        .split_first()
        .ok_or(PhysicsError::EmptyCollider)?;
    let mut best = *first;
    let mut best_dot = best.dot(direction);
    for v in rest {
        let d = v.dot(direction);
        if d > best_dot {
            best_dot = d;
            best = *v;
        }
    }
    Ok(best)
}

/// Vertex-based collider attached to a game object.
///
/// Holds body-local offsets supplied at scene construction and the
/// world-space vertex list derived from them every tick.
#[derive(Debug, Clone, Default)]
pub struct MeshCollider {
    local_vertices: Vec<Vec3>,
    world_vertices: Vec<Vec3>,
}

impl MeshCollider {
    /// Create a collider from body-local vertex offsets. World vertices start
    /// out equal to the offsets (object at the origin).
    pub fn new(local_vertices: Vec<Vec3>) -> Self {
        Self {
            world_vertices: local_vertices.clone(),
            local_vertices,
        }
    }

    /// The eight corners of a box with the given half extents.
    pub fn cuboid(half_extents: Vec3) -> Self {
        let h = half_extents.abs();
        let mut corners = Vec::with_capacity(8);
        for x in [-h.x, h.x] {
            for y in [-h.y, h.y] {
                for z in [-h.z, h.z] {
                    corners.push(Vec3::new(x, y, z));
                }
            }
        }
        Self::new(corners)
    }

    /// Box collider whose full extents match the shape's width, height and depth.
    pub fn from_shape(shape: &Shape) -> Self {
        Self::cuboid(Vec3::new(shape.width, shape.height, shape.depth) * 0.5)
    }

    pub fn local_vertices(&self) -> &[Vec3] {
        &self.local_vertices
    }

    pub fn world_vertices(&self) -> &[Vec3] {
        &self.world_vertices
    }

    /// Replace the body-local offsets. World vertices restart at the offsets
    /// until the next `update_world_vertices`.
    pub fn set_local_vertices(&mut self, vertices: Vec<Vec3>) {
        self.local_vertices = vertices;
        self.world_vertices.clear();
        self.world_vertices.extend_from_slice(&self.local_vertices);
    }

    /// Recompute world vertices as `local + translation`.
    ///
    /// Rotation and scale of the owning object are not applied.
    pub fn update_world_vertices(&mut self, translation: Vec3) {
        self.world_vertices.clear();
        self.world_vertices
            .extend(self.local_vertices.iter().map(|v| *v + translation));
    }

    /// World-space bounds of the current vertices.
    pub fn aabb(&self) -> Option<PhysicsAabb> {
        PhysicsAabb::from_points(&self.world_vertices)
    }

    pub fn is_empty(&self) -> bool {
        self.world_vertices.is_empty()
    }
}

impl SupportMap for MeshCollider {
    #[inline]
    fn find_furthest_point(&self, direction: Vec3) -> Result<Vec3> {
        furthest_vertex(&self.world_vertices, direction)
    }
}

/// Borrowed world-space point set.
#[derive(Debug, Clone, Copy)]
pub struct PointCloud<'a>(pub &'a [Vec3]);

impl SupportMap for PointCloud<'_> {
    #[inline]
    fn find_furthest_point(&self, direction: Vec3) -> Result<Vec3> {
        furthest_vertex(self.0, direction)
    }
}

/// Analytic sphere in world space.
#[derive(Debug, Clone, Copy)]
pub struct SphereCollider {
    pub center: Vec3,
    pub radius: f32,
}

impl SupportMap for SphereCollider {
    #[inline]
    fn find_furthest_point(&self, direction: Vec3) -> Result<Vec3> {
        Ok(self.center + direction.normalize_or_zero() * self.radius)
    }
}

/// Analytic axis-aligned box in world space.
#[derive(Debug, Clone, Copy)]
pub struct CuboidCollider {
    pub center: Vec3,
    pub half_extents: Vec3,
}

impl SupportMap for CuboidCollider {
    #[inline]
    fn find_furthest_point(&self, direction: Vec3) -> Result<Vec3> {
        let h = self.half_extents;
        Ok(self.center
            + Vec3::new(
                if direction.x >= 0.0 { h.x } else { -h.x },
                if direction.y >= 0.0 { h.y } else { -h.y },
                if direction.z >= 0.0 { h.z } else { -h.z },
            ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_points() -> Vec<Vec3> {
        vec![
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(-2.0, 1.0, 0.0),
            Vec3::new(0.0, 3.0, -1.0),
            Vec3::new(0.5, -4.0, 2.0),
        ]
    }

    #[test]
    fn test_furthest_point_is_maximal() {
        let collider = MeshCollider::new(sample_points());
        let directions = [
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(-3.0, 0.5, 7.0),
        ];

        for dir in directions {
            let best = collider.find_furthest_point(dir).unwrap();
            for p in collider.world_vertices() {
                assert!(best.dot(dir) >= p.dot(dir), "dir {dir}: {best} < {p}");
            }
        }
    }

    #[test]
    fn test_furthest_point_first_tie_wins() {
        let points = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(1.0, 5.0, 0.0)];
        let best = PointCloud(&points).find_furthest_point(Vec3::X).unwrap();
        assert_eq!(best, points[0]);
    }

    #[test]
    fn test_empty_collider_is_error() {
        let collider = MeshCollider::default();
        assert_eq!(
            collider.find_furthest_point(Vec3::X),
            Err(PhysicsError::EmptyCollider)
        );
        assert!(minkowski_support(&collider, &MeshCollider::cuboid(Vec3::ONE), Vec3::X).is_err());
    }

    #[test]
    fn test_minkowski_support() {
        let a = MeshCollider::cuboid(Vec3::splat(0.5));
        let mut b = MeshCollider::cuboid(Vec3::splat(0.5));
        b.update_world_vertices(Vec3::new(3.0, 0.0, 0.0));

        let s = minkowski_support(&a, &b, Vec3::X).unwrap();
        // a's +x face (0.5) minus b's -x face (2.5)
        assert!((s.x - (-2.0)).abs() < 1e-6);
    }

    #[test]
    fn test_update_world_vertices() {
        let mut collider = MeshCollider::cuboid(Vec3::splat(0.5));
        collider.update_world_vertices(Vec3::new(0.0, 10.0, 0.0));

        let aabb = collider.aabb().unwrap();
        let eps = 1e-6;
        assert!((aabb.min - Vec3::new(-0.5, 9.5, -0.5)).length() < eps);
        assert!((aabb.max - Vec3::new(0.5, 10.5, 0.5)).length() < eps);
        assert_eq!(collider.local_vertices().len(), 8);

        // Offsets are not accumulated across updates.
        collider.update_world_vertices(Vec3::new(0.0, 10.0, 0.0));
        assert!((collider.aabb().unwrap().max - Vec3::new(0.5, 10.5, 0.5)).length() < eps);
    }

    #[test]
    fn test_set_local_vertices_resets_world() {
        let mut collider = MeshCollider::cuboid(Vec3::splat(0.5));
        collider.update_world_vertices(Vec3::new(5.0, 0.0, 0.0));

        collider.set_local_vertices(vec![Vec3::Y, Vec3::NEG_Y]);
        assert_eq!(collider.local_vertices(), &[Vec3::Y, Vec3::NEG_Y]);
        assert_eq!(collider.world_vertices(), &[Vec3::Y, Vec3::NEG_Y]);

        collider.update_world_vertices(Vec3::new(5.0, 0.0, 0.0));
        let top = collider.find_furthest_point(Vec3::Y).unwrap();
        assert_eq!(top, Vec3::new(5.0, 1.0, 0.0));
    }

    #[test]
    fn test_from_shape_extents() {
        let shape = Shape::new(1.0, 2.0, 4.0, 6.0).unwrap();
        let aabb = MeshCollider::from_shape(&shape).aabb().unwrap();
        assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
    }

    #[test]
    fn test_sphere_support() {
        let sphere = SphereCollider {
            center: Vec3::new(0.0, 5.0, 0.0),
            radius: 2.0,
        };
        let support = sphere.find_furthest_point(Vec3::new(0.0, 10.0, 0.0)).unwrap();
        assert!((support - Vec3::new(0.0, 7.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_cuboid_support() {
        let cuboid = CuboidCollider {
            center: Vec3::ONE,
            half_extents: Vec3::new(1.0, 2.0, 3.0),
        };
        let support = cuboid.find_furthest_point(Vec3::new(-1.0, 1.0, -1.0)).unwrap();
        assert_eq!(support, Vec3::new(0.0, 3.0, -2.0));
    }

    #[test]
    fn test_aabb_overlap() {
        let a = PhysicsAabb::from_center_half_size(Vec3::ZERO, 1.0);
        let b = PhysicsAabb::from_center_half_size(Vec3::splat(1.5), 1.0);
        let c = PhysicsAabb::from_center_half_size(Vec3::splat(2.5), 0.4);
        let touching = PhysicsAabb::from_center_half_size(Vec3::new(2.0, 0.0, 0.0), 1.0);

        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&c));
        assert!(a.overlaps(&touching));
    }

    #[test]
    fn test_aabb_from_points_empty() {
        assert!(PhysicsAabb::from_points(&[]).is_none());
    }
}
