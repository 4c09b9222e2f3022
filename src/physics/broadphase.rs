//! Broadphase collision detection using AABB overlap tests.

use crate::ecs::components::physics::Body;
use crate::ecs::components::transform::Transform;
use crate::physics::collider::{MeshCollider, PhysicsAabb};

/// Broadphase bounds of a body: `translation ± width` on every axis.
///
/// `width` serves as the half-size on all three axes, which over-covers a
/// box collider of that full width.
#[inline]
pub fn body_aabb(transform: &Transform, body: &Body) -> PhysicsAabb {
    PhysicsAabb::from_center_half_size(transform.translation, body.shape().width)
}

/// Brute-force broadphase: every pair is tested, O(n^2).
#[derive(Debug, Default)]
pub struct AllPairsBroadphase {
    entries: Vec<(hecs::Entity, PhysicsAabb, bool)>,
}

impl AllPairsBroadphase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Find all pairs of entities whose AABBs overlap.
    ///
    /// Each unordered pair is reported once, lower query index first.
    /// Self-pairs never appear and pairs of two position-locked bodies are
    /// skipped.
    pub fn find_pairs(&mut self, world: &hecs::World) -> Vec<(hecs::Entity, hecs::Entity)> {
        self.entries.clear();
        for (entity, (transform, body, _)) in world
            .query::<(&Transform, &Body, &MeshCollider)>()
            .iter()
        {
            self.entries
                .push((entity, body_aabb(transform, body), body.position_lock));
        }

        let mut pairs = Vec::new();
        for i in 0..self.entries.len() {
            for j in (i + 1)..self.entries.len() {
                let (entity_a, aabb_a, locked_a) = &self.entries[i];
                let (entity_b, aabb_b, locked_b) = &self.entries[j];

                if entity_a == entity_b || (*locked_a && *locked_b) {
                    continue;
                }

                if aabb_a.overlaps(aabb_b) {
                    pairs.push((*entity_a, *entity_b));
                }
            }
        }

        tracing::trace!(
            bodies = self.entries.len(),
            pairs = pairs.len(),
            "broadphase"
        );
        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::bridge::{spawn_game_object, GameObject};
    use crate::ecs::components::physics::Shape;
    use crate::physics::narrowphase::gjk;
    use glam::Vec3;

    fn spawn_cube(world: &mut hecs::World, position: Vec3, body: Body) -> hecs::Entity {
        spawn_game_object(
            world,
            GameObject::new("cube", Transform::from_translation(position), body),
        )
    }

    #[test]
    fn test_broadphase_overlapping() {
        let mut world = hecs::World::new();
        spawn_cube(&mut world, Vec3::ZERO, Body::new(Shape::cube(1.0)));
        spawn_cube(&mut world, Vec3::new(1.5, 0.0, 0.0), Body::new(Shape::cube(1.0)));

        let pairs = AllPairsBroadphase::new().find_pairs(&world);
        assert_eq!(pairs.len(), 1);
        assert_ne!(pairs[0].0, pairs[0].1);
    }

    #[test]
    fn test_broadphase_no_overlap() {
        let mut world = hecs::World::new();
        spawn_cube(&mut world, Vec3::ZERO, Body::new(Shape::cube(1.0)));
        spawn_cube(&mut world, Vec3::new(10.0, 0.0, 0.0), Body::new(Shape::cube(1.0)));

        assert!(AllPairsBroadphase::new().find_pairs(&world).is_empty());
    }

    #[test]
    fn test_broadphase_locked_pair_skipped() {
        let mut world = hecs::World::new();
        spawn_cube(&mut world, Vec3::ZERO, Body::new_locked(Shape::cube(1.0)));
        spawn_cube(&mut world, Vec3::ZERO, Body::new_locked(Shape::cube(1.0)));

        assert!(AllPairsBroadphase::new().find_pairs(&world).is_empty());
    }

    #[test]
    fn test_broadphase_each_pair_once() {
        let mut world = hecs::World::new();
        for i in 0..4 {
            spawn_cube(
                &mut world,
                Vec3::new(i as f32 * 0.1, 0.0, 0.0),
                Body::new(Shape::cube(1.0)),
            );
        }

        let pairs = AllPairsBroadphase::new().find_pairs(&world);
        assert_eq!(pairs.len(), 6);
        for (i, (a, b)) in pairs.iter().enumerate() {
            assert_ne!(a, b);
            for (c, d) in &pairs[i + 1..] {
                assert!(!(a == c && b == d) && !(a == d && b == c));
            }
        }
    }

    #[test]
    fn test_broadphase_sound_against_gjk() {
        let body = Body::new(Shape::cube(1.0));
        let origin = Transform::identity();
        let mut a = MeshCollider::from_shape(body.shape());
        a.update_world_vertices(origin.translation);

        for ix in -6..=6 {
            for iy in -6..=6 {
                let offset = Vec3::new(ix as f32 * 0.25, iy as f32 * 0.25, 0.1);
                let other = Transform::from_translation(offset);
                let mut b = MeshCollider::from_shape(body.shape());
                b.update_world_vertices(offset);

                if gjk(&a, &b).unwrap().colliding {
                    assert!(
                        body_aabb(&origin, &body).overlaps(&body_aabb(&other, &body)),
                        "broadphase missed colliding pair at {offset}"
                    );
                }
            }
        }
    }
}
