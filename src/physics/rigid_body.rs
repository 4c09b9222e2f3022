//! Rigid body integration functions.
//!
//! Velocities are per tick, so there is no `dt`: one call advances one tick.

use glam::Vec3;

use crate::ecs::components::physics::Body;
use crate::ecs::components::transform::Transform;
use crate::physics::collider::MeshCollider;

/// Rebuild every collider's world vertices from its entity's translation.
pub fn refresh_colliders(world: &mut hecs::World) {
    for (_, (transform, collider)) in world.query_mut::<(&Transform, &mut MeshCollider)>() {
        collider.update_world_vertices(transform.translation);
    }
}

/// Advance one body and its pose by a single tick.
///
/// Position-locked bodies have both velocities zeroed and keep their pose.
pub fn integrate_body(body: &mut Body, transform: &mut Transform, angular_drag_multiplier: f32) {
    if body.position_lock {
        body.stop();
        return;
    }

    let force = body.weight() + body.contact_force;
    body.compute_force_and_torque(force, body.application_point());
    body.compute_linear_acceleration();
    body.apply_drag();
    body.compute_angular_acceleration(angular_drag_multiplier);

    transform.translation += body.linear_velocity;

    if body.rotation_lock {
        body.angular_velocity = Vec3::ZERO;
    } else {
        transform.rotation += body.angular_velocity;
    }
}

/// Integrate every entity carrying a `Body` and a `Transform`.
pub fn integrate_bodies(world: &mut hecs::World, angular_drag_multiplier: f32) {
    for (_, (body, transform)) in world.query_mut::<(&mut Body, &mut Transform)>() {
        integrate_body(body, transform, angular_drag_multiplier);
    }
}

/// Drop the contact forces queued by collision resolution.
pub fn clear_contact_forces(world: &mut hecs::World) {
    for (_, body) in world.query_mut::<&mut Body>() {
        body.contact_force = Vec3::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::components::physics::Shape;
    use crate::ecs::components::transform::GlobalTransform;
    use crate::physics::collider::SupportMap;

    #[test]
    fn test_free_fall() {
        let mut world = hecs::World::new();
        let entity = world.spawn((
            Transform::from_translation(Vec3::new(0.0, 10.0, 0.0)),
            GlobalTransform::default(),
            Body::new(Shape::cube(1.0)).with_gravity(Vec3::new(0.0, -0.01, 0.0)),
        ));

        for _ in 0..10 {
            integrate_bodies(&mut world, 0.98);
            clear_contact_forces(&mut world);
        }

        let transform = world.get::<&Transform>(entity).unwrap();
        let body = world.get::<&Body>(entity).unwrap();

        // v_n = -0.01 n, y = 10 - 0.01 * n (n + 1) / 2
        assert!((body.linear_velocity.y + 0.1).abs() < 1e-5);
        assert!((transform.translation.y - 9.45).abs() < 1e-4);
        assert!(transform.translation.x.abs() < 1e-6);
        assert!(transform.translation.z.abs() < 1e-6);
        // Gravity through the top-centre produces no torque.
        assert_eq!(transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_locked_body_unaffected() {
        let mut world = hecs::World::new();
        let mut body = Body::new_locked(Shape::cube(1.0))
            .with_gravity(Vec3::new(0.0, -1.0, 0.0))
            .with_velocity(Vec3::ONE);
        body.angular_velocity = Vec3::splat(5.0);
        let entity = world.spawn((Transform::from_translation(Vec3::Y), body));

        for _ in 0..5 {
            integrate_bodies(&mut world, 0.98);
        }

        let transform = world.get::<&Transform>(entity).unwrap();
        let body = world.get::<&Body>(entity).unwrap();
        assert_eq!(transform.translation, Vec3::Y);
        assert_eq!(transform.rotation, Vec3::ZERO);
        assert_eq!(body.linear_velocity, Vec3::ZERO);
        assert_eq!(body.angular_velocity, Vec3::ZERO);
    }

    #[test]
    fn test_contact_force_cancels_gravity() {
        let mut body = Body::new(Shape::new(2.0, 1.0, 1.0, 1.0).unwrap())
            .with_gravity(Vec3::new(0.0, -0.001, 0.0));
        body.contact_force = -body.weight();
        let mut transform = Transform::identity();

        integrate_body(&mut body, &mut transform, 0.98);

        assert_eq!(body.linear_velocity, Vec3::ZERO);
        assert_eq!(transform.translation, Vec3::ZERO);
    }

    #[test]
    fn test_rotation_integrates_in_degrees() {
        let mut body = Body::default();
        body.angular_velocity = Vec3::new(0.0, 2.0, 0.0);
        let mut transform = Transform::identity();

        integrate_body(&mut body, &mut transform, 0.98);
        integrate_body(&mut body, &mut transform, 0.98);

        assert_eq!(transform.rotation, Vec3::new(0.0, 4.0, 0.0));
    }

    #[test]
    fn test_rotation_lock_zeroes_spin() {
        let mut body = Body::default();
        body.angular_velocity = Vec3::new(0.0, 2.0, 0.0);
        body.rotation_lock = true;
        let mut transform = Transform::identity();

        integrate_body(&mut body, &mut transform, 0.98);

        assert_eq!(body.angular_velocity, Vec3::ZERO);
        assert_eq!(transform.rotation, Vec3::ZERO);
    }

    #[test]
    fn test_refresh_colliders() {
        let mut world = hecs::World::new();
        let entity = world.spawn((
            Transform::from_translation(Vec3::new(3.0, 0.0, 0.0)),
            MeshCollider::cuboid(Vec3::splat(0.5)),
        ));

        refresh_colliders(&mut world);

        let collider = world.get::<&MeshCollider>(entity).unwrap();
        let right = collider.find_furthest_point(Vec3::X).unwrap();
        assert!((right.x - 3.5).abs() < 1e-6);
    }

    #[test]
    fn test_clear_contact_forces() {
        let mut world = hecs::World::new();
        let entity = world.spawn((Transform::identity(), {
            let mut body = Body::default();
            body.contact_force = Vec3::new(1.0, 2.0, 3.0);
            body
        }));

        clear_contact_forces(&mut world);

        let body = world.get::<&Body>(entity).unwrap();
        assert_eq!(body.contact_force, Vec3::ZERO);
    }
}
