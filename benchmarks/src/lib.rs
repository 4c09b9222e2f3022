//! Scene setup shared by the physics benchmarks.

use glam::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tumble::ecs::bridge::{spawn_game_object, GameObject};
use tumble::ecs::components::physics::{Body, Shape};
use tumble::ecs::components::transform::Transform;
use tumble::physics::collider::MeshCollider;
use tumble::{PhysicsConfig, PhysicsWorld};

pub const GRAVITY: Vec3 = Vec3::new(0.0, -0.001, 0.0);

/// Uniform point in the axis-aligned cube `[-half_extent, half_extent]^3`.
pub fn random_in_cube(rng: &mut impl Rng, half_extent: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-half_extent..=half_extent),
        rng.gen_range(-half_extent..=half_extent),
        rng.gen_range(-half_extent..=half_extent),
    )
}

/// Unit cubes scattered in a region sized so that roughly a few neighbours overlap.
pub fn setup_box_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let mut rng = StdRng::seed_from_u64(42);
    let extent = (n as f32).cbrt() * 1.5;
    for _ in 0..n {
        spawn_game_object(
            &mut world,
            GameObject::new(
                "box",
                Transform::from_translation(random_in_cube(&mut rng, extent)),
                Body::new(Shape::cube(1.0)).with_gravity(GRAVITY),
            ),
        );
    }
    world
}

/// Same as [`setup_box_world`] but spread far apart, so the broadphase rejects almost everything.
pub fn setup_sparse_world(n: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let mut rng = StdRng::seed_from_u64(7);
    let extent = (n as f32).cbrt() * 20.0;
    for _ in 0..n {
        spawn_game_object(
            &mut world,
            GameObject::new(
                "box",
                Transform::from_translation(random_in_cube(&mut rng, extent)),
                Body::new(Shape::cube(1.0)),
            ),
        );
    }
    world
}

/// `n` falling boxes above a row of locked floor tiles.
pub fn setup_scene(n: usize) -> (hecs::World, PhysicsWorld) {
    let mut world = setup_box_world(n);
    let tiles = (n as f32).sqrt().ceil() as i32;
    for x in -tiles..=tiles {
        for z in -tiles..=tiles {
            spawn_game_object(
                &mut world,
                GameObject::new(
                    "locked",
                    Transform::from_translation(Vec3::new(x as f32, -20.0, z as f32)),
                    Body::new_locked(Shape::cube(1.0)),
                ),
            );
        }
    }
    (world, PhysicsWorld::new(PhysicsConfig::default()))
}

/// Pair of world-space cube colliders whose centres are `offset` apart.
pub fn cube_pair(offset: Vec3) -> (MeshCollider, MeshCollider) {
    let mut a = MeshCollider::cuboid(Vec3::splat(0.5));
    let mut b = MeshCollider::cuboid(Vec3::splat(0.5));
    a.update_world_vertices(Vec3::ZERO);
    b.update_world_vertices(offset);
    (a, b)
}

/// Convex point cloud sampled on a sphere, centred at `center`.
pub fn sphere_cloud(center: Vec3, radius: f32, points: usize) -> anyhow::Result<MeshCollider> {
    anyhow::ensure!(points > 0, "point cloud needs at least one point");
    let mut rng = StdRng::seed_from_u64(points as u64);
    let mut vertices = Vec::with_capacity(points);
    while vertices.len() < points {
        if let Some(dir) = random_in_cube(&mut rng, 1.0).try_normalize() {
            vertices.push(dir * radius);
        }
    }
    let mut collider = MeshCollider::new(vertices);
    collider.update_world_vertices(center);
    Ok(collider)
}
