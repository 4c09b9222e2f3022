//! Headless falling-box scene.
//!
//! Logging goes through env_logger, e.g. `RUST_LOG=debug tumble-app --ticks 120`.

use anyhow::Context;
use clap::Parser;
use glam::Vec3;
use tumble::ecs::bridge::{find_by_tag, spawn_game_object, GameObject};
use tumble::ecs::components::physics::{Body, Shape};
use tumble::ecs::components::transform::Transform;
use tumble::{PhysicsConfig, PhysicsWorld};

/// Drop a box onto a locked floor and log its pose every tick.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Number of physics ticks to run
    #[arg(short, long, default_value_t = 60)]
    ticks: u32,

    /// Vertical gravity acceleration per tick
    #[arg(short, long, default_value_t = -0.001, allow_negative_numbers = true)]
    gravity_y: f32,
}

impl Args {
    fn gravity(&self) -> Vec3 {
        Vec3::new(0.0, self.gravity_y, 0.0)
    }
}

fn build_scene(world: &mut hecs::World, gravity: Vec3) -> anyhow::Result<()> {
    spawn_game_object(
        world,
        GameObject::new(
            "box",
            Transform::from_translation(Vec3::new(0.0, 2.0, 0.0)),
            Body::new(Shape::cube(1.0)).with_gravity(gravity),
        )
        .with_color(Vec3::new(0.8, 0.3, 0.2)),
    );

    let floor_shape = Shape::new(100.0, 1.0, 1.0, 1.0)?;
    spawn_game_object(
        world,
        GameObject::new(
            "locked",
            Transform::from_translation(Vec3::new(0.0, -1.0, 0.0)),
            Body::new_locked(floor_shape),
        )
        .with_color(Vec3::splat(0.5)),
    );

    Ok(())
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut world = hecs::World::new();
    build_scene(&mut world, args.gravity())?;
    let falling = find_by_tag(&world, "box").context("scene has no box")?;

    let mut physics = PhysicsWorld::new(PhysicsConfig::default());
    for tick in 0..args.ticks {
        physics.tick(&mut world);

        let transform = world.get::<&Transform>(falling)?;
        let body = world.get::<&Body>(falling)?;
        log::info!(
            "tick {tick}: position {:?} velocity {:?} collisions {}",
            transform.translation,
            body.linear_velocity,
            physics.collisions().len()
        );
    }

    world.clear();
    Ok(())
}
