//! CPU physics core: GJK collision detection and per-tick rigid body integration.
//!
//! # Architecture
//!
//! Every tick runs these stages over the ECS world:
//!
//! 1. Refresh world-space collider vertices from translations
//! 2. Broadphase collision detection (all-pairs AABB overlap)
//! 3. Narrowphase collision detection (GJK, both orderings)
//! 4. Heuristic resolution (velocity blending, stop on immovable objects)
//! 5. Integrate forces, velocities and poses
//! 6. Synchronize transforms
//! 7. Clear contact forces
//!
//! Velocities are per tick. [`PhysicsWorld::step`] maps wall-clock time onto
//! whole ticks with a fixed timestep accumulator.

pub mod broadphase;
pub mod collider;
pub mod narrowphase;
pub mod resolution;
pub mod rigid_body;
pub mod simplex;

use glam::Vec3;

use crate::ecs::components::physics::{Body, Tag};
use crate::ecs::systems::transform_system;
use crate::error::Result;

use self::broadphase::AllPairsBroadphase;
use self::collider::MeshCollider;
use self::narrowphase::{detect_collision, PairContact, DEFAULT_MAX_ITERATIONS};
use self::resolution::{resolve, Adjustment, ContactSide, ResolutionStrategy};

/// Configuration for the physics simulation.
#[derive(Debug, Clone)]
pub struct PhysicsConfig {
    /// Wall-clock length of one tick in seconds, used by [`PhysicsWorld::step`]. Default: 1/60.
    pub fixed_timestep: f64,
    /// Maximum number of ticks per `step` call. Default: 4.
    pub max_substeps: u32,
    /// GJK iteration bound per query. Default: 64.
    pub gjk_max_iterations: usize,
    /// Scale applied to angular acceleration each tick. Default: 0.98.
    pub angular_drag_multiplier: f32,
    /// Speed added along the separation normal per collision. Default: 0.001.
    pub push_apart_strength: f32,
    /// Tags whose objects behave as immovable in resolution. Default: `["locked"]`.
    pub immovable_tags: Vec<String>,
    pub resolution: ResolutionStrategy,
}

impl PhysicsConfig {
    pub fn is_immovable_tag(&self, tag: &str) -> bool {
        self.immovable_tags.iter().any(|t| t == tag)
    }
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            fixed_timestep: 1.0 / 60.0,
            max_substeps: 4,
            gjk_max_iterations: DEFAULT_MAX_ITERATIONS,
            angular_drag_multiplier: 0.98,
            push_apart_strength: 0.001,
            immovable_tags: vec!["locked".to_string()],
            resolution: ResolutionStrategy::default(),
        }
    }
}

/// A pair the narrowphase reported as colliding during the last tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub entity_a: hecs::Entity,
    pub entity_b: hecs::Entity,
    /// GJK centroid with `entity_a` as the first shape.
    pub centroid_a: Vec3,
    /// GJK centroid with `entity_b` as the first shape.
    pub centroid_b: Vec3,
}

impl CollisionEvent {
    pub fn involves(&self, entity: hecs::Entity) -> bool {
        self.entity_a == entity || self.entity_b == entity
    }
}

/// The main physics world managing simulation state.
pub struct PhysicsWorld {
    config: PhysicsConfig,
    accumulator: f64,
    broadphase: AllPairsBroadphase,
    collisions: Vec<CollisionEvent>,
}

impl PhysicsWorld {
    /// Create a new physics world with the given configuration.
    pub fn new(config: PhysicsConfig) -> Self {
        Self {
            config,
            accumulator: 0.0,
            broadphase: AllPairsBroadphase::new(),
            collisions: Vec::new(),
        }
    }

    pub fn config(&self) -> &PhysicsConfig {
        &self.config
    }

    /// Collisions found by the most recent tick.
    pub fn collisions(&self) -> &[CollisionEvent] {
        &self.collisions
    }

    /// Advance the simulation by `delta_time` seconds of wall-clock time.
    ///
    /// Runs whole ticks of `fixed_timestep`, at most `max_substeps` of them,
    /// and returns how many ran.
    pub fn step(&mut self, world: &mut hecs::World, delta_time: f64) -> u32 {
        self.accumulator += delta_time;

        let mut substeps = 0u32;
        while self.accumulator >= self.config.fixed_timestep && substeps < self.config.max_substeps
        {
            self.tick(world);
            self.accumulator -= self.config.fixed_timestep;
            substeps += 1;
        }

        // Drop the backlog instead of trying to catch up later
        if self.accumulator > self.config.fixed_timestep * self.config.max_substeps as f64 {
            tracing::debug!(backlog = self.accumulator, "dropping physics backlog");
            self.accumulator = 0.0;
        }

        substeps
    }

    /// Run one simulation tick.
    pub fn tick(&mut self, world: &mut hecs::World) {
        // 1. Refresh colliders
        rigid_body::refresh_colliders(world);

        // 2. Broadphase collision detection
        let pairs = self.broadphase.find_pairs(world);

        // 3. Narrowphase collision detection
        self.collisions.clear();
        for &(entity_a, entity_b) in &pairs {
            match self.narrow_phase(world, entity_a, entity_b) {
                Ok(Some(contact)) => self.collisions.push(CollisionEvent {
                    entity_a,
                    entity_b,
                    centroid_a: contact.centroid_a,
                    centroid_b: contact.centroid_b,
                }),
                Ok(None) => {}
                Err(err) => tracing::warn!(
                    %err,
                    entity_a = entity_a.id(),
                    entity_b = entity_b.id(),
                    "skipping collision pair"
                ),
            }
        }

        // 4. Resolve collisions
        self.resolve_collisions(world);

        // 5. Integrate
        rigid_body::integrate_bodies(world, self.config.angular_drag_multiplier);

        // 6. Synchronize transforms
        transform_system(world);

        // 7. Clear contact forces
        rigid_body::clear_contact_forces(world);

        tracing::debug!(
            candidates = pairs.len(),
            collisions = self.collisions.len(),
            "physics tick"
        );
    }

    fn narrow_phase(
        &self,
        world: &hecs::World,
        entity_a: hecs::Entity,
        entity_b: hecs::Entity,
    ) -> Result<Option<PairContact>> {
        let (Ok(collider_a), Ok(collider_b)) = (
            world.get::<&MeshCollider>(entity_a),
            world.get::<&MeshCollider>(entity_b),
        ) else {
            return Ok(None);
        };

        detect_collision(&*collider_a, &*collider_b, self.config.gjk_max_iterations)
    }

    /// Snapshot one side of a collision. The flag is the body's position lock.
    fn contact_side(
        &self,
        world: &hecs::World,
        entity: hecs::Entity,
        centroid: Vec3,
    ) -> Option<(ContactSide, bool)> {
        let body = world.get::<&Body>(entity).ok()?;
        let tagged = world
            .get::<&Tag>(entity)
            .map(|tag| self.config.is_immovable_tag(tag.as_str()))
            .unwrap_or(false);

        Some((
            ContactSide {
                linear_velocity: body.linear_velocity,
                weight: body.weight(),
                centroid,
                immovable: body.position_lock || tagged,
            },
            body.position_lock,
        ))
    }

    /// Compute every adjustment from pre-resolution state, then apply them.
    ///
    /// Stops are applied after nudges so a body resting on something
    /// immovable ends the stage at rest.
    fn resolve_collisions(&self, world: &mut hecs::World) {
        if self.config.resolution == ResolutionStrategy::DetectOnly {
            return;
        }

        let mut adjustments: Vec<(hecs::Entity, Adjustment)> =
            Vec::with_capacity(self.collisions.len() * 2);

        for event in &self.collisions {
            let (Some((side_a, locked_a)), Some((side_b, locked_b))) = (
                self.contact_side(world, event.entity_a, event.centroid_a),
                self.contact_side(world, event.entity_b, event.centroid_b),
            ) else {
                continue;
            };

            let strategy = self.config.resolution;
            let push = self.config.push_apart_strength;
            if !locked_a {
                adjustments.push((event.entity_a, resolve(strategy, push, &side_a, &side_b)));
            }
            if !locked_b {
                adjustments.push((event.entity_b, resolve(strategy, push, &side_b, &side_a)));
            }
        }

        adjustments.sort_by_key(|(_, adjustment)| adjustment.is_stop());
        for (entity, adjustment) in adjustments {
            if let Ok(mut body) = world.get::<&mut Body>(entity) {
                tracing::trace!(entity = entity.id(), ?adjustment, "collision response");
                adjustment.apply_to(&mut body);
            }
        }
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(PhysicsConfig::default())
    }
}
