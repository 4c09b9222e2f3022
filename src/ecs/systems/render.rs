//! ECS render extraction.
//!
//! Pulls per-object draw data out of the World. Drawing itself belongs to the
//! renderer; this only produces the records it uploads.

use crate::ecs::components::rendering::{Color, ObjectInstance};
use crate::ecs::components::transform::GlobalTransform;

/// Refill `instances` with one record per entity that has a `GlobalTransform`.
///
/// Entities without a `Color` are drawn white.
pub fn render_system(world: &hecs::World, instances: &mut Vec<ObjectInstance>) {
    instances.clear();
    for (_, (global, color)) in world
        .query::<(&GlobalTransform, Option<&Color>)>()
        .iter()
    {
        let color = color.copied().unwrap_or_default();
        instances.push(ObjectInstance::new(global.0, color.0));
    }
}
