//! Bridge between scene descriptions and ECS entities.

use glam::Vec3;

use crate::ecs::components::physics::{Body, Tag};
use crate::ecs::components::rendering::Color;
use crate::ecs::components::transform::{GlobalTransform, Transform};
use crate::physics::collider::MeshCollider;

/// Everything needed to place one simulated object in the world.
#[derive(Debug, Clone)]
pub struct GameObject {
    pub tag: Tag,
    pub transform: Transform,
    pub body: Body,
    pub collider: MeshCollider,
    pub color: Color,
}

impl GameObject {
    /// Object whose collider is the box described by the body's shape.
    pub fn new(tag: impl Into<String>, transform: Transform, body: Body) -> Self {
        let collider = MeshCollider::from_shape(body.shape());
        Self {
            tag: Tag::new(tag),
            transform,
            body,
            collider,
            color: Color::default(),
        }
    }

    /// Replace the collider with explicit body-local vertex offsets
    /// (typically a model's vertex list).
    pub fn with_collider_vertices(mut self, local_vertices: Vec<Vec3>) -> Self {
        self.collider.set_local_vertices(local_vertices);
        self
    }

    pub fn with_color(mut self, color: Vec3) -> Self {
        self.color = Color(color);
        self
    }
}

/// Spawn a `GameObject` as an ECS entity.
///
/// Creates an entity with Tag, Transform, GlobalTransform, Body,
/// MeshCollider and Color components. The collider's world vertices are
/// placed at the initial translation.
pub fn spawn_game_object(world: &mut hecs::World, object: GameObject) -> hecs::Entity {
    let GameObject {
        tag,
        transform,
        body,
        mut collider,
        color,
    } = object;
    collider.update_world_vertices(transform.translation);
    let global = GlobalTransform::from(&transform);

    let entity = world.spawn((tag, transform, global, body, collider, color));
    tracing::debug!(id = entity.id(), "spawned game object");
    entity
}

/// Find the first entity carrying `tag`.
pub fn find_by_tag(world: &hecs::World, tag: &str) -> Option<hecs::Entity> {
    world
        .query::<&Tag>()
        .iter()
        .find(|(_, t)| t.as_str() == tag)
        .map(|(entity, _)| entity)
}
