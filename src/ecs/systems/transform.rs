//! Transform write-back system.

use crate::ecs::components::transform::{GlobalTransform, Transform};

/// Rebuild every `GlobalTransform` from its entity's `Transform`.
pub fn transform_system(world: &mut hecs::World) {
    for (_, (transform, global)) in world.query_mut::<(&Transform, &mut GlobalTransform)>() {
        global.0 = transform.to_matrix();
    }
}
