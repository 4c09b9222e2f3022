//! ECS systems (transform write-back, renderer extraction).

pub mod render;
pub mod transform;

pub use render::render_system;
pub use transform::transform_system;
