//! ECS components (transform, rendering hand-off, physics).

pub mod physics;
pub mod rendering;
pub mod transform;

pub use physics::*;
pub use rendering::*;
pub use transform::*;
