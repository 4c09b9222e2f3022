//! Entity Component System integration with hecs.
//!
//! Game objects are plain entities; the world is always passed in
//! explicitly, there is no global object list.

#[cfg(feature = "physics")]
pub mod bridge;
pub mod components;
pub mod systems;

pub mod prelude {
    #[cfg(feature = "physics")]
    pub use super::bridge::*;
    pub use super::components::*;
    pub use super::systems::{render_system, transform_system};
}
