//! tumble physics core
//!
//! GJK collision detection and a per-tick rigid body loop for small 3D scenes.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! 1. **error** - `PhysicsError` and numeric guards
//! 2. **ecs** - hecs components, scene bridge and systems (feature = "ecs")
//! 3. **physics** - Support maps, GJK, broadphase, resolution and the tick loop (feature = "physics")
//!
//! Objects live in a caller-owned `hecs::World`; every physics call takes it
//! explicitly.

pub mod error;

#[cfg(feature = "ecs")]
pub mod ecs;

#[cfg(feature = "physics")]
pub mod physics;

pub use error::{PhysicsError, Result};

#[cfg(feature = "ecs")]
pub use ecs::prelude::*;

#[cfg(feature = "physics")]
pub use physics::{CollisionEvent, PhysicsConfig, PhysicsWorld};

// Re-export glam for convenience
pub use glam;
