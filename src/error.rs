//! Error types for the physics core.

use glam::Vec3;
use thiserror::Error;

/// Errors raised by collider queries and numeric guards.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A support query was issued against a collider with no vertices.
    #[error("support query on a collider with no vertices")]
    EmptyCollider,
    /// A zero-length (or non-finite) vector was about to be normalized.
    #[error("cannot normalize degenerate vector in {context}")]
    DegenerateVector { context: &'static str },
    /// Shape parameters that cannot describe a physical box.
    #[error("invalid shape: {0}")]
    InvalidShape(String),
}

pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Normalize `v`, reporting a zero-length or non-finite input instead of
/// producing NaN.
pub fn checked_normalize(v: Vec3, context: &'static str) -> Result<Vec3> {
    v.try_normalize()
        .ok_or(PhysicsError::DegenerateVector { context })
}
