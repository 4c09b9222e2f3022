//! Heuristic collision response.
//!
//! This is not an impulse solver. Colliding bodies average their velocities
//! and get a small push along a direction derived from the GJK centroids;
//! bodies that hit something immovable simply stop and have their weight
//! cancelled for the next tick.

use glam::Vec3;

use crate::ecs::components::physics::Body;
use crate::error::{checked_normalize, Result};

/// How the push-apart direction is derived from the two GJK centroids.
///
/// It is unsettled whether `|c_self| - |c_other|` points away from the other
/// body in every configuration, so the sign is selectable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NormalConvention {
    /// `normalize(|c_self| - |c_other|)`.
    #[default]
    AbsDifference,
    /// The negation of `AbsDifference`.
    Reversed,
}

impl NormalConvention {
    /// Unit separation direction for the body whose centroid is `own`.
    pub fn separation_normal(self, own: Vec3, other: Vec3) -> Result<Vec3> {
        let raw = own.abs() - other.abs();
        let raw = match self {
            NormalConvention::AbsDifference => raw,
            NormalConvention::Reversed => -raw,
        };
        checked_normalize(raw, "collision separation normal")
    }
}

/// What happens to bodies whose narrow phase reports a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionStrategy {
    /// Velocity blending plus centroid push, stop against immovable objects.
    CentroidHeuristic { normal: NormalConvention },
    /// Record collisions, leave bodies untouched.
    DetectOnly,
}

impl Default for ResolutionStrategy {
    fn default() -> Self {
        Self::CentroidHeuristic {
            normal: NormalConvention::default(),
        }
    }
}

/// One body's view of a collision, captured before any response is applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactSide {
    pub linear_velocity: Vec3,
    /// Gravity force acting on this body.
    pub weight: Vec3,
    /// GJK centroid with this body as the first shape.
    pub centroid: Vec3,
    /// Position-locked or carrying an immovable tag.
    pub immovable: bool,
}

/// Change to apply to one body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Unchanged,
    /// Zero the linear velocity and queue a force cancelling the weight.
    Stop { compensating_force: Vec3 },
    /// Add to the linear velocity. Several contacts on one body sum up.
    Nudge { velocity_change: Vec3 },
}

impl Adjustment {
    pub fn apply_to(self, body: &mut Body) {
        match self {
            Adjustment::Unchanged => {}
            Adjustment::Stop { compensating_force } => {
                body.linear_velocity = Vec3::ZERO;
                body.contact_force = compensating_force;
            }
            Adjustment::Nudge { velocity_change } => body.linear_velocity += velocity_change,
        }
    }

    pub fn is_stop(&self) -> bool {
        matches!(self, Adjustment::Stop { .. })
    }
}

/// Response for `own` after colliding with `other`.
pub fn resolve(
    strategy: ResolutionStrategy,
    push_apart_strength: f32,
    own: &ContactSide,
    other: &ContactSide,
) -> Adjustment {
    let ResolutionStrategy::CentroidHeuristic { normal } = strategy else {
        return Adjustment::Unchanged;
    };

    if other.immovable {
        return Adjustment::Stop {
            compensating_force: -own.weight,
        };
    }

    let mut velocity_change = (other.linear_velocity - own.linear_velocity) * 0.5;

    match normal.separation_normal(own.centroid, other.centroid) {
        Ok(n) => velocity_change += n * push_apart_strength,
        Err(err) => tracing::trace!(%err, "skipping push-apart term"),
    }

    Adjustment::Nudge { velocity_change }
}
