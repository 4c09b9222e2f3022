//! Physics components for ECS entities.

use glam::Vec3;

use crate::error::{PhysicsError, Result};

/// Box description of a body: mass plus full width, height and depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shape {
    pub mass: f32,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Shape {
    /// Validated constructor. Mass and extents must be finite and non-negative.
    pub fn new(mass: f32, width: f32, height: f32, depth: f32) -> Result<Self> {
        for (name, value) in [
            ("mass", mass),
            ("width", width),
            ("height", height),
            ("depth", depth),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PhysicsError::InvalidShape(format!(
                    "{name} must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(Self {
            mass,
            width,
            height,
            depth,
        })
    }

    /// Unit-mass cube with the given edge length.
    pub fn cube(size: f32) -> Self {
        Self {
            mass: 1.0,
            width: size,
            height: size,
            depth: size,
        }
    }

    /// Scalar box inertia: `mass * (width² * height²) / 12`.
    ///
    /// A simplification kept for compatibility with existing scenes, not the
    /// physical inertia tensor of a box.
    pub fn moment_of_inertia(&self) -> f32 {
        self.mass * (self.width * self.width * self.height * self.height) / 12.0
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::cube(1.0)
    }
}

/// Rigid body component. Velocities are expressed per tick.
#[derive(Debug, Clone)]
pub struct Body {
    shape: Shape,
    moment_of_inertia: f32,
    pub linear_velocity: Vec3,
    /// Euler-angle rate in degrees per tick.
    pub angular_velocity: Vec3,
    pub gravity_acceleration: Vec3,
    /// Fraction of linear velocity removed each tick (0 = none).
    pub drag: f32,
    pub force: Vec3,
    pub torque: Vec3,
    /// Extra force queued by collision resolution, consumed by the next
    /// integration and then cleared.
    pub contact_force: Vec3,
    pub position_lock: bool,
    pub rotation_lock: bool,
}

impl Body {
    /// Create a free body with the given shape and no gravity.
    pub fn new(shape: Shape) -> Self {
        Self {
            shape,
            moment_of_inertia: shape.moment_of_inertia(),
            linear_velocity: Vec3::ZERO,
            angular_velocity: Vec3::ZERO,
            gravity_acceleration: Vec3::ZERO,
            drag: 0.0,
            force: Vec3::ZERO,
            torque: Vec3::ZERO,
            contact_force: Vec3::ZERO,
            position_lock: false,
            rotation_lock: false,
        }
    }

    /// Create a position-locked body. It never moves and stops whatever hits it.
    pub fn new_locked(shape: Shape) -> Self {
        Self {
            position_lock: true,
            ..Self::new(shape)
        }
    }

    pub fn with_gravity(mut self, gravity_acceleration: Vec3) -> Self {
        self.gravity_acceleration = gravity_acceleration;
        self
    }

    pub fn with_velocity(mut self, linear_velocity: Vec3) -> Self {
        self.linear_velocity = linear_velocity;
        self
    }

    pub fn with_drag(mut self, drag: f32) -> Self {
        self.drag = drag;
        self
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn mass(&self) -> f32 {
        self.shape.mass
    }

    pub fn moment_of_inertia(&self) -> f32 {
        self.moment_of_inertia
    }

    /// Replace the shape and recompute the moment of inertia.
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
        self.moment_of_inertia = shape.moment_of_inertia();
    }

    /// Top-centre of the box relative to its centre of mass.
    pub fn application_point(&self) -> Vec3 {
        Vec3::new(0.0, self.shape.height * 0.5, 0.0)
    }

    /// Gravity force for this tick.
    pub fn weight(&self) -> Vec3 {
        self.gravity_acceleration * self.shape.mass
    }

    /// Store `force` and the torque it produces when applied at `point`.
    pub fn compute_force_and_torque(&mut self, force: Vec3, point: Vec3) {
        self.force = force;
        self.torque = force.cross(point);
    }

    /// `linear_velocity += force / mass`. Massless bodies are left untouched.
    pub fn compute_linear_acceleration(&mut self) {
        let mass = self.shape.mass;
        if mass <= f32::EPSILON {
            tracing::trace!(mass, "skipping linear acceleration for massless body");
            return;
        }
        self.linear_velocity += self.force / mass;
    }

    /// `angular_velocity += (torque / I) * drag_multiplier`.
    pub fn compute_angular_acceleration(&mut self, drag_multiplier: f32) {
        if self.moment_of_inertia <= f32::EPSILON {
            tracing::trace!(
                inertia = self.moment_of_inertia,
                "skipping angular acceleration for degenerate inertia"
            );
            return;
        }
        self.angular_velocity += self.torque / self.moment_of_inertia * drag_multiplier;
    }

    /// Scale linear velocity by `1 - drag`, clamped at zero.
    pub fn apply_drag(&mut self) {
        self.linear_velocity *= (1.0 - self.drag).max(0.0);
    }

    pub fn stop(&mut self) {
        self.linear_velocity = Vec3::ZERO;
        self.angular_velocity = Vec3::ZERO;
    }
}

impl Default for Body {
    fn default() -> Self {
        Self::new(Shape::default())
    }
}

/// Identifying label of a game object ("player", "locked", ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag(pub String);

impl Tag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
