//! Transform components for ECS entities.

use glam::{Mat4, Quat, Vec3};

/// Object pose. Rotation is stored as Euler angles in degrees, applied X then Y then Z.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    /// Euler angles in degrees.
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn with_rotation_degrees(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation as a quaternion (X, then Y, then Z, intrinsic).
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_rotation_x(self.rotation.x.to_radians())
            * Quat::from_rotation_y(self.rotation.y.to_radians())
            * Quat::from_rotation_z(self.rotation.z.to_radians())
    }

    /// Convert to a 4x4 matrix (translation * rotation * scale).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation_quat(), self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// World-space transform matrix handed to the renderer. Written at the end of every tick.
#[derive(Debug, Clone, Copy)]
pub struct GlobalTransform(pub Mat4);

impl Default for GlobalTransform {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

impl From<&Transform> for GlobalTransform {
    fn from(transform: &Transform) -> Self {
        Self(transform.to_matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t.translation, Vec3::ZERO);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_from_translation() {
        let pos = Vec3::new(1.0, 2.0, 3.0);
        let t = Transform::from_translation(pos);
        assert_eq!(t.translation, pos);
        assert_eq!(t.rotation, Vec3::ZERO);
        assert_eq!(t.scale, Vec3::ONE);
    }

    #[test]
    fn test_matrix_matches_euler_composition() {
        let t = Transform::from_translation(Vec3::new(1.0, -2.0, 0.5))
            .with_rotation_degrees(Vec3::new(30.0, 45.0, -60.0))
            .with_scale(Vec3::new(2.0, 1.0, 0.5));

        let expected = Mat4::from_translation(t.translation)
            * Mat4::from_rotation_x(30f32.to_radians())
            * Mat4::from_rotation_y(45f32.to_radians())
            * Mat4::from_rotation_z((-60f32).to_radians())
            * Mat4::from_scale(t.scale);

        assert!(t.to_matrix().abs_diff_eq(expected, 1e-5));
    }

    #[test]
    fn test_quarter_turn_about_y() {
        let t = Transform::identity().with_rotation_degrees(Vec3::new(0.0, 90.0, 0.0));
        let p = t.to_matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_global_transform_from_transform() {
        let t = Transform::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let gt = GlobalTransform::from(&t);
        assert_eq!(gt.0.w_axis.truncate(), Vec3::new(0.0, 5.0, 0.0));
        assert_eq!(GlobalTransform::default().0, Mat4::IDENTITY);
    }
}
