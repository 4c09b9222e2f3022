//! Renderer-facing components and records.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Flat display colour of a game object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub Vec3);

impl Default for Color {
    fn default() -> Self {
        Self(Vec3::ONE)
    }
}

/// Per-object record uploaded by the renderer once per frame.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct ObjectInstance {
    /// Model transform matrix (column-major).
    pub transform: [[f32; 4]; 4],
    /// Object colour (RGBA).
    pub color: [f32; 4],
}

impl ObjectInstance {
    pub fn new(transform: Mat4, color: Vec3) -> Self {
        Self {
            transform: transform.to_cols_array_2d(),
            color: color.extend(1.0).to_array(),
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.transform)
    }
}
