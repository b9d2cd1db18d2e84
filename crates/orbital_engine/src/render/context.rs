//! Per-frame render context
//!
//! The driver computes view/projection and camera state once per frame and
//! passes this value object down through the render pass; nothing in the
//! core reads process-wide globals.

use crate::foundation::math::{Mat4, Vec3};

/// Per-frame values shared by every draw call.
#[derive(Debug, Clone)]
pub struct RenderContext {
    /// Camera view matrix
    pub view_matrix: Mat4,
    /// Projection matrix
    pub projection_matrix: Mat4,
    /// Camera position in world space
    pub camera_position: Vec3,
    /// Wall-clock time since the previous frame, in seconds
    pub delta_time_seconds: f64,
}

impl Default for RenderContext {
    fn default() -> Self {
        Self {
            view_matrix: Mat4::identity(),
            projection_matrix: Mat4::identity(),
            camera_position: Vec3::zeros(),
            delta_time_seconds: 0.0,
        }
    }
}
