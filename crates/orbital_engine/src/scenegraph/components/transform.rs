//! Spatial placement component

use nalgebra::Rotation3;

use crate::foundation::math::{Mat4, Vec3};
use crate::scenegraph::component::Component;

/// Position, Euler rotation, and scale of a node.
///
/// This is the Transform capability: at most one per node, and its matrix
/// is the node's local transform. Rotation is stored in degrees and
/// applied in X, then Y, then Z order around the node's own origin.
#[derive(Debug, Clone)]
pub struct TransformComponent {
    /// Translation relative to the parent node
    pub position: Vec3,
    /// Euler rotation in degrees, applied X then Y then Z
    pub rotation: Vec3,
    /// Per-axis scale
    pub scale: Vec3,
}

impl Default for TransformComponent {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Vec3::zeros(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl TransformComponent {
    /// Identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform translated to `position`.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            ..Self::default()
        }
    }

    /// Builder-style uniform scale.
    #[must_use]
    pub fn with_uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::new(scale, scale, scale);
        self
    }

    /// Builder-style rotation in degrees.
    #[must_use]
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Local matrix: translation * Rx * Ry * Rz * scale.
    pub fn matrix(&self) -> Mat4 {
        let translation = Mat4::new_translation(&self.position);
        let rx = Rotation3::from_axis_angle(&Vec3::x_axis(), self.rotation.x.to_radians())
            .to_homogeneous();
        let ry = Rotation3::from_axis_angle(&Vec3::y_axis(), self.rotation.y.to_radians())
            .to_homogeneous();
        let rz = Rotation3::from_axis_angle(&Vec3::z_axis(), self.rotation.z.to_radians())
            .to_homogeneous();
        let scale = Mat4::new_nonuniform_scaling(&self.scale);
        translation * rx * ry * rz * scale
    }
}

impl Component for TransformComponent {
    fn local_transform(&self) -> Option<Mat4> {
        Some(self.matrix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn identity_by_default() {
        assert_relative_eq!(TransformComponent::new().matrix(), Mat4::identity());
    }

    #[test]
    fn translation_lands_in_last_column() {
        let transform = TransformComponent::at(Vec3::new(12.0, 0.0, -3.0));
        let matrix = transform.matrix();
        assert_relative_eq!(matrix[(0, 3)], 12.0);
        assert_relative_eq!(matrix[(1, 3)], 0.0);
        assert_relative_eq!(matrix[(2, 3)], -3.0);
    }

    #[test]
    fn yaw_rotates_x_axis_toward_negative_z() {
        let transform =
            TransformComponent::new().with_rotation(Vec3::new(0.0, 90.0, 0.0));
        let rotated = transform.matrix().transform_vector(&Vec3::x());
        assert_relative_eq!(rotated, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn scale_applies_before_rotation_and_translation() {
        let transform = TransformComponent::at(Vec3::new(1.0, 0.0, 0.0))
            .with_uniform_scale(2.0)
            .with_rotation(Vec3::new(0.0, 90.0, 0.0));
        let point = transform
            .matrix()
            .transform_point(&crate::foundation::math::Point3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(point.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(point.z, -2.0, epsilon = 1e-6);
    }
}
