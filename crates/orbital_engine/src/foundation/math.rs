//! Math utilities and types
//!
//! Provides fundamental math types for the scene graph and camera code,
//! plus the small set of scalar helpers the orbit/cinematic controllers
//! are built on.

pub use nalgebra::{Matrix3, Matrix4, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Kilometres represented by one graphics unit when laying out the scene.
pub const KM_PER_GRAPHICS_UNIT: f32 = 6371.0;

/// Converts kilometres to graphics units (Earth radius maps to 1.0).
pub fn km_to_gu(kilometres: f32) -> f32 {
    kilometres / KM_PER_GRAPHICS_UNIT
}

/// Wraps an angle in degrees into the half-open interval (-180, 180].
pub fn wrap_degrees(mut value: f32) -> f32 {
    while value > 180.0 {
        value -= 360.0;
    }
    while value <= -180.0 {
        value += 360.0;
    }
    value
}

/// Returns the shortest signed angular delta in degrees from `from` to `to`.
pub fn shortest_angle_delta(from: f32, to: f32) -> f32 {
    wrap_degrees(to - from)
}

/// Moves `current` toward `target` by at most `speed * dt`, clamping at the
/// target so convergence is exact in finite time.
pub fn approach(current: f32, target: f32, speed: f32, dt: f32) -> f32 {
    let delta = target - current;
    let step = speed * dt;
    if delta.abs() <= step {
        return target;
    }
    current + step.copysign(delta)
}

/// Vector variant of [`approach`]: moves along the straight line toward
/// `target`, clamping at the target.
pub fn approach_vec3(current: Vec3, target: Vec3, speed: f32, dt: f32) -> Vec3 {
    let delta = target - current;
    let length = delta.norm();
    if length <= speed * dt || length <= f32::EPSILON {
        return target;
    }
    current + (delta / length) * (speed * dt)
}

/// Hermite smoothstep easing: 3t^2 - 2t^3 on the clamped unit interval.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
