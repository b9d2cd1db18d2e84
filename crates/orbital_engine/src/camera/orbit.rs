//! Cinematic orbit camera
//!
//! The camera orbits a focus point on a spherical shell described by yaw,
//! pitch, and radius. Every commanded change moves a target value; the
//! current value chases it at a constant rate each frame and lands exactly,
//! so motion is smooth, finite, and free of overshoot.

use crate::foundation::math::{
    approach, approach_vec3, shortest_angle_delta, wrap_degrees, Mat4, Point3, Vec3,
};

/// Default orbit radius in graphics units.
pub const DEFAULT_RADIUS: f32 = 5.0;
/// Closest the camera may orbit.
pub const MIN_RADIUS: f32 = 2.0;
/// Farthest the camera may orbit.
pub const MAX_RADIUS: f32 = 38.0;
/// Default pitch clamp in degrees, just shy of the poles.
pub const DEFAULT_PITCH_LIMIT: f32 = 89.0;

/// What the camera looks at: a world position plus an optional radius the
/// camera should settle at when it adopts this focus.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    /// World-space point the camera orbits and looks at
    pub position: Vec3,
    /// Radius to glide to when adopting this focus, `None` keeps the
    /// current radius target
    pub preferred_radius: Option<f32>,
}

impl Focus {
    /// Focus on `position`, keeping the current orbit radius.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            preferred_radius: None,
        }
    }

    /// Focus on `position`, gliding to `radius`.
    pub fn at_radius(position: Vec3, radius: f32) -> Self {
        Self {
            position,
            preferred_radius: Some(radius),
        }
    }
}

/// Orbit camera with rate-limited convergence toward commanded targets.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    focus: Vec3,
    focus_target: Vec3,
    yaw: f32,
    yaw_target: f32,
    pitch: f32,
    pitch_target: f32,
    radius: f32,
    radius_target: f32,
    focus_preferred_radius: Option<f32>,
    position: Vec3,
    min_pitch: f32,
    max_pitch: f32,
    min_radius: f32,
    max_radius: f32,
    angle_speed: f32,
    radius_speed: f32,
    focus_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        let yaw = wrap_degrees(270.0);
        let mut camera = Self {
            focus: Vec3::zeros(),
            focus_target: Vec3::zeros(),
            yaw,
            yaw_target: yaw,
            pitch: 0.0,
            pitch_target: 0.0,
            radius: DEFAULT_RADIUS,
            radius_target: DEFAULT_RADIUS,
            focus_preferred_radius: None,
            position: Vec3::zeros(),
            min_pitch: -DEFAULT_PITCH_LIMIT,
            max_pitch: DEFAULT_PITCH_LIMIT,
            min_radius: MIN_RADIUS,
            max_radius: MAX_RADIUS,
            angle_speed: 6.0,
            radius_speed: 6.0,
            focus_speed: 4.0,
        };
        camera.recalc_position();
        camera
    }
}

impl OrbitCamera {
    /// Camera at the default pose: focus at the origin, radius 5, looking
    /// down the -X axis.
    pub fn new() -> Self {
        Self::default()
    }

    /// Glides the focus point (and radius, if the focus prefers one) to a
    /// new target. The look direction stays continuous throughout.
    ///
    /// A preferred radius stays in force: every `update` re-asserts it as
    /// the radius target until a focus without one (or a full pose snap)
    /// replaces it, so intervening zoom commands cannot pull the camera
    /// off the focus's framing.
    pub fn set_focus(&mut self, focus: Focus) {
        self.focus_target = focus.position;
        self.focus_preferred_radius = focus.preferred_radius;
        if let Some(radius) = focus.preferred_radius {
            self.set_radius(radius);
        }
    }

    /// Commands new yaw/pitch targets; the camera glides to them.
    ///
    /// Yaw takes the shortest way around the circle; pitch is clamped to
    /// the configured limits.
    pub fn set_angles(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        let target = wrap_degrees(yaw_degrees);
        // Unwrap yaw so the chase takes the short way; both values
        // re-wrap once convergence lands.
        self.yaw_target = self.yaw + shortest_angle_delta(self.yaw, target);
        self.pitch_target = pitch_degrees.clamp(self.min_pitch, self.max_pitch);
    }

    /// Jumps yaw/pitch (current and target) immediately, without gliding.
    pub fn snap_angles(&mut self, yaw_degrees: f32, pitch_degrees: f32) {
        self.yaw = wrap_degrees(yaw_degrees);
        self.yaw_target = self.yaw;
        self.pitch = pitch_degrees.clamp(self.min_pitch, self.max_pitch);
        self.pitch_target = self.pitch;
        self.recalc_position();
    }

    /// Jumps the whole pose (focus, angles, radius) immediately.
    ///
    /// The explicit radius drops any preferred radius a previous focus
    /// carried.
    pub fn snap_to(&mut self, focus: Vec3, yaw_degrees: f32, pitch_degrees: f32, radius: f32) {
        self.focus = focus;
        self.focus_target = focus;
        self.focus_preferred_radius = None;
        self.radius = radius.clamp(self.min_radius, self.max_radius);
        self.radius_target = self.radius;
        self.snap_angles(yaw_degrees, pitch_degrees);
    }

    /// Offsets the yaw/pitch targets by the given deltas.
    pub fn orbit(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw_target += yaw_delta;
        self.pitch_target = (self.pitch_target + pitch_delta).clamp(self.min_pitch, self.max_pitch);
    }

    /// Moves the radius target by `delta`, clamped to the radius limits.
    pub fn zoom(&mut self, delta: f32) {
        self.set_radius(self.radius_target + delta);
    }

    /// Sets the radius target, clamped to the radius limits.
    pub fn set_radius(&mut self, radius: f32) {
        self.radius_target = radius.clamp(self.min_radius, self.max_radius);
    }

    /// Overrides the pitch clamp; existing values re-clamp immediately.
    pub fn set_pitch_limits(&mut self, min_degrees: f32, max_degrees: f32) {
        self.min_pitch = min_degrees.min(max_degrees);
        self.max_pitch = min_degrees.max(max_degrees);
        self.pitch = self.pitch.clamp(self.min_pitch, self.max_pitch);
        self.pitch_target = self.pitch_target.clamp(self.min_pitch, self.max_pitch);
        self.recalc_position();
    }

    /// Overrides the radius clamp; existing values re-clamp immediately.
    pub fn set_radius_limits(&mut self, min_radius: f32, max_radius: f32) {
        self.min_radius = min_radius.min(max_radius);
        self.max_radius = min_radius.max(max_radius);
        self.radius = self.radius.clamp(self.min_radius, self.max_radius);
        self.radius_target = self.radius_target.clamp(self.min_radius, self.max_radius);
        self.recalc_position();
    }

    /// Overrides the chase rates (degrees/sec for angles, units/sec for
    /// radius and focus).
    pub fn set_lerp_speed(&mut self, angle_speed: f32, radius_speed: f32, focus_speed: f32) {
        self.angle_speed = angle_speed.max(0.0);
        self.radius_speed = radius_speed.max(0.0);
        self.focus_speed = focus_speed.max(0.0);
    }

    /// Advances every current value toward its target by at most
    /// `speed * dt`, landing exactly when within one step.
    ///
    /// The current yaw is re-wrapped into (-180, 180] every call, with the
    /// target rebased by the same shift so the glide distance is preserved.
    pub fn update(&mut self, delta_seconds: f32) {
        let dt = delta_seconds.max(0.0);
        self.yaw = approach(self.yaw, self.yaw_target, self.angle_speed, dt);
        let wrapped = wrap_degrees(self.yaw);
        self.yaw_target += wrapped - self.yaw;
        self.yaw = wrapped;
        self.pitch = approach(self.pitch, self.pitch_target, self.angle_speed, dt);
        if let Some(preferred) = self.focus_preferred_radius {
            self.radius_target = preferred.clamp(self.min_radius, self.max_radius);
        }
        self.radius = approach(self.radius, self.radius_target, self.radius_speed, dt);
        self.focus = approach_vec3(self.focus, self.focus_target, self.focus_speed, dt);
        self.recalc_position();
    }

    /// Right-handed view matrix looking from the camera position at the
    /// focus point.
    pub fn view_matrix(&self) -> Mat4 {
        let eye = Point3::from(self.position);
        let target = Point3::from(self.focus);
        Mat4::look_at_rh(&eye, &target, &self.up())
    }

    /// Up vector for the view basis.
    ///
    /// Near the poles the world-up becomes parallel to the view direction,
    /// so the basis switches to -Z above the top pole and +Z below the
    /// bottom one to stay well-defined.
    pub fn up(&self) -> Vec3 {
        if self.pitch.abs() >= 90.0 {
            let sign = if self.pitch > 0.0 { -1.0 } else { 1.0 };
            Vec3::new(0.0, 0.0, sign)
        } else {
            Vec3::y()
        }
    }

    /// Current camera position in world space.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Current yaw in degrees.
    pub fn yaw_degrees(&self) -> f32 {
        self.yaw
    }

    /// Current pitch in degrees.
    pub fn pitch_degrees(&self) -> f32 {
        self.pitch
    }

    /// Current orbit radius.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Target orbit radius the camera is gliding toward.
    pub fn radius_target(&self) -> f32 {
        self.radius_target
    }

    /// Current focus point in world space.
    pub fn focus_position(&self) -> Vec3 {
        self.focus
    }

    /// Focus point the camera is gliding toward.
    pub fn focus_target(&self) -> Vec3 {
        self.focus_target
    }

    /// Whether all values have landed on their targets.
    pub fn is_settled(&self) -> bool {
        self.yaw == self.yaw_target
            && self.pitch == self.pitch_target
            && self.radius == self.radius_target
            && self.focus == self.focus_target
    }

    fn recalc_position(&mut self) {
        let yaw = self.yaw.to_radians();
        let pitch = self.pitch.to_radians();
        let offset = Vec3::new(
            self.radius * pitch.cos() * yaw.cos(),
            self.radius * pitch.sin(),
            self.radius * pitch.cos() * yaw.sin(),
        );
        self.position = self.focus + offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settle(camera: &mut OrbitCamera) {
        for _ in 0..10_000 {
            camera.update(0.016);
            if camera.is_settled() {
                return;
            }
        }
        panic!("camera failed to settle");
    }

    #[test]
    fn default_pose_matches_spherical_offset() {
        let camera = OrbitCamera::new();
        assert_relative_eq!(camera.yaw_degrees(), -90.0);
        assert_relative_eq!(camera.pitch_degrees(), 0.0);
        assert_relative_eq!(camera.radius(), DEFAULT_RADIUS);
        // yaw -90, pitch 0: offset is (0, 0, -radius)
        assert_relative_eq!(
            camera.position(),
            Vec3::new(0.0, 0.0, -DEFAULT_RADIUS),
            epsilon = 1e-4
        );
    }

    #[test]
    fn position_stays_on_the_orbit_shell() {
        let mut camera = OrbitCamera::new();
        camera.set_focus(Focus::at(Vec3::new(12.0, 0.0, 0.0)));
        camera.set_angles(37.0, 42.0);
        camera.zoom(3.0);
        settle(&mut camera);

        let distance = (camera.position() - camera.focus_position()).norm();
        assert_relative_eq!(distance, camera.radius(), epsilon = 1e-3);
    }

    #[test]
    fn pitch_clamps_to_limits() {
        let mut camera = OrbitCamera::new();
        camera.set_angles(0.0, 500.0);
        settle(&mut camera);
        assert_relative_eq!(camera.pitch_degrees(), DEFAULT_PITCH_LIMIT);

        camera.orbit(0.0, -1000.0);
        settle(&mut camera);
        assert_relative_eq!(camera.pitch_degrees(), -DEFAULT_PITCH_LIMIT);
    }

    #[test]
    fn radius_clamps_to_limits() {
        let mut camera = OrbitCamera::new();
        camera.zoom(1000.0);
        settle(&mut camera);
        assert_relative_eq!(camera.radius(), MAX_RADIUS);

        camera.zoom(-1000.0);
        settle(&mut camera);
        assert_relative_eq!(camera.radius(), MIN_RADIUS);
    }

    #[test]
    fn yaw_takes_the_short_way_around() {
        let mut camera = OrbitCamera::new();
        camera.snap_angles(170.0, 0.0);
        camera.set_angles(-170.0, 0.0);

        camera.update(0.5);
        // A short-way glide passes through 173, not back toward 0.
        assert!(camera.yaw_degrees() > 170.0);
        settle(&mut camera);
        assert_relative_eq!(camera.yaw_degrees(), -170.0, epsilon = 1e-4);
    }

    #[test]
    fn relative_orbit_wraps_through_zero() {
        let mut camera = OrbitCamera::new();
        camera.orbit(90.0, 0.0);
        settle(&mut camera);
        // Default yaw 270 (stored -90) plus 90 lands on 0.
        assert_relative_eq!(camera.yaw_degrees(), 0.0, epsilon = 1e-4);
    }

    #[test]
    fn convergence_is_exact_and_monotonic() {
        let mut camera = OrbitCamera::new();
        camera.set_angles(-90.0, 30.0);

        let mut previous = camera.pitch_degrees();
        for _ in 0..10_000 {
            camera.update(0.016);
            assert!(camera.pitch_degrees() >= previous);
            assert!(camera.pitch_degrees() <= 30.0);
            previous = camera.pitch_degrees();
            if camera.is_settled() {
                break;
            }
        }
        assert_relative_eq!(camera.pitch_degrees(), 30.0);
    }

    #[test]
    fn focus_with_preferred_radius_moves_both_targets() {
        let mut camera = OrbitCamera::new();
        camera.set_focus(Focus::at_radius(Vec3::new(5.0, 1.0, 0.0), 10.0));
        settle(&mut camera);
        assert_relative_eq!(camera.focus_position(), Vec3::new(5.0, 1.0, 0.0));
        assert_relative_eq!(camera.radius(), 10.0);
    }

    #[test]
    fn preferred_radius_overrides_later_zoom() {
        let mut camera = OrbitCamera::new();
        camera.set_focus(Focus::at_radius(Vec3::new(5.0, 1.0, 0.0), 10.0));
        camera.zoom(20.0);
        settle(&mut camera);
        // The focus framing wins over the zoom command.
        assert_relative_eq!(camera.radius(), 10.0);
    }

    #[test]
    fn snap_drops_preferred_radius() {
        let mut camera = OrbitCamera::new();
        camera.set_focus(Focus::at_radius(Vec3::new(5.0, 1.0, 0.0), 10.0));
        camera.snap_to(Vec3::zeros(), -90.0, 0.0, 6.0);
        camera.zoom(2.0);
        settle(&mut camera);
        assert_relative_eq!(camera.radius(), 8.0);
    }

    #[test]
    fn yaw_stays_wrapped_during_glide() {
        let mut camera = OrbitCamera::new();
        camera.snap_angles(170.0, 0.0);
        camera.set_angles(-170.0, 0.0);
        for _ in 0..10_000 {
            camera.update(0.016);
            let yaw = camera.yaw_degrees();
            assert!(yaw > -180.0 && yaw <= 180.0, "yaw out of range: {yaw}");
            if camera.is_settled() {
                break;
            }
        }
        assert_relative_eq!(camera.yaw_degrees(), -170.0, epsilon = 1e-4);
    }

    #[test]
    fn up_flips_at_the_poles() {
        let mut camera = OrbitCamera::new();
        camera.set_pitch_limits(-90.0, 90.0);
        camera.snap_angles(0.0, 90.0);
        assert_relative_eq!(camera.up(), Vec3::new(0.0, 0.0, -1.0));
        camera.snap_angles(0.0, -90.0);
        assert_relative_eq!(camera.up(), Vec3::new(0.0, 0.0, 1.0));
        camera.snap_angles(0.0, 15.0);
        assert_relative_eq!(camera.up(), Vec3::y());
    }

    #[test]
    fn zero_dt_update_changes_nothing() {
        let mut camera = OrbitCamera::new();
        camera.set_angles(45.0, 20.0);
        let before = camera.position();
        camera.update(0.0);
        assert_relative_eq!(camera.position(), before);
    }

    #[test]
    fn view_matrix_looks_at_focus() {
        let mut camera = OrbitCamera::new();
        camera.snap_to(Vec3::new(3.0, 0.0, 0.0), -90.0, 0.0, 5.0);
        let view = camera.view_matrix();
        let focus_in_view = view.transform_point(&Point3::new(3.0, 0.0, 0.0));
        // Focus lies straight ahead on the view -Z axis.
        assert_relative_eq!(focus_in_view.x, 0.0, epsilon = 1e-4);
        assert_relative_eq!(focus_in_view.y, 0.0, epsilon = 1e-4);
        assert_relative_eq!(focus_in_view.z, -5.0, epsilon = 1e-4);
    }
}
