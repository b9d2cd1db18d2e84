//! Cinematic camera playback
//!
//! Anchors are named camera poses, optionally tracking a scene node so the
//! pose follows a moving body. Presets pair an anchor with a transition and
//! hold time; playing one eases the camera from wherever it is to the
//! anchor pose, holds, and returns control. Manual zoom input cancels
//! playback immediately.

use crate::camera::orbit::{Focus, OrbitCamera};
use crate::foundation::math::{shortest_angle_delta, smoothstep, Vec3};
use crate::scenegraph::{NodeKey, SceneGraph};

/// Named camera pose, optionally bound to a scene node.
#[derive(Debug, Clone)]
pub struct CameraAnchor {
    /// Name used for lookup and key bindings
    pub name: String,
    /// Focus point and preferred radius of the pose
    pub focus: Focus,
    /// Yaw of the pose, degrees
    pub yaw_degrees: f32,
    /// Pitch of the pose, degrees
    pub pitch_degrees: f32,
    /// Node whose world position refreshes the focus every frame
    pub tracked: Option<NodeKey>,
}

impl CameraAnchor {
    /// Fixed anchor at a world position.
    pub fn fixed(name: impl Into<String>, focus: Focus, yaw_degrees: f32, pitch_degrees: f32) -> Self {
        Self {
            name: name.into(),
            focus,
            yaw_degrees,
            pitch_degrees,
            tracked: None,
        }
    }

    /// Anchor that follows a scene node's world position.
    pub fn tracking(
        name: impl Into<String>,
        node: NodeKey,
        preferred_radius: f32,
        yaw_degrees: f32,
        pitch_degrees: f32,
    ) -> Self {
        Self {
            name: name.into(),
            focus: Focus::at_radius(Vec3::zeros(), preferred_radius),
            yaw_degrees,
            pitch_degrees,
            tracked: Some(node),
        }
    }
}

/// One cinematic shot: an anchor plus its timing.
#[derive(Debug, Clone, Copy)]
pub struct CameraPreset {
    /// Index into the controller's anchor list
    pub anchor_index: usize,
    /// Eased transition duration, seconds
    pub transition_seconds: f32,
    /// Time to hold the pose after arrival, seconds
    pub hold_seconds: f32,
}

/// Snapshot of an orbit camera pose.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraPose {
    /// Focus point
    pub focus: Vec3,
    /// Yaw, degrees
    pub yaw_degrees: f32,
    /// Pitch, degrees
    pub pitch_degrees: f32,
    /// Orbit radius
    pub radius: f32,
}

impl CameraPose {
    /// Captures the current pose of a camera.
    pub fn of(camera: &OrbitCamera) -> Self {
        Self {
            focus: camera.focus_position(),
            yaw_degrees: camera.yaw_degrees(),
            pitch_degrees: camera.pitch_degrees(),
            radius: camera.radius(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum PlaybackState {
    #[default]
    Idle,
    Playing {
        preset_index: usize,
        elapsed: f32,
        start: CameraPose,
    },
}

/// Drives preset playback and anchor tracking for one orbit camera.
#[derive(Default)]
pub struct CinematicController {
    anchors: Vec<CameraAnchor>,
    presets: Vec<CameraPreset>,
    state: PlaybackState,
    next_preset: usize,
}

impl CinematicController {
    /// Controller with no anchors or presets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an anchor, returning its index.
    pub fn add_anchor(&mut self, anchor: CameraAnchor) -> usize {
        self.anchors.push(anchor);
        self.anchors.len() - 1
    }

    /// Registers a preset, returning its index.
    ///
    /// Presets referencing unknown anchors are rejected.
    pub fn add_preset(&mut self, preset: CameraPreset) -> Option<usize> {
        if preset.anchor_index >= self.anchors.len() {
            log::warn!(
                "CinematicController: preset references unknown anchor {}",
                preset.anchor_index
            );
            return None;
        }
        self.presets.push(preset);
        Some(self.presets.len() - 1)
    }

    /// Anchor index by name.
    pub fn anchor_index(&self, name: &str) -> Option<usize> {
        self.anchors.iter().position(|anchor| anchor.name == name)
    }

    /// Registered anchors in registration order.
    pub fn anchors(&self) -> &[CameraAnchor] {
        &self.anchors
    }

    /// Number of registered presets.
    pub fn preset_count(&self) -> usize {
        self.presets.len()
    }

    /// Whether a preset is currently playing (transition or hold).
    pub fn is_playing(&self) -> bool {
        matches!(self.state, PlaybackState::Playing { .. })
    }

    /// Re-resolves tracked anchors against the scene so moving bodies keep
    /// their anchors (and any in-flight transition target) current.
    pub fn refresh_anchors(&mut self, graph: &SceneGraph) {
        for anchor in &mut self.anchors {
            if let Some(key) = anchor.tracked {
                if graph.node(key).is_some() {
                    let world = graph.world_transform(key);
                    anchor.focus.position =
                        Vec3::new(world[(0, 3)], world[(1, 3)], world[(2, 3)]);
                }
            }
        }
    }

    /// Starts playing a preset from the camera's current pose.
    ///
    /// Restarting (same or different preset) re-captures the start pose, so
    /// interruptions stay continuous.
    pub fn play(&mut self, preset_index: usize, camera: &OrbitCamera) -> bool {
        let Some(preset) = self.presets.get(preset_index) else {
            log::warn!("CinematicController: no preset {preset_index}");
            return false;
        };
        log::info!(
            "CinematicController: playing preset {preset_index} -> '{}'",
            self.anchors[preset.anchor_index].name
        );
        self.state = PlaybackState::Playing {
            preset_index,
            elapsed: 0.0,
            start: CameraPose::of(camera),
        };
        self.next_preset = (preset_index + 1) % self.presets.len().max(1);
        true
    }

    /// Plays the next preset in cycle order.
    pub fn play_next(&mut self, camera: &OrbitCamera) -> bool {
        if self.presets.is_empty() {
            return false;
        }
        self.play(self.next_preset, camera)
    }

    /// Cancels any playback, leaving the camera wherever it is.
    pub fn cancel(&mut self) {
        if self.is_playing() {
            log::info!("CinematicController: playback cancelled");
        }
        self.state = PlaybackState::Idle;
    }

    /// Glides the camera to a named anchor outside of preset playback.
    ///
    /// Cancels any running preset first.
    pub fn jump_to_anchor(&mut self, name: &str, camera: &mut OrbitCamera) -> bool {
        let Some(index) = self.anchor_index(name) else {
            log::warn!("CinematicController: no anchor named '{name}'");
            return false;
        };
        self.cancel();
        let anchor = &self.anchors[index];
        camera.set_focus(anchor.focus);
        camera.set_angles(anchor.yaw_degrees, anchor.pitch_degrees);
        true
    }

    /// Advances playback, driving the camera pose directly while a preset
    /// runs. Returns `true` while playback continues.
    ///
    /// When idle this does nothing; the caller runs the camera's own
    /// chase-update instead.
    pub fn update(&mut self, delta_seconds: f32, camera: &mut OrbitCamera) -> bool {
        let PlaybackState::Playing {
            preset_index,
            elapsed,
            start,
        } = self.state
        else {
            return false;
        };

        let preset = self.presets[preset_index];
        let anchor = &self.anchors[preset.anchor_index];
        let target = CameraPose {
            focus: anchor.focus.position,
            yaw_degrees: anchor.yaw_degrees,
            pitch_degrees: anchor.pitch_degrees,
            radius: anchor.focus.preferred_radius.unwrap_or(start.radius),
        };

        let elapsed = elapsed + delta_seconds.max(0.0);
        let total = preset.transition_seconds + preset.hold_seconds;

        if elapsed >= total {
            Self::snap_pose(camera, &target);
            self.state = PlaybackState::Idle;
            log::info!("CinematicController: preset {preset_index} finished");
            return false;
        }

        let t = if preset.transition_seconds > 0.0 {
            (elapsed / preset.transition_seconds).min(1.0)
        } else {
            1.0
        };
        let eased = smoothstep(t);

        let pose = CameraPose {
            focus: start.focus + (target.focus - start.focus) * eased,
            yaw_degrees: start.yaw_degrees
                + shortest_angle_delta(start.yaw_degrees, target.yaw_degrees) * eased,
            pitch_degrees: start.pitch_degrees
                + (target.pitch_degrees - start.pitch_degrees) * eased,
            radius: start.radius + (target.radius - start.radius) * eased,
        };
        Self::snap_pose(camera, &pose);

        self.state = PlaybackState::Playing {
            preset_index,
            elapsed,
            start,
        };
        true
    }

    fn snap_pose(camera: &mut OrbitCamera, pose: &CameraPose) {
        camera.snap_to(pose.focus, pose.yaw_degrees, pose.pitch_degrees, pose.radius);
    }
}
