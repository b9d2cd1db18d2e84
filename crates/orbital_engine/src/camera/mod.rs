//! Camera control
//!
//! The [`OrbitCamera`] turns commanded targets into smooth, finite motion;
//! the [`CinematicController`] layers anchor tracking and scripted preset
//! playback on top of it.

pub mod cinematic;
pub mod orbit;

pub use cinematic::{CameraAnchor, CameraPose, CameraPreset, CinematicController};
pub use orbit::{Focus, OrbitCamera, DEFAULT_RADIUS, MAX_RADIUS, MIN_RADIUS};
