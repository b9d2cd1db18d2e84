//! Runtime configuration
//!
//! TOML-backed settings for the camera, asset paths, and animation rates.
//! Every field has a default so a missing or partial file still yields a
//! runnable configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::render::ShaderPaths;

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Read {
        /// Path of the config file
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The config file is not valid TOML for this schema.
    #[error("failed to parse config {path}: {source}")]
    Parse {
        /// Path of the config file
        path: PathBuf,
        /// Underlying parse error
        #[source]
        source: toml::de::Error,
    },
}

/// Orbit camera tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    /// Initial yaw in degrees
    pub yaw_degrees: f32,
    /// Initial pitch in degrees
    pub pitch_degrees: f32,
    /// Initial orbit radius in graphics units
    pub radius: f32,
    /// Minimum orbit radius
    pub min_radius: f32,
    /// Maximum orbit radius
    pub max_radius: f32,
    /// Angular chase rate, degrees per second
    pub angle_speed: f32,
    /// Radius chase rate, units per second
    pub radius_speed: f32,
    /// Focus chase rate, units per second
    pub focus_speed: f32,
    /// Radius change applied per zoom key press
    pub zoom_step: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            yaw_degrees: 270.0,
            pitch_degrees: 0.0,
            radius: 5.0,
            min_radius: 2.0,
            max_radius: 38.0,
            angle_speed: 6.0,
            radius_speed: 6.0,
            focus_speed: 4.0,
            zoom_step: 1.0,
        }
    }
}

/// Locations of scene assets on disk.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneAssetConfig {
    /// Basic lighting vertex shader
    pub basic_vertex_shader: PathBuf,
    /// Basic lighting fragment shader
    pub basic_fragment_shader: PathBuf,
    /// Skybox vertex shader
    pub skybox_vertex_shader: PathBuf,
    /// Skybox fragment shader
    pub skybox_fragment_shader: PathBuf,
    /// Earth surface texture
    pub earth_texture: PathBuf,
    /// Earth cloud layer texture
    pub earth_clouds_texture: PathBuf,
    /// Moon surface texture
    pub moon_texture: PathBuf,
    /// Skybox cubemap faces in +X, -X, +Y, -Y, +Z, -Z order
    pub skybox_faces: [PathBuf; 6],
}

impl Default for SceneAssetConfig {
    fn default() -> Self {
        Self {
            basic_vertex_shader: PathBuf::from("assets/shaders/basic.vert"),
            basic_fragment_shader: PathBuf::from("assets/shaders/basic.frag"),
            skybox_vertex_shader: PathBuf::from("assets/shaders/skybox.vert"),
            skybox_fragment_shader: PathBuf::from("assets/shaders/skybox.frag"),
            earth_texture: PathBuf::from("assets/textures/earth_day.png"),
            earth_clouds_texture: PathBuf::from("assets/textures/earth_clouds.png"),
            moon_texture: PathBuf::from("assets/textures/moon.png"),
            skybox_faces: [
                PathBuf::from("assets/skybox/right.png"),
                PathBuf::from("assets/skybox/left.png"),
                PathBuf::from("assets/skybox/top.png"),
                PathBuf::from("assets/skybox/bottom.png"),
                PathBuf::from("assets/skybox/front.png"),
                PathBuf::from("assets/skybox/back.png"),
            ],
        }
    }
}

impl SceneAssetConfig {
    /// Shader paths in the form the renderer consumes.
    pub fn shader_paths(&self) -> ShaderPaths {
        ShaderPaths {
            basic_vertex: self.basic_vertex_shader.clone(),
            basic_fragment: self.basic_fragment_shader.clone(),
            skybox_vertex: self.skybox_vertex_shader.clone(),
            skybox_fragment: self.skybox_fragment_shader.clone(),
        }
    }
}

/// Animation cadence and per-tick rotation increments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Seconds between scene animation ticks
    pub tick_interval_seconds: f64,
    /// Earth yaw increment per tick, degrees
    pub earth_rotation_per_tick: f32,
    /// Moon yaw increment per tick, degrees
    pub moon_rotation_per_tick: f32,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            tick_interval_seconds: 1.0 / 30.0,
            earth_rotation_per_tick: 0.05,
            moon_rotation_per_tick: 0.008,
        }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservatoryConfig {
    /// Orbit camera tuning
    pub camera: CameraConfig,
    /// Asset locations
    pub assets: SceneAssetConfig,
    /// Animation cadence
    pub animation: AnimationConfig,
}

impl ObservatoryConfig {
    /// Loads configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Loads from `path` when it exists, otherwise defaults.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            match Self::from_toml_file(path) {
                Ok(config) => return config,
                Err(err) => log::warn!("{err}; falling back to defaults"),
            }
        }
        Self::default()
    }
}
