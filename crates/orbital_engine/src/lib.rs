//! # Orbital Engine
//!
//! Scene-graph core of an interactive Earth/Moon visualization.
//!
//! ## Features
//!
//! - **Scene Graph**: Single-rooted tree of nodes with ordered, polymorphic
//!   components and deterministic pre-order traversal
//! - **Orbit Camera**: Cinematic orbit controller with rate-limited, exact
//!   convergence and scripted preset playback
//! - **Renderer**: Backend-agnostic lighting/mesh/skybox/axis passes over
//!   an abstract render device
//! - **Assets**: Path-keyed texture cache that degrades gracefully when
//!   files are missing
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use orbital_engine::prelude::*;
//!
//! let config = ObservatoryConfig::default();
//! let mut textures = TextureCache::new();
//! let mut scene = Scene::new(&config, &mut textures);
//!
//! let mut shaders = HeadlessShaderService::assume_present();
//! let renderer = SceneRenderer::new(&mut shaders, &config.assets.shader_paths());
//!
//! let mut device = RecordingDevice::new();
//! scene.update_cinematic(1.0 / 60.0);
//! scene.update_components(1.0 / 60.0);
//! let context = RenderContext::default();
//! renderer.render(scene.graph_mut(), &context, &mut device);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod camera;
pub mod config;
pub mod foundation;
pub mod render;
pub mod scene;
pub mod scenegraph;

/// Common imports for building and driving a scene.
pub mod prelude {
    pub use crate::assets::{TextureCache, TextureHandle, TextureOptions};
    pub use crate::camera::{
        CameraAnchor, CameraPreset, CinematicController, Focus, OrbitCamera,
    };
    pub use crate::config::{CameraConfig, ObservatoryConfig, SceneAssetConfig};
    pub use crate::foundation::logging;
    pub use crate::foundation::time::{FixedStepAccumulator, Timer};
    pub use crate::render::{
        HeadlessShaderService, NullDevice, RecordingDevice, RenderContext, RenderDevice,
        SceneRenderer, ShaderService,
    };
    pub use crate::scene::Scene;
    pub use crate::scenegraph::components::RenderMode;
    pub use crate::scenegraph::{Component, NodeContext, NodeKey, SceneGraph, SceneNode};
}
