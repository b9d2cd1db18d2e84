//! Skybox component

use crate::assets::TextureHandle;
use crate::render::mesh::{build_skybox_cube, SkyboxGeometry};
use crate::scenegraph::component::{Component, NodeContext};

/// Cubemapped sky rendered behind everything else.
///
/// The renderer strips the view translation and disables depth writes for
/// this draw, so the cube appears infinitely far regardless of camera
/// position. A missing cubemap skips the draw entirely.
pub struct SkyboxComponent {
    /// Cubemap texture; the sentinel handle disables the skybox
    pub cubemap: TextureHandle,
    geometry: Option<SkyboxGeometry>,
}

impl Default for SkyboxComponent {
    fn default() -> Self {
        Self {
            cubemap: TextureHandle::NOT_LOADED,
            geometry: None,
        }
    }
}

impl SkyboxComponent {
    /// Skybox sampling the given cubemap.
    pub fn new(cubemap: TextureHandle) -> Self {
        Self {
            cubemap,
            ..Self::default()
        }
    }

    /// Cube geometry, built on first use.
    pub fn geometry(&mut self) -> &SkyboxGeometry {
        self.geometry.get_or_insert_with(build_skybox_cube)
    }
}

impl Component for SkyboxComponent {
    fn on_detach(&mut self, _node: &NodeContext<'_>) {
        self.geometry = None;
    }
}
