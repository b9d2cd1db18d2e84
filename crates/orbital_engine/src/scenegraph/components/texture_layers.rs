//! Multi-layer texturing component

use crate::assets::TextureHandle;
use crate::foundation::math::Vec2;
use crate::render::device::TextureLayerBinding;
use crate::scenegraph::component::{Component, NodeContext};

/// Maximum number of texture layers a single mesh can blend.
pub const MAX_TEXTURE_LAYERS: usize = 4;

/// How a texture layer combines with the composite below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureBlendMode {
    /// Layer replaces the composite
    None,
    /// Component-wise multiply
    Multiply,
    /// Additive blend scaled by the blend factor
    Add,
    /// Alpha blend using the layer's alpha times the blend factor
    Alpha,
}

/// One texture layer: a sampler plus blend and scroll state.
#[derive(Debug, Clone, Copy)]
pub struct TextureLayer {
    /// Texture to sample; the sentinel handle skips the layer
    pub texture: TextureHandle,
    /// Blend mode against the layers below
    pub blend_mode: TextureBlendMode,
    /// Blend factor or intensity
    pub blend_factor: f32,
    /// UV scroll rate in texture coordinates per second
    pub scroll_per_second: Vec2,
    /// Accumulated UV offset, kept in [0, 1)
    pub uv_offset: Vec2,
}

impl TextureLayer {
    /// Static layer sampling `texture` with the given blend.
    pub fn new(texture: TextureHandle, blend_mode: TextureBlendMode, blend_factor: f32) -> Self {
        Self {
            texture,
            blend_mode,
            blend_factor,
            scroll_per_second: Vec2::zeros(),
            uv_offset: Vec2::zeros(),
        }
    }

    /// Builder-style UV scroll rate.
    #[must_use]
    pub fn with_scroll(mut self, scroll_per_second: Vec2) -> Self {
        self.scroll_per_second = scroll_per_second;
        self
    }
}

/// Ordered texture layers of a mesh node.
///
/// Holds up to [`MAX_TEXTURE_LAYERS`] layers; scrolling layers advance
/// their UV offsets during the update pass, wrapped into [0, 1) so the
/// offset never loses float precision over long runs.
#[derive(Debug, Clone, Default)]
pub struct TextureLayersComponent {
    layers: Vec<TextureLayer>,
}

impl TextureLayersComponent {
    /// Component with no layers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a layer; layers beyond the shader maximum are kept but
    /// never bound.
    pub fn add_layer(&mut self, layer: TextureLayer) {
        if self.layers.len() == MAX_TEXTURE_LAYERS {
            log::warn!(
                "TextureLayersComponent: more than {MAX_TEXTURE_LAYERS} layers; extras will not be bound"
            );
        }
        self.layers.push(layer);
    }

    /// Builder-style [`add_layer`](Self::add_layer).
    #[must_use]
    pub fn with_layer(mut self, layer: TextureLayer) -> Self {
        self.add_layer(layer);
        self
    }

    /// All layers in authoring order.
    pub fn layers(&self) -> &[TextureLayer] {
        &self.layers
    }

    /// Shader bindings for the loaded layers, and how many are active.
    ///
    /// Unloaded layers are skipped so a missing texture degrades that
    /// layer only, never the whole draw.
    pub fn shader_bindings(&self) -> ([TextureLayerBinding; MAX_TEXTURE_LAYERS], usize) {
        let mut bindings = [TextureLayerBinding::default(); MAX_TEXTURE_LAYERS];
        let mut count = 0;
        for layer in &self.layers {
            if count == MAX_TEXTURE_LAYERS {
                break;
            }
            if !layer.texture.is_loaded() {
                continue;
            }
            bindings[count] = TextureLayerBinding {
                texture: layer.texture,
                blend_mode: layer.blend_mode,
                blend_factor: layer.blend_factor,
                uv_offset: layer.uv_offset,
            };
            count += 1;
        }
        (bindings, count)
    }
}

impl Component for TextureLayersComponent {
    fn on_update(&mut self, _node: &NodeContext<'_>, delta_seconds: f64) {
        let dt = delta_seconds as f32;
        for layer in &mut self.layers {
            if layer.scroll_per_second == Vec2::zeros() {
                continue;
            }
            let advanced = layer.uv_offset + layer.scroll_per_second * dt;
            layer.uv_offset = Vec2::new(advanced.x.rem_euclid(1.0), advanced.y.rem_euclid(1.0));
        }
    }
}
