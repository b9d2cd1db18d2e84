//! Surface material component

use crate::foundation::math::Vec4;
use crate::scenegraph::component::Component;

/// Shading parameters consumed by the basic lighting program.
///
/// Values are stored as authored; the renderer clamps them into shader
/// range at draw time so an out-of-range edit never corrupts a frame.
#[derive(Debug, Clone, Copy)]
pub struct MaterialProperties {
    /// Base diffuse color (RGBA)
    pub diffuse_color: Vec4,
    /// Specular highlight strength
    pub specular_strength: f32,
    /// Specular shininess exponent
    pub shininess: f32,
    /// How much of the global ambient term the surface picks up
    pub ambient_mix: f32,
    /// Exposure multiplier applied before gamma
    pub exposure: f32,
    /// Output gamma
    pub gamma: f32,
    /// Rim light color (RGBA)
    pub rim_color: Vec4,
    /// Rim light strength, zero disables the term
    pub rim_strength: f32,
    /// Rim falloff exponent
    pub rim_exponent: f32,
}

impl Default for MaterialProperties {
    fn default() -> Self {
        Self {
            diffuse_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular_strength: 1.0,
            shininess: 16.0,
            ambient_mix: 1.0,
            exposure: 1.0,
            gamma: 2.2,
            rim_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            rim_strength: 0.0,
            rim_exponent: 2.0,
        }
    }
}

/// Component carrying the node's [`MaterialProperties`].
///
/// Pure data; every hook is a no-op. The renderer reads it during the
/// mesh pass.
#[derive(Debug, Clone, Default)]
pub struct MaterialComponent {
    /// Shading parameters for this node's mesh
    pub properties: MaterialProperties,
}

impl MaterialComponent {
    /// Material with default properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Material with the given properties.
    pub fn with_properties(properties: MaterialProperties) -> Self {
        Self { properties }
    }
}

impl Component for MaterialComponent {}
