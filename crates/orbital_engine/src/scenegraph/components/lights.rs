//! Light source components

use crate::foundation::math::{Vec3, Vec4};
use crate::scenegraph::component::Component;

/// Parameters of one directional light.
#[derive(Debug, Clone, Copy)]
pub struct LightData {
    /// Direction the light travels in, in the owning node's local space
    pub direction: Vec3,
    /// Diffuse color
    pub diffuse: Vec4,
    /// Specular color
    pub specular: Vec4,
    /// Scalar multiplied into diffuse and specular at gather time
    pub intensity: f32,
    /// Whether the light contributes at all
    pub enabled: bool,
}

impl Default for LightData {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, -1.0),
            diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vec4::new(1.0, 1.0, 1.0, 1.0),
            intensity: 1.0,
            enabled: true,
        }
    }
}

/// Directional light attached to a scene node.
///
/// The stored direction is local; the renderer rotates it by the node's
/// world transform during the gather pass, so lights follow whatever they
/// are parented to.
#[derive(Debug, Clone, Default)]
pub struct DirectionalLightComponent {
    /// Light parameters
    pub light: LightData,
}

impl DirectionalLightComponent {
    /// Enabled white light travelling down -Z.
    pub fn new() -> Self {
        Self::default()
    }

    /// Light travelling in `direction` (local space, need not be normalized).
    pub fn with_direction(direction: Vec3) -> Self {
        Self {
            light: LightData {
                direction,
                ..LightData::default()
            },
        }
    }
}

impl Component for DirectionalLightComponent {}

/// Scene-wide lighting environment.
#[derive(Debug, Clone, Copy)]
pub struct LightingData {
    /// Ambient color added to every lit surface
    pub ambient_color: Vec4,
    /// Background clear color
    pub background_color: Vec4,
    /// Master lighting toggle for the whole scene
    pub enable_lighting: bool,
}

impl Default for LightingData {
    fn default() -> Self {
        Self {
            ambient_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            background_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            enable_lighting: true,
        }
    }
}

/// Global lighting component.
///
/// One per scene by convention; if several exist, the gather pass takes
/// the last one in traversal order.
#[derive(Debug, Clone, Default)]
pub struct GlobalLightingComponent {
    /// Ambient, background, and master-toggle state
    pub lighting: LightingData,
}

impl GlobalLightingComponent {
    /// Default lighting environment (mid-grey ambient over black).
    pub fn new() -> Self {
        Self::default()
    }

    /// Environment with the given ambient color.
    pub fn with_ambient(ambient_color: Vec4) -> Self {
        Self {
            lighting: LightingData {
                ambient_color,
                ..LightingData::default()
            },
        }
    }
}

impl Component for GlobalLightingComponent {}
