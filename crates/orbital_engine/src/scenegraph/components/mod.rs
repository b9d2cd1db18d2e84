//! Concrete scene components
//!
//! Everything a node can carry: spatial placement, renderable geometry,
//! surface appearance, light sources, and the camera binding. Each type
//! implements [`Component`](crate::scenegraph::Component) and overrides
//! only the hooks it needs.

pub mod axes;
pub mod camera_binding;
pub mod lights;
pub mod material;
pub mod skybox;
pub mod sphere_mesh;
pub mod texture_layers;
pub mod transform;

pub use axes::AxesComponent;
pub use camera_binding::CameraBindingComponent;
pub use lights::{DirectionalLightComponent, GlobalLightingComponent, LightData, LightingData};
pub use material::{MaterialComponent, MaterialProperties};
pub use skybox::SkyboxComponent;
pub use sphere_mesh::{RenderMode, SphereMeshComponent};
pub use texture_layers::{TextureBlendMode, TextureLayer, TextureLayersComponent, MAX_TEXTURE_LAYERS};
pub use transform::TransformComponent;
