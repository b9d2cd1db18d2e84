//! Rendering
//!
//! CPU geometry builders, the abstract device seams, and the shader-based
//! scene renderer. Nothing here touches a graphics API; backends implement
//! [`RenderDevice`] and [`ShaderService`] to turn draw submissions into
//! real GPU work.

pub mod context;
pub mod device;
pub mod mesh;
pub mod renderer;

pub use context::RenderContext;
pub use device::{
    AxisDraw, BasicUniformLocations, BasicUniformValues, DirectionalLightData, DrawEvent,
    HeadlessShaderService, MeshDraw, NullDevice, ProgramHandle, RecordingDevice, RenderDevice,
    ShaderError, ShaderService, SkyboxDraw, SkyboxUniformLocations, TextureLayerBinding,
    UniformLocation, MAX_DIRECTIONAL_LIGHTS,
};
pub use renderer::{SceneRenderer, ShaderPaths};
