//! Opaque GPU seams
//!
//! The core never talks to a graphics API directly. Shader compilation is
//! consumed through [`ShaderService`] and draw submission through
//! [`RenderDevice`]; both are narrow traits a backend implements. The
//! devices shipped here are the no-op [`NullDevice`] and the
//! [`RecordingDevice`] used by tests and the headless driver.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::assets::TextureHandle;
use crate::foundation::math::{Mat3, Mat4, Vec2, Vec3, Vec4};
use crate::render::mesh::{AxisGeometry, SkyboxGeometry, SphereGeometry};
use crate::scenegraph::components::{TextureBlendMode, MAX_TEXTURE_LAYERS};

/// Maximum number of directional lights a single draw can consume.
pub const MAX_DIRECTIONAL_LIGHTS: usize = 4;

/// Shader compilation errors
#[derive(Debug, Error)]
pub enum ShaderError {
    /// A shader source file was not found on disk.
    #[error("shader source missing: {path}")]
    SourceMissing {
        /// Path that failed to resolve
        path: PathBuf,
    },

    /// A shader stage failed to compile.
    #[error("shader compilation failed: {message}")]
    Compile {
        /// Compiler diagnostics
        message: String,
    },

    /// Compiled stages failed to link into a program.
    #[error("program link failed: {message}")]
    Link {
        /// Linker diagnostics
        message: String,
    },
}

/// Opaque handle to a compiled shader program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(u32);

/// Opaque handle to a resolved shader uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UniformLocation(i32);

/// Shader compilation service consumed by the renderer.
///
/// Failure is an ordinary outcome: the renderer logs it once and degrades
/// to rendering nothing.
pub trait ShaderService {
    /// Compiles and links a program from vertex + fragment source paths.
    fn load_program(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<ProgramHandle, ShaderError>;

    /// Resolves a uniform by name, or `None` if the program does not use it.
    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation>;
}

/// Shader service for headless runs and tests.
///
/// Compiles nothing; it hands out sequential program handles and stable
/// per-name uniform locations. With `require_sources`, a missing source
/// file still fails the load so the renderer's degrade path is exercised.
#[derive(Default)]
pub struct HeadlessShaderService {
    require_sources: bool,
    next_program: u32,
    locations: HashMap<(ProgramHandle, String), UniformLocation>,
}

impl HeadlessShaderService {
    /// Service that fails loads whose source files are absent on disk.
    pub fn new() -> Self {
        Self {
            require_sources: true,
            ..Self::default()
        }
    }

    /// Service that accepts every load request.
    pub fn assume_present() -> Self {
        Self::default()
    }
}

impl ShaderService for HeadlessShaderService {
    fn load_program(
        &mut self,
        vertex_path: &Path,
        fragment_path: &Path,
    ) -> Result<ProgramHandle, ShaderError> {
        if self.require_sources {
            for path in [vertex_path, fragment_path] {
                if !path.exists() {
                    return Err(ShaderError::SourceMissing {
                        path: path.to_path_buf(),
                    });
                }
            }
        }
        let handle = ProgramHandle(self.next_program);
        self.next_program += 1;
        Ok(handle)
    }

    fn uniform_location(&mut self, program: ProgramHandle, name: &str) -> Option<UniformLocation> {
        let next = self.locations.len() as i32;
        Some(
            *self
                .locations
                .entry((program, name.to_string()))
                .or_insert(UniformLocation(next)),
        )
    }
}

/// One directional light as consumed by the lighting shader.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLightData {
    /// Normalized world-space direction the light travels in
    pub direction: Vec3,
    /// Diffuse color pre-scaled by intensity
    pub diffuse: Vec4,
    /// Specular color pre-scaled by intensity
    pub specular: Vec4,
    /// Whether the light contributes this frame
    pub enabled: bool,
}

impl Default for DirectionalLightData {
    fn default() -> Self {
        Self {
            direction: Vec3::new(0.0, 0.0, -1.0),
            diffuse: Vec4::new(1.0, 1.0, 1.0, 1.0),
            specular: Vec4::new(1.0, 1.0, 1.0, 1.0),
            enabled: false,
        }
    }
}

/// One bound texture layer of a mesh draw.
#[derive(Debug, Clone, Copy)]
pub struct TextureLayerBinding {
    /// Texture to sample
    pub texture: TextureHandle,
    /// How the layer combines with the layers below it
    pub blend_mode: TextureBlendMode,
    /// Blend factor or intensity for the layer
    pub blend_factor: f32,
    /// Current UV scroll offset
    pub uv_offset: Vec2,
}

impl Default for TextureLayerBinding {
    fn default() -> Self {
        Self {
            texture: TextureHandle::NOT_LOADED,
            blend_mode: TextureBlendMode::None,
            blend_factor: 1.0,
            uv_offset: Vec2::zeros(),
        }
    }
}

/// Cached uniform locations of the basic lighting program.
///
/// Resolved once through the [`ShaderService`] when the renderer is
/// constructed, never per frame.
#[derive(Debug, Default, Clone)]
pub struct BasicUniformLocations {
    /// Model matrix
    pub model: Option<UniformLocation>,
    /// View matrix
    pub view: Option<UniformLocation>,
    /// Projection matrix
    pub projection: Option<UniformLocation>,
    /// Camera world position
    pub camera_position: Option<UniformLocation>,
    /// Global ambient color
    pub ambient_color: Option<UniformLocation>,
    /// Material diffuse color
    pub material_diffuse: Option<UniformLocation>,
    /// Material ambient mix factor
    pub material_ambient_mix: Option<UniformLocation>,
    /// Material specular strength
    pub material_specular_strength: Option<UniformLocation>,
    /// Material shininess exponent
    pub material_shininess: Option<UniformLocation>,
    /// Material exposure
    pub material_exposure: Option<UniformLocation>,
    /// Material gamma
    pub material_gamma: Option<UniformLocation>,
    /// Texture layer count
    pub texture_layer_count: Option<UniformLocation>,
    /// Texture layer samplers
    pub texture_layers: Option<UniformLocation>,
    /// Texture layer blend modes
    pub texture_blend_modes: Option<UniformLocation>,
    /// Texture layer blend factors
    pub texture_blend_factors: Option<UniformLocation>,
    /// Vertex-color path toggle
    pub use_vertex_color: Option<UniformLocation>,
    /// Lighting toggle
    pub enable_lighting: Option<UniformLocation>,
    /// Normal matrix
    pub normal_matrix: Option<UniformLocation>,
    /// Directional light count
    pub light_count: Option<UniformLocation>,
    /// Directional light directions
    pub light_directions: Option<UniformLocation>,
    /// Directional light diffuse colors
    pub light_diffuse: Option<UniformLocation>,
    /// Directional light specular colors
    pub light_specular: Option<UniformLocation>,
    /// Directional light enable flags
    pub light_enabled: Option<UniformLocation>,
}

/// Cached uniform locations of the skybox program.
#[derive(Debug, Default, Clone)]
pub struct SkyboxUniformLocations {
    /// Translation-stripped view matrix
    pub view: Option<UniformLocation>,
    /// Projection matrix
    pub projection: Option<UniformLocation>,
    /// Cubemap sampler
    pub cubemap: Option<UniformLocation>,
}

/// Fully resolved uniform values for one mesh or axis draw.
#[derive(Debug, Clone)]
pub struct BasicUniformValues {
    /// World transform of the node being drawn
    pub model: Mat4,
    /// View matrix from the frame context
    pub view: Mat4,
    /// Projection matrix from the frame context
    pub projection: Mat4,
    /// Camera world position
    pub camera_position: Vec3,
    /// Global ambient color
    pub ambient_color: Vec4,
    /// Material diffuse color
    pub material_diffuse: Vec4,
    /// Material ambient mix, clamped to [0, 1]
    pub material_ambient_mix: f32,
    /// Material specular strength, non-negative
    pub material_specular_strength: f32,
    /// Material shininess, at least 1
    pub material_shininess: f32,
    /// Material exposure, non-negative
    pub material_exposure: f32,
    /// Material gamma, at least 0.1
    pub material_gamma: f32,
    /// Number of active texture layers
    pub texture_layer_count: usize,
    /// Texture layer bindings; entries past the count are defaults
    pub texture_layers: [TextureLayerBinding; MAX_TEXTURE_LAYERS],
    /// Whether the vertex-color path is active
    pub use_vertex_color: bool,
    /// Whether lighting applies to this draw
    pub enable_lighting: bool,
    /// transpose(inverse(upper-left 3x3 of model)), identity if singular
    pub normal_matrix: Mat3,
    /// Number of active directional lights
    pub light_count: usize,
    /// Directional lights; entries past the count are defaults
    pub lights: [DirectionalLightData; MAX_DIRECTIONAL_LIGHTS],
}

/// Skybox draw call.
pub struct SkyboxDraw<'a> {
    /// Skybox shader program
    pub program: ProgramHandle,
    /// Cached skybox uniform locations
    pub locations: &'a SkyboxUniformLocations,
    /// View matrix with the translation column stripped
    pub view_matrix: Mat4,
    /// Projection matrix
    pub projection_matrix: Mat4,
    /// Cubemap texture
    pub cubemap: TextureHandle,
    /// Cube geometry
    pub geometry: &'a SkyboxGeometry,
}

/// Sphere-mesh draw call.
pub struct MeshDraw<'a> {
    /// Basic lighting program
    pub program: ProgramHandle,
    /// Cached uniform locations
    pub locations: &'a BasicUniformLocations,
    /// Resolved uniform values
    pub values: &'a BasicUniformValues,
    /// Sphere geometry
    pub geometry: &'a SphereGeometry,
    /// Draw edges only instead of filled triangles
    pub wireframe: bool,
}

/// Debug-axis draw call (vertex-color path, lighting off).
pub struct AxisDraw<'a> {
    /// Basic lighting program
    pub program: ProgramHandle,
    /// Cached uniform locations
    pub locations: &'a BasicUniformLocations,
    /// Resolved uniform values
    pub values: &'a BasicUniformValues,
    /// Line and arrowhead geometry
    pub geometry: &'a AxisGeometry,
    /// Line width in pixels
    pub line_width: f32,
}

/// Draw-call sink implemented by a graphics backend.
///
/// Expected skybox state: depth writes disabled, front faces culled, so the
/// cube renders behind everything at infinite apparent distance.
pub trait RenderDevice {
    /// Sets the background clear color for the frame.
    fn set_clear_color(&mut self, color: Vec4);

    /// Draws the camera-centered skybox.
    fn draw_skybox(&mut self, draw: &SkyboxDraw<'_>);

    /// Draws a lit, textured sphere mesh.
    fn draw_mesh(&mut self, draw: &MeshDraw<'_>);

    /// Draws vertex-colored axis lines and arrowheads.
    fn draw_axes(&mut self, draw: &AxisDraw<'_>);
}

/// Device that ignores every draw call.
#[derive(Debug, Default)]
pub struct NullDevice;

impl RenderDevice for NullDevice {
    fn set_clear_color(&mut self, _color: Vec4) {}
    fn draw_skybox(&mut self, _draw: &SkyboxDraw<'_>) {}
    fn draw_mesh(&mut self, _draw: &MeshDraw<'_>) {}
    fn draw_axes(&mut self, _draw: &AxisDraw<'_>) {}
}

/// One submitted draw call, as recorded by [`RecordingDevice`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawEvent {
    /// Clear color was set
    ClearColor(Vec4),
    /// Skybox submitted
    Skybox {
        /// Index count of the cube geometry
        index_count: usize,
    },
    /// Sphere mesh submitted
    Mesh {
        /// Index count of the sphere geometry
        index_count: usize,
        /// Wireframe flag at submission
        wireframe: bool,
        /// Active directional lights
        light_count: usize,
        /// Active texture layers
        texture_layer_count: usize,
        /// Lighting toggle at submission
        lighting_enabled: bool,
    },
    /// Axis geometry submitted
    Axes {
        /// Total vertex count (lines + triangles)
        vertex_count: usize,
        /// Line width at submission
        line_width: f32,
    },
}

/// Device that records submissions instead of drawing.
///
/// Used by the headless driver and by tests that assert on draw ordering
/// and parameters.
#[derive(Debug, Default)]
pub struct RecordingDevice {
    /// Draw calls in submission order
    pub events: Vec<DrawEvent>,
}

impl RecordingDevice {
    /// Create an empty recording device
    pub fn new() -> Self {
        Self::default()
    }

    /// Discards all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl RenderDevice for RecordingDevice {
    fn set_clear_color(&mut self, color: Vec4) {
        self.events.push(DrawEvent::ClearColor(color));
    }

    fn draw_skybox(&mut self, draw: &SkyboxDraw<'_>) {
        self.events.push(DrawEvent::Skybox {
            index_count: draw.geometry.index_count(),
        });
    }

    fn draw_mesh(&mut self, draw: &MeshDraw<'_>) {
        self.events.push(DrawEvent::Mesh {
            index_count: draw.geometry.index_count(),
            wireframe: draw.wireframe,
            light_count: draw.values.light_count,
            texture_layer_count: draw.values.texture_layer_count,
            lighting_enabled: draw.values.enable_lighting,
        });
    }

    fn draw_axes(&mut self, draw: &AxisDraw<'_>) {
        self.events.push(DrawEvent::Axes {
            vertex_count: draw.geometry.vertices.len(),
            line_width: draw.line_width,
        });
    }
}
