//! Shader-based scene renderer
//!
//! Walks the graph twice per frame: a gather pass that collects the global
//! lighting environment and every directional light in world space, then a
//! draw pass that composes world transforms top-down and submits skybox,
//! mesh, and axis draws in traversal order. Components the renderer has no
//! special handling for fall through to their own `on_render` hook.

use std::path::PathBuf;

use crate::foundation::math::{Mat3, Mat4, Vec3, Vec4};
use crate::render::context::RenderContext;
use crate::render::device::{
    AxisDraw, BasicUniformLocations, BasicUniformValues, DirectionalLightData, MeshDraw,
    ProgramHandle, RenderDevice, ShaderService, SkyboxDraw, SkyboxUniformLocations,
    TextureLayerBinding, MAX_DIRECTIONAL_LIGHTS,
};
use crate::scenegraph::component::NodeContext;
use crate::scenegraph::components::{
    AxesComponent, DirectionalLightComponent, GlobalLightingComponent, MaterialComponent,
    MaterialProperties, RenderMode, SkyboxComponent, SphereMeshComponent, TextureLayersComponent,
    MAX_TEXTURE_LAYERS,
};
use crate::scenegraph::{NodeKey, SceneGraph};

/// Source locations of the two shader programs the renderer uses.
#[derive(Debug, Clone)]
pub struct ShaderPaths {
    /// Basic lighting vertex shader
    pub basic_vertex: PathBuf,
    /// Basic lighting fragment shader
    pub basic_fragment: PathBuf,
    /// Skybox vertex shader
    pub skybox_vertex: PathBuf,
    /// Skybox fragment shader
    pub skybox_fragment: PathBuf,
}

impl Default for ShaderPaths {
    fn default() -> Self {
        Self {
            basic_vertex: PathBuf::from("assets/shaders/basic.vert"),
            basic_fragment: PathBuf::from("assets/shaders/basic.frag"),
            skybox_vertex: PathBuf::from("assets/shaders/skybox.vert"),
            skybox_fragment: PathBuf::from("assets/shaders/skybox.frag"),
        }
    }
}

/// Lighting environment collected by the gather pass.
struct FrameLighting {
    ambient_color: Vec4,
    background_color: Vec4,
    enable_lighting: bool,
    lights: [DirectionalLightData; MAX_DIRECTIONAL_LIGHTS],
    light_count: usize,
}

impl Default for FrameLighting {
    fn default() -> Self {
        Self {
            ambient_color: Vec4::new(0.5, 0.5, 0.5, 1.0),
            background_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            enable_lighting: true,
            lights: [DirectionalLightData::default(); MAX_DIRECTIONAL_LIGHTS],
            light_count: 0,
        }
    }
}

/// Renderer over an abstract [`RenderDevice`].
///
/// Shader programs and uniform locations are resolved once at
/// construction. A failed basic-program load is logged there and the
/// renderer degrades to doing nothing, so a broken asset install cannot
/// take the process down mid-frame.
pub struct SceneRenderer {
    basic_program: Option<ProgramHandle>,
    skybox_program: Option<ProgramHandle>,
    basic_locations: BasicUniformLocations,
    skybox_locations: SkyboxUniformLocations,
}

impl SceneRenderer {
    /// Loads both shader programs and caches their uniform locations.
    pub fn new(service: &mut dyn ShaderService, paths: &ShaderPaths) -> Self {
        let basic_program = match service.load_program(&paths.basic_vertex, &paths.basic_fragment) {
            Ok(program) => Some(program),
            Err(err) => {
                log::error!("SceneRenderer: basic shader failed to load: {err}; rendering disabled");
                None
            }
        };

        let skybox_program =
            match service.load_program(&paths.skybox_vertex, &paths.skybox_fragment) {
                Ok(program) => Some(program),
                Err(err) => {
                    log::warn!("SceneRenderer: skybox shader failed to load: {err}; skybox disabled");
                    None
                }
            };

        let basic_locations = basic_program
            .map(|program| Self::resolve_basic_locations(service, program))
            .unwrap_or_default();
        let skybox_locations = skybox_program
            .map(|program| SkyboxUniformLocations {
                view: service.uniform_location(program, "uView"),
                projection: service.uniform_location(program, "uProjection"),
                cubemap: service.uniform_location(program, "uCubemap"),
            })
            .unwrap_or_default();

        if basic_program.is_some() {
            log::info!("SceneRenderer: shader programs ready");
        }

        Self {
            basic_program,
            skybox_program,
            basic_locations,
            skybox_locations,
        }
    }

    /// Whether the basic program loaded and draws will be submitted.
    pub fn is_operational(&self) -> bool {
        self.basic_program.is_some()
    }

    /// Renders one frame of the graph onto `device`.
    ///
    /// No-op when the basic program failed to load.
    pub fn render(
        &self,
        graph: &mut SceneGraph,
        context: &RenderContext,
        device: &mut dyn RenderDevice,
    ) {
        let Some(basic_program) = self.basic_program else {
            return;
        };

        let lighting = Self::gather_lighting(graph);
        device.set_clear_color(lighting.background_color);

        if let Some(root) = graph.root() {
            self.render_node(
                graph,
                root,
                Mat4::identity(),
                basic_program,
                &lighting,
                context,
                device,
            );
        }
    }

    fn resolve_basic_locations(
        service: &mut dyn ShaderService,
        program: ProgramHandle,
    ) -> BasicUniformLocations {
        let mut resolve = |name: &str| service.uniform_location(program, name);
        BasicUniformLocations {
            model: resolve("uModel"),
            view: resolve("uView"),
            projection: resolve("uProjection"),
            camera_position: resolve("uCameraPos"),
            ambient_color: resolve("uAmbientColor"),
            material_diffuse: resolve("uMaterialDiffuse"),
            material_ambient_mix: resolve("uMaterialAmbientMix"),
            material_specular_strength: resolve("uMaterialSpecularStrength"),
            material_shininess: resolve("uMaterialShininess"),
            material_exposure: resolve("uMaterialExposure"),
            material_gamma: resolve("uMaterialGamma"),
            texture_layer_count: resolve("uTextureLayerCount"),
            texture_layers: resolve("uTextureLayers"),
            texture_blend_modes: resolve("uTextureBlendModes"),
            texture_blend_factors: resolve("uTextureBlendFactors"),
            use_vertex_color: resolve("uUseVertexColor"),
            enable_lighting: resolve("uEnableLighting"),
            normal_matrix: resolve("uNormalMatrix"),
            light_count: resolve("uDirectionalLightCount"),
            light_directions: resolve("uLightDirections"),
            light_diffuse: resolve("uLightDiffuse"),
            light_specular: resolve("uLightSpecular"),
            light_enabled: resolve("uLightEnabled"),
        }
    }

    /// First pass: global lighting state plus every directional light,
    /// rotated into world space by its owning node's transform.
    fn gather_lighting(graph: &SceneGraph) -> FrameLighting {
        let mut frame = FrameLighting::default();

        for key in graph.traversal_order() {
            let Some(node) = graph.node(key) else {
                continue;
            };

            if let Some(global) = node.component::<GlobalLightingComponent>() {
                frame.ambient_color = global.lighting.ambient_color;
                frame.background_color = global.lighting.background_color;
                frame.enable_lighting = global.lighting.enable_lighting;
            }

            let world = graph.world_transform(key);
            for light in node
                .components()
                .iter()
                .filter_map(|c| c.as_any().downcast_ref::<DirectionalLightComponent>())
            {
                if frame.light_count == MAX_DIRECTIONAL_LIGHTS {
                    log::debug!("SceneRenderer: directional light limit reached; extras ignored");
                    break;
                }
                let data = &light.light;
                frame.lights[frame.light_count] = DirectionalLightData {
                    direction: Self::world_light_direction(&world, data.direction),
                    diffuse: data.diffuse * data.intensity,
                    specular: data.specular * data.intensity,
                    enabled: data.enabled,
                };
                frame.light_count += 1;
            }
        }

        frame
    }

    fn world_light_direction(world: &Mat4, local: Vec3) -> Vec3 {
        let rotated = world.fixed_view::<3, 3>(0, 0) * local;
        let norm = rotated.norm();
        if norm > 1e-6 {
            rotated / norm
        } else {
            Vec3::new(0.0, 0.0, -1.0)
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_node(
        &self,
        graph: &mut SceneGraph,
        key: NodeKey,
        parent_world: Mat4,
        basic_program: ProgramHandle,
        lighting: &FrameLighting,
        context: &RenderContext,
        device: &mut dyn RenderDevice,
    ) {
        let Some(node) = graph.node(key) else {
            return;
        };
        let local = node.local_transform();
        let world = parent_world * local;
        let name = node.name().to_string();

        let material = node
            .component::<MaterialComponent>()
            .map(|material| material.properties)
            .unwrap_or_default();
        let (texture_layers, texture_layer_count) = node
            .component::<TextureLayersComponent>()
            .map(TextureLayersComponent::shader_bindings)
            .unwrap_or(([TextureLayerBinding::default(); MAX_TEXTURE_LAYERS], 0));

        let component_count = node.components().len();
        for index in 0..component_count {
            self.render_component(
                graph,
                key,
                index,
                &name,
                world,
                basic_program,
                &material,
                texture_layers,
                texture_layer_count,
                lighting,
                context,
                device,
            );
        }

        let children: Vec<NodeKey> = graph
            .node(key)
            .map(|node| node.children().to_vec())
            .unwrap_or_default();
        for child in children {
            self.render_node(
                graph,
                child,
                world,
                basic_program,
                lighting,
                context,
                device,
            );
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn render_component(
        &self,
        graph: &mut SceneGraph,
        key: NodeKey,
        index: usize,
        name: &str,
        world: Mat4,
        basic_program: ProgramHandle,
        material: &MaterialProperties,
        texture_layers: [TextureLayerBinding; MAX_TEXTURE_LAYERS],
        texture_layer_count: usize,
        lighting: &FrameLighting,
        context: &RenderContext,
        device: &mut dyn RenderDevice,
    ) {
        let Some(node) = graph.node_mut(key) else {
            return;
        };
        let local = node.local_transform();
        let Some(component) = node.components_mut().get_mut(index) else {
            return;
        };

        if let Some(skybox) = component.as_any_mut().downcast_mut::<SkyboxComponent>() {
            let Some(program) = self.skybox_program else {
                return;
            };
            let cubemap = skybox.cubemap;
            if !cubemap.is_loaded() {
                return;
            }
            let mut view = context.view_matrix;
            view[(0, 3)] = 0.0;
            view[(1, 3)] = 0.0;
            view[(2, 3)] = 0.0;
            device.draw_skybox(&SkyboxDraw {
                program,
                locations: &self.skybox_locations,
                view_matrix: view,
                projection_matrix: context.projection_matrix,
                cubemap,
                geometry: skybox.geometry(),
            });
            return;
        }

        if let Some(mesh) = component.as_any_mut().downcast_mut::<SphereMeshComponent>() {
            let values = Self::basic_values(
                world,
                material,
                texture_layers,
                texture_layer_count,
                false,
                lighting.enable_lighting,
                lighting,
                context,
            );
            let wireframe = mesh.render_mode == RenderMode::Wireframe;
            device.draw_mesh(&MeshDraw {
                program: basic_program,
                locations: &self.basic_locations,
                values: &values,
                geometry: mesh.geometry(),
                wireframe,
            });
            return;
        }

        if let Some(axes) = component.as_any_mut().downcast_mut::<AxesComponent>() {
            if !axes.enabled {
                return;
            }
            let values = Self::basic_values(
                world,
                material,
                [TextureLayerBinding::default(); MAX_TEXTURE_LAYERS],
                0,
                true,
                false,
                lighting,
                context,
            );
            let line_width = axes.line_width;
            device.draw_axes(&AxisDraw {
                program: basic_program,
                locations: &self.basic_locations,
                values: &values,
                geometry: axes.geometry(),
                line_width,
            });
            return;
        }

        // Everything else renders itself.
        let ctx = NodeContext {
            key,
            name,
            local_transform: local,
        };
        component.on_render(&ctx, device);
    }

    #[allow(clippy::too_many_arguments)]
    fn basic_values(
        model: Mat4,
        material: &MaterialProperties,
        texture_layers: [TextureLayerBinding; MAX_TEXTURE_LAYERS],
        texture_layer_count: usize,
        use_vertex_color: bool,
        enable_lighting: bool,
        lighting: &FrameLighting,
        context: &RenderContext,
    ) -> BasicUniformValues {
        BasicUniformValues {
            model,
            view: context.view_matrix,
            projection: context.projection_matrix,
            camera_position: context.camera_position,
            ambient_color: lighting.ambient_color,
            material_diffuse: material.diffuse_color,
            material_ambient_mix: material.ambient_mix.clamp(0.0, 1.0),
            material_specular_strength: material.specular_strength.max(0.0),
            material_shininess: material.shininess.max(1.0),
            material_exposure: material.exposure.max(0.0),
            material_gamma: material.gamma.max(0.1),
            texture_layer_count,
            texture_layers,
            use_vertex_color,
            enable_lighting,
            normal_matrix: Self::normal_matrix(&model),
            light_count: lighting.light_count,
            lights: lighting.lights,
        }
    }

    /// transpose(inverse(upper-left 3x3)); identity when the transform is
    /// singular so a zero-scale node cannot poison the draw.
    fn normal_matrix(model: &Mat4) -> Mat3 {
        let linear: Mat3 = model.fixed_view::<3, 3>(0, 0).clone_owned();
        if linear.determinant().abs() <= 1e-8 {
            return Mat3::identity();
        }
        linear
            .try_inverse()
            .map_or_else(Mat3::identity, |inverse| inverse.transpose())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::TextureHandle;
    use crate::render::device::{DrawEvent, HeadlessShaderService, RecordingDevice};
    use crate::scenegraph::components::{TransformComponent, LightData};
    use crate::scenegraph::SceneNode;
    use approx::assert_relative_eq;

    fn renderer() -> SceneRenderer {
        let mut service = HeadlessShaderService::assume_present();
        SceneRenderer::new(&mut service, &ShaderPaths::default())
    }

    fn lit_sphere_graph() -> SceneGraph {
        let mut graph = SceneGraph::new();
        let root = graph.set_root(SceneNode::named("root"));
        graph.add_child(
            root,
            SceneNode::named("lighting")
                .with_component(Box::new(GlobalLightingComponent::with_ambient(Vec4::new(
                    0.18, 0.18, 0.18, 1.0,
                ))))
                .with_component(Box::new(DirectionalLightComponent::with_direction(
                    Vec3::new(0.0, 0.0, -10.0),
                ))),
        );
        graph.add_child(
            root,
            SceneNode::named("planet")
                .with_component(Box::new(TransformComponent::new()))
                .with_component(Box::new(SphereMeshComponent::with_radius(1.0)))
                .with_component(Box::new(MaterialComponent::new())),
        );
        graph
    }

    #[test]
    fn failed_basic_shader_disables_rendering() {
        let mut service = HeadlessShaderService::new();
        let renderer = SceneRenderer::new(&mut service, &ShaderPaths::default());
        assert!(!renderer.is_operational());

        let mut graph = lit_sphere_graph();
        let mut device = RecordingDevice::new();
        renderer.render(&mut graph, &RenderContext::default(), &mut device);
        assert!(device.events.is_empty());
    }

    #[test]
    fn frame_starts_with_the_background_clear_color() {
        let renderer = renderer();
        let mut graph = lit_sphere_graph();
        let mut device = RecordingDevice::new();
        renderer.render(&mut graph, &RenderContext::default(), &mut device);

        match &device.events[0] {
            DrawEvent::ClearColor(color) => assert_relative_eq!(color.w, 1.0),
            other => panic!("expected clear color first, got {other:?}"),
        }
    }

    #[test]
    fn sphere_draw_carries_gathered_lights() {
        let renderer = renderer();
        let mut graph = lit_sphere_graph();
        let mut device = RecordingDevice::new();
        renderer.render(&mut graph, &RenderContext::default(), &mut device);

        let mesh = device
            .events
            .iter()
            .find_map(|event| match event {
                DrawEvent::Mesh {
                    light_count,
                    lighting_enabled,
                    ..
                } => Some((*light_count, *lighting_enabled)),
                _ => None,
            })
            .expect("sphere should be drawn");
        assert_eq!(mesh, (1, true));
    }

    #[test]
    fn skybox_without_cubemap_is_skipped() {
        let renderer = renderer();
        let mut graph = SceneGraph::new();
        let root = graph.set_root(SceneNode::named("root"));
        graph.add_child(
            root,
            SceneNode::named("sky")
                .with_component(Box::new(SkyboxComponent::new(TextureHandle::NOT_LOADED))),
        );

        let mut device = RecordingDevice::new();
        renderer.render(&mut graph, &RenderContext::default(), &mut device);
        assert!(!device
            .events
            .iter()
            .any(|event| matches!(event, DrawEvent::Skybox { .. })));
    }

    #[test]
    fn skybox_draws_before_meshes_in_traversal_order() {
        let renderer = renderer();
        let mut graph = SceneGraph::new();
        let root = graph.set_root(SceneNode::named("root"));
        graph.add_child(
            root,
            SceneNode::named("sky")
                .with_component(Box::new(SkyboxComponent::new(TextureHandle::new(9)))),
        );
        graph.add_child(
            root,
            SceneNode::named("planet")
                .with_component(Box::new(SphereMeshComponent::with_radius(1.0))),
        );

        let mut device = RecordingDevice::new();
        renderer.render(&mut graph, &RenderContext::default(), &mut device);

        let sky = device
            .events
            .iter()
            .position(|e| matches!(e, DrawEvent::Skybox { .. }))
            .expect("skybox drawn");
        let mesh = device
            .events
            .iter()
            .position(|e| matches!(e, DrawEvent::Mesh { .. }))
            .expect("mesh drawn");
        assert!(sky < mesh);
    }

    #[test]
    fn disabled_axes_are_not_drawn() {
        let renderer = renderer();
        let mut graph = SceneGraph::new();
        let root = graph.set_root(SceneNode::named("root"));
        let axes = graph
            .add_child(
                root,
                SceneNode::named("axes").with_component(Box::new(AxesComponent::with_length(10.0))),
            )
            .unwrap();

        let mut device = RecordingDevice::new();
        renderer.render(&mut graph, &RenderContext::default(), &mut device);
        assert!(!device.events.iter().any(|e| matches!(e, DrawEvent::Axes { .. })));

        graph
            .node_mut(axes)
            .unwrap()
            .component_mut::<AxesComponent>()
            .unwrap()
            .enabled = true;
        device.clear();
        renderer.render(&mut graph, &RenderContext::default(), &mut device);
        assert!(device.events.iter().any(|e| matches!(e, DrawEvent::Axes { .. })));
    }

    #[test]
    fn light_direction_rotates_with_the_owning_node() {
        let mut graph = SceneGraph::new();
        let root = graph.set_root(SceneNode::named("root"));
        graph.add_child(
            root,
            SceneNode::named("sun")
                .with_component(Box::new(
                    TransformComponent::new().with_rotation(Vec3::new(0.0, 90.0, 0.0)),
                ))
                .with_component(Box::new(DirectionalLightComponent::with_direction(
                    Vec3::new(1.0, 0.0, 0.0),
                ))),
        );

        let lighting = SceneRenderer::gather_lighting(&graph);
        assert_eq!(lighting.light_count, 1);
        assert_relative_eq!(
            lighting.lights[0].direction,
            Vec3::new(0.0, 0.0, -1.0),
            epsilon = 1e-5
        );
    }

    #[test]
    fn degenerate_light_direction_falls_back() {
        let mut graph = SceneGraph::new();
        graph.set_root(SceneNode::named("root").with_component(Box::new(
            DirectionalLightComponent::with_direction(Vec3::zeros()),
        )));

        let lighting = SceneRenderer::gather_lighting(&graph);
        assert_relative_eq!(lighting.lights[0].direction, Vec3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn light_colors_scale_with_intensity() {
        let mut graph = SceneGraph::new();
        graph.set_root(
            SceneNode::named("root").with_component(Box::new(DirectionalLightComponent {
                light: LightData {
                    intensity: 0.5,
                    ..LightData::default()
                },
            })),
        );

        let lighting = SceneRenderer::gather_lighting(&graph);
        assert_relative_eq!(lighting.lights[0].diffuse.x, 0.5);
        assert_relative_eq!(lighting.lights[0].specular.x, 0.5);
    }

    #[test]
    fn normal_matrix_guards_against_singular_transforms() {
        let singular = Mat4::new_nonuniform_scaling(&Vec3::new(0.0, 1.0, 1.0));
        assert_relative_eq!(SceneRenderer::normal_matrix(&singular), Mat3::identity());

        let scaled = Mat4::new_nonuniform_scaling(&Vec3::new(2.0, 2.0, 2.0));
        let normal = SceneRenderer::normal_matrix(&scaled);
        assert_relative_eq!(normal[(0, 0)], 0.5, epsilon = 1e-6);
    }

    #[test]
    fn material_values_are_clamped_into_shader_range() {
        let material = MaterialProperties {
            ambient_mix: 3.0,
            specular_strength: -1.0,
            shininess: 0.0,
            exposure: -2.0,
            gamma: 0.0,
            ..MaterialProperties::default()
        };
        let lighting = FrameLighting::default();
        let values = SceneRenderer::basic_values(
            Mat4::identity(),
            &material,
            [TextureLayerBinding::default(); MAX_TEXTURE_LAYERS],
            0,
            false,
            true,
            &lighting,
            &RenderContext::default(),
        );
        assert_relative_eq!(values.material_ambient_mix, 1.0);
        assert_relative_eq!(values.material_specular_strength, 0.0);
        assert_relative_eq!(values.material_shininess, 1.0);
        assert_relative_eq!(values.material_exposure, 0.0);
        assert_relative_eq!(values.material_gamma, 0.1);
    }
}
