//! Earth-Moon observatory scene
//!
//! Assembles the scene graph (lighting, skybox, Earth, Moon, debug axes,
//! camera mount), owns the orbit camera and cinematic controller, and maps
//! keyboard input onto scene state. The scene has two notions of time:
//! discrete animation ticks that advance body rotations, and continuous
//! per-frame updates that drive the camera and scrolling textures.

use std::cell::RefCell;
use std::rc::Rc;

use crate::assets::{TextureCache, TextureOptions};
use crate::camera::{CameraAnchor, CameraPreset, CinematicController, Focus, OrbitCamera};
use crate::config::{AnimationConfig, ObservatoryConfig};
use crate::foundation::math::{km_to_gu, wrap_degrees, Vec2, Vec3, Vec4};
use crate::scenegraph::components::{
    AxesComponent, CameraBindingComponent, DirectionalLightComponent, GlobalLightingComponent,
    LightData, MaterialComponent, MaterialProperties, RenderMode, SkyboxComponent,
    SphereMeshComponent, TextureBlendMode, TextureLayer, TextureLayersComponent,
    TransformComponent,
};
use crate::scenegraph::{NodeKey, SceneGraph, SceneNode};

/// Moon orbital distance used by the stock layout, in graphics units.
const MOON_DISTANCE: f32 = 12.0;
/// Moon radius in the stock layout; oversized relative to scale so the
/// body reads well on screen.
const MOON_RADIUS: f32 = 0.5;
/// Debug axis length in graphics units.
const AXES_LENGTH: f32 = 10.0;

/// The assembled observatory scene.
pub struct Scene {
    graph: SceneGraph,
    earth: NodeKey,
    moon: NodeKey,
    axes: NodeKey,
    camera: Rc<RefCell<OrbitCamera>>,
    cinematic: CinematicController,
    animation: AnimationConfig,
    render_mode: RenderMode,
    show_axes: bool,
    animating: bool,
    zoom_step: f32,
}

impl Scene {
    /// Builds the scene graph, camera, and cinematic anchors, loading
    /// textures through `textures`. Missing assets degrade their feature
    /// and never fail construction.
    pub fn new(config: &ObservatoryConfig, textures: &mut TextureCache) -> Self {
        let camera = Rc::new(RefCell::new(Self::build_camera(config)));
        let mut graph = SceneGraph::new();
        let root = graph.set_root(SceneNode::named("root"));

        graph.add_child(
            root,
            SceneNode::named("lighting")
                .with_component(Box::new(GlobalLightingComponent::with_ambient(Vec4::new(
                    0.18, 0.18, 0.18, 1.0,
                ))))
                .with_component(Box::new(DirectionalLightComponent {
                    light: LightData {
                        // Sun sits at +Z in the stock layout; light travels
                        // from it toward the origin.
                        direction: Vec3::new(0.0, 0.0, -1.0),
                        specular: Vec4::new(0.7, 0.7, 0.7, 1.0),
                        ..LightData::default()
                    },
                })),
        );

        let cubemap = textures.get_cubemap(&config.assets.skybox_faces);
        graph.add_child(
            root,
            SceneNode::named("skybox").with_component(Box::new(SkyboxComponent::new(cubemap))),
        );

        let earth_texture =
            textures.get_texture_2d(&config.assets.earth_texture, TextureOptions::default());
        let clouds_texture = textures.get_texture_2d(
            &config.assets.earth_clouds_texture,
            TextureOptions::default(),
        );
        let earth = graph
            .add_child(
                root,
                SceneNode::named("earth")
                    .with_component(Box::new(TransformComponent::new()))
                    .with_component(Box::new(SphereMeshComponent::with_radius(km_to_gu(6371.0))))
                    .with_component(Box::new(MaterialComponent::new()))
                    .with_component(Box::new(
                        TextureLayersComponent::new()
                            .with_layer(TextureLayer::new(
                                earth_texture,
                                TextureBlendMode::None,
                                1.0,
                            ))
                            .with_layer(
                                TextureLayer::new(clouds_texture, TextureBlendMode::Alpha, 0.6)
                                    .with_scroll(Vec2::new(0.004, 0.0)),
                            ),
                    )),
            )
            .expect("root is live");

        let moon_texture =
            textures.get_texture_2d(&config.assets.moon_texture, TextureOptions::default());
        let moon = graph
            .add_child(
                root,
                SceneNode::named("moon")
                    .with_component(Box::new(TransformComponent::at(Vec3::new(
                        MOON_DISTANCE,
                        0.0,
                        0.0,
                    ))))
                    .with_component(Box::new(SphereMeshComponent::with_radius(MOON_RADIUS)))
                    .with_component(Box::new(MaterialComponent::with_properties(
                        MaterialProperties {
                            specular_strength: 0.1,
                            shininess: 4.0,
                            ..MaterialProperties::default()
                        },
                    )))
                    .with_component(Box::new(TextureLayersComponent::new().with_layer(
                        TextureLayer::new(moon_texture, TextureBlendMode::None, 1.0),
                    ))),
            )
            .expect("root is live");

        let axes = graph
            .add_child(
                root,
                SceneNode::named("axes")
                    .with_component(Box::new(AxesComponent::with_length(AXES_LENGTH))),
            )
            .expect("root is live");

        graph.add_child(
            root,
            SceneNode::named("camera")
                .with_component(Box::new(CameraBindingComponent::new(Rc::clone(&camera)))),
        );

        let cinematic = Self::build_cinematic(earth, moon);

        graph.attach();
        log::info!("Scene: graph assembled with {} nodes", graph.len());

        Self {
            graph,
            earth,
            moon,
            axes,
            camera,
            cinematic,
            animation: config.animation.clone(),
            render_mode: RenderMode::Normal,
            show_axes: false,
            animating: true,
            zoom_step: config.camera.zoom_step,
        }
    }

    fn build_camera(config: &ObservatoryConfig) -> OrbitCamera {
        let mut camera = OrbitCamera::new();
        camera.set_radius_limits(config.camera.min_radius, config.camera.max_radius);
        camera.set_lerp_speed(
            config.camera.angle_speed,
            config.camera.radius_speed,
            config.camera.focus_speed,
        );
        camera.snap_to(
            Vec3::zeros(),
            config.camera.yaw_degrees,
            config.camera.pitch_degrees,
            config.camera.radius,
        );
        camera
    }

    fn build_cinematic(earth: NodeKey, moon: NodeKey) -> CinematicController {
        let mut cinematic = CinematicController::new();
        let earth_anchor = cinematic.add_anchor(CameraAnchor::tracking("earth", earth, 4.0, -90.0, 15.0));
        let moon_anchor = cinematic.add_anchor(CameraAnchor::tracking("moon", moon, 2.5, 45.0, 10.0));
        let overview = cinematic.add_anchor(CameraAnchor::fixed(
            "overview",
            Focus::at_radius(Vec3::new(6.0, 0.0, 0.0), 24.0),
            -90.0,
            25.0,
        ));

        for (anchor, transition, hold) in [
            (earth_anchor, 3.0, 2.0),
            (moon_anchor, 4.0, 2.0),
            (overview, 5.0, 3.0),
        ] {
            cinematic.add_preset(CameraPreset {
                anchor_index: anchor,
                transition_seconds: transition,
                hold_seconds: hold,
            });
        }
        cinematic
    }

    /// The scene graph.
    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    /// Mutable access to the scene graph.
    pub fn graph_mut(&mut self) -> &mut SceneGraph {
        &mut self.graph
    }

    /// The shared orbit camera.
    pub fn camera(&self) -> Rc<RefCell<OrbitCamera>> {
        Rc::clone(&self.camera)
    }

    /// Current rasterization mode of the scene's meshes.
    pub fn render_mode(&self) -> RenderMode {
        self.render_mode
    }

    /// Whether the debug axes are shown.
    pub fn show_axes(&self) -> bool {
        self.show_axes
    }

    /// Whether animation ticks advance body rotations.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether a cinematic preset is playing.
    pub fn is_playing_cinematic(&self) -> bool {
        self.cinematic.is_playing()
    }

    /// One discrete animation tick: advances Earth and Moon rotations.
    ///
    /// Driven at a fixed cadence by the host loop, independent of frame
    /// rate; a no-op while animation is paused.
    pub fn update_scene(&mut self) {
        if !self.animating {
            return;
        }
        let earth_step = self.animation.earth_rotation_per_tick;
        let moon_step = self.animation.moon_rotation_per_tick;
        Self::spin(&mut self.graph, self.earth, earth_step);
        Self::spin(&mut self.graph, self.moon, moon_step);
    }

    /// Continuous per-frame update: refreshes tracked anchors, then either
    /// advances cinematic playback or lets the camera chase its targets.
    pub fn update_cinematic(&mut self, delta_seconds: f64) {
        self.cinematic.refresh_anchors(&self.graph);
        let mut camera = self.camera.borrow_mut();
        let dt = delta_seconds as f32;
        if !self.cinematic.update(dt, &mut camera) {
            camera.update(dt);
        }
    }

    /// Per-frame component update pass (texture scrolling and the like).
    pub fn update_components(&mut self, delta_seconds: f64) {
        self.graph.update(delta_seconds);
    }

    /// Broadcasts a rasterization mode to every mesh in the graph.
    pub fn set_render_mode(&mut self, mode: RenderMode) {
        self.render_mode = mode;
        self.graph.traverse_mut(|_, node| {
            if let Some(mesh) = node.component_mut::<SphereMeshComponent>() {
                mesh.render_mode = mode;
            }
        });
        log::info!("Scene: render mode set to {mode:?}");
    }

    /// Shows or hides the debug axes.
    pub fn set_show_axes(&mut self, show: bool) {
        self.show_axes = show;
        if let Some(node) = self.graph.node_mut(self.axes) {
            if let Some(axes) = node.component_mut::<AxesComponent>() {
                axes.enabled = show;
            }
        }
    }

    /// Maps a key press onto scene behavior; unknown keys are ignored.
    pub fn handle_key(&mut self, key: char) {
        match key {
            'w' => {
                let next = match self.render_mode {
                    RenderMode::Normal => RenderMode::Wireframe,
                    RenderMode::Wireframe => RenderMode::Normal,
                };
                self.set_render_mode(next);
            }
            'x' => self.set_show_axes(!self.show_axes),
            'a' => {
                self.animating = !self.animating;
                log::info!("Scene: animation {}", if self.animating { "resumed" } else { "paused" });
            }
            'e' => self.jump_to_anchor("earth"),
            'm' => self.jump_to_anchor("moon"),
            'b' => self.jump_to_anchor("overview"),
            '1' | '2' | '3' => {
                let preset = key as usize - '1' as usize;
                let camera = self.camera.borrow();
                self.cinematic.play(preset, &camera);
            }
            'p' => {
                let camera = self.camera.borrow();
                self.cinematic.play_next(&camera);
            }
            '+' | '=' => self.zoom(-self.zoom_step),
            '-' => self.zoom(self.zoom_step),
            other => log::debug!("Scene: unbound key '{other}'"),
        }
    }

    fn jump_to_anchor(&mut self, name: &str) {
        self.cinematic.refresh_anchors(&self.graph);
        let mut camera = self.camera.borrow_mut();
        self.cinematic.jump_to_anchor(name, &mut camera);
    }

    /// Manual zoom always wins: cancels playback, then moves the radius
    /// target.
    fn zoom(&mut self, delta: f32) {
        self.cinematic.cancel();
        self.camera.borrow_mut().zoom(delta);
    }

    fn spin(graph: &mut SceneGraph, key: NodeKey, degrees: f32) {
        if let Some(node) = graph.node_mut(key) {
            if let Some(transform) = node.component_mut::<TransformComponent>() {
                transform.rotation.y = wrap_degrees(transform.rotation.y + degrees);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_scene() -> Scene {
        let config = ObservatoryConfig::default();
        let mut textures = TextureCache::new();
        Scene::new(&config, &mut textures)
    }

    fn earth_yaw(scene: &Scene) -> f32 {
        scene
            .graph()
            .node(scene.earth)
            .unwrap()
            .component::<TransformComponent>()
            .unwrap()
            .rotation
            .y
    }

    #[test]
    fn graph_contains_the_expected_nodes() {
        let scene = test_scene();
        for name in ["lighting", "skybox", "earth", "moon", "axes", "camera"] {
            assert!(scene.graph().find_by_name(name).is_some(), "missing {name}");
        }
    }

    #[test]
    fn animation_tick_advances_body_rotations() {
        let mut scene = test_scene();
        let before = earth_yaw(&scene);
        scene.update_scene();
        assert_relative_eq!(earth_yaw(&scene) - before, 0.05, epsilon = 1e-6);
    }

    #[test]
    fn paused_animation_freezes_rotations() {
        let mut scene = test_scene();
        scene.handle_key('a');
        let before = earth_yaw(&scene);
        scene.update_scene();
        assert_relative_eq!(earth_yaw(&scene), before);
        assert!(!scene.is_animating());
    }

    #[test]
    fn wireframe_key_broadcasts_to_every_mesh() {
        let mut scene = test_scene();
        scene.handle_key('w');
        assert_eq!(scene.render_mode(), RenderMode::Wireframe);

        let mut modes = Vec::new();
        scene.graph_mut().traverse_mut(|_, node| {
            if let Some(mesh) = node.component_mut::<SphereMeshComponent>() {
                modes.push(mesh.render_mode);
            }
        });
        assert_eq!(modes.len(), 2);
        assert!(modes.iter().all(|&m| m == RenderMode::Wireframe));

        scene.handle_key('w');
        assert_eq!(scene.render_mode(), RenderMode::Normal);
    }

    #[test]
    fn axes_key_toggles_the_gizmo() {
        let mut scene = test_scene();
        assert!(!scene.show_axes());
        scene.handle_key('x');
        assert!(scene.show_axes());
        let enabled = scene
            .graph()
            .node(scene.axes)
            .unwrap()
            .component::<AxesComponent>()
            .unwrap()
            .enabled;
        assert!(enabled);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut scene = test_scene();
        let mode = scene.render_mode();
        scene.handle_key('q');
        assert_eq!(scene.render_mode(), mode);
    }

    #[test]
    fn preset_keys_start_playback() {
        let mut scene = test_scene();
        scene.handle_key('2');
        assert!(scene.is_playing_cinematic());
    }

    #[test]
    fn manual_zoom_cancels_cinematic_playback() {
        let mut scene = test_scene();
        scene.handle_key('1');
        assert!(scene.is_playing_cinematic());
        scene.handle_key('+');
        assert!(!scene.is_playing_cinematic());
    }

    #[test]
    fn playback_finishes_and_returns_to_idle() {
        let mut scene = test_scene();
        scene.handle_key('1');
        for _ in 0..600 {
            scene.update_cinematic(1.0 / 60.0);
        }
        assert!(!scene.is_playing_cinematic());
    }

    #[test]
    fn anchor_jump_moves_the_camera_focus_target() {
        let mut scene = test_scene();
        scene.handle_key('m');
        let target = scene.camera().borrow().focus_target();
        assert_relative_eq!(target.x, MOON_DISTANCE, epsilon = 1e-4);
    }
}
