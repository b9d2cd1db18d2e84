//! End-to-end frame pipeline over the recording device.

use orbital_engine::prelude::*;
use orbital_engine::render::DrawEvent;

fn build_frame_parts() -> (Scene, SceneRenderer) {
    let config = ObservatoryConfig::default();
    let mut textures = TextureCache::new();
    let scene = Scene::new(&config, &mut textures);

    let mut shaders = HeadlessShaderService::assume_present();
    let renderer = SceneRenderer::new(&mut shaders, &config.assets.shader_paths());
    (scene, renderer)
}

fn render_frame(scene: &mut Scene, renderer: &SceneRenderer) -> Vec<DrawEvent> {
    let dt = 1.0 / 60.0;
    scene.update_cinematic(dt);
    scene.update_components(dt);

    let context = {
        let camera = scene.camera();
        let camera = camera.borrow();
        RenderContext {
            view_matrix: camera.view_matrix(),
            camera_position: camera.position(),
            delta_time_seconds: dt,
            ..RenderContext::default()
        }
    };

    let mut device = RecordingDevice::new();
    renderer.render(scene.graph_mut(), &context, &mut device);
    device.events
}

#[test]
fn frame_opens_with_clear_color_and_draws_both_bodies() {
    let (mut scene, renderer) = build_frame_parts();
    let events = render_frame(&mut scene, &renderer);

    assert!(matches!(events[0], DrawEvent::ClearColor(_)));
    let meshes = events
        .iter()
        .filter(|e| matches!(e, DrawEvent::Mesh { .. }))
        .count();
    assert_eq!(meshes, 2, "earth and moon should both be drawn");
}

#[test]
fn meshes_see_the_scene_light_and_lighting_is_enabled() {
    let (mut scene, renderer) = build_frame_parts();
    let events = render_frame(&mut scene, &renderer);

    for event in &events {
        if let DrawEvent::Mesh {
            light_count,
            lighting_enabled,
            ..
        } = event
        {
            assert_eq!(*light_count, 1);
            assert!(*lighting_enabled);
        }
    }
}

#[test]
fn axes_appear_only_after_the_toggle() {
    let (mut scene, renderer) = build_frame_parts();

    let events = render_frame(&mut scene, &renderer);
    assert!(!events.iter().any(|e| matches!(e, DrawEvent::Axes { .. })));

    scene.handle_key('x');
    let events = render_frame(&mut scene, &renderer);
    assert!(events.iter().any(|e| matches!(e, DrawEvent::Axes { .. })));
}

#[test]
fn wireframe_toggle_flows_through_to_draw_calls() {
    let (mut scene, renderer) = build_frame_parts();
    scene.handle_key('w');

    let events = render_frame(&mut scene, &renderer);
    let wireframes: Vec<bool> = events
        .iter()
        .filter_map(|e| match e {
            DrawEvent::Mesh { wireframe, .. } => Some(*wireframe),
            _ => None,
        })
        .collect();
    assert!(!wireframes.is_empty());
    assert!(wireframes.iter().all(|&w| w));
}

#[test]
fn fixed_step_ticks_rotate_the_earth_between_frames() {
    let (mut scene, renderer) = build_frame_parts();
    let mut accumulator = FixedStepAccumulator::new(1.0 / 30.0);

    // Two seconds of wall time at 60 fps yields 60 animation ticks.
    for _ in 0..120 {
        for _ in 0..accumulator.advance(1.0 / 60.0) {
            scene.update_scene();
        }
        render_frame(&mut scene, &renderer);
    }

    let earth = scene.graph().find_by_name("earth").unwrap();
    let world = scene.graph().world_transform(earth);
    // 60 ticks * 0.05 degrees: the rotation matrix is no longer identity.
    assert!((world[(0, 0)] - 1.0).abs() > 1e-6);
}

#[test]
fn missing_shaders_yield_an_empty_frame() {
    let config = ObservatoryConfig::default();
    let mut textures = TextureCache::new();
    let mut scene = Scene::new(&config, &mut textures);

    let mut shaders = HeadlessShaderService::new();
    let renderer = SceneRenderer::new(&mut shaders, &config.assets.shader_paths());

    let mut device = RecordingDevice::new();
    renderer.render(scene.graph_mut(), &RenderContext::default(), &mut device);
    assert!(device.events.is_empty());
}
