//! Observatory demo application
//!
//! Drives the Earth/Moon scene headlessly: a scripted key sequence plays a
//! cinematic preset, toggles debug state, and zooms, while the frame loop
//! runs the dual-clock update (fixed-step animation ticks plus per-frame
//! camera and component updates) and records draw submissions.

use std::path::Path;

use orbital_engine::prelude::*;
use orbital_engine::render::DrawEvent;

const FRAME_SECONDS: f64 = 1.0 / 60.0;

/// Scripted key presses: (frame index, key).
const SCRIPT: &[(u64, char)] = &[
    (30, 'x'),
    (60, '1'),
    (360, 'm'),
    (600, 'w'),
    (660, '+'),
    (720, '+'),
    (780, 'p'),
    (1020, 'w'),
    (1080, 'x'),
];

fn main() {
    logging::init();
    log::info!("Starting observatory demo");

    let config = ObservatoryConfig::load_or_default(Path::new("observatory.toml"));
    let mut textures = TextureCache::new();
    let mut scene = Scene::new(&config, &mut textures);

    let mut shaders = HeadlessShaderService::assume_present();
    let renderer = SceneRenderer::new(&mut shaders, &config.assets.shader_paths());

    let mut timer = Timer::new();
    let mut animation_ticks =
        FixedStepAccumulator::new(config.animation.tick_interval_seconds);
    let mut device = RecordingDevice::new();

    let total_frames = 1200;
    let mut draw_calls = 0usize;

    for frame in 0..total_frames {
        timer.update();

        for &(at, key) in SCRIPT {
            if at == frame {
                log::info!("Frame {frame}: key '{key}'");
                scene.handle_key(key);
            }
        }

        // Fixed cadence for the discrete animation, every frame for the rest.
        for _ in 0..animation_ticks.advance(FRAME_SECONDS) {
            scene.update_scene();
        }
        scene.update_cinematic(FRAME_SECONDS);
        scene.update_components(FRAME_SECONDS);

        let context = {
            let camera = scene.camera();
            let camera = camera.borrow();
            RenderContext {
                view_matrix: camera.view_matrix(),
                camera_position: camera.position(),
                delta_time_seconds: FRAME_SECONDS,
                ..RenderContext::default()
            }
        };

        device.clear();
        renderer.render(scene.graph_mut(), &context, &mut device);
        draw_calls += device.events.len();

        if frame % 300 == 0 {
            summarize(frame, &scene, &device.events);
        }
    }

    let camera = scene.camera();
    let camera = camera.borrow();
    log::info!(
        "Finished {total_frames} frames, {draw_calls} draw submissions; camera at {:.2?} (radius {:.2})",
        camera.position(),
        camera.radius()
    );
}

fn summarize(frame: u64, scene: &Scene, events: &[DrawEvent]) {
    let meshes = events
        .iter()
        .filter(|e| matches!(e, DrawEvent::Mesh { .. }))
        .count();
    let axes = events
        .iter()
        .any(|e| matches!(e, DrawEvent::Axes { .. }));
    log::info!(
        "Frame {frame}: {meshes} meshes, axes {}, mode {:?}, cinematic {}",
        if axes { "on" } else { "off" },
        scene.render_mode(),
        if scene.is_playing_cinematic() { "playing" } else { "idle" }
    );
}
