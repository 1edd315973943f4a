//! Headless scripted session: proves the locomotion core runs without a
//! renderer. Spawns an actor on the planet surface and drives a fixed
//! sequence of walk, run, jump, orbit, zoom, and view-toggle input
//! through the same router and manager a windowed client would use.

use std::sync::Arc;

use clap::Parser;
use glam::Vec2;
use tracing::info;
use winit::event::{ElementState, MouseButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

use starfall_config::{CliArgs, Config};
use starfall_input::{CaptureState, InputRouter, KeyBindings};
use starfall_player::{
    CameraManager, CameraRig, FirstPersonController, LocomotionTuning, LookTuning, NullAvatar,
    RigParams, ThirdPersonController, ViewMode,
};
use starfall_world::{OpenSky, SphericalWorld};

#[derive(Parser, Debug)]
#[command(name = "starfall-demo", about = "Headless locomotion session")]
struct DemoArgs {
    #[command(flatten)]
    config_args: CliArgs,

    /// Number of frames to simulate at 60 Hz.
    #[arg(long, default_value_t = 900)]
    frames: u32,
}

fn main() {
    let args = DemoArgs::parse();

    let config_dir = args
        .config_args
        .config
        .clone()
        .unwrap_or_else(Config::default_dir);
    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("config error: {e}; using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args.config_args);

    starfall_log::init_logging(None, cfg!(debug_assertions), Some(&config));

    let world = Arc::new(SphericalWorld::new(
        config.world.radius,
        config.world.gravity,
        config.world.chunk_size,
    ));

    let tuning = LocomotionTuning {
        walk_speed: config.player.walk_speed,
        run_speed: config.player.run_speed,
        jump_impulse: config.player.jump_impulse,
        player_height: config.player.player_height,
    };
    let fp_look = LookTuning {
        sensitivity: config.input.mouse_sensitivity,
        invert_y: config.input.invert_y,
        pitch_limit: config.camera.first_person_pitch_limit_deg.to_radians(),
    };
    let tp_look = LookTuning {
        sensitivity: config.input.orbit_sensitivity,
        invert_y: config.input.invert_y,
        pitch_limit: config.camera.third_person_pitch_limit_deg.to_radians(),
    };
    let rig_params = RigParams {
        min_distance: config.camera.min_distance,
        max_distance: config.camera.max_distance,
        zoom_sensitivity: config.camera.zoom_sensitivity,
        zoom_rate: config.camera.zoom_rate,
        follow_rate: config.camera.follow_rate,
        up_rate: config.camera.up_rate,
        rig_height: config.camera.rig_height,
        look_at_height: config.camera.look_at_height,
        collision_padding: config.camera.collision_padding,
        ..RigParams::default()
    };

    let first_person = FirstPersonController::new(
        world.clone(),
        tuning,
        fp_look,
        Some(Box::new(NullAvatar)),
    );
    let third_person = ThirdPersonController::new(
        world.clone(),
        tuning,
        tp_look,
        CameraRig::new(rig_params, config.camera.default_distance),
        Box::new(OpenSky),
        Some(Box::new(NullAvatar)),
    );

    let mut manager = CameraManager::new(
        first_person,
        third_person,
        ViewMode::FirstPerson,
        config.camera.transition_secs,
    );
    manager.on_mode_changed(|mode| info!(?mode, "view mode changed (HUD notified)"));

    let spawn = world.surface_point(0.4, 1.2, config.player.player_height);
    manager.set_position(spawn);
    info!(?spawn, radius = world.radius(), "session started");

    let mut router = InputRouter::new(KeyBindings::default());
    // Headless: pretend the pointer grab was granted.
    router.force_capture_state(CaptureState::Captured);

    let dt = 1.0 / 60.0;
    for frame in 0..args.frames {
        script_frame(&mut router, frame);

        for event in router.drain() {
            manager.handle_event(&event);
        }
        manager.update(dt);

        if frame % 60 == 0 {
            let pos = manager.position();
            let altitude = world.to_spherical(pos).altitude;
            info!(
                frame,
                mode = ?manager.mode(),
                transitioning = manager.is_transitioning(),
                ?pos,
                altitude,
                "tick"
            );
        }
    }

    manager.dispose();
    info!("session complete");
}

/// Feeds the scripted input for one frame into the router.
fn script_frame(router: &mut InputRouter, frame: u32) {
    match frame {
        // Walk forward, glancing around with the captured pointer.
        10 => router.on_key_code(KeyCode::KeyW, ElementState::Pressed),
        30 => router.on_pointer_motion(40.0, -15.0),
        // Break into a run.
        120 => router.on_key_code(KeyCode::ShiftLeft, ElementState::Pressed),
        // Jump while running.
        180 => router.on_key_code(KeyCode::Space, ElementState::Pressed),
        181 => router.on_key_code(KeyCode::Space, ElementState::Released),
        // Ease off.
        230 => {
            router.on_key_code(KeyCode::ShiftLeft, ElementState::Released);
            router.on_key_code(KeyCode::KeyW, ElementState::Released);
        }
        // Toggle to third-person; the immediate re-press is swallowed
        // because the transition is already in flight.
        240 => router.on_key_code(KeyCode::KeyV, ElementState::Pressed),
        241 => router.on_key_code(KeyCode::KeyV, ElementState::Released),
        245 => router.on_key_code(KeyCode::KeyV, ElementState::Pressed),
        246 => router.on_key_code(KeyCode::KeyV, ElementState::Released),
        // Orbit with a right-button drag, then zoom out and back in.
        330 => router.on_pointer_button(MouseButton::Right, ElementState::Pressed),
        331..=360 => router.on_pointer_motion(6.0, 2.0),
        361 => router.on_pointer_button(MouseButton::Right, ElementState::Released),
        400 => router.on_wheel(MouseScrollDelta::LineDelta(0.0, -3.0)),
        470 => router.on_wheel(MouseScrollDelta::LineDelta(0.0, 2.0)),
        // A touch drag and pinch, as a mobile client would send.
        520 => router.on_touch_start(1, Vec2::new(200.0, 300.0)),
        521..=540 => router.on_touch_move(1, Vec2::new(200.0 + (frame - 520) as f32 * 4.0, 300.0)),
        541 => router.on_touch_end(1),
        560 => {
            router.on_touch_start(1, Vec2::new(180.0, 300.0));
            router.on_touch_start(2, Vec2::new(320.0, 300.0));
        }
        561..=580 => {
            let spread = (frame - 560) as f32 * 2.0;
            router.on_touch_move(1, Vec2::new(180.0 - spread, 300.0));
        }
        581 => {
            router.on_touch_end(1);
            router.on_touch_end(2);
        }
        // Walk a little in third-person, then return to first-person.
        600 => router.on_key_code(KeyCode::KeyW, ElementState::Pressed),
        700 => router.on_key_code(KeyCode::KeyW, ElementState::Released),
        720 => router.on_key_code(KeyCode::KeyV, ElementState::Pressed),
        721 => router.on_key_code(KeyCode::KeyV, ElementState::Released),
        _ => {}
    }

    // The router only routes free-pointer drags to orbit while captured
    // look is off; release the capture once third-person is entered.
    if frame == 300 {
        router.force_capture_state(CaptureState::Released);
    }
    if frame == 800 {
        router.force_capture_state(CaptureState::Captured);
    }
}
