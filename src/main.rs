// What you SEE:
// • The mirrored camera is the base image; your drawing is mixed on top.
// • 1 finger (index) draws, 2 fingers (index+middle) erase, 3 undo,
//   4 clear, 5 cycle color. Undo/clear/color fire once per 30 frames.
// • The hand follows the mouse; hold 1–5 (or the left button) to raise fingers.
// • Keys: R/G/B color, E eraser, S save PNG, Z undo, C clear, ESC quit.

mod camera;
mod compose;
mod config;
mod draw;
mod error;
mod export;
mod gesture;
mod hand;
mod history;
mod landmarks;
mod session;
mod stroke;
mod types;

use anyhow::Context;
use camera::CameraCapture;
use clap::Parser;
use config::Cli;
use draw::{Command, Drawer, draw_text_5x7};
use hand::{HandDetector, SimulatedHand};
use landmarks::{Hand, to_pixels};
use session::{Action, DrawingSession};
use std::time::{Duration, Instant};
use tracing::{debug, info};
use types::{FrameBuffer, Ink};

const MARKER_RADIUS: i32 = 8;
const HUD_COLOR: u32 = 0x00_FF_FF_FF;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gesture_canvas=info".into()),
        )
        .init();

    println!("Controls:");
    println!("Hold 1-5 or LMB - raise fingers | R - Red | G - Green | B - Blue | E - Eraser");
    println!("S - Save | Z - Undo | C - Clear | ESC - Exit");

    /* --- Camera + window setup --- */
    let mut cam = if cli.no_camera {
        None
    } else {
        Some(CameraCapture::new(cli.camera, cli.width, cli.height).context("opening camera")?)
    };
    let (w, h) = match &cam {
        Some(c) => c.resolution(),
        None => (cli.width, cli.height),
    };
    let mut drawer = Drawer::new("Virtual Drawing Board", w as usize, h as usize)?;

    let mut session = DrawingSession::new(w as usize, h as usize, cli.session_config());
    let mut hand = SimulatedHand::new();

    /* --- HUD / FPS --- */
    let mut last_fps_time = Instant::now();
    let mut frames_this_second: u32 = 0;
    let mut hud_fps_text = String::from("FPS: 0.0");

    info!(width = w, height = h, camera = !cli.no_camera, "drawing board ready");

    /* ------------------------------ Main loop ------------------------------ */
    while drawer.is_open() && !drawer.esc_pressed() {
        let now = Instant::now();

        /* 1) Grab a fresh frame (blocks on the camera) and mirror it. */
        let mut screen = match cam.as_mut() {
            Some(c) => c.next_frame()?,
            None => FrameBuffer::blank(w as usize, h as usize),
        };
        if !cli.no_mirror {
            compose::mirror_in_place(&mut screen);
        }

        /* 2) Keyboard overrides */
        for cmd in drawer.commands() {
            match cmd {
                Command::SetColor(c) => session.set_color(c),
                Command::Eraser => session.set_eraser(),
                Command::Save => export::save_png(&session.save_canvas(), &cli.output)
                    .with_context(|| format!("saving {}", cli.output.display()))?,
                Command::Undo => { session.request_undo(); }
                Command::Clear => { session.request_reset(); }
            }
        }

        /* 3) Hand → gesture → canvas */
        hand.update(drawer.mouse_pos(), drawer.held_finger_count());
        let detected = hand.detect_hand(&screen).map(|pts| to_pixels(&pts, screen.dimensions()));
        let action = session.process_frame(detected.as_deref(), screen.dimensions());
        if !matches!(action, Action::Idle | Action::Stroke { started: false, .. }) {
            debug!(?action, "frame action");
        }

        /* 4) Mix the canvas over the live frame */
        compose::blend_weighted(&mut screen, session.canvas(), cli.canvas_weight)?;

        /* 5) Fingertip marker + HUD */
        if let Some(tip) = detected.as_deref().and_then(Hand::from_landmarks).map(|h| h.pointer()) {
            let marker = match session.ink() {
                Ink::Color(c) => c.to_u32(),
                Ink::Eraser => HUD_COLOR,
            };
            stroke::stamp_disc(&mut screen, tip.x, tip.y, MARKER_RADIUS, marker);
        }

        let ink_name = match session.ink() {
            Ink::Color(c) => c.name(),
            Ink::Eraser => "ERASER",
        };
        let hud = format!(
            "{} | FINGERS: {} | UNDO: {} | {} | {}",
            session.mode_label(),
            session.current_gesture_count(),
            session.history_depth(),
            ink_name,
            hud_fps_text,
        );
        draw_text_5x7(&mut screen, 8, 8, &hud, HUD_COLOR);

        /* 6) Present */
        drawer.present(&screen)?;

        /* 7) FPS counter, once per second */
        frames_this_second += 1;
        if now.duration_since(last_fps_time) >= Duration::from_secs(1) {
            let secs = now.duration_since(last_fps_time).as_secs_f32();
            let fps = frames_this_second as f32 / secs;
            debug!(fps, "frame rate");
            hud_fps_text = format!("FPS: {:.1}", fps);
            frames_this_second = 0;
            last_fps_time = now;
        }
    }

    info!("bye");
    Ok(())
}
