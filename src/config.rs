// Command line flags and the knobs the drawing session runs with.

use std::path::PathBuf;

use clap::Parser;

use crate::types::Color;

pub const BRUSH_RADIUS: i32 = 5;
pub const ERASER_RADIUS: i32 = 40;
/// Radius flags are clamped to 1..=MAX_RADIUS.
pub const MAX_RADIUS: i32 = 512;
pub const COOLDOWN_FRAMES: u32 = 30;
pub const MAX_HISTORY: usize = 20;

/// Colors the 5-finger gesture steps through, in order.
pub const PALETTE: [Color; 6] = [
    Color::BLUE,
    Color::RED,
    Color::GREEN,
    Color::YELLOW,
    Color::MAGENTA,
    Color::WHITE,
];

/// Everything `DrawingSession` needs to know up front.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    pub brush_radius: i32,
    pub eraser_radius: i32,
    pub cooldown_frames: u32,
    pub max_history: usize,
    pub palette: Vec<Color>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            brush_radius: BRUSH_RADIUS,
            eraser_radius: ERASER_RADIUS,
            cooldown_frames: COOLDOWN_FRAMES,
            max_history: MAX_HISTORY,
            palette: PALETTE.to_vec(),
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "gesture_canvas", about = "Draw in the air with finger-count gestures")]
pub struct Cli {
    /// Camera device index
    #[arg(long, default_value_t = 0)]
    pub camera: u32,

    /// Requested capture width (the camera may pick something close)
    #[arg(long, default_value_t = 640)]
    pub width: u32,

    /// Requested capture height
    #[arg(long, default_value_t = 480)]
    pub height: u32,

    /// Where S writes the canvas
    #[arg(long, default_value = "my_drawing.png")]
    pub output: PathBuf,

    /// Draw brush radius in pixels
    #[arg(long, default_value_t = BRUSH_RADIUS)]
    pub brush_radius: i32,

    /// Eraser radius in pixels
    #[arg(long, default_value_t = ERASER_RADIUS)]
    pub eraser_radius: i32,

    /// Frames to wait before undo/reset/color can fire again
    #[arg(long, default_value_t = COOLDOWN_FRAMES)]
    pub cooldown_frames: u32,

    /// Undo snapshots kept
    #[arg(long, default_value_t = MAX_HISTORY)]
    pub max_history: usize,

    /// Weight of the canvas when mixed over the live frame (0..1)
    #[arg(long, default_value_t = 0.3)]
    pub canvas_weight: f32,

    /// Show the camera as-is instead of as a mirror
    #[arg(long)]
    pub no_mirror: bool,

    /// Run without a camera: a black backdrop and the mouse-driven hand only
    #[arg(long)]
    pub no_camera: bool,
}

impl Cli {
    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            brush_radius: self.brush_radius.clamp(1, MAX_RADIUS),
            eraser_radius: self.eraser_radius.clamp(1, MAX_RADIUS),
            cooldown_frames: self.cooldown_frames,
            max_history: self.max_history,
            ..SessionConfig::default()
        }
    }
}
