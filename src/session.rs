//! The drawing session: one owned bundle of canvas, cursor, ink, cooldown
//! and undo history, advanced once per video frame.
//!
//! Frame step:
//! 1. the cooldown ticks,
//! 2. the first hand's landmarks are classified into a [`Gesture`],
//! 3. Draw/Erase paint at the index fingertip; Undo/Reset/CycleColor go
//!    through the cooldown gate first.
//!
//! Any frame that is not drawing (no hand, idle pose, one-shot gesture)
//! drops the cursor, so the next stroke starts with a dot where the finger
//! is instead of a line from wherever it was last seen. A stroke pushes one
//! undo snapshot, taken from its first frame but only once it actually
//! changes the canvas, so one undo removes one visible stroke.

use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::gesture::{Cooldown, Gesture, OneShot, Reading, classify};
use crate::history::CanvasHistory;
use crate::landmarks::{Hand, Landmark};
use crate::stroke::{stamp_disc, stroke};
use crate::types::{CLEAR_COLOR, Color, FrameBuffer, Ink, Point};

/// What a frame (or a keyboard override) did to the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    /// Nothing drawn; cursor dropped.
    Idle,
    /// Interpolated brush stroke. `started` is true on a stroke's first frame.
    Stroke { stamps: usize, started: bool },
    /// Single eraser dab from the two-finger pose.
    Dab { started: bool },
    /// Undo ran; `restored` is false when the history was empty.
    Undo { restored: bool },
    Reset,
    ColorChanged(Color),
    /// A one-shot gesture arrived while the cooldown was still running.
    Suppressed(OneShot),
}

pub struct DrawingSession {
    config: SessionConfig,
    canvas: FrameBuffer,
    history: CanvasHistory,
    cooldown: Cooldown,
    cursor: Option<Point>,
    /// Canvas as it was when the current stroke began, until the stroke
    /// first changes it.
    stroke_base: Option<FrameBuffer>,
    ink: Ink,
    palette_index: usize,
    last: Reading,
}

impl DrawingSession {
    pub fn new(width: usize, height: usize, config: SessionConfig) -> Self {
        let ink = config.palette.first().copied().map_or(Ink::Color(Color::BLUE), Ink::Color);
        Self {
            canvas: FrameBuffer::blank(width, height),
            history: CanvasHistory::new(config.max_history),
            cooldown: Cooldown::new(config.cooldown_frames),
            cursor: None,
            stroke_base: None,
            ink,
            palette_index: 0,
            last: Reading::NO_HAND,
            config,
        }
    }

    /// Advance one frame. `landmarks` is the first detected hand, if any;
    /// `frame_size` is the (width, height) of the frame it came from.
    pub fn process_frame(&mut self, landmarks: Option<&[Landmark]>, frame_size: (usize, usize)) -> Action {
        self.fit_canvas(frame_size);
        self.cooldown.tick();

        let Some(hand) = landmarks.and_then(Hand::from_landmarks) else {
            self.last = Reading::NO_HAND;
            self.end_stroke();
            return Action::Idle;
        };

        let reading = classify(&hand.fingers());
        if reading != self.last {
            debug!(gesture = reading.gesture.as_str(), fingers = reading.extended, "gesture changed");
        }
        self.last = reading;

        match reading.gesture {
            Gesture::Draw => self.draw_to(hand.pointer()),
            Gesture::Erase => self.erase_at(hand.pointer()),
            other => match other.as_one_shot() {
                Some(one_shot) => self.one_shot(one_shot),
                None => {
                    self.end_stroke();
                    Action::Idle
                }
            },
        }
    }

    /// Extended-finger count from the latest frame (0 when no hand).
    pub fn current_gesture_count(&self) -> u8 {
        self.last.extended
    }

    /// "ERASE" while the eraser is selected or the two-finger pose is held.
    pub fn mode_label(&self) -> &'static str {
        if self.ink == Ink::Eraser || self.last.gesture == Gesture::Erase {
            "ERASE"
        } else {
            "DRAW"
        }
    }

    pub fn history_depth(&self) -> usize {
        self.history.len()
    }

    pub fn ink(&self) -> Ink {
        self.ink
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    /// Keyboard override: pick a color and leave eraser mode.
    pub fn set_color(&mut self, color: Color) {
        if let Some(i) = self.config.palette.iter().position(|&c| c == color) {
            self.palette_index = i;
        }
        self.ink = Ink::Color(color);
        info!(color = color.name(), "color selected");
    }

    /// Keyboard override: the one-finger brush now erases.
    pub fn set_eraser(&mut self) {
        self.ink = Ink::Eraser;
        info!("eraser selected");
    }

    /// Deep copy of the canvas for export.
    pub fn save_canvas(&self) -> FrameBuffer {
        self.canvas.clone()
    }

    /// Keyboard undo. Not throttled by the gesture cooldown.
    pub fn request_undo(&mut self) -> Action {
        self.end_stroke();
        self.undo()
    }

    /// Keyboard clear. Undoable like the four-finger gesture.
    pub fn request_reset(&mut self) -> Action {
        self.end_stroke();
        self.reset()
    }

    fn one_shot(&mut self, one_shot: OneShot) -> Action {
        self.end_stroke();
        if !self.cooldown.try_fire() {
            return Action::Suppressed(one_shot);
        }
        match one_shot {
            OneShot::Undo => self.undo(),
            OneShot::Reset => self.reset(),
            OneShot::CycleColor => self.cycle_color(),
        }
    }

    fn draw_to(&mut self, to: Point) -> Action {
        let started = self.begin_stroke();
        let from = self.cursor.unwrap_or(to);
        let (radius, color) = match self.ink {
            Ink::Color(_) => (self.config.brush_radius, self.ink.pixel()),
            Ink::Eraser => (self.config.eraser_radius, CLEAR_COLOR),
        };
        let stamps = stroke(&mut self.canvas, from, to, radius, color);
        self.commit_stroke();
        self.cursor = Some(to);
        Action::Stroke { stamps, started }
    }

    fn erase_at(&mut self, at: Point) -> Action {
        let started = self.begin_stroke();
        stamp_disc(&mut self.canvas, at.x, at.y, self.config.eraser_radius, CLEAR_COLOR);
        self.commit_stroke();
        self.cursor = Some(at);
        Action::Dab { started }
    }

    /// Remember the canvas on the first frame of a stroke. Returns true if
    /// this frame starts a new stroke.
    fn begin_stroke(&mut self) -> bool {
        let started = self.cursor.is_none();
        if started {
            self.stroke_base = Some(self.canvas.clone());
        }
        started
    }

    /// Push the stroke's starting canvas once the stroke has changed it.
    fn commit_stroke(&mut self) {
        if let Some(base) = self.stroke_base.take_if(|base| *base != self.canvas) {
            self.history.push(base);
        }
    }

    fn end_stroke(&mut self) {
        self.cursor = None;
        self.stroke_base = None;
    }

    fn undo(&mut self) -> Action {
        match self.history.undo() {
            Some(snapshot) => {
                self.canvas = snapshot;
                info!(remaining = self.history.len(), "undo");
                Action::Undo { restored: true }
            }
            None => {
                debug!("undo with empty history");
                Action::Undo { restored: false }
            }
        }
    }

    fn reset(&mut self) -> Action {
        self.history.save(&self.canvas);
        self.canvas = FrameBuffer::blank(self.canvas.width, self.canvas.height);
        info!("canvas cleared");
        Action::Reset
    }

    fn cycle_color(&mut self) -> Action {
        let palette = &self.config.palette;
        if palette.is_empty() {
            return Action::Idle;
        }
        self.palette_index = (self.palette_index + 1) % palette.len();
        let color = palette[self.palette_index];
        self.ink = Ink::Color(color);
        info!(color = color.name(), "color cycled");
        Action::ColorChanged(color)
    }

    /// A new frame size invalidates the canvas and every snapshot.
    fn fit_canvas(&mut self, (width, height): (usize, usize)) {
        if self.canvas.dimensions() == (width, height) {
            return;
        }
        if self.history.is_empty() {
            debug!(width, height, "canvas sized to frame");
        } else {
            warn!(
                old_w = self.canvas.width,
                old_h = self.canvas.height,
                width,
                height,
                dropped_snapshots = self.history.len(),
                "frame size changed; undo history dropped"
            );
            self.history.clear();
        }
        self.canvas = FrameBuffer::blank(width, height);
        self.end_stroke();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::landmarks::tests::hand_at;

    impl DrawingSession {
        fn cursor(&self) -> Option<Point> {
            self.cursor
        }
    }

    const W: usize = 200;
    const H: usize = 200;
    const SIZE: (usize, usize) = (W, H);

    const FIST: [bool; 5] = [false; 5];
    const INDEX: [bool; 5] = [false, true, false, false, false];
    const PEACE: [bool; 5] = [false, true, true, false, false];
    const THREE: [bool; 5] = [false, true, true, true, false];
    const FOUR: [bool; 5] = [false, true, true, true, true];
    const PALM: [bool; 5] = [true; 5];

    fn session() -> DrawingSession {
        DrawingSession::new(W, H, SessionConfig::default())
    }

    fn frame(s: &mut DrawingSession, x: i32, y: i32, up: [bool; 5]) -> Action {
        let pts = hand_at(x, y, up);
        s.process_frame(Some(&pts), SIZE)
    }

    fn inked(s: &DrawingSession, x: i32, y: i32) -> bool {
        s.canvas().get(x, y).is_some_and(|p| p != CLEAR_COLOR)
    }

    #[test]
    fn first_touch_is_a_dot_not_a_line_from_origin() {
        let mut s = session();
        assert_eq!(s.process_frame(None, SIZE), Action::Idle);
        let action = frame(&mut s, 100, 100, INDEX);
        assert_eq!(action, Action::Stroke { stamps: 1, started: true });
        assert!(inked(&s, 100, 100));
        assert!(!inked(&s, 50, 50));
        assert!(!inked(&s, 0, 0));
    }

    #[test]
    fn idle_frame_splits_strokes() {
        let mut s = session();
        let counts = [INDEX, INDEX, INDEX, FIST, INDEX];
        let mut actions = Vec::new();
        for (i, up) in counts.into_iter().enumerate() {
            actions.push(frame(&mut s, 20 + 20 * i as i32, 100, up));
        }

        assert_eq!(actions[0], Action::Stroke { stamps: 1, started: true });
        assert!(matches!(actions[1], Action::Stroke { started: false, .. }));
        assert!(matches!(actions[2], Action::Stroke { started: false, .. }));
        assert_eq!(actions[3], Action::Idle);
        assert_eq!(actions[4], Action::Stroke { stamps: 1, started: true });

        // First stroke is continuous, the gap to the second is not bridged
        for x in 20..=60 {
            assert!(inked(&s, x, 100), "gap at x={x}");
        }
        assert!(!inked(&s, 75, 100));
        assert!(inked(&s, 100, 100));
        assert_eq!(s.history_depth(), 2);
    }

    #[test]
    fn strokes_use_current_color_and_brush_radius() {
        let mut s = session();
        frame(&mut s, 100, 100, INDEX);
        assert_eq!(s.canvas().get(100, 100), Some(Color::BLUE.to_u32()));
        assert!(inked(&s, 105, 100));
        assert!(!inked(&s, 106, 100));
    }

    #[test]
    fn two_finger_erase_dabs_without_interpolating() {
        let mut s = session();
        frame(&mut s, 20, 100, INDEX);
        frame(&mut s, 180, 100, INDEX);
        assert!(inked(&s, 100, 100));

        assert_eq!(frame(&mut s, 20, 100, PEACE), Action::Dab { started: false });
        assert_eq!(frame(&mut s, 180, 100, PEACE), Action::Dab { started: false });
        assert!(!inked(&s, 20, 100));
        assert!(!inked(&s, 59, 100));
        assert!(!inked(&s, 180, 100));
        // Middle of the line is out of reach of both dabs
        assert!(inked(&s, 100, 100));
        assert_eq!(s.mode_label(), "ERASE");
    }

    #[test]
    fn eraser_ink_rubs_out_along_a_stroke() {
        let mut s = session();
        frame(&mut s, 20, 100, INDEX);
        frame(&mut s, 180, 100, INDEX);
        s.process_frame(None, SIZE);

        s.set_eraser();
        assert_eq!(s.mode_label(), "ERASE");
        frame(&mut s, 20, 100, INDEX);
        frame(&mut s, 180, 100, INDEX);
        assert!(s.canvas().is_blank());

        s.set_color(Color::RED);
        assert_eq!(s.mode_label(), "DRAW");
        assert_eq!(s.ink(), Ink::Color(Color::RED));
    }

    #[test]
    fn three_fingers_undo_the_last_stroke() {
        let mut s = session();
        frame(&mut s, 50, 50, INDEX);
        frame(&mut s, 60, 50, INDEX);
        assert_eq!(s.history_depth(), 1);

        assert_eq!(frame(&mut s, 60, 50, THREE), Action::Undo { restored: true });
        assert!(s.canvas().is_blank());
        assert_eq!(s.history_depth(), 0);
        assert_eq!(s.cursor(), None);
    }

    #[test]
    fn erasing_blank_canvas_leaves_no_snapshot() {
        let mut s = session();
        frame(&mut s, 50, 50, INDEX);
        frame(&mut s, 50, 50, FIST);
        assert_eq!(s.history_depth(), 1);

        // Nothing to rub out over here
        assert_eq!(frame(&mut s, 150, 150, PEACE), Action::Dab { started: true });
        assert_eq!(frame(&mut s, 160, 150, PEACE), Action::Dab { started: false });
        assert_eq!(s.history_depth(), 1);

        assert_eq!(frame(&mut s, 150, 150, THREE), Action::Undo { restored: true });
        assert!(s.canvas().is_blank());
    }

    #[test]
    fn stroke_snapshot_lands_on_first_visible_change() {
        let mut s = session();
        frame(&mut s, 50, 50, INDEX);
        s.process_frame(None, SIZE);
        s.set_eraser();
        // Starts far from the ink, then sweeps across it
        frame(&mut s, 150, 150, INDEX);
        assert_eq!(s.history_depth(), 1);
        frame(&mut s, 50, 50, INDEX);
        frame(&mut s, 60, 50, INDEX);
        assert_eq!(s.history_depth(), 2);
        assert!(s.canvas().is_blank());

        s.request_undo();
        assert!(inked(&s, 50, 50));
    }

    #[test]
    fn undo_on_empty_history_is_harmless() {
        let mut s = session();
        assert_eq!(frame(&mut s, 60, 50, THREE), Action::Undo { restored: false });
        assert_eq!(s.request_undo(), Action::Undo { restored: false });
        assert!(s.canvas().is_blank());
    }

    #[test]
    fn reset_clears_and_can_be_undone() {
        let mut s = session();
        frame(&mut s, 50, 50, INDEX);
        assert_eq!(frame(&mut s, 50, 50, FOUR), Action::Reset);
        assert!(s.canvas().is_blank());
        assert_eq!(s.history_depth(), 2);

        assert_eq!(s.request_undo(), Action::Undo { restored: true });
        assert!(inked(&s, 50, 50));
    }

    #[test]
    fn held_palm_cycles_color_three_times_in_ninety_frames() {
        let mut s = session();
        let mut changes = Vec::new();
        for _ in 0..90 {
            if let Action::ColorChanged(c) = frame(&mut s, 100, 100, PALM) {
                changes.push(c);
            }
        }
        assert_eq!(changes, vec![Color::RED, Color::GREEN, Color::YELLOW]);
    }

    #[test]
    fn cooldown_is_shared_by_all_one_shots() {
        let mut s = session();
        assert_eq!(frame(&mut s, 100, 100, PALM), Action::ColorChanged(Color::RED));
        for _ in 0..29 {
            assert_eq!(frame(&mut s, 100, 100, THREE), Action::Suppressed(OneShot::Undo));
        }
        assert_eq!(frame(&mut s, 100, 100, THREE), Action::Undo { restored: false });
    }

    #[test]
    fn drawing_ignores_cooldown() {
        let mut s = session();
        frame(&mut s, 100, 100, PALM);
        assert!(matches!(frame(&mut s, 100, 100, INDEX), Action::Stroke { .. }));
    }

    #[test]
    fn one_shot_breaks_the_stroke() {
        let mut s = session();
        frame(&mut s, 20, 100, INDEX);
        frame(&mut s, 20, 100, PALM);
        assert_eq!(frame(&mut s, 180, 100, INDEX), Action::Stroke { stamps: 1, started: true });
        assert!(!inked(&s, 100, 100));
    }

    #[test]
    fn unrecognised_single_finger_is_idle() {
        let mut s = session();
        frame(&mut s, 20, 100, INDEX);
        let pinky = [false, false, false, false, true];
        assert_eq!(frame(&mut s, 100, 100, pinky), Action::Idle);
        assert_eq!(s.current_gesture_count(), 1);
        assert_eq!(s.cursor(), None);
        frame(&mut s, 180, 100, INDEX);
        assert!(!inked(&s, 100, 100));
    }

    #[test]
    fn truncated_landmarks_count_as_no_hand() {
        let mut s = session();
        frame(&mut s, 20, 100, INDEX);
        let pts = hand_at(100, 100, INDEX);
        assert_eq!(s.process_frame(Some(&pts[..20]), SIZE), Action::Idle);
        assert_eq!(s.current_gesture_count(), 0);
        assert_eq!(s.cursor(), None);
    }

    #[test]
    fn keyboard_reset_is_undoable() {
        let mut s = session();
        frame(&mut s, 50, 50, INDEX);
        assert_eq!(s.request_reset(), Action::Reset);
        assert!(s.save_canvas().is_blank());
        s.request_undo();
        assert!(inked(&s, 50, 50));
    }

    #[test]
    fn saved_canvas_is_a_copy() {
        let mut s = session();
        let before = s.save_canvas();
        frame(&mut s, 50, 50, INDEX);
        assert!(before.is_blank());
        assert!(!s.save_canvas().is_blank());
    }

    #[test]
    fn frame_size_change_starts_over() {
        let mut s = session();
        frame(&mut s, 50, 50, INDEX);
        let pts = hand_at(10, 10, FIST);
        s.process_frame(Some(&pts), (320, 240));
        assert_eq!(s.canvas().dimensions(), (320, 240));
        assert!(s.canvas().is_blank());
        assert_eq!(s.history_depth(), 0);
    }

    #[test]
    fn cycling_after_keyboard_color_continues_from_it() {
        let mut s = session();
        s.set_color(Color::GREEN);
        assert_eq!(frame(&mut s, 100, 100, PALM), Action::ColorChanged(Color::YELLOW));
    }
}
