//! Hand sources: anything that turns a camera frame into 21 landmarks.
//!
//! Detectors report normalized coordinates; [`to_pixels`] maps them onto the
//! frame before the drawing session sees them, so a real detector and the
//! bundled mouse/keyboard [`SimulatedHand`] are interchangeable.
//!
//! [`to_pixels`]: crate::landmarks::to_pixels
//!
//! ### Simulated hand controls
//!
//! | Input | Pose |
//! |---|---|
//! | mouse inside the window | hand present, fist |
//! | hold left mouse / `1` | index finger (draw) |
//! | hold `2` | index + middle (erase) |
//! | hold `3` | three fingers (undo) |
//! | hold `4` | four fingers (reset) |
//! | hold `5` | open palm (cycle color) |

use crate::landmarks::{LANDMARK_COUNT, Landmark, NormalizedLandmark, THUMB_IP, THUMB_TIP, TIP_IDS, WRIST};
use crate::types::FrameBuffer;

/// Black-box hand detector. Returns the first hand's landmarks normalized
/// to the frame size, or None when no hand is visible.
pub trait HandDetector {
    fn detect_hand(&mut self, frame: &FrameBuffer) -> Option<Vec<NormalizedLandmark>>;
}

/// Fingers raised for a given finger count, thumb first. Counts grow from
/// the index outward and the thumb joins last.
fn pose_for_count(count: u8) -> [bool; 5] {
    match count {
        0 => [false, false, false, false, false],
        1 => [false, true, false, false, false],
        2 => [false, true, true, false, false],
        3 => [false, true, true, true, false],
        4 => [false, true, true, true, true],
        _ => [true, true, true, true, true],
    }
}

/// Synthetic right hand (as seen in a mirror) following the mouse.
/// The index fingertip sits exactly on the pointer.
#[derive(Debug, Default)]
pub struct SimulatedHand {
    pointer: Option<(i32, i32)>,
    fingers: u8,
}

impl SimulatedHand {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed this frame's input. `pointer` is None when the mouse left the window.
    pub fn update(&mut self, pointer: Option<(i32, i32)>, fingers: u8) {
        self.pointer = pointer;
        self.fingers = fingers.min(5);
    }

    fn skeleton(x: i32, y: i32, up: [bool; 5]) -> Vec<Landmark> {
        let mut pts = vec![Landmark::new(x, y); LANDMARK_COUNT];
        pts[WRIST] = Landmark::new(x + 20, y + 160);

        // Thumb chain runs out to the right of the palm when extended.
        pts[1] = Landmark::new(x - 10, y + 130);
        pts[2] = Landmark::new(x - 25, y + 110);
        pts[THUMB_IP] = Landmark::new(x - 35, y + 95);
        pts[THUMB_TIP] = if up[0] { Landmark::new(x - 5, y + 80) } else { Landmark::new(x - 45, y + 85) };

        // Each finger: MCP, PIP, DIP, TIP. Curled tips fold below the PIP.
        for (digit, &tip) in TIP_IDS.iter().enumerate().skip(1) {
            let fx = x + (digit as i32 - 1) * 22;
            let mcp = tip - 3;
            pts[mcp] = Landmark::new(fx, y + 90);
            pts[mcp + 1] = Landmark::new(fx, y + 60);
            if up[digit] {
                pts[mcp + 2] = Landmark::new(fx, y + 30);
                pts[tip] = Landmark::new(fx, y);
            } else {
                pts[mcp + 2] = Landmark::new(fx, y + 75);
                pts[tip] = Landmark::new(fx, y + 85);
            }
        }
        pts
    }
}

impl HandDetector for SimulatedHand {
    fn detect_hand(&mut self, frame: &FrameBuffer) -> Option<Vec<NormalizedLandmark>> {
        let (x, y) = self.pointer?;
        if frame.width == 0 || frame.height == 0 {
            return None;
        }
        let (w, h) = (frame.width as f32, frame.height as f32);
        // Pixel centers, so scaling back lands on the same pixel
        let normalized = Self::skeleton(x, y, pose_for_count(self.fingers))
            .into_iter()
            .map(|p| NormalizedLandmark { x: (p.x as f32 + 0.5) / w, y: (p.y as f32 + 0.5) / h })
            .collect();
        Some(normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::{Gesture, classify};
    use crate::landmarks::{Hand, to_pixels};
    use crate::types::Point;

    const FRAME: (usize, usize) = (640, 480);

    fn detect(sim: &mut SimulatedHand) -> Option<Vec<Landmark>> {
        let pts = sim.detect_hand(&FrameBuffer::blank(FRAME.0, FRAME.1))?;
        Some(to_pixels(&pts, FRAME))
    }

    fn gesture_for(count: u8) -> Gesture {
        let mut sim = SimulatedHand::new();
        sim.update(Some((300, 200)), count);
        let pts = detect(&mut sim).unwrap();
        let hand = Hand::from_landmarks(&pts).unwrap();
        assert_eq!(hand.fingers().count(), count.min(5));
        classify(&hand.fingers()).gesture
    }

    #[test]
    fn every_count_maps_to_its_gesture() {
        assert_eq!(gesture_for(0), Gesture::Idle);
        assert_eq!(gesture_for(1), Gesture::Draw);
        assert_eq!(gesture_for(2), Gesture::Erase);
        assert_eq!(gesture_for(3), Gesture::Undo);
        assert_eq!(gesture_for(4), Gesture::Reset);
        assert_eq!(gesture_for(5), Gesture::CycleColor);
    }

    #[test]
    fn index_tip_tracks_the_pointer() {
        let mut sim = SimulatedHand::new();
        sim.update(Some((123, 45)), 1);
        let pts = detect(&mut sim).unwrap();
        assert_eq!(Hand::from_landmarks(&pts).unwrap().pointer(), Point::new(123, 45));

        sim.update(Some((639, 479)), 1);
        let pts = detect(&mut sim).unwrap();
        assert_eq!(Hand::from_landmarks(&pts).unwrap().pointer(), Point::new(639, 479));
    }

    #[test]
    fn landmarks_come_out_normalized() {
        let mut sim = SimulatedHand::new();
        sim.update(Some((320, 240)), 1);
        let pts = sim.detect_hand(&FrameBuffer::blank(FRAME.0, FRAME.1)).unwrap();
        let tip = pts[crate::landmarks::INDEX_TIP];
        assert!((tip.x - 0.5).abs() < 0.01 && (tip.y - 0.5).abs() < 0.01, "{tip:?}");
    }

    #[test]
    fn empty_frame_has_no_hand() {
        let mut sim = SimulatedHand::new();
        sim.update(Some((10, 10)), 1);
        assert!(sim.detect_hand(&FrameBuffer::blank(0, 0)).is_none());
    }

    #[test]
    fn no_pointer_means_no_hand() {
        let mut sim = SimulatedHand::new();
        sim.update(None, 1);
        assert!(detect(&mut sim).is_none());
    }
}
