// Hand skeleton geometry: which fingers are up, and where the pointer is.
// Landmark indices follow the usual 21-point hand convention
// (0 = wrist, 4 = thumb tip, 8/12/16/20 = index/middle/ring/pinky tips).

use crate::types::Point;

pub const LANDMARK_COUNT: usize = 21;

pub const WRIST: usize = 0;
pub const THUMB_IP: usize = 3;
pub const THUMB_TIP: usize = 4;
pub const INDEX_TIP: usize = 8;
pub const MIDDLE_TIP: usize = 12;
pub const RING_TIP: usize = 16;
pub const PINKY_TIP: usize = 20;

/// Fingertips in digit order, thumb first.
pub const TIP_IDS: [usize; 5] = [THUMB_TIP, INDEX_TIP, MIDDLE_TIP, RING_TIP, PINKY_TIP];

/// One landmark in frame pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Landmark {
    pub x: i32,
    pub y: i32,
}

impl Landmark {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Scale a detector's normalized (0..1) position into pixels, truncating.
    pub fn from_normalized(nx: f32, ny: f32, width: usize, height: usize) -> Self {
        Self { x: (nx * width as f32) as i32, y: (ny * height as f32) as i32 }
    }

    pub fn point(self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// A landmark as detectors report it: fractions of the frame size, (0,0)
/// top-left, (1,1) bottom-right.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NormalizedLandmark {
    pub x: f32,
    pub y: f32,
}

/// Scale a detector's hand into frame pixels.
pub fn to_pixels(points: &[NormalizedLandmark], (width, height): (usize, usize)) -> Vec<Landmark> {
    points.iter().map(|p| Landmark::from_normalized(p.x, p.y, width, height)).collect()
}

/// Extension state per digit: thumb, index, middle, ring, pinky.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Fingers(pub [bool; 5]);

impl Fingers {
    pub const THUMB: usize = 0;
    pub const INDEX: usize = 1;
    pub const MIDDLE: usize = 2;
    pub const RING: usize = 3;
    pub const PINKY: usize = 4;

    /// Number of extended digits, 0..=5.
    pub fn count(&self) -> u8 {
        self.0.iter().filter(|&&up| up).count() as u8
    }

    pub fn is_up(&self, digit: usize) -> bool {
        self.0[digit]
    }
}

/// A complete 21-point hand.
#[derive(Clone, Debug, PartialEq)]
pub struct Hand {
    points: [Landmark; LANDMARK_COUNT],
}

impl Hand {
    /// Build from a detector's landmark list. Fewer than 21 points means
    /// "no hand this frame"; anything past the 21st is ignored.
    pub fn from_landmarks(landmarks: &[Landmark]) -> Option<Self> {
        let points: [Landmark; LANDMARK_COUNT] =
            landmarks.get(..LANDMARK_COUNT)?.try_into().ok()?;
        Some(Self { points })
    }

    /// The drawing cursor: the index fingertip.
    pub fn pointer(&self) -> Point {
        self.points[INDEX_TIP].point()
    }

    /// Classify each digit as extended or curled.
    ///
    /// The thumb compares x against its IP joint, which only holds for a
    /// mirrored (selfie) view of one hand facing the camera. The other four
    /// fingers are "up" when the tip sits above the joint two below it.
    pub fn fingers(&self) -> Fingers {
        let mut up = [false; 5];
        up[Fingers::THUMB] = self.points[THUMB_TIP].x > self.points[THUMB_IP].x;
        for (digit, &tip) in TIP_IDS.iter().enumerate().skip(1) {
            up[digit] = self.points[tip].y < self.points[tip - 2].y;
        }
        Fingers(up)
    }
}
