// Finger-count gestures and the cooldown that throttles one-shot actions.

use crate::landmarks::Fingers;

/// What a hand pose means for this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    Idle,
    Draw,
    Erase,
    Undo,
    Reset,
    CycleColor,
}

/// Gestures that fire once per deliberate pose and go through the cooldown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OneShot {
    Undo,
    Reset,
    CycleColor,
}

impl Gesture {
    /// The one-shot this gesture triggers. None for Idle/Draw/Erase, which act
    /// every frame.
    pub fn as_one_shot(self) -> Option<OneShot> {
        match self {
            Gesture::Undo => Some(OneShot::Undo),
            Gesture::Reset => Some(OneShot::Reset),
            Gesture::CycleColor => Some(OneShot::CycleColor),
            Gesture::Idle | Gesture::Draw | Gesture::Erase => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Gesture::Idle => "idle",
            Gesture::Draw => "draw",
            Gesture::Erase => "erase",
            Gesture::Undo => "undo",
            Gesture::Reset => "reset",
            Gesture::CycleColor => "cycle-color",
        }
    }
}

/// Classified gesture plus the raw finger count it came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reading {
    pub gesture: Gesture,
    pub extended: u8,
}

impl Reading {
    pub const NO_HAND: Reading = Reading { gesture: Gesture::Idle, extended: 0 };
}

/// Map a finger pattern to a gesture.
///
/// The count decides first; finger identity only matters for one finger
/// (must be the index) and two fingers (must be index + middle). Any other
/// one- or two-finger shape is idle.
pub fn classify(fingers: &Fingers) -> Reading {
    let extended = fingers.count();
    let gesture = match extended {
        1 if fingers.is_up(Fingers::INDEX) => Gesture::Draw,
        2 if fingers.is_up(Fingers::INDEX) && fingers.is_up(Fingers::MIDDLE) => Gesture::Erase,
        3 => Gesture::Undo,
        4 => Gesture::Reset,
        5 => Gesture::CycleColor,
        _ => Gesture::Idle,
    };
    Reading { gesture, extended }
}

/// Frame-count cooldown for one-shot gestures.
///
/// `tick` runs once per frame before the gesture is applied; `try_fire`
/// succeeds only while the counter is at zero and then re-arms it.
#[derive(Clone, Debug)]
pub struct Cooldown {
    remaining: u32,
    period: u32,
}

impl Cooldown {
    pub fn new(period: u32) -> Self {
        Self { remaining: 0, period }
    }

    pub fn tick(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn try_fire(&mut self) -> bool {
        if self.remaining > 0 {
            return false;
        }
        self.remaining = self.period;
        true
    }
}

#[cfg(test)]
impl Cooldown {
    pub fn remaining(&self) -> u32 {
        self.remaining
    }
}
