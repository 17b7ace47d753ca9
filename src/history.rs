// Bounded undo stack of full canvas snapshots.

use std::collections::VecDeque;

use crate::types::FrameBuffer;

/// Oldest-first snapshots. Once `capacity` is reached, saving drops the
/// oldest entry.
#[derive(Debug)]
pub struct CanvasHistory {
    snapshots: VecDeque<FrameBuffer>,
    capacity: usize,
}

impl CanvasHistory {
    pub fn new(capacity: usize) -> Self {
        Self { snapshots: VecDeque::with_capacity(capacity), capacity }
    }

    /// Push a deep copy of `canvas`.
    pub fn save(&mut self, canvas: &FrameBuffer) {
        self.push(canvas.clone());
    }

    /// Push a snapshot the caller already owns.
    pub fn push(&mut self, snapshot: FrameBuffer) {
        if self.capacity == 0 {
            return;
        }
        if self.snapshots.len() == self.capacity {
            self.snapshots.pop_front();
        }
        self.snapshots.push_back(snapshot);
    }

    /// Newest snapshot, removed from the stack. None when empty.
    pub fn undo(&mut self) -> Option<FrameBuffer> {
        self.snapshots.pop_back()
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tagged(tag: u32) -> FrameBuffer {
        FrameBuffer { width: 1, height: 1, pixels: vec![tag] }
    }

    #[test]
    fn overflow_evicts_oldest() {
        let mut h = CanvasHistory::new(20);
        for tag in 1..=21 {
            h.save(&tagged(tag));
        }
        assert_eq!(h.len(), 20);

        let mut popped = Vec::new();
        while let Some(fb) = h.undo() {
            popped.push(fb.pixels[0]);
        }
        assert_eq!(popped.len(), 20);
        assert_eq!(popped.first(), Some(&21));
        assert_eq!(popped.last(), Some(&2));
        assert!(!popped.contains(&1));
    }

    #[test]
    fn undo_past_empty_is_noop() {
        let mut h = CanvasHistory::new(20);
        for tag in 0..20 {
            h.save(&tagged(tag));
        }
        for _ in 0..20 {
            assert!(h.undo().is_some());
        }
        assert!(h.undo().is_none());
        assert!(h.is_empty());
    }

    #[test]
    fn snapshot_is_deep() {
        let mut h = CanvasHistory::new(4);
        let mut canvas = tagged(7);
        h.save(&canvas);
        canvas.pixels[0] = 99;
        assert_eq!(h.undo().unwrap().pixels[0], 7);
    }

    #[test]
    fn zero_capacity_keeps_nothing() {
        let mut h = CanvasHistory::new(0);
        h.save(&tagged(1));
        assert!(h.is_empty());
    }
}
