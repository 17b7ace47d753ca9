// Stroke rasterizer: turns two cursor samples into a chain of round dabs.
// Visual: even when the hand jumps far between frames, the canvas shows one
// continuous, evenly thick line with a round tip.

use crate::types::{FrameBuffer, Point};

/// Distance between consecutive dabs along a segment, in pixels.
const STAMP_SPACING: f64 = 2.0;

/// Fill a solid disc of `radius` at (cx,cy), clipped to the buffer.
/// Visual: a round dot of `color` appears on the canvas.
pub fn stamp_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, radius: i32, color: u32) {
    if radius < 0 || fb.width == 0 || fb.height == 0 {
        return;
    }
    // i64 so huge radii or far-off centers cannot overflow
    let (cx, cy, r) = (cx as i64, cy as i64, radius as i64);
    let r2 = r * r;

    // Scan just the bounding box, clamped to the buffer
    let y0 = (cy - r).max(0);
    let y1 = (cy + r).min(fb.height as i64 - 1);
    let x0 = (cx - r).max(0);
    let x1 = (cx + r).min(fb.width as i64 - 1);
    for y in y0..=y1 {
        let dy = y - cy;
        let row = y as usize * fb.width;
        for x in x0..=x1 {
            let dx = x - cx;
            if dx * dx + dy * dy > r2 { continue; } // outside the circle
            fb.pixels[row + x as usize] = color;
        }
    }
}

/// Stamp discs from `from` to `to` every ~2 px. Returns how many discs were
/// stamped.
///
/// `from == to` gives a single dab. A non-finite distance counts as zero.
/// Only the part of the segment whose discs can reach the buffer is walked,
/// so a wild sample far off-screen costs nothing.
pub fn stroke(fb: &mut FrameBuffer, from: Point, to: Point, radius: i32, color: u32) -> usize {
    let dx = to.x as f64 - from.x as f64;
    let dy = to.y as f64 - from.y as f64;
    let mut dist = (dx * dx + dy * dy).sqrt();
    if !dist.is_finite() {
        dist = 0.0;
    }
    if dist == 0.0 {
        stamp_disc(fb, from.x, from.y, radius, color);
        return 1;
    }

    let steps = ((dist / STAMP_SPACING).floor() as usize).max(1);
    let Some((t0, t1)) = visible_span(fb, from, dx, dy, radius) else {
        return 0;
    };
    // One extra step on each side covers pixel rounding at the clip edge
    let first = ((t0 * steps as f64).floor() as usize).saturating_sub(1);
    let last = ((t1 * steps as f64).ceil() as usize).saturating_add(1).min(steps);

    for i in first..=last {
        let t = i as f64 / steps as f64;
        let x = (from.x as f64 + dx * t).round() as i32;
        let y = (from.y as f64 + dy * t).round() as i32;
        stamp_disc(fb, x, y, radius, color);
    }
    last - first + 1
}

/// Parameter range [t0, t1] of `from + t*(dx,dy)` that lies inside the buffer
/// grown by `radius` on every side (Liang–Barsky). None if it never does.
fn visible_span(fb: &FrameBuffer, from: Point, dx: f64, dy: f64, radius: i32) -> Option<(f64, f64)> {
    let r = radius.max(0) as f64;
    let (lo_x, lo_y) = (-r - 1.0, -r - 1.0);
    let (hi_x, hi_y) = (fb.width as f64 + r, fb.height as f64 + r);
    let (x0, y0) = (from.x as f64, from.y as f64);

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0 - lo_x), (dx, hi_x - x0), (-dy, y0 - lo_y), (dy, hi_y - y0)] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let edge = q / p;
        if p < 0.0 {
            t0 = t0.max(edge);
        } else {
            t1 = t1.min(edge);
        }
    }
    (t0 <= t1).then_some((t0, t1))
}
