// Frame-level pixel passes: mirroring the camera and mixing the canvas in.
// Visual: the window shows a selfie-style camera view with your drawing
// laid over it semi-transparently.

use crate::error::Error;
use crate::types::FrameBuffer;

/// Flip each row left↔right so the view behaves like a mirror.
pub fn mirror_in_place(fb: &mut FrameBuffer) {
    if fb.width == 0 {
        return;
    }
    for row in fb.pixels.chunks_exact_mut(fb.width) {
        row.reverse();
    }
}

/// out = live * (1 - weight) + canvas * weight, per channel, everywhere.
/// Visual: strokes show through at `weight` strength; blank canvas areas
/// darken the camera slightly.
pub fn blend_weighted(live: &mut FrameBuffer, canvas: &FrameBuffer, weight: f32) -> Result<(), Error> {
    if live.width != canvas.width || live.height != canvas.height {
        return Err(Error::CameraFrame("blend: canvas/frame size mismatch".into()));
    }
    let a = weight.clamp(0.0, 1.0);
    let inv = 1.0 - a;

    for (px, &pc) in live.pixels.iter_mut().zip(&canvas.pixels) {
        let pf = *px;
        let mix = |shift: u32| -> u32 {
            let f = ((pf >> shift) & 0xFF) as f32;
            let c = ((pc >> shift) & 0xFF) as f32;
            ((f * inv + c * a).round().clamp(0.0, 255.0) as u32) << shift
        };
        *px = mix(16) | mix(8) | mix(0);
    }
    Ok(())
}
