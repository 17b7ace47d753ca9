// Writes the canvas to disk as an RGB PNG (or whatever the extension says).

use std::path::Path;

use image::{Rgb, RgbImage};
use tracing::info;

use crate::error::Error;
use crate::types::FrameBuffer;

/// Unpack 0x00RRGGBB pixels into an `image` RGB buffer.
pub fn to_rgb_image(fb: &FrameBuffer) -> RgbImage {
    RgbImage::from_fn(fb.width as u32, fb.height as u32, |x, y| {
        let px = fb.pixels[y as usize * fb.width + x as usize];
        Rgb([((px >> 16) & 0xFF) as u8, ((px >> 8) & 0xFF) as u8, (px & 0xFF) as u8])
    })
}

pub fn save_png(fb: &FrameBuffer, path: &Path) -> Result<(), Error> {
    to_rgb_image(fb)
        .save(path)
        .map_err(|e| Error::Export(format!("{}: {e}", path.display())))?;
    info!(path = %path.display(), "canvas saved");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixels_unpack_in_rgb_order() {
        let fb = FrameBuffer { width: 2, height: 1, pixels: vec![0x0011_2233, 0x00FF_0000] };
        let img = to_rgb_image(&fb);
        assert_eq!(img.dimensions(), (2, 1));
        assert_eq!(img.get_pixel(0, 0), &Rgb([0x11, 0x22, 0x33]));
        assert_eq!(img.get_pixel(1, 0), &Rgb([0xFF, 0, 0]));
    }

    #[test]
    fn saved_png_reads_back() {
        let path = std::env::temp_dir().join(format!("gesture_canvas_{}.png", std::process::id()));
        let mut fb = FrameBuffer::blank(3, 3);
        fb.pixels[4] = 0x0000_FF00;
        save_png(&fb, &path).unwrap();

        let back = image::open(&path).unwrap().to_rgb8();
        assert_eq!(back.get_pixel(1, 1), &Rgb([0, 255, 0]));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn unknown_extension_is_an_export_error() {
        let path = std::env::temp_dir().join("gesture_canvas.not-an-image");
        let err = save_png(&FrameBuffer::blank(1, 1), &path).unwrap_err();
        assert!(matches!(err, Error::Export(_)));
    }
}
