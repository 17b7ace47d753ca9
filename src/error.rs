// Error type for the I/O shell around the drawing core.
// Every variant states *where* things went wrong. The core itself never fails:
// bad landmarks or an empty history just mean "nothing happens this frame".
use std::fmt::{self, Display};

#[derive(Debug)]
pub enum Error {
    WindowInit(String), // Creating the window failed
    WindowUpdate(String), // Updating the window buffer failed
    CameraInit(String), // Opening/starting the camera failed
    CameraFrame(String), // Grabbing/decoding a frame failed
    Export(String), // Writing the canvas to disk failed
}

impl Display for Error {
    // This decides how the error is printed to your console.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::WindowInit(s) => write!(f, "Window init error: {s}"),
            Error::WindowUpdate(s) => write!(f, "Window update error: {s}"),
            Error::CameraInit(s) => write!(f, "Camera init error: {s}"),
            Error::CameraFrame(s) => write!(f, "Camera frame error: {s}"),
            Error::Export(s) => write!(f, "Canvas export error: {s}"),
        }
    }
}

// Lets `anyhow` wrap it at the binary edge.
impl std::error::Error for Error {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_failing_stage() {
        let e = Error::Export("disk full".into());
        assert_eq!(e.to_string(), "Canvas export error: disk full");
        let e = Error::CameraFrame("decode".into());
        assert!(e.to_string().starts_with("Camera frame error"));
    }
}
