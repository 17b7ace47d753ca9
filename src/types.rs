// Core types shared by the drawing engine and the window shell.

#[derive(Clone, Debug, PartialEq)]
pub struct FrameBuffer {
    pub width: usize, // how wide the frame is on screen (pixels)
    pub height: usize, // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    /// A buffer filled with the canvas clear color (black).
    pub fn blank(width: usize, height: usize) -> Self {
        Self { width, height, pixels: vec![CLEAR_COLOR; width * height] }
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }
}

#[cfg(test)]
impl FrameBuffer {
    /// Pixel at (x,y), or None when outside the buffer.
    pub fn get(&self, x: i32, y: i32) -> Option<u32> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.pixels[y * self.width + x])
    }

    /// True when every pixel still has the clear color.
    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == CLEAR_COLOR)
    }
}

/// Canvas background. Eraser stamps paint with this.
pub const CLEAR_COLOR: u32 = 0x00_00_00_00;

/// An RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLUE: Color = Color::rgb(0, 0, 255);
    pub const RED: Color = Color::rgb(255, 0, 0);
    pub const GREEN: Color = Color::rgb(0, 255, 0);
    pub const YELLOW: Color = Color::rgb(255, 255, 0);
    pub const MAGENTA: Color = Color::rgb(255, 0, 255);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Pack as 0x00RRGGBB.
    pub fn to_u32(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    /// Short label for the HUD.
    pub fn name(self) -> &'static str {
        match self {
            Color::BLUE => "BLUE",
            Color::RED => "RED",
            Color::GREEN => "GREEN",
            Color::YELLOW => "YELLOW",
            Color::MAGENTA => "MAGENTA",
            Color::WHITE => "WHITE",
            _ => "CUSTOM",
        }
    }
}

/// What the brush lays down: a color, or the eraser.
/// Kept separate from `Color` so "draw black" and "erase" never collide.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ink {
    Color(Color),
    Eraser,
}

impl Ink {
    /// Pixel value this ink writes into the canvas.
    pub fn pixel(self) -> u32 {
        match self {
            Ink::Color(c) => c.to_u32(),
            Ink::Eraser => CLEAR_COLOR,
        }
    }
}

/// A pixel position on the canvas.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}
