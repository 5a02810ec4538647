//! The host drawing API
//!
//! The device exposes a pen-based immediate-mode API: pick a pen color, then
//! fill rectangles, plot pixels, draw horizontal lines and print text.
//! Coordinates are integer screen pixels; implementors clip.

use serde::{Deserialize, Serialize};

/// 4-bit-per-channel RGB color (each channel 0..=15), as the device uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Expand to 8 bits per channel (15 -> 255)
    pub fn to_rgb8(self) -> [u8; 3] {
        [
            self.r.min(15) * 17,
            self.g.min(15) * 17,
            self.b.min(15) * 17,
        ]
    }
}

/// Colors for game elements
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(15, 15, 15);
    pub const RED: Color = Color::new(15, 0, 0);
    pub const GREEN: Color = Color::new(0, 15, 0);
    pub const BLUE: Color = Color::new(0, 0, 15);
    pub const YELLOW: Color = Color::new(15, 15, 0);
    pub const GRAY: Color = Color::new(8, 8, 8);
    pub const BROWN: Color = Color::new(8, 4, 0);
    pub const DARK_BROWN: Color = Color::new(5, 2, 0);
    pub const LIGHT_BROWN: Color = Color::new(11, 7, 2);
    pub const PURPLE: Color = Color::new(8, 0, 8);
    pub const ORANGE: Color = Color::new(15, 10, 0);
    pub const HILLS: Color = Color::new(3, 3, 4);
}

/// Immediate-mode drawing surface provided by the host
pub trait Canvas {
    /// Set the color used by subsequent drawing calls
    fn pen(&mut self, color: Color);
    /// Fill the whole screen with the pen color
    fn clear(&mut self);
    /// Filled rectangle
    fn frect(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn pixel(&mut self, x: i32, y: i32);
    /// Horizontal line of `len` pixels starting at (x, y)
    fn hline(&mut self, x: i32, y: i32, len: i32);
    /// Text in the host's built-in font, top-left anchored
    fn text(&mut self, text: &str, x: i32, y: i32);
}
