//! Software framebuffer
//!
//! A `Canvas` backed by memory, for headless runs and tests. Text is not
//! rasterized (the font belongs to the host); each call is recorded instead.

use std::io::Write;

use bytemuck::{Pod, Zeroable};

use super::canvas::{Canvas, Color};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// One 8-bit RGB pixel
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<Color> for Rgb8 {
    fn from(color: Color) -> Self {
        let [r, g, b] = color.to_rgb8();
        Self { r, g, b }
    }
}

/// A text draw call
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub color: Color,
}

/// Fixed-size RGB framebuffer
#[derive(Debug, Clone)]
pub struct Framebuffer {
    pub width: usize,
    pub height: usize,
    pixels: Vec<Rgb8>,
    pen: Color,
    /// Text drawn since the last clear
    pub texts: Vec<TextRun>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new(SCREEN_WIDTH as usize, SCREEN_HEIGHT as usize)
    }
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Rgb8::default(); width * height],
            pen: Color::default(),
            texts: Vec::new(),
        }
    }

    pub fn get(&self, x: i32, y: i32) -> Option<Rgb8> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    pub fn pixels(&self) -> &[Rgb8] {
        &self.pixels
    }

    /// Raw RGB bytes, row-major
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Number of pixels that exactly match a color
    pub fn count(&self, color: Color) -> usize {
        let target = Rgb8::from(color);
        self.pixels.iter().filter(|&&p| p == target).count()
    }

    /// Whether any text run contains the given substring
    pub fn has_text(&self, needle: &str) -> bool {
        self.texts.iter().any(|t| t.text.contains(needle))
    }

    /// Write a binary PPM (P6) image
    pub fn write_ppm<W: Write>(&self, mut out: W) -> std::io::Result<()> {
        write!(out, "P6\n{} {}\n255\n", self.width, self.height)?;
        out.write_all(self.as_bytes())?;
        out.flush()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    fn fill_span(&mut self, x0: i32, x1: i32, y: i32) {
        if y < 0 || y as usize >= self.height {
            return;
        }
        let x0 = x0.max(0);
        let x1 = x1.min(self.width as i32);
        if x0 >= x1 {
            return;
        }
        let row = y as usize * self.width;
        let pen = Rgb8::from(self.pen);
        self.pixels[row + x0 as usize..row + x1 as usize].fill(pen);
    }
}

impl Canvas for Framebuffer {
    fn pen(&mut self, color: Color) {
        self.pen = color;
    }

    fn clear(&mut self) {
        let pen = Rgb8::from(self.pen);
        self.pixels.fill(pen);
        self.texts.clear();
    }

    fn frect(&mut self, x: i32, y: i32, w: i32, h: i32) {
        if w <= 0 || h <= 0 {
            return;
        }
        for row in y..y + h {
            self.fill_span(x, x + w, row);
        }
    }

    fn pixel(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = Rgb8::from(self.pen);
        }
    }

    fn hline(&mut self, x: i32, y: i32, len: i32) {
        if len > 0 {
            self.fill_span(x, x + len, y);
        }
    }

    fn text(&mut self, text: &str, x: i32, y: i32) {
        self.texts.push(TextRun {
            text: text.to_string(),
            x,
            y,
            color: self.pen,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::canvas::colors;

    #[test]
    fn test_frect_clips_to_bounds() {
        let mut fb = Framebuffer::new(10, 10);
        fb.pen(colors::RED);
        fb.frect(-5, -5, 8, 8);
        assert_eq!(fb.count(colors::RED), 9);
        assert_eq!(fb.get(2, 2), Some(Rgb8::from(colors::RED)));
        assert_eq!(fb.get(3, 3), Some(Rgb8::default()));

        fb.frect(50, 50, 4, 4);
        assert_eq!(fb.count(colors::RED), 9);
    }

    #[test]
    fn test_pixel_and_hline() {
        let mut fb = Framebuffer::new(8, 4);
        fb.pen(colors::WHITE);
        fb.pixel(7, 3);
        fb.pixel(8, 3);
        fb.pixel(-1, 0);
        assert_eq!(fb.count(colors::WHITE), 1);

        fb.hline(6, 0, 10);
        assert_eq!(fb.count(colors::WHITE), 3);
        fb.hline(0, 1, 0);
        assert_eq!(fb.count(colors::WHITE), 3);
    }

    #[test]
    fn test_clear_fills_and_drops_text() {
        let mut fb = Framebuffer::new(4, 4);
        fb.pen(colors::GREEN);
        fb.text("Score: 0", 2, 2);
        assert!(fb.has_text("Score"));
        assert_eq!(fb.texts[0].color, colors::GREEN);

        fb.pen(colors::BLUE);
        fb.clear();
        assert_eq!(fb.count(colors::BLUE), 16);
        assert!(fb.texts.is_empty());
    }

    #[test]
    fn test_ppm_output() {
        let mut fb = Framebuffer::new(2, 1);
        fb.pen(colors::WHITE);
        fb.pixel(1, 0);
        let mut out = Vec::new();
        fb.write_ppm(&mut out).unwrap();
        let header = b"P6\n2 1\n255\n";
        assert_eq!(&out[..header.len()], header);
        assert_eq!(&out[header.len()..], &[0, 0, 0, 255, 255, 255]);
        assert_eq!(fb.as_bytes().len(), 6);
    }
}
