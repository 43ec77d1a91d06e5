// Core types shared by the classifier, dashboard, engine and compositor.

use image::RgbImage;
use serde::{Deserialize, Serialize};

/// A raster the size of the working frame.
/// Used for the live camera image, the output image and both canvas layers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: usize,     // how wide the frame is on screen (pixels)
    pub height: usize,    // how tall the frame is on screen (pixels)
    pub pixels: Vec<u32>, // each entry is 0x00RRGGBB for minifb; 0 = blank
}

impl FrameBuffer {
    /// A fully blank (transparent when used as a canvas) buffer.
    pub fn blank(width: usize, height: usize) -> Self {
        Self::filled(width, height, Color::BLANK)
    }

    pub fn filled(width: usize, height: usize, color: Color) -> Self {
        Self { width, height, pixels: vec![color.pack(); width * height] }
    }

    pub fn size(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    /// Reset every pixel to blank.
    pub fn clear(&mut self) {
        self.pixels.fill(0);
    }

    pub fn is_blank(&self) -> bool {
        self.pixels.iter().all(|&p| p == 0)
    }

    /// Pixel at (x,y), or None outside the buffer.
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

    /// Pack an `image` RGB buffer into 0x00RRGGBB pixels.
    pub fn from_rgb_image(img: &RgbImage) -> Self {
        let (w, h) = img.dimensions();
        let pixels = img
            .pixels()
            .map(|p| Color::new(p[0], p[1], p[2]).pack())
            .collect();
        Self { width: w as usize, height: h as usize, pixels }
    }
}

/// Integer pixel coordinate; y grows downwards.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance in pixels.
    pub fn distance(self, other: Point) -> f32 {
        let dx = self.x as f32 - other.x as f32;
        let dy = self.y as f32 - other.y as f32;
        dx.hypot(dy)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// The transparent key for canvas layers.
    pub const BLANK: Color = Color::new(0, 0, 0);
    pub const BLACK: Color = Color::new(0, 0, 0);
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const GRAY: Color = Color::new(200, 200, 200);
    pub const DARK_GRAY: Color = Color::new(50, 50, 50);
    pub const RED: Color = Color::new(255, 0, 0);
    pub const GREEN: Color = Color::new(0, 255, 0);
    pub const BLUE: Color = Color::new(0, 0, 255);
    pub const YELLOW: Color = Color::new(255, 255, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub const fn pack(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | self.b as u32
    }

    #[inline]
    pub const fn unpack(px: u32) -> Self {
        Self {
            r: ((px >> 16) & 0xFF) as u8,
            g: ((px >> 8) & 0xFF) as u8,
            b: (px & 0xFF) as u8,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn color_packs_as_minifb_rgb() {
        assert_eq!(Color::BLUE.pack(), 0x0000_00FF);
        assert_eq!(Color::YELLOW.pack(), 0x00FF_FF00);
        assert_eq!(Color::unpack(0x0012_3456), Color::new(0x12, 0x34, 0x56));
    }

    #[test]
    fn image_conversion_keeps_layout() {
        let mut img = RgbImage::new(3, 2);
        img.put_pixel(2, 1, Rgb([255, 0, 0]));
        let fb = FrameBuffer::from_rgb_image(&img);
        assert_eq!(fb.size(), (3, 2));
        assert_eq!(fb.pixels[5], Color::RED.pack());
        assert_eq!(fb.get(0, 0), Some(0));
    }

    #[test]
    fn get_is_none_outside() {
        let fb = FrameBuffer::blank(4, 4);
        assert_eq!(fb.get(-1, 0), None);
        assert_eq!(fb.get(0, 4), None);
        assert_eq!(fb.get(3, 3), Some(0));
    }
}
