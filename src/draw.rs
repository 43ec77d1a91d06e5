// Window + software drawing utilities.
// 1) A window that shows the composed whiteboard frame.
// 2) Raster primitives for ink, shapes, the eraser and the dashboard.
// 3) A tiny 5x7 bitmap font for button labels and the HUD line.
//
// Every primitive clips silently: coordinates outside the buffer are dropped,
// never an error.

use crate::error::Error;
use crate::types::{FrameBuffer, Point};
use minifb::{Key, KeyRepeat, MouseButton, MouseMode, Window, WindowOptions};

pub struct Drawer {
    window: Window,
}

impl Drawer {
    /// Create a window sized to the working frame.
    pub fn new(title: &str, width: usize, height: usize) -> Result<Self, Error> {
        let mut window = Window::new(title, width, height, WindowOptions::default())
            .map_err(|e| Error::WindowInit(e.to_string()))?;
        window.set_target_fps(60);
        Ok(Self { window })
    }

    /// Push the pixels for this frame to the screen.
    /// Visual: the window shows exactly what is in `framebuffer` now.
    pub fn present(&mut self, framebuffer: &FrameBuffer) -> Result<(), Error> {
        self.window
            .update_with_buffer(&framebuffer.pixels, framebuffer.width, framebuffer.height)
            .map_err(|e| Error::WindowUpdate(e.to_string()))?;
        Ok(())
    }

    /// Returns false when the user closes the window (so we can stop the loop).
    pub fn is_open(&self) -> bool {
        self.window.is_open()
    }

    /// ESC or Q quits.
    pub fn quit_pressed(&self) -> bool {
        self.window.is_key_down(Key::Escape) || self.window.is_key_down(Key::Q)
    }

    /// Current mouse position in window pixel coordinates; None while the
    /// mouse is outside the window, which the driver treats as "no hand".
    pub fn mouse_pos(&self) -> Option<(usize, usize)> {
        self.window
            .get_mouse_pos(MouseMode::Discard)
            .map(|(x, y)| (x.max(0.0) as usize, y.max(0.0) as usize))
    }

    pub fn left_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Left)
    }

    pub fn right_mouse_down(&self) -> bool {
        self.window.get_mouse_down(MouseButton::Right)
    }

    /// C wipes the persistent canvas.
    pub fn c_pressed_once(&self) -> bool {
        self.window.is_key_pressed(Key::C, KeyRepeat::No)
    }
}

/* ---------- Software drawing: pixels, lines, shapes ---------- */

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
pub fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    // Row-major: one row of `width` pixels after another.
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Clip the segment a→b to a guard box twice the buffer size (Liang-Barsky),
/// so Bresenham walks a bounded number of steps and the visible part keeps
/// the segment's true direction. None when the segment misses the box.
fn clip_to_guard(fb: &FrameBuffer, a: Point, b: Point) -> Option<(Point, Point)> {
    let limit = ((fb.width + fb.height) * 2) as f64;
    let (x0, y0) = (a.x as f64, a.y as f64);
    let (dx, dy) = (b.x as f64 - x0, b.y as f64 - y0);

    // 1) Each box edge trims the parameter range [t0, t1] along the segment.
    let (mut t0, mut t1) = (0.0f64, 1.0f64);
    for (p, q) in [(-dx, x0 + limit), (dx, limit - x0), (-dy, y0 + limit), (dy, limit - y0)] {
        if p == 0.0 {
            // Parallel to this edge: either fully inside it or fully outside.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    // 2) Back to pixels. Untrimmed ends come back exactly as given.
    let at = |t: f64| Point::new((x0 + t * dx).round() as i32, (y0 + t * dy).round() as i32);
    Some((at(t0), at(t1)))
}

/// Walk the Bresenham path from a to b, calling `plot` on every cell.
fn bresenham(a: Point, b: Point, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0, x1, y1) = (a.x, a.y, b.x, b.y);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy; // error term decides when to step the minor axis
    loop {
        plot(x0, y0);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

/// Draw a thin 1-pixel line between a and b.
pub fn draw_line(fb: &mut FrameBuffer, a: Point, b: Point, color: u32) {
    if let Some((a, b)) = clip_to_guard(fb, a, b) {
        bresenham(a, b, |x, y| put_pixel(fb, x, y, color));
    }
}

/// Line with a stroke width: round pen tips stamped along the path.
/// Visual: the stroke is exactly `thickness` pixels across.
pub fn draw_thick_line(fb: &mut FrameBuffer, a: Point, b: Point, thickness: i32, color: u32) {
    if thickness <= 1 {
        draw_line(fb, a, b, color);
        return;
    }
    if let Some((a, b)) = clip_to_guard(fb, a, b) {
        bresenham(a, b, |x, y| stamp_pen(fb, Point::new(x, y), thickness, color));
    }
}

/// Round footprint `width` pixels across. Odd widths center on the pixel;
/// even widths center on its top-left corner, which has no middle pixel.
fn stamp_pen(fb: &mut FrameBuffer, at: Point, width: i32, color: u32) {
    let r = width as f32 / 2.0;
    let offset = if width % 2 == 0 { 0.5 } else { 0.0 };
    let (cx, cy) = (at.x as f32 - offset, at.y as f32 - offset);
    for_each_in_box(fb, at, width / 2, |fb, x, y| {
        let (dx, dy) = (x as f32 - cx, y as f32 - cy);
        if dx * dx + dy * dy <= r * r {
            put_pixel(fb, x, y, color);
        }
    });
}

/// Axis-aligned rectangle outline with a and b as opposite corners.
pub fn draw_rect(fb: &mut FrameBuffer, a: Point, b: Point, thickness: i32, color: u32) {
    let corners = [a, Point::new(b.x, a.y), b, Point::new(a.x, b.y)];
    for i in 0..4 {
        draw_thick_line(fb, corners[i], corners[(i + 1) % 4], thickness, color);
    }
}

/// Circle outline: every pixel whose distance to the center is within
/// thickness/2 of the radius.
pub fn draw_circle(fb: &mut FrameBuffer, center: Point, radius: i32, thickness: i32, color: u32) {
    // 1) Half the stroke on each side of the ideal circle.
    let half = (thickness.max(1) as f32 / 2.0).max(0.5);
    // 2) Only scan the clipped square that can contain the ring.
    let reach = radius.max(0).saturating_add(half.ceil() as i32);
    let r = radius.max(0) as f32;
    // 3) Keep pixels whose distance to the center lands inside the ring.
    for_each_in_box(fb, center, reach, |fb, x, y| {
        let d = (x as f32 - center.x as f32).hypot(y as f32 - center.y as f32);
        if (d - r).abs() <= half {
            put_pixel(fb, x, y, color);
        }
    });
}

/// Filled disc; the eraser paints these with the blank color.
/// Visual: a round hole in the ink, the camera shows through it.
pub fn fill_circle(fb: &mut FrameBuffer, center: Point, radius: i32, color: u32) {
    let radius = radius.max(0);
    let r2 = radius as i64 * radius as i64;
    for_each_in_box(fb, center, radius, |fb, x, y| {
        let dx = x as i64 - center.x as i64;
        let dy = y as i64 - center.y as i64;
        if dx * dx + dy * dy <= r2 {
            put_pixel(fb, x, y, color);
        }
    });
}

/// Filled rectangle, corners inclusive.
pub fn fill_rect(fb: &mut FrameBuffer, x0: i32, y0: i32, x1: i32, y1: i32, color: u32) {
    let (x0, x1) = (x0.min(x1).max(0), x0.max(x1).min(fb.width as i32 - 1));
    let (y0, y1) = (y0.min(y1).max(0), y0.max(y1).min(fb.height as i32 - 1));
    for y in y0..=y1 {
        for x in x0..=x1 {
            put_pixel(fb, x, y, color);
        }
    }
}

/// Visit the square of half-size `reach` around `center`, clipped to the buffer.
fn for_each_in_box(
    fb: &mut FrameBuffer,
    center: Point,
    reach: i32,
    mut f: impl FnMut(&mut FrameBuffer, i32, i32),
) {
    let x0 = center.x.saturating_sub(reach).max(0);
    let y0 = center.y.saturating_sub(reach).max(0);
    let x1 = center.x.saturating_add(reach).min(fb.width as i32 - 1);
    let y1 = center.y.saturating_add(reach).min(fb.height as i32 - 1);
    for y in y0..=y1 {
        for x in x0..=x1 {
            f(fb, x, y);
        }
    }
}

/* ---------- 5x7 bitmap font ---------- */

/// Return a 5x7 glyph bitmap. Lowercase letters render as uppercase.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'H' => g!(0b10001,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'I' => g!(0b01110,0b00100,0b00100,0b00100,0b00100,0b00100,0b01110),
        'J' => g!(0b00111,0b00010,0b00010,0b00010,0b00010,0b10010,0b01100),
        'K' => g!(0b10001,0b10010,0b10100,0b11000,0b10100,0b10010,0b10001),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'M' => g!(0b10001,0b11011,0b10101,0b10101,0b10001,0b10001,0b10001),
        'N' => g!(0b10001,0b10001,0b11001,0b10101,0b10011,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'Q' => g!(0b01110,0b10001,0b10001,0b10001,0b10101,0b10010,0b01101),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'T' => g!(0b11111,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'V' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b01010,0b00100),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'X' => g!(0b10001,0b10001,0b01010,0b00100,0b01010,0b10001,0b10001),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),
        'Z' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b10000,0b11111),

        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),
        '-' => g!(0b00000,0b00000,0b00000,0b11111,0b00000,0b00000,0b00000),

        _ => None,
    }
}

/// Draw a single 5x7 character at (x,y), top-left anchored.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, color: u32) {
    if let Some(rows) = glyph5x7(ch) {
        for (ry, rowbits) in rows.iter().enumerate() {
            for rx in 0..5 {
                if (rowbits & (1 << (4 - rx))) != 0 {
                    put_pixel(fb, x + rx as i32, y + ry as i32, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs, 1 pixel apart.
pub fn draw_text_5x7(fb: &mut FrameBuffer, mut x: i32, y: i32, text: &str, color: u32) {
    for ch in text.chars() {
        draw_char_5x7(fb, x, y, ch, color);
        x += 6;
    }
}

/// Pixel width of `text` as drawn by [`draw_text_5x7`].
pub fn text_width_5x7(text: &str) -> i32 {
    (text.chars().count() as i32 * 6 - 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const INK: u32 = 0x00FF_0000;

    fn lit(fb: &FrameBuffer, x: i32, y: i32) -> bool {
        fb.get(x, y).is_some_and(|p| p != 0)
    }

    #[test]
    fn thin_line_hits_both_endpoints() {
        let mut fb = FrameBuffer::blank(20, 20);
        draw_line(&mut fb, Point::new(2, 3), Point::new(15, 9), INK);
        assert!(lit(&fb, 2, 3));
        assert!(lit(&fb, 15, 9));
    }

    #[test]
    fn thick_line_has_width() {
        let mut fb = FrameBuffer::blank(40, 40);
        draw_thick_line(&mut fb, Point::new(5, 20), Point::new(35, 20), 5, INK);
        for y in 18..=22 {
            assert!(lit(&fb, 20, y), "row {y}");
        }
        assert!(!lit(&fb, 20, 24));
    }

    #[test]
    fn circle_outline_is_hollow() {
        let mut fb = FrameBuffer::blank(100, 100);
        draw_circle(&mut fb, Point::new(50, 50), 20, 3, INK);
        assert!(lit(&fb, 70, 50));
        assert!(lit(&fb, 50, 30));
        assert!(!lit(&fb, 50, 50));
        assert!(!lit(&fb, 75, 50));
    }

    #[test]
    fn rect_outline_spans_corners() {
        let mut fb = FrameBuffer::blank(50, 50);
        draw_rect(&mut fb, Point::new(40, 30), Point::new(10, 5), 1, INK);
        assert!(lit(&fb, 10, 5));
        assert!(lit(&fb, 40, 30));
        assert!(lit(&fb, 25, 5));
        assert!(lit(&fb, 10, 20));
        assert!(!lit(&fb, 25, 20));
    }

    #[test]
    fn fill_circle_covers_the_disc() {
        let mut fb = FrameBuffer::filled(60, 60, crate::types::Color::WHITE);
        fill_circle(&mut fb, Point::new(30, 30), 10, 0);
        assert_eq!(fb.get(30, 30), Some(0));
        assert_eq!(fb.get(40, 30), Some(0));
        assert_ne!(fb.get(41, 30), Some(0));
        assert_ne!(fb.get(38, 38), Some(0)); // outside the disc, inside the box
    }

    #[test]
    fn out_of_bounds_geometry_is_clipped() {
        let mut fb = FrameBuffer::blank(30, 30);
        draw_thick_line(&mut fb, Point::new(-500, 15), Point::new(i32::MAX, 15), 3, INK);
        draw_circle(&mut fb, Point::new(-1000, -1000), 5000, 2, INK);
        fill_circle(&mut fb, Point::new(i32::MIN, i32::MAX), 40, INK);
        draw_rect(&mut fb, Point::new(-10, -10), Point::new(100, 100), 2, INK);
        assert!(lit(&fb, 15, 15));
        assert_eq!(fb.pixels.len(), 900);
    }

    #[test]
    fn far_endpoint_keeps_line_direction() {
        let mut fb = FrameBuffer::blank(320, 240);
        draw_line(&mut fb, Point::new(10, 10), Point::new(100_000, 50_000), INK);
        // Slope 1/2 across the visible frame.
        assert!(lit(&fb, 10, 10));
        assert!(lit(&fb, 210, 110));
        assert!(lit(&fb, 310, 160));
        assert!(!lit(&fb, 110, 110));
    }

    #[test]
    fn segment_outside_the_guard_box_draws_nothing() {
        let mut fb = FrameBuffer::blank(30, 30);
        draw_line(&mut fb, Point::new(-5000, 10), Point::new(-4000, 20), INK);
        draw_thick_line(&mut fb, Point::new(10, 9000), Point::new(20, 9500), 4, INK);
        assert!(fb.is_blank());
    }

    #[test]
    fn even_width_is_exact() {
        let rows = |t: i32| {
            let mut fb = FrameBuffer::blank(40, 40);
            draw_thick_line(&mut fb, Point::new(5, 20), Point::new(35, 20), t, INK);
            (0..40).filter(|&y| lit(&fb, 20, y)).collect::<Vec<_>>()
        };
        assert_eq!(rows(2), vec![19, 20]);
        assert_eq!(rows(4), vec![18, 19, 20, 21]);
        assert_eq!(rows(3), vec![19, 20, 21]);
    }

    #[test]
    fn text_width_counts_spacing() {
        assert_eq!(text_width_5x7("Red"), 17);
        assert_eq!(text_width_5x7(""), 0);
    }

    #[test]
    fn lowercase_uses_uppercase_glyphs() {
        let mut a = FrameBuffer::blank(20, 10);
        let mut b = FrameBuffer::blank(20, 10);
        draw_text_5x7(&mut a, 0, 0, "Pen", INK);
        draw_text_5x7(&mut b, 0, 0, "PEN", INK);
        assert_eq!(a, b);
        assert!(!a.is_blank());
    }
}
