//! Raster canvas for the charts: rectangles, lines, pie slices and text.
//!
//! Shapes are filled as anti-aliased paths on a [`tiny_skia::Pixmap`] and
//! labels are rasterized with `fontdue`, keeping their case and accents.
//! Coordinates are signed and clipped, so callers can lay out charts without
//! guarding every subtraction.

use super::style::{Color, Size};
use super::typeface::{ascent, label_font, line_height, text_width};
use crate::error::{Error, Result};
use fontdue::Font;
use std::f32::consts::PI;
use std::path::Path;
use tiny_skia::{FillRule, PathBuilder, Pixmap, PremultipliedColorU8, Rect, Transform};

/// Horizontal text anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
    Right,
}

/// An RGBA drawing surface with an opaque background.
pub struct Canvas {
    pixmap: Pixmap,
    font: &'static Font,
}

impl Canvas {
    /// Create a canvas filled with `background`.
    pub fn new(size: Size, background: Color) -> Result<Self> {
        let mut pixmap = Pixmap::new(size.width.max(1), size.height.max(1)).ok_or_else(|| {
            Error::Render(format!("invalid canvas size {}x{}", size.width, size.height))
        })?;
        pixmap.fill(background.to_skia());
        Ok(Self {
            pixmap,
            font: label_font()?,
        })
    }

    pub fn width(&self) -> i32 {
        self.pixmap.width() as i32
    }

    pub fn height(&self) -> i32 {
        self.pixmap.height() as i32
    }

    /// Colour of a pixel, `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        if !self.contains(x, y) {
            return None;
        }
        let p = self.pixmap.pixel(x as u32, y as u32)?.demultiply();
        Some(Color(p.red(), p.green(), p.blue()))
    }

    fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width() && y < self.height()
    }

    /// Fill an axis-aligned rectangle; empty rectangles draw nothing.
    pub fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        if let Some(rect) = Rect::from_xywh(x as f32, y as f32, w as f32, h as f32) {
            self.pixmap
                .fill_rect(rect, &color.to_paint(), Transform::identity(), None);
        }
    }

    /// Horizontal line from `x0` to `x1` inclusive.
    pub fn hline(&mut self, x0: i32, x1: i32, y: i32, color: Color) {
        let (a, b) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        self.fill_rect(a, y, b - a + 1, 1, color);
    }

    /// Vertical line from `y0` to `y1` inclusive.
    pub fn vline(&mut self, x: i32, y0: i32, y1: i32, color: Color) {
        let (a, b) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.fill_rect(x, a, 1, b - a + 1, color);
    }

    /// Fill a pie whose slices are given as `(weight, colour)`.
    ///
    /// Slices start at twelve o'clock and run counter-clockwise. Weights are
    /// normalised by their sum; a single slice fills the whole disc.
    pub fn fill_pie(&mut self, cx: i32, cy: i32, radius: i32, slices: &[(f64, Color)]) {
        let total: f64 = slices.iter().map(|(w, _)| w.max(0.0)).sum();
        if total <= 0.0 || radius <= 0 {
            return;
        }

        let (cx, cy, r) = (cx as f32, cy as f32, radius as f32);
        let mut start = 0.0f32;
        for (weight, color) in slices {
            let share = (weight.max(0.0) / total) as f32;
            if share <= 0.0 {
                continue;
            }
            let path = if share >= 1.0 - f32::EPSILON {
                PathBuilder::from_circle(cx, cy, r)
            } else {
                sector(cx, cy, r, start, start + share)
            };
            if let Some(path) = path {
                self.pixmap.fill_path(
                    &path,
                    &color.to_paint(),
                    FillRule::Winding,
                    Transform::identity(),
                    None,
                );
            }
            start += share;
        }
    }

    /// Width of `text` in pixels at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> i32 {
        text_width(self.font, text, size).ceil() as i32
    }

    /// Height of a text line at `size`.
    pub fn line_height(&self, size: f32) -> i32 {
        line_height(self.font, size).ceil() as i32
    }

    /// Draw text with the top of its line at `y`; returns the drawn width.
    pub fn draw_text(&mut self, x: i32, y: i32, text: &str, size: f32, align: Align, color: Color) -> i32 {
        let width = self.text_width(text, size);
        let mut pen = match align {
            Align::Left => x as f32,
            Align::Center => (x - width / 2) as f32,
            Align::Right => (x - width) as f32,
        };
        let baseline = y as f32 + ascent(self.font, size);

        for c in text.chars() {
            let (metrics, coverage) = self.font.rasterize(c, size);
            let left = (pen + metrics.xmin as f32).round() as i32;
            let top = (baseline - metrics.height as f32 - metrics.ymin as f32).round() as i32;
            for (i, alpha) in coverage.iter().enumerate() {
                let gx = (i % metrics.width.max(1)) as i32;
                let gy = (i / metrics.width.max(1)) as i32;
                self.blend(left + gx, top + gy, *alpha, color);
            }
            pen += metrics.advance_width;
        }
        width
    }

    /// Draw text vertically centred on `cy`.
    pub fn draw_text_middle(&mut self, x: i32, cy: i32, text: &str, size: f32, align: Align, color: Color) -> i32 {
        let top = cy - self.line_height(size) / 2;
        self.draw_text(x, top, text, size, align, color)
    }

    /// Composite `color` over one pixel with glyph coverage `alpha`.
    fn blend(&mut self, x: i32, y: i32, alpha: u8, color: Color) {
        if alpha == 0 || !self.contains(x, y) {
            return;
        }
        let idx = (y * self.width() + x) as usize;
        let dst = self.pixmap.pixels()[idx];

        let a = alpha as u32;
        let mix = |src: u8, dst: u8| ((src as u32 * a + dst as u32 * (255 - a)) / 255) as u8;
        let blended = PremultipliedColorU8::from_rgba(
            mix(color.0, dst.red()),
            mix(color.1, dst.green()),
            mix(color.2, dst.blue()),
            mix(0xFF, dst.alpha()),
        );
        if let Some(blended) = blended {
            self.pixmap.pixels_mut()[idx] = blended;
        }
    }

    /// Encode the canvas as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>> {
        self.pixmap
            .encode_png()
            .map_err(|e| Error::Render(e.to_string()))
    }

    /// Write the canvas as a PNG file.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, self.encode_png()?)?;
        Ok(())
    }
}

/// Closed pie sector between two turns (fractions from twelve o'clock,
/// counter-clockwise), flattened to short chords.
fn sector(cx: f32, cy: f32, r: f32, from: f32, to: f32) -> Option<tiny_skia::Path> {
    let steps = (((to - from) * 360.0).ceil() as usize).max(2);
    let mut pb = PathBuilder::new();
    pb.move_to(cx, cy);
    for k in 0..=steps {
        let turn = from + (to - from) * k as f32 / steps as f32;
        let (x, y) = turn_point(cx, cy, turn, r);
        pb.line_to(x, y);
    }
    pb.close();
    pb.finish()
}

fn turn_point(cx: f32, cy: f32, turn: f32, distance: f32) -> (f32, f32) {
    let angle = PI / 2.0 + turn * 2.0 * PI;
    (cx + distance * angle.cos(), cy - distance * angle.sin())
}

/// Point at `turn` (fraction from twelve o'clock, counter-clockwise) and `distance` from the centre.
pub fn pie_point(cx: i32, cy: i32, turn: f64, distance: f64) -> (i32, i32) {
    let (x, y) = turn_point(cx as f32, cy as f32, turn as f32, distance as f32);
    (x.round() as i32, y.round() as i32)
}
