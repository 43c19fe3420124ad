//! The embedded label typeface (DejaVu Sans).

use crate::error::{Error, Result};
use fontdue::{Font, FontSettings};
use std::sync::OnceLock;

const DEJAVU_SANS: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");

static LABEL_FONT: OnceLock<std::result::Result<Font, &'static str>> = OnceLock::new();

/// Parsed label font, loaded on first use.
pub fn label_font() -> Result<&'static Font> {
    LABEL_FONT
        .get_or_init(|| Font::from_bytes(DEJAVU_SANS, FontSettings::default()))
        .as_ref()
        .map_err(|e| Error::Render(format!("label font: {}", e)))
}

/// Advance width of `text` at `size` pixels.
pub fn text_width(font: &Font, text: &str, size: f32) -> f32 {
    text.chars().map(|c| font.metrics(c, size).advance_width).sum()
}

/// Distance from the top of a line to its baseline.
pub fn ascent(font: &Font, size: f32) -> f32 {
    font.horizontal_line_metrics(size)
        .map(|m| m.ascent)
        .unwrap_or(size * 0.8)
}

/// Height of one line of text, gap included.
pub fn line_height(font: &Font, size: f32) -> f32 {
    font.horizontal_line_metrics(size)
        .map(|m| m.new_line_size)
        .unwrap_or(size * 1.2)
}
