//! Chart styling.

use crate::model::PageMetadata;

const MIN_FONT_SIZE: f32 = 6.0;

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const WHITE: Color = Color(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color(0x00, 0x00, 0x00);

    /// Parse `#RRGGBB` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.trim().trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Color(channel(0)?, channel(2)?, channel(4)?))
    }

    pub(crate) fn to_paint(self) -> tiny_skia::Paint<'static> {
        let mut paint = tiny_skia::Paint::default();
        paint.set_color_rgba8(self.0, self.1, self.2, 0xFF);
        paint.anti_alias = true;
        paint
    }

    pub(crate) fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.0, self.1, self.2, 0xFF)
    }
}

/// Canvas size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Everything that controls how charts look.
///
/// Passed to [`ChartRenderer::new`](super::ChartRenderer::new); there is no
/// global plotting state.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartStyle {
    /// Content distribution canvas (bar chart and pie side by side)
    pub distribution_size: Size,

    /// Text length canvas
    pub lengths_size: Size,

    /// Statistics canvas
    pub statistics_size: Size,

    pub background: Color,
    pub text: Color,
    pub axis: Color,
    pub grid: Color,

    /// Colours per content type, in order of first appearance
    pub category_colors: Vec<Color>,

    /// Bar colour of the text length chart
    pub length_color: Color,

    /// Bar colours of the statistics chart
    pub statistics_colors: Vec<Color>,

    /// Label text size in pixels; titles are drawn larger
    pub font_size: f32,

    /// Second title line of every chart
    pub subtitle: String,
}

impl ChartStyle {
    /// Default style.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the second title line.
    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = subtitle.into();
        self
    }

    /// Set the label text size in pixels (at least 6).
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size.max(MIN_FONT_SIZE);
        self
    }

    /// Text size of chart titles.
    pub fn title_size(&self) -> f32 {
        self.font_size * 1.4
    }

    /// Set the colours per content type.
    pub fn with_category_colors(mut self, colors: Vec<Color>) -> Self {
        self.category_colors = colors;
        self
    }

    /// Colour of the `index`-th category, cycling through the palette.
    pub fn category_color(&self, index: usize) -> Color {
        cycle(&self.category_colors, index, self.text)
    }

    /// Colour of the `index`-th statistics bar, cycling through the palette.
    pub fn statistics_color(&self, index: usize) -> Color {
        cycle(&self.statistics_colors, index, self.length_color)
    }
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            distribution_size: Size::new(1400, 500),
            lengths_size: Size::new(1200, 600),
            statistics_size: Size::new(1000, 600),
            background: Color::WHITE,
            text: Color(0x22, 0x22, 0x22),
            axis: Color(0x44, 0x44, 0x44),
            grid: Color(0xDD, 0xDD, 0xDD),
            category_colors: vec![Color(0x2E, 0x86, 0xAB), Color(0xA2, 0x3B, 0x72)],
            length_color: Color(0xF1, 0x8F, 0x01),
            statistics_colors: vec![
                Color(0x06, 0xAE, 0xD5),
                Color(0x08, 0x67, 0x88),
                Color(0xDD, 0x1C, 0x1A),
                Color(0xF0, 0xA2, 0x02),
                Color(0x2E, 0x86, 0xAB),
            ],
            font_size: 16.0,
            subtitle: PageMetadata::default().caption(),
        }
    }
}

fn cycle(colors: &[Color], index: usize, fallback: Color) -> Color {
    if colors.is_empty() {
        fallback
    } else {
        colors[index % colors.len()]
    }
}
