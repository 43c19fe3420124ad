//! The three summary charts.

use super::canvas::{pie_point, Align, Canvas};
use super::stats::SummaryStats;
use super::style::{ChartStyle, Color};
use crate::error::{Error, Result};
use crate::export::Table;
use crate::model::truncate_chars;
use std::path::{Path, PathBuf};

/// File name of the content distribution chart.
pub const DISTRIBUTION_FILE: &str = "visualization_content_distribution.png";

/// File name of the text length chart.
pub const TEXT_LENGTHS_FILE: &str = "visualization_text_lengths.png";

/// File name of the statistics chart.
pub const STATISTICS_FILE: &str = "visualization_statistics.png";

/// Headlines longer than this are cut and suffixed with `...` on the length chart.
const LABEL_MAX_CHARS: usize = 35;

const MARGIN: i32 = 24;
const GRID_DIVISIONS: i64 = 4;

/// Draws charts from a [`Table`] according to a [`ChartStyle`].
#[derive(Debug, Clone, Default)]
pub struct ChartRenderer {
    style: ChartStyle,
}

impl ChartRenderer {
    /// Create a renderer with the given style.
    pub fn new(style: ChartStyle) -> Self {
        Self { style }
    }

    pub fn style(&self) -> &ChartStyle {
        &self.style
    }

    /// Write all three charts into `dir`, returning their paths.
    pub fn render_all<P: AsRef<Path>>(&self, table: &Table, dir: P) -> Result<Vec<PathBuf>> {
        ensure_rows(table)?;
        let dir = dir.as_ref();

        let distribution = dir.join(DISTRIBUTION_FILE);
        self.render_distribution(table, &distribution)?;

        let lengths = dir.join(TEXT_LENGTHS_FILE);
        self.render_text_lengths(table, &lengths)?;

        let statistics = dir.join(STATISTICS_FILE);
        self.render_statistics(table, &statistics)?;

        Ok(vec![distribution, lengths, statistics])
    }

    /// Write the content distribution chart.
    pub fn render_distribution<P: AsRef<Path>>(&self, table: &Table, path: P) -> Result<()> {
        self.draw_distribution(table)?.save_png(path.as_ref())?;
        log::info!("Saved {}", path.as_ref().display());
        Ok(())
    }

    /// Write the text length chart.
    pub fn render_text_lengths<P: AsRef<Path>>(&self, table: &Table, path: P) -> Result<()> {
        self.draw_text_lengths(table)?.save_png(path.as_ref())?;
        log::info!("Saved {}", path.as_ref().display());
        Ok(())
    }

    /// Write the statistics chart.
    pub fn render_statistics<P: AsRef<Path>>(&self, table: &Table, path: P) -> Result<()> {
        self.draw_statistics(table)?.save_png(path.as_ref())?;
        log::info!("Saved {}", path.as_ref().display());
        Ok(())
    }

    /// Bar chart of type counts on the left, pie of proportions on the right.
    pub fn draw_distribution(&self, table: &Table) -> Result<Canvas> {
        ensure_rows(table)?;
        let style = &self.style;
        let mut canvas = Canvas::new(style.distribution_size, style.background)?;
        let half = canvas.width() / 2;

        let counts = table.type_counts();
        let labels: Vec<&str> = counts.iter().map(|(t, _)| t.as_str()).collect();
        let values: Vec<usize> = counts.iter().map(|(_, n)| *n).collect();

        let top = self.draw_title(
            &mut canvas,
            half / 2,
            "Content type distribution",
            &style.subtitle,
        );
        self.draw_vbars(&mut canvas, 0, half, top, &labels, &values);

        let top = self.draw_title(
            &mut canvas,
            half + half / 2,
            "Share of content",
            "Articles vs advertisements",
        );
        self.draw_pie(&mut canvas, half, top, &labels, &values);

        Ok(canvas)
    }

    /// One horizontal bar per row: excerpt length, labelled by headline.
    pub fn draw_text_lengths(&self, table: &Table) -> Result<Canvas> {
        ensure_rows(table)?;
        let style = &self.style;
        let mut canvas = Canvas::new(style.lengths_size, style.background)?;

        let labels: Vec<String> = table.rows().iter().map(|r| short_label(&r.headline)).collect();
        let values: Vec<usize> = table.rows().iter().map(|r| r.text_length).collect();

        let cx = canvas.width() / 2;
        let top = self.draw_title(
            &mut canvas,
            cx,
            "Extracted text length by section",
            &style.subtitle,
        );
        self.draw_hbars(
            &mut canvas,
            top,
            &labels,
            &values,
            |_| style.length_color,
            "Text length (characters)",
        );

        Ok(canvas)
    }

    /// Horizontal bars for the [`SummaryStats`] figures.
    pub fn draw_statistics(&self, table: &Table) -> Result<Canvas> {
        ensure_rows(table)?;
        let style = &self.style;
        let mut canvas = Canvas::new(style.statistics_size, style.background)?;

        let entries = SummaryStats::from_table(table).entries();
        let labels: Vec<String> = entries.iter().map(|(l, _)| l.to_string()).collect();
        let values: Vec<usize> = entries.iter().map(|(_, v)| *v).collect();

        let cx = canvas.width() / 2;
        let top = self.draw_title(&mut canvas, cx, "General statistics", &style.subtitle);
        self.draw_hbars(
            &mut canvas,
            top,
            &labels,
            &values,
            |i| style.statistics_color(i),
            "Value",
        );

        Ok(canvas)
    }

    /// Two centred title lines; returns the y where the plot may start.
    fn draw_title(&self, canvas: &mut Canvas, cx: i32, title: &str, subtitle: &str) -> i32 {
        let size = self.style.font_size;
        let title_size = self.style.title_size();
        let mut y = MARGIN;
        canvas.draw_text(cx, y, title, title_size, Align::Center, self.style.text);
        y += canvas.line_height(title_size) + 4;
        if !subtitle.is_empty() {
            canvas.draw_text(cx, y, subtitle, size, Align::Center, self.style.text);
            y += canvas.line_height(size) + 4;
        }
        y + 16
    }

    fn draw_vbars(&self, canvas: &mut Canvas, x0: i32, x1: i32, top: i32, labels: &[&str], values: &[usize]) {
        let style = &self.style;
        let size = style.font_size;
        let lh = canvas.line_height(size);
        let max = values.iter().copied().max().unwrap_or(0).max(1);

        let tick_width = canvas.text_width(&max.to_string(), size);
        let left = x0 + MARGIN + tick_width + 12;
        let right = x1 - MARGIN;
        let bottom = canvas.height() - MARGIN - 2 * lh - 16;
        let plot_top = top + lh + 8;
        let plot_w = (right - left).max(1);
        let plot_h = (bottom - plot_top).max(1);
        let y_of = |v: usize| bottom - scaled(plot_h, v, max);

        canvas.draw_text(left, top, "Count", size, Align::Left, style.text);
        for i in 0..=GRID_DIVISIONS {
            let tick = (max as i64 * i / GRID_DIVISIONS) as usize;
            let y = y_of(tick);
            canvas.hline(left, right, y, style.grid);
            canvas.draw_text_middle(left - 8, y, &tick.to_string(), size, Align::Right, style.text);
        }

        let slot = plot_w / values.len().max(1) as i32;
        let bar_w = (slot * 6 / 10).max(1);
        for (i, (label, value)) in labels.iter().zip(values).enumerate() {
            let cx = left + slot * i as i32 + slot / 2;
            let y = y_of(*value);
            canvas.fill_rect(cx - bar_w / 2, y, bar_w, bottom - y, style.category_color(i));
            canvas.draw_text(cx, y - lh - 6, &value.to_string(), size, Align::Center, style.text);
            canvas.draw_text(cx, bottom + 8, label, size, Align::Center, style.text);
        }

        canvas.vline(left, plot_top, bottom, style.axis);
        canvas.hline(left, right, bottom, style.axis);
        canvas.draw_text(
            left + plot_w / 2,
            canvas.height() - MARGIN - lh,
            "Content type",
            size,
            Align::Center,
            style.text,
        );
    }

    fn draw_pie(&self, canvas: &mut Canvas, x0: i32, top: i32, labels: &[&str], values: &[usize]) {
        let style = &self.style;
        let size = style.font_size;
        let half = canvas.width() - x0;
        let cx = x0 + half / 2;
        let cy = (top + canvas.height()) / 2;
        let radius = (half / 2 - MARGIN - 80)
            .min((canvas.height() - top) / 2 - MARGIN)
            .max(1);

        let total: usize = values.iter().sum();
        if total == 0 {
            return;
        }
        let slices: Vec<(f64, Color)> = values
            .iter()
            .enumerate()
            .map(|(i, v)| (*v as f64, style.category_color(i)))
            .collect();
        canvas.fill_pie(cx, cy, radius, &slices);

        let mut start = 0.0;
        for (label, value) in labels.iter().zip(values) {
            let share = *value as f64 / total as f64;
            let mid = start + share / 2.0;
            start += share;

            let (px, py) = pie_point(cx, cy, mid, radius as f64 * 0.6);
            let percent = format!("{:.1}%", share * 100.0);
            canvas.draw_text_middle(px, py, &percent, size, Align::Center, Color::WHITE);

            let (lx, ly) = pie_point(cx, cy, mid, radius as f64 * 1.12);
            let align = if lx >= cx { Align::Left } else { Align::Right };
            canvas.draw_text_middle(lx, ly, label, size, align, style.text);
        }
    }

    fn draw_hbars(
        &self,
        canvas: &mut Canvas,
        top: i32,
        labels: &[String],
        values: &[usize],
        color_of: impl Fn(usize) -> Color,
        x_label: &str,
    ) {
        let style = &self.style;
        let size = style.font_size;
        let lh = canvas.line_height(size);
        let max = values.iter().copied().max().unwrap_or(0).max(1);

        let label_width = labels
            .iter()
            .map(|l| canvas.text_width(l, size))
            .max()
            .unwrap_or(0)
            .min(canvas.width() / 2);
        let value_width = canvas.text_width(&max.to_string(), size);

        let left = MARGIN + label_width + 12;
        let right = canvas.width() - MARGIN - value_width - 12;
        let bottom = canvas.height() - MARGIN - 2 * lh - 16;
        let plot_w = (right - left).max(1);
        let plot_h = (bottom - top).max(1);

        for i in 0..=GRID_DIVISIONS {
            let tick = (max as i64 * i / GRID_DIVISIONS) as usize;
            let x = left + scaled(plot_w, tick, max);
            canvas.vline(x, top, bottom, style.grid);
            canvas.draw_text(x, bottom + 8, &tick.to_string(), size, Align::Center, style.text);
        }

        let rows = values.len().max(1) as i32;
        let row_h = plot_h / rows;
        let bar_h = (row_h * 7 / 10).max(1);
        let label_size = if row_h >= lh + 2 {
            size
        } else {
            (row_h as f32 * 0.8).max(6.0)
        };

        // first row at the bottom
        for (i, (label, value)) in labels.iter().zip(values).enumerate() {
            let cy = bottom - row_h * i as i32 - row_h / 2;
            let w = scaled(plot_w, *value, max);
            canvas.fill_rect(left + 1, cy - bar_h / 2, w, bar_h, color_of(i));
            canvas.draw_text_middle(left - 8, cy, label, label_size, Align::Right, style.text);
            canvas.draw_text_middle(left + w + 6, cy, &value.to_string(), label_size, Align::Left, style.text);
        }

        canvas.vline(left, top, bottom, style.axis);
        canvas.hline(left, right, bottom, style.axis);
        canvas.draw_text(
            left + plot_w / 2,
            canvas.height() - MARGIN - lh,
            x_label,
            size,
            Align::Center,
            style.text,
        );
    }
}

fn ensure_rows(table: &Table) -> Result<()> {
    if table.is_empty() {
        Err(Error::EmptyTable)
    } else {
        Ok(())
    }
}

/// `extent * value / max` in pixels; `max` is never zero.
fn scaled(extent: i32, value: usize, max: usize) -> i32 {
    (extent as i64 * value as i64 / max.max(1) as i64) as i32
}

/// Headline cut to the label length, with `...` when shortened.
fn short_label(headline: &str) -> String {
    let cut = truncate_chars(headline, LABEL_MAX_CHARS);
    if cut.len() < headline.len() {
        format!("{}...", cut)
    } else {
        headline.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ContentRecord, ContentType, PageMetadata, StructuredDocument};
    use crate::render::Size;

    fn table(records: Vec<ContentRecord>) -> Table {
        Table::from_document(&StructuredDocument::new(PageMetadata::default(), records))
    }

    fn small_style() -> ChartStyle {
        ChartStyle {
            distribution_size: Size::new(700, 250),
            lengths_size: Size::new(600, 300),
            statistics_size: Size::new(500, 300),
            font_size: 11.0,
            ..ChartStyle::default()
        }
    }

    fn count_color(canvas: &Canvas, color: Color) -> usize {
        let mut n = 0;
        for y in 0..canvas.height() {
            for x in 0..canvas.width() {
                if canvas.pixel(x, y) == Some(color) {
                    n += 1;
                }
            }
        }
        n
    }

    #[test]
    fn test_empty_table_is_error() {
        let renderer = ChartRenderer::default();
        let empty = Table::new(Vec::new());
        assert!(matches!(renderer.draw_distribution(&empty), Err(Error::EmptyTable)));
        assert!(matches!(renderer.draw_text_lengths(&empty), Err(Error::EmptyTable)));
        assert!(matches!(renderer.draw_statistics(&empty), Err(Error::EmptyTable)));
    }

    #[test]
    fn test_single_category_distribution() {
        let renderer = ChartRenderer::new(small_style());
        let table = table(vec![ContentRecord::new(
            "Solo",
            "Main article",
            ContentType::Article,
            "",
            "texto",
        )]);
        let canvas = renderer.draw_distribution(&table).unwrap();
        assert_eq!(canvas.width(), 700);
        assert!(count_color(&canvas, renderer.style().category_color(0)) > 0);
        assert_eq!(count_color(&canvas, renderer.style().category_color(1)), 0);
    }

    #[test]
    fn test_zero_length_excerpts_render() {
        let renderer = ChartRenderer::new(small_style());
        let table = table(vec![
            ContentRecord::new("Vacío", "Main article", ContentType::Article, "", ""),
            ContentRecord::new("Otro", "Advertisements", ContentType::Advertisement, "", ""),
        ]);
        let canvas = renderer.draw_text_lengths(&table).unwrap();
        assert_eq!(canvas.height(), 300);
        assert!(renderer.draw_statistics(&table).is_ok());
    }

    #[test]
    fn test_two_categories_use_both_colors() {
        let renderer = ChartRenderer::new(small_style());
        let table = table(vec![
            ContentRecord::new("A", "Main article", ContentType::Article, "", "uno dos"),
            ContentRecord::new("B", "Advertisements", ContentType::Advertisement, "", "tres"),
        ]);
        let canvas = renderer.draw_distribution(&table).unwrap();
        assert!(count_color(&canvas, renderer.style().category_color(0)) > 0);
        assert!(count_color(&canvas, renderer.style().category_color(1)) > 0);
    }

    #[test]
    fn test_render_all_writes_pngs() {
        let dir = tempfile::tempdir().unwrap();
        let renderer = ChartRenderer::new(small_style());
        let table = table(vec![ContentRecord::new(
            "RÓMULO MENCHOLA",
            "Advertisements",
            ContentType::Advertisement,
            "",
            "VENDEDOR Y COBRADOR",
        )]);

        let paths = renderer.render_all(&table, dir.path()).unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with(DISTRIBUTION_FILE));
        for path in &paths {
            let bytes = std::fs::read(path).unwrap();
            assert!(bytes.starts_with(b"\x89PNG"));
        }
    }

    #[test]
    fn test_short_label() {
        assert_eq!(short_label("Corto"), "Corto");
        let long = "EL PRIMER PERIÓDICO EN CHICLAYO Y OTROS MÁS";
        let label = short_label(long);
        assert!(label.ends_with("..."));
        assert_eq!(label.chars().count(), LABEL_MAX_CHARS + 3);
    }
}
