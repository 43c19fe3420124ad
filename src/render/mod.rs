//! Rendering module for drawing summary charts from a table.
//!
//! Charts are rasterized with `tiny-skia`; labels use an embedded DejaVu Sans
//! face through `fontdue`.

mod canvas;
mod charts;
mod stats;
mod style;
mod typeface;

pub use canvas::{Align, Canvas};
pub use charts::{ChartRenderer, DISTRIBUTION_FILE, STATISTICS_FILE, TEXT_LENGTHS_FILE};
pub use stats::SummaryStats;
pub use style::{ChartStyle, Color, Size};
