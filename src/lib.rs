//! # newsprint
//!
//! Turns a scanned newspaper page into structured, analyzable records.
//!
//! A page image is transcribed (or a built-in demonstration transcript is
//! used), the text is split into articles and advertisements, and the result
//! is written as a transcript, JSON, CSV and three summary charts.
//!
//! ## Quick Start
//!
//! ```
//! use newsprint::{segment_text, Table};
//!
//! let doc = segment_text("Crónica local con texto suficiente\n==========\nMáquinas SINGER a plazos y al contado");
//! assert_eq!(doc.len(), 2);
//!
//! let table = Table::from_document(&doc);
//! assert_eq!(table.rows()[0].issue_number, Some(1609));
//! ```
//!
//! ## Features
//!
//! - **Offline segmentation**: rule-driven splitting and classification that never fails
//! - **Service structuring**: optional transcription and structuring through the messages API
//! - **Exports**: transcript, pretty JSON and CSV with a fixed column order
//! - **Charts**: content distribution, text lengths and summary statistics as PNG

pub mod acquire;
pub mod detect;
pub mod error;
pub mod export;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod service;
pub mod structure;

// Re-export commonly used types
pub use acquire::{AcquiredText, TextAcquirer, TextRecognizer, TextSource, VisionRecognizer};
pub use detect::{detect_media_type_from_bytes, detect_media_type_from_path, MediaType};
pub use error::{Error, Result};
pub use export::{Column, JsonFormat, Table, TableRow};
pub use model::{ContentRecord, ContentType, PageMetadata, StructuredDocument};
pub use pipeline::{Pipeline, PipelineOptions, PipelineReport, Stage};
pub use render::{ChartRenderer, ChartStyle, SummaryStats};
pub use service::{AnthropicClient, MessagesApi, ServiceConfig};
pub use structure::{HeuristicSegmenter, SegmenterRules, ServiceStructurer, Structurer};

use std::path::Path;

/// Structure text with the offline segmenter and default rules.
///
/// # Example
///
/// ```
/// use newsprint::segment_text;
///
/// let doc = segment_text("");
/// assert_eq!(doc.content[0].headline, "Full content");
/// ```
pub fn segment_text(text: &str) -> StructuredDocument {
    HeuristicSegmenter::default().segment(text)
}

/// Read a text file and structure it with the offline segmenter.
pub fn segment_file<P: AsRef<Path>>(path: P) -> Result<StructuredDocument> {
    let text = std::fs::read_to_string(path)?;
    Ok(segment_text(&text))
}

/// Convert text straight to CSV through the offline segmenter.
///
/// # Example
///
/// ```
/// use newsprint::text_to_csv;
///
/// let csv = text_to_csv("");
/// assert!(csv.starts_with("date,issue_number,headline"));
/// ```
pub fn text_to_csv(text: &str) -> String {
    Table::from_document(&segment_text(text)).to_csv()
}

/// Render the three charts for a CSV file into `output_dir`.
///
/// # Example
///
/// ```no_run
/// use newsprint::charts_from_csv;
///
/// let charts = charts_from_csv("data/el_martillo/el_martillo_1609_structured.csv", "data/el_martillo")?;
/// assert_eq!(charts.len(), 3);
/// # Ok::<(), newsprint::Error>(())
/// ```
pub fn charts_from_csv<P: AsRef<Path>, Q: AsRef<Path>>(
    csv_path: P,
    output_dir: Q,
) -> Result<Vec<std::path::PathBuf>> {
    let table = Table::read_csv(csv_path)?;
    std::fs::create_dir_all(output_dir.as_ref())?;
    ChartRenderer::default().render_all(&table, output_dir)
}

/// Run the full pipeline with default paths, using the service when
/// `ANTHROPIC_API_KEY` is set.
pub fn run_default() -> Result<PipelineReport> {
    Pipeline::from_config(PipelineOptions::default(), ServiceConfig::from_env())?.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_text_fallback() {
        let doc = segment_text("   ");
        assert_eq!(doc.len(), 1);
        assert_eq!(doc.content[0].text_excerpt, "");
    }

    #[test]
    fn test_segment_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("page.txt");
        std::fs::write(&path, acquire::DEMO_TEXT).unwrap();
        let doc = segment_file(&path).unwrap();
        assert_eq!(doc.metadata.issue_number, Some(1609));
        assert!(doc.count_of(ContentType::Advertisement) >= 1);
    }

    #[test]
    fn test_segment_missing_file() {
        assert!(matches!(
            segment_file("/nonexistent/page.txt"),
            Err(Error::Io(_))
        ));
    }

    #[test]
    fn test_text_to_csv_header() {
        let csv = text_to_csv("");
        let header = csv.lines().next().unwrap();
        assert_eq!(header, "date,issue_number,headline,section,type,author,text_excerpt");
    }
}
