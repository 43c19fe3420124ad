//! Plain-text transcript with an extraction banner.

use crate::model::PageMetadata;
use chrono::NaiveDateTime;

const BANNER_WIDTH: usize = 80;

/// Default banner title for a page, e.g. `FULL EXTRACTED TEXT - EL MARTILLO (Edition 1609)`.
pub fn transcript_title(metadata: &PageMetadata) -> String {
    let name = metadata.newspaper_name.to_uppercase();
    match metadata.issue_number {
        Some(issue) => format!("FULL EXTRACTED TEXT - {} (Edition {})", name, issue),
        None => format!("FULL EXTRACTED TEXT - {}", name),
    }
}

/// Prefix raw text with the banner, title and extraction timestamp.
pub fn to_transcript(text: &str, title: &str, extracted_at: NaiveDateTime) -> String {
    let banner = "=".repeat(BANNER_WIDTH);
    format!(
        "{banner}\n{title}\nExtraction date: {}\n{banner}\n\n{text}",
        extracted_at.format("%Y-%m-%d %H:%M:%S")
    )
}
