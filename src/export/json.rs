//! JSON output of structured documents.

use crate::error::Result;
use crate::model::StructuredDocument;

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with two-space indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Convert a document to JSON. Non-ASCII text is written as-is.
pub fn to_json(doc: &StructuredDocument, format: JsonFormat) -> Result<String> {
    let json = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(doc)?,
        JsonFormat::Compact => serde_json::to_string(doc)?,
    };
    Ok(json)
}

/// Read a document back from JSON, re-applying the record caps.
pub fn from_json(json: &str) -> Result<StructuredDocument> {
    let doc: StructuredDocument = serde_json::from_str(json)?;
    Ok(doc.normalized())
}
