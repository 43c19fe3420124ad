//! Error types for the newsprint library.

use std::io;
use thiserror::Error;

/// Result type alias for newsprint operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while processing a page.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization or parsing failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The external service was unreachable or answered with an error status.
    #[error("Service error: {0}")]
    Service(String),

    /// The external service answered, but not in the expected shape.
    #[error("Malformed service response: {0}")]
    MalformedResponse(String),

    /// A page image exists but no service credential is configured.
    #[error("No service credential configured; set ANTHROPIC_API_KEY to transcribe {0}")]
    MissingCredential(String),

    /// The input file is not a PNG or JPEG image.
    #[error("Unsupported image format: {0}")]
    UnsupportedImage(String),

    /// A segmentation rule did not compile into a pattern.
    #[error("Invalid segmentation rule: {0}")]
    Pattern(#[from] regex::Error),

    /// A CSV table could not be read.
    #[error("CSV error: {0}")]
    Csv(String),

    /// The table handed to the renderer has no rows.
    #[error("Table has no rows; nothing to chart")]
    EmptyTable,

    /// Error while drawing or encoding charts.
    #[error("Rendering error: {0}")]
    Render(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::MalformedResponse(err.to_string())
        } else {
            Error::Service(err.to_string())
        }
    }
}
