//! Obtaining the raw text of a page.
//!
//! A page image is transcribed by a [`TextRecognizer`]. When the configured
//! image does not exist, the fixed [`DEMO_TEXT`] stands in for it so the rest
//! of the pipeline can still run.

mod sample;
mod vision;

pub use sample::DEMO_TEXT;
pub use vision::{VisionRecognizer, TRANSCRIBE_MAX_TOKENS};

use crate::detect::{detect_media_type_from_path, MediaType};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Something that can transcribe a page image.
pub trait TextRecognizer: Send + Sync {
    /// Transcribe the image bytes to text.
    fn recognize(&self, image: &[u8], media_type: MediaType) -> Result<String>;
}

/// Where acquired text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextSource {
    /// Transcribed from the page image at this path
    Image(PathBuf),
    /// The built-in demonstration transcript
    Sample,
}

impl std::fmt::Display for TextSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TextSource::Image(path) => write!(f, "{}", path.display()),
            TextSource::Sample => f.write_str("demonstration text"),
        }
    }
}

/// Raw page text together with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquiredText {
    pub text: String,
    pub source: TextSource,
}

impl AcquiredText {
    /// Whether the text is the demonstration sample.
    pub fn is_sample(&self) -> bool {
        self.source == TextSource::Sample
    }
}

/// Resolves a page path to text.
#[derive(Clone, Default)]
pub struct TextAcquirer {
    recognizer: Option<Arc<dyn TextRecognizer>>,
}

impl TextAcquirer {
    /// Acquirer without a recognizer; only the sample path works.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a recognizer for existing images.
    pub fn with_recognizer(mut self, recognizer: Arc<dyn TextRecognizer>) -> Self {
        self.recognizer = Some(recognizer);
        self
    }

    /// Whether a recognizer is attached.
    pub fn has_recognizer(&self) -> bool {
        self.recognizer.is_some()
    }

    /// Get the text for the page at `path`.
    ///
    /// A missing image yields [`TextSource::Sample`]. An existing image needs
    /// a recognizer; without one this fails with [`Error::MissingCredential`].
    pub fn acquire<P: AsRef<Path>>(&self, path: P) -> Result<AcquiredText> {
        let path = path.as_ref();

        if !path.exists() {
            log::warn!(
                "Image {} not found; using the demonstration text",
                path.display()
            );
            return Ok(AcquiredText {
                text: DEMO_TEXT.to_string(),
                source: TextSource::Sample,
            });
        }

        let recognizer = self
            .recognizer
            .as_ref()
            .ok_or_else(|| Error::MissingCredential(path.display().to_string()))?;

        let media_type = detect_media_type_from_path(path)?;
        let image = std::fs::read(path)?;
        log::info!("Loaded {} ({}, {} bytes)", path.display(), media_type, image.len());

        let text = recognizer.recognize(&image, media_type)?;
        Ok(AcquiredText {
            text,
            source: TextSource::Image(path.to_path_buf()),
        })
    }
}

impl std::fmt::Debug for TextAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextAcquirer")
            .field("recognizer", &self.recognizer.is_some())
            .finish()
    }
}
