//! Page transcription through the vision-capable messages service.

use super::TextRecognizer;
use crate::detect::MediaType;
use crate::error::Result;
use crate::service::{ContentBlock, MessagesApi, Prompt};
use std::sync::Arc;

/// Reply budget for a page transcription.
pub const TRANSCRIBE_MAX_TOKENS: u32 = 4096;

const TRANSCRIBE_INSTRUCTIONS: &str = "Analyze this historical newspaper page and extract all of its information in a structured way.

Please provide:
1. Header information (newspaper name, date, issue number)
2. Every article with its title
3. Advertisements
4. Any other relevant information

Transcribe the full text as faithfully as possible, keeping the original spelling (even where it contains errors).";

/// [`TextRecognizer`] that sends the page image to the messages service.
#[derive(Clone)]
pub struct VisionRecognizer {
    api: Arc<dyn MessagesApi>,
}

impl VisionRecognizer {
    /// Create a recognizer over a messages API.
    pub fn new(api: Arc<dyn MessagesApi>) -> Self {
        Self { api }
    }

    /// Build the transcription prompt: the image first, then the instructions.
    pub fn prompt(image: &[u8], media_type: MediaType) -> Prompt {
        Prompt::new(TRANSCRIBE_MAX_TOKENS)
            .with_block(ContentBlock::image(image, media_type))
            .with_block(ContentBlock::text(TRANSCRIBE_INSTRUCTIONS))
    }
}

impl TextRecognizer for VisionRecognizer {
    fn recognize(&self, image: &[u8], media_type: MediaType) -> Result<String> {
        log::info!(
            "Transcribing {} bytes of {} with the messages service",
            image.len(),
            media_type
        );
        self.api.complete(&Self::prompt(image, media_type))
    }
}

impl std::fmt::Debug for VisionRecognizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionRecognizer").finish_non_exhaustive()
    }
}
