//! Client for the external messages API used for transcription and structuring.
//!
//! Both the vision transcription step and the remote structuring strategy send a
//! single user turn and read back the first text block of the reply. The
//! [`MessagesApi`] trait is the seam between them and the HTTP client, so the
//! pipeline can be exercised offline with a canned implementation.

mod client;

pub use client::{AnthropicClient, ServiceConfig, API_KEY_ENV, DEFAULT_MODEL, MODEL_ENV};

use crate::detect::MediaType;
use crate::error::Result;
use base64::Engine;
use serde::Serialize;

/// One block of user content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain prompt text
    Text { text: String },
    /// Base64-encoded image
    Image { source: ImageSource },
}

impl ContentBlock {
    /// Text block.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Image block carrying `data` base64-encoded.
    pub fn image(data: &[u8], media_type: MediaType) -> Self {
        ContentBlock::Image {
            source: ImageSource {
                kind: "base64",
                media_type: media_type.as_mime(),
                data: base64::engine::general_purpose::STANDARD.encode(data),
            },
        }
    }
}

/// Inline image payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageSource {
    #[serde(rename = "type")]
    kind: &'static str,
    media_type: &'static str,
    data: String,
}

/// A single-turn request: user content plus the token budget for the reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    /// Maximum tokens the service may generate
    pub max_tokens: u32,
    /// User content blocks, in order
    pub content: Vec<ContentBlock>,
}

impl Prompt {
    /// Create an empty prompt with the given reply budget.
    pub fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            content: Vec::new(),
        }
    }

    /// Append a content block.
    pub fn with_block(mut self, block: ContentBlock) -> Self {
        self.content.push(block);
        self
    }

    /// Concatenated text of all text blocks.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter_map(|b| match b {
                ContentBlock::Text { text } => Some(text.as_str()),
                ContentBlock::Image { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Something that can answer a [`Prompt`] with text.
pub trait MessagesApi: Send + Sync {
    /// Send the prompt and return the first text block of the reply.
    fn complete(&self, prompt: &Prompt) -> Result<String>;
}
