//! Structuring delegated to the external messages service.

use crate::error::Result;
use crate::model::StructuredDocument;
use crate::service::{ContentBlock, MessagesApi, Prompt};
use std::sync::Arc;

/// Reply budget for the structuring request.
pub const STRUCTURE_MAX_TOKENS: u32 = 8000;

const STRUCTURE_INSTRUCTIONS: &str = r#"Analyze the following text extracted from a historical newspaper and structure it as JSON.

The JSON must have this shape:
{
  "metadata": {
    "newspaper_name": "name of the newspaper",
    "date": "YYYY-MM-DD",
    "issue_number": edition number,
    "location": "city, country"
  },
  "content": [
    {
      "headline": "title of the article or section",
      "section": "section (e.g. 'Main article', 'Advertisements')",
      "type": "article or advertisement",
      "author": "author if named, otherwise an empty string",
      "text_excerpt": "excerpt or summary of the text"
    }
  ]
}

IMPORTANT:
- Extract EVERY article, section and advertisement you find
- Keep the original spelling of the text
- Use empty values or null for anything that cannot be determined
- Be exhaustive; do not skip any content

TEXT TO ANALYZE:
"#;

const STRUCTURE_CLOSING: &str = "\n\nAnswer ONLY with the JSON, without further explanation.";

/// Structurer that asks the external service for the document JSON.
#[derive(Clone)]
pub struct ServiceStructurer {
    api: Arc<dyn MessagesApi>,
}

impl ServiceStructurer {
    /// Create a structurer over a messages API.
    pub fn new(api: Arc<dyn MessagesApi>) -> Self {
        Self { api }
    }

    /// Build the structuring prompt for `text`.
    pub fn prompt(text: &str) -> Prompt {
        let body = format!("{}{}{}", STRUCTURE_INSTRUCTIONS, text, STRUCTURE_CLOSING);
        Prompt::new(STRUCTURE_MAX_TOKENS).with_block(ContentBlock::text(body))
    }

    /// Send the text to the service and parse its JSON reply.
    ///
    /// A reply that is not valid document JSON fails with [`crate::Error::Json`].
    /// The record length caps are re-applied to whatever the service returns.
    pub fn structure(&self, text: &str) -> Result<StructuredDocument> {
        log::info!("Structuring {} characters with the messages service", text.chars().count());
        let reply = self.api.complete(&Self::prompt(text))?;
        parse_reply(&reply)
    }
}

impl std::fmt::Debug for ServiceStructurer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceStructurer").finish_non_exhaustive()
    }
}

/// Parse a service reply, tolerating a surrounding code fence.
pub fn parse_reply(reply: &str) -> Result<StructuredDocument> {
    let json = strip_code_fence(reply);
    let document: StructuredDocument = serde_json::from_str(json)?;
    log::debug!("Service returned {} records", document.len());
    Ok(document.normalized())
}

/// Remove a ```` ```json ```` or bare ```` ``` ```` fence around the reply.
///
/// Text that does not start with a fence is returned trimmed.
pub fn strip_code_fence(reply: &str) -> &str {
    let reply = reply.trim();
    let inner = if let Some(rest) = reply.strip_prefix("```json") {
        rest
    } else if let Some(rest) = reply.strip_prefix("```") {
        rest
    } else {
        return reply;
    };

    match inner.find("```") {
        Some(end) => inner[..end].trim(),
        None => inner.trim(),
    }
}
