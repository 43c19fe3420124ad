//! Blocking HTTP client for the Anthropic messages endpoint.

use super::{ContentBlock, MessagesApi, Prompt};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable holding the service credential.
pub const API_KEY_ENV: &str = "ANTHROPIC_API_KEY";

/// Environment variable overriding the model name.
pub const MODEL_ENV: &str = "NEWSPRINT_MODEL";

/// Model used when none is configured.
pub const DEFAULT_MODEL: &str = "claude-3-5-sonnet-20241022";

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const API_VERSION: &str = "2023-06-01";

/// Connection settings for the messages service.
#[derive(Clone)]
pub struct ServiceConfig {
    /// Credential sent as `x-api-key`
    pub api_key: String,

    /// Model name
    pub model: String,

    /// Scheme and host, without trailing slash
    pub base_url: String,

    /// Whole-request timeout (`None` waits indefinitely)
    pub timeout: Option<Duration>,
}

impl ServiceConfig {
    /// Create a configuration with the default model and endpoint.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
        }
    }

    /// Read the credential (and optional model override) from the environment.
    ///
    /// Returns `None` when the credential is unset or blank.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var(API_KEY_ENV).ok()?;
        let mut config = Self::from_credential(Some(api_key))?;
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                config = config.with_model(model.trim());
            }
        }
        Some(config)
    }

    /// Build a configuration from an optional credential, ignoring blanks.
    pub fn from_credential(api_key: Option<String>) -> Option<Self> {
        api_key
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty())
            .map(Self::new)
    }

    /// Set the model name.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the endpoint base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.base_url)
    }
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct WireRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: [WireMessage<'a>; 1],
}

#[derive(Serialize)]
struct WireMessage<'a> {
    role: &'static str,
    content: &'a [ContentBlock],
}

#[derive(Deserialize)]
struct WireResponse {
    #[serde(default)]
    content: Vec<WireBlock>,
}

#[derive(Deserialize)]
struct WireBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl WireResponse {
    fn first_text(self) -> Option<String> {
        self.content
            .into_iter()
            .find(|b| b.kind == "text")
            .and_then(|b| b.text)
    }
}

/// [`MessagesApi`] backed by a blocking `reqwest` client.
pub struct AnthropicClient {
    config: ServiceConfig,
    http: reqwest::blocking::Client,
}

impl AnthropicClient {
    /// Create a client for the given configuration.
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()?;
        Ok(Self { config, http })
    }

    /// The configuration this client was built with.
    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }
}

impl MessagesApi for AnthropicClient {
    fn complete(&self, prompt: &Prompt) -> Result<String> {
        let url = self.config.messages_url();
        let body = WireRequest {
            model: &self.config.model,
            max_tokens: prompt.max_tokens,
            messages: [WireMessage {
                role: "user",
                content: &prompt.content,
            }],
        };

        log::debug!(
            "POST {} (model {}, max_tokens {})",
            url,
            self.config.model,
            prompt.max_tokens
        );

        let response = self
            .http
            .post(&url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(Error::Service(format!("{} returned {}: {}", url, status, body)));
        }

        let parsed: WireResponse = response.json()?;
        parsed
            .first_text()
            .ok_or_else(|| Error::MalformedResponse("reply contains no text block".to_string()))
    }
}
