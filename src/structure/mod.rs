//! Turning raw page text into a [`StructuredDocument`].
//!
//! Two strategies exist: the offline [`HeuristicSegmenter`] and the
//! [`ServiceStructurer`], which asks the messages service. Which one runs is
//! decided once, when the [`Structurer`] is built.
//!
//! # Example
//!
//! ```
//! use newsprint::structure::Structurer;
//!
//! let structurer = Structurer::heuristic();
//! let doc = structurer
//!     .structure("Crónica local con texto suficiente\n==========\nMáquinas SINGER a plazos y al contado")
//!     .unwrap();
//! assert_eq!(doc.len(), 2);
//! ```

mod remote;
mod rules;
mod segmenter;

pub use remote::{parse_reply, strip_code_fence, ServiceStructurer, STRUCTURE_MAX_TOKENS};
pub use rules::SegmenterRules;
pub use segmenter::HeuristicSegmenter;

use crate::error::Result;
use crate::model::StructuredDocument;
use crate::service::{AnthropicClient, ServiceConfig};
use std::sync::Arc;

/// Structuring strategy for a run.
#[derive(Debug, Clone)]
pub enum Structurer {
    /// Offline pattern-based segmentation
    Heuristic(HeuristicSegmenter),
    /// Remote structuring through the messages service
    Service(ServiceStructurer),
}

impl Structurer {
    /// Heuristic structurer with the default rules.
    pub fn heuristic() -> Self {
        Structurer::Heuristic(HeuristicSegmenter::default())
    }

    /// Heuristic structurer with custom rules.
    pub fn with_rules(rules: SegmenterRules) -> Result<Self> {
        Ok(Structurer::Heuristic(HeuristicSegmenter::new(rules)?))
    }

    /// Service structurer when a configuration is present, heuristic otherwise.
    pub fn from_credential(config: Option<ServiceConfig>, rules: SegmenterRules) -> Result<Self> {
        match config {
            Some(config) => {
                log::info!("Using the messages service ({}) for structuring", config.model);
                let client = AnthropicClient::new(config)?;
                Ok(Structurer::Service(ServiceStructurer::new(Arc::new(client))))
            }
            None => {
                log::warn!("No service credential; structuring with the offline segmenter");
                Self::with_rules(rules)
            }
        }
    }

    /// Structure raw text.
    ///
    /// The heuristic strategy never fails; the service strategy fails on
    /// transport errors and unparseable replies.
    pub fn structure(&self, text: &str) -> Result<StructuredDocument> {
        match self {
            Structurer::Heuristic(segmenter) => Ok(segmenter.segment(text)),
            Structurer::Service(service) => service.structure(text),
        }
    }

    /// Short name of the strategy.
    pub fn name(&self) -> &'static str {
        match self {
            Structurer::Heuristic(_) => "heuristic",
            Structurer::Service(_) => "service",
        }
    }
}

impl Default for Structurer {
    fn default() -> Self {
        Self::heuristic()
    }
}
