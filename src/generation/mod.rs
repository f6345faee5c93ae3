//! Structured text generation.
//!
//! The optimizer and the assistants depend only on [`StructuredGenerator`]:
//! submit a prompt plus the JSON Schema the answer must follow, get back a
//! JSON value or an error. Concrete adapters live in submodules.

pub mod canned;
pub mod offline;
pub mod openai;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use canned::CannedGenerator;
pub use offline::OfflineGenerator;
pub use openai::{GeneratorConfig, OpenAiCompatGenerator};

/// Errors raised by a generator adapter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    #[error("network error: {message}")]
    Network { message: String },

    #[error("request failed: {message}")]
    RequestFailed { message: String },

    #[error("invalid response: {message}")]
    InvalidResponse { message: String },

    #[error("configuration error: {message}")]
    Configuration { message: String },

    #[error("no scripted response left for prompt '{prompt}'")]
    Exhausted { prompt: String },
}

/// A prompt submitted for structured generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Stable prompt identifier, e.g. `payment_route_optimization`.
    pub prompt_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    /// Fully rendered user prompt.
    pub prompt: String,
    /// The structured values the prompt was rendered from.
    pub input: serde_json::Value,
    /// JSON Schema the response must conform to.
    pub output_schema: serde_json::Value,
}

/// Capability: turn a prompt and an output schema into a JSON value.
#[async_trait]
pub trait StructuredGenerator: Send + Sync {
    /// Adapter name, used in logs.
    fn name(&self) -> &'static str;

    async fn generate(&self, request: &GenerationRequest)
        -> Result<serde_json::Value, GenerationError>;
}

/// Pull a JSON object out of raw model text.
///
/// Models sometimes wrap JSON in markdown fences or prose; take the span
/// from the first `{` to the last `}`.
pub fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    if end <= start {
        return None;
    }
    Some(&raw[start..=end])
}

/// Parse raw model text into a JSON value.
pub fn parse_model_text(raw: &str) -> Result<serde_json::Value, GenerationError> {
    let json = extract_json_object(raw).ok_or_else(|| GenerationError::InvalidResponse {
        message: "model output contains no JSON object".to_string(),
    })?;
    serde_json::from_str(json).map_err(|e| GenerationError::InvalidResponse {
        message: e.to_string(),
    })
}
