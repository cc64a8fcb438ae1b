//! Request and response types for model generation.

use crate::Message;
use serde::{Deserialize, Serialize};

/// Generic generation request (multimodal-safe).
///
/// `response_schema` carries the JSON descriptor of the structured output
/// shape the caller expects; providers that support constrained decoding
/// forward it on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, derive_builder::Builder)]
#[builder(default)]
pub struct GenerateRequest {
    /// Conversation messages, oldest first
    pub messages: Vec<Message>,
    /// Model identifier override
    pub model: Option<String>,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Output token cap
    pub max_tokens: Option<u32>,
    /// Requested structured output shape
    pub response_schema: Option<serde_json::Value>,
}

impl GenerateRequest {
    /// Returns a builder for constructing a request.
    pub fn builder() -> GenerateRequestBuilder {
        GenerateRequestBuilder::default()
    }
}

/// Supported output types from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum Output {
    /// Plain text output.
    Text(String),

    /// Structured JSON output.
    Json(serde_json::Value),
}

/// The unified response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Model outputs in the order produced
    pub outputs: Vec<Output>,
}

impl GenerateResponse {
    /// Creates a response from a list of outputs.
    pub fn new(outputs: Vec<Output>) -> Self {
        Self { outputs }
    }
}
