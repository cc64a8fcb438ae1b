//! HTTP client for the Gemini generateContent endpoint.

use crate::gemini::conversions;
use crate::gemini::dto::GeminiResponse;
use crate::{GenerativeModel, ModelConfig};
use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, error, instrument};
use vidya_core::{GenerateRequest, GenerateResponse};
use vidya_error::{InvocationError, InvocationErrorKind};

/// Client for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    config: ModelConfig,
}

impl GeminiClient {
    /// Creates a new client from the given configuration.
    #[instrument(skip(config), fields(model = %config.model))]
    pub fn new(config: ModelConfig) -> Self {
        let client = Client::new();
        debug!(model = %config.model, url = %config.base_url, "Created Gemini client");
        Self { client, config }
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url, model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    /// Sends a generation request to the Gemini API.
    ///
    /// Overload-type HTTP statuses (408, 429, 5xx) classify as
    /// `Overloaded` so callers can distinguish transient failures from
    /// permanent ones. No retries happen here.
    #[instrument(skip(self, req), fields(model = %self.config.model))]
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, InvocationError> {
        let model = req.model.as_deref().unwrap_or(&self.config.model);
        let wire_request = conversions::to_gemini_request(req)?;

        debug!(
            model = %model,
            contents = wire_request.contents.len(),
            "Sending request"
        );

        let response = self
            .client
            .post(self.endpoint(model))
            .query(&[("key", self.config.api_key.as_str())])
            .json(&wire_request)
            .send()
            .await
            .map_err(|e| {
                error!(error = ?e, "HTTP request failed");
                InvocationError::new(InvocationErrorKind::Transport(e.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!(status = %status, error = %message, "API error");

            let kind = match status.as_u16() {
                408 | 429 | 500 | 502 | 503 | 504 => InvocationErrorKind::Overloaded {
                    status: status.as_u16(),
                    message,
                },
                code => InvocationErrorKind::Api {
                    status: code,
                    message,
                },
            };
            return Err(InvocationError::new(kind));
        }

        let wire_response: GeminiResponse = response.json().await.map_err(|e| {
            error!(error = ?e, "Failed to parse response body");
            InvocationError::new(InvocationErrorKind::InvalidJson(e.to_string()))
        })?;

        debug!(candidates = wire_response.candidates.len(), "Received response");

        Ok(conversions::from_gemini_response(&wire_response))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}
