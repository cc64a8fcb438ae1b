//! The model invocation adapter.

use crate::GenerativeModel;
use serde_json::Value;
use tracing::{debug, instrument, warn};
use vidya_core::{GenerateRequest, Input, Message, Output, PromptPayload, Role};
use vidya_error::{InvocationError, InvocationErrorKind};
use vidya_schema::Schema;

/// Wraps a driver and validates its structured output against the
/// requested schema before returning it.
///
/// The invoker performs no retries; transient failures surface with
/// their classification intact so the caller can decide whether to
/// re-submit.
#[derive(Debug, Clone)]
pub struct ModelInvoker<M> {
    model: M,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl<M: GenerativeModel> ModelInvoker<M> {
    /// Creates an invoker over the given driver.
    pub fn new(model: M) -> Self {
        Self {
            model,
            temperature: None,
            max_tokens: None,
        }
    }

    /// Sets the sampling temperature forwarded with each request.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Sets the output token cap forwarded with each request.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Sends the rendered payload and returns the schema-validated
    /// structured output.
    ///
    /// Attachments travel unmodified, in payload order, after the
    /// instruction text.
    ///
    /// # Errors
    ///
    /// Returns an [`InvocationError`] on transport failure, remote
    /// overload, absent output, unparseable output, or output that
    /// violates `output_schema`.
    #[instrument(skip_all, fields(model = self.model.model_name(), schema = output_schema.name))]
    pub async fn invoke(
        &self,
        payload: &PromptPayload,
        output_schema: &Schema,
    ) -> Result<Value, InvocationError> {
        let mut content = vec![Input::Text(payload.text().clone())];
        for attachment in payload.attachments() {
            content.push(Input::Image(attachment.clone()));
        }

        let request = GenerateRequest {
            messages: vec![Message::new(Role::User, content)],
            model: None,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            response_schema: Some(output_schema.to_descriptor()),
        };

        debug!(
            attachments = payload.attachments().len(),
            prompt_chars = payload.text().len(),
            "Invoking model"
        );

        let response = self.model.generate(&request).await?;
        let value = extract_structured(&response.outputs)?;

        output_schema.validate(&value).map_err(|e| {
            warn!(error = %e, "Model output violates requested schema");
            InvocationError::new(InvocationErrorKind::SchemaValidation(e))
        })?;

        Ok(value)
    }

    /// Reference to the wrapped driver.
    pub fn model(&self) -> &M {
        &self.model
    }
}

/// Pulls the structured value out of the driver outputs.
///
/// Prefers a `Json` output; falls back to parsing the first `Text`
/// output, unwrapping a markdown code fence if present (models often
/// fence JSON even when asked not to).
fn extract_structured(outputs: &[Output]) -> Result<Value, InvocationError> {
    for output in outputs {
        if let Output::Json(value) = output {
            return Ok(value.clone());
        }
    }

    for output in outputs {
        if let Output::Text(text) = output {
            let candidate = strip_code_fence(text);
            if candidate.trim().is_empty() {
                continue;
            }
            return serde_json::from_str(candidate).map_err(|e| {
                InvocationError::new(InvocationErrorKind::InvalidJson(e.to_string()))
            });
        }
    }

    Err(InvocationError::new(InvocationErrorKind::NoOutput))
}

/// Removes a surrounding ```json ... ``` (or bare ```) fence.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.strip_prefix('\n').unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
