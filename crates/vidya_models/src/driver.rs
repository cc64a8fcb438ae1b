//! Driver trait for generative model backends.

use async_trait::async_trait;
use vidya_core::{GenerateRequest, GenerateResponse};
use vidya_error::InvocationError;

/// A generative model backend.
///
/// Implemented by provider clients (Gemini) and by test stubs. A driver
/// performs exactly one remote call per `generate` invocation; retry
/// policy belongs to the caller.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Sends a generation request and returns the raw response.
    ///
    /// # Errors
    ///
    /// Returns an [`InvocationError`] classified as transport, overload
    /// (transient), or permanent API failure.
    async fn generate(&self, req: &GenerateRequest) -> Result<GenerateResponse, InvocationError>;

    /// Identifier of the model served by this driver, for logging.
    fn model_name(&self) -> &str;
}
