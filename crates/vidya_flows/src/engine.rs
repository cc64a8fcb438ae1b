//! The generic generation-flow engine.

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use tracing::{debug, error, instrument, warn};
use vidya_error::{FlowError, InvocationErrorKind};
use vidya_models::{GenerativeModel, ModelInvoker};
use vidya_schema::Schema;
use vidya_template::Template;

/// Message shown when the remote service is temporarily unavailable.
pub(crate) const UPSTREAM_UNAVAILABLE_MESSAGE: &str =
    "The assistant is temporarily unavailable. Please try again in a moment.";

/// Message shown when the model returned data outside its contract.
pub(crate) const MALFORMED_OUTPUT_MESSAGE: &str =
    "The assistant returned an unexpected response. Please try again.";

/// Message shown when prompt preparation fails on validated input.
const INTERNAL_FAILURE_MESSAGE: &str =
    "Something went wrong while preparing your request. Please try again.";

/// One feature's contribution to the pipeline: schemas, template, and
/// domain rules. The engine owns everything else.
pub trait Feature {
    /// Typed request record.
    type Input: Serialize + Send + Sync;
    /// Typed response record.
    type Output: DeserializeOwned + Send;

    /// Feature name used in tracing output.
    const NAME: &'static str;

    /// Schema the caller's input must satisfy.
    fn input_schema() -> Schema;

    /// Schema the model's output must satisfy.
    ///
    /// Receives the input so features can shape the output contract per
    /// request (e.g. hint-only mode requests a schema with no solution
    /// fields at all).
    fn output_schema(input: &Self::Input) -> Schema;

    /// The feature's fixed prompt template.
    fn template() -> &'static Template;

    /// Cross-field input rules the schema cannot express.
    ///
    /// Runs after schema validation and before any model call.
    fn check_input(_input: &Self::Input) -> Result<(), FlowError> {
        Ok(())
    }

    /// Domain rules on the model's output beyond schema conformance.
    ///
    /// May pass the output through, substitute a fallback value, or
    /// reject with `GenerationFailed`.
    fn post_validate(input: &Self::Input, output: Self::Output)
    -> Result<Self::Output, FlowError>;
}

/// Orchestrates one feature end to end over a model driver.
///
/// Stateless between invocations; concurrent runs are independent.
///
/// # Examples
///
/// ```rust,ignore
/// let flow = GenerationFlow::<QuestionPaper, _>::new(GeminiClient::new(config));
/// let paper = flow.run(input).await?;
/// ```
pub struct GenerationFlow<F, M> {
    invoker: ModelInvoker<M>,
    _feature: PhantomData<F>,
}

impl<F: Feature, M: GenerativeModel> GenerationFlow<F, M> {
    /// Creates a flow over the given model driver.
    pub fn new(model: M) -> Self {
        Self {
            invoker: ModelInvoker::new(model),
            _feature: PhantomData,
        }
    }

    /// Creates a flow over a pre-configured invoker.
    pub fn with_invoker(invoker: ModelInvoker<M>) -> Self {
        Self {
            invoker,
            _feature: PhantomData,
        }
    }

    /// Runs the flow: validate, render, invoke, post-validate, return.
    ///
    /// # Errors
    ///
    /// Every failure maps to one of the four [`FlowErrorKind`] outcomes:
    /// `InvalidInput` before any model call, `UpstreamUnavailable` for
    /// transient remote failures, `MalformedOutput` for contract
    /// violations, and `GenerationFailed` for domain-rule violations.
    ///
    /// [`FlowErrorKind`]: vidya_error::FlowErrorKind
    #[instrument(skip_all, fields(feature = F::NAME))]
    pub async fn run(&self, input: F::Input) -> Result<F::Output, FlowError> {
        // Step 1: validate input. The model must never be invoked for
        // input that fails here.
        let input_value = serde_json::to_value(&input).map_err(|e| {
            error!(error = %e, "Input serialization failed");
            FlowError::invalid_input(None, "The request could not be processed.")
        })?;
        F::input_schema().validate(&input_value).map_err(|e| {
            debug!(field = e.path(), "Input rejected by schema");
            FlowError::invalid_input(Some(e.path()), e.kind.to_string())
        })?;
        F::check_input(&input)?;

        // Step 2: render the prompt. Failure here is a template/schema
        // mismatch, not bad user input.
        let payload = F::template().render(&input_value).map_err(|e| {
            error!(error = %e, "Template rendering failed on validated input");
            FlowError::generation_failed(INTERNAL_FAILURE_MESSAGE)
        })?;

        // Step 3: invoke the model. No retry; classification only.
        let output_schema = F::output_schema(&input);
        let output_value = self
            .invoker
            .invoke(&payload, &output_schema)
            .await
            .map_err(|e| {
                warn!(error = %e, "Model invocation failed");
                match &e.kind {
                    InvocationErrorKind::Transport(_)
                    | InvocationErrorKind::Overloaded { .. } => {
                        FlowError::upstream_unavailable(UPSTREAM_UNAVAILABLE_MESSAGE)
                    }
                    _ => FlowError::malformed_output(MALFORMED_OUTPUT_MESSAGE),
                }
            })?;

        // Step 4: deserialize into the typed output.
        let output: F::Output = serde_json::from_value(output_value).map_err(|e| {
            warn!(error = %e, "Schema-conformant output failed typed deserialization");
            FlowError::malformed_output(MALFORMED_OUTPUT_MESSAGE)
        })?;

        // Step 5: domain post-validation and fallback policy.
        F::post_validate(&input, output)
    }

    /// Reference to the underlying invoker.
    pub fn invoker(&self) -> &ModelInvoker<M> {
        &self.invoker
    }
}
