//! Unified entry point for the Vidya generation pipeline.
//!
//! Re-exports the member crates so applications can depend on `vidya`
//! alone:
//!
//! - [`error`] - error taxonomy shared by every layer
//! - [`core`] - messages, media attachments, and wire-level records
//! - [`schema`] - declarative data contracts and validation
//! - [`template`] - deterministic prompt templates
//! - [`models`] - the model invocation adapter and the Gemini driver
//! - [`flows`] - the flow engine and the per-feature flows

pub use vidya_core as core;
pub use vidya_error as error;
pub use vidya_flows as flows;
pub use vidya_models as models;
pub use vidya_schema as schema;
pub use vidya_template as template;

pub use vidya_error::{FlowError, FlowErrorKind, VidyaError, VidyaResult};
pub use vidya_flows::{Feature, GenerationFlow};
pub use vidya_models::{GenerativeModel, ModelConfig, ModelInvoker, gemini::GeminiClient};
