//! Error types for the Vidya generation pipeline.
//!
//! Each pipeline stage has its own error domain (schema, template,
//! invocation, flow, config); the `VidyaError` enum aggregates them for
//! callers that cross stage boundaries.

mod config;
mod flow;
mod invocation;
mod schema;
mod template;

pub use config::ConfigError;
pub use flow::{FlowError, FlowErrorKind};
pub use invocation::{InvocationError, InvocationErrorKind, RetryableError};
pub use schema::{SchemaError, SchemaErrorKind};
pub use template::{TemplateError, TemplateErrorKind};

/// Crate-level error variants.
#[derive(Debug, derive_more::From)]
pub enum VidyaErrorKind {
    /// Schema validation error
    Schema(SchemaError),
    /// Template rendering error
    Template(TemplateError),
    /// Model invocation error
    Invocation(InvocationError),
    /// Generation flow error
    Flow(FlowError),
    /// Configuration error
    Config(ConfigError),
}

impl std::fmt::Display for VidyaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VidyaErrorKind::Schema(e) => write!(f, "{}", e),
            VidyaErrorKind::Template(e) => write!(f, "{}", e),
            VidyaErrorKind::Invocation(e) => write!(f, "{}", e),
            VidyaErrorKind::Flow(e) => write!(f, "{}", e),
            VidyaErrorKind::Config(e) => write!(f, "{}", e),
        }
    }
}

/// Vidya error with kind discrimination.
#[derive(Debug)]
pub struct VidyaError(Box<VidyaErrorKind>);

impl VidyaError {
    /// Create a new error from a kind.
    pub fn new(kind: VidyaErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &VidyaErrorKind {
        &self.0
    }
}

impl std::fmt::Display for VidyaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Vidya Error: {}", self.0)
    }
}

impl std::error::Error for VidyaError {}

// Generic From implementation for any type that converts to VidyaErrorKind
impl<T> From<T> for VidyaError
where
    T: Into<VidyaErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for Vidya operations.
pub type VidyaResult<T> = std::result::Result<T, VidyaError>;
