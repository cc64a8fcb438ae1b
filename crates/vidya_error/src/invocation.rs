//! Model invocation error types and transient/permanent classification.

use crate::SchemaError;

/// Specific error conditions for model invocation.
#[derive(Debug, Clone)]
pub enum InvocationErrorKind {
    /// HTTP transport failed before a response was received
    Transport(String),
    /// Remote service is overloaded or temporarily unavailable
    Overloaded {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },
    /// Permanent API error (bad request, auth failure, etc.)
    Api {
        /// HTTP status code
        status: u16,
        /// Error message from the provider
        message: String,
    },
    /// The model produced no output at all
    NoOutput,
    /// The model output could not be parsed as JSON
    InvalidJson(String),
    /// The model output parsed but violated the requested schema
    SchemaValidation(SchemaError),
    /// URL media sources are not supported by the provider wrapper
    UrlMediaNotSupported,
}

impl std::fmt::Display for InvocationErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvocationErrorKind::Transport(msg) => {
                write!(f, "HTTP request failed: {}", msg)
            }
            InvocationErrorKind::Overloaded { status, message } => {
                write!(f, "Model service overloaded (HTTP {}): {}", status, message)
            }
            InvocationErrorKind::Api { status, message } => {
                write!(f, "Model API error (HTTP {}): {}", status, message)
            }
            InvocationErrorKind::NoOutput => write!(f, "Model produced no output"),
            InvocationErrorKind::InvalidJson(msg) => {
                write!(f, "Model output is not valid JSON: {}", msg)
            }
            InvocationErrorKind::SchemaValidation(err) => {
                write!(f, "Model output violates the requested schema: {}", err.kind)
            }
            InvocationErrorKind::UrlMediaNotSupported => {
                write!(f, "URL media sources are not supported; inline the content")
            }
        }
    }
}

/// Model invocation error with source location tracking.
///
/// # Examples
///
/// ```
/// use vidya_error::{InvocationError, InvocationErrorKind, RetryableError};
///
/// let err = InvocationError::new(InvocationErrorKind::Overloaded {
///     status: 503,
///     message: "Service unavailable".to_string(),
/// });
/// assert!(err.is_retryable());
/// ```
#[derive(Debug, Clone)]
pub struct InvocationError {
    /// The specific error condition
    pub kind: InvocationErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl InvocationError {
    /// Create a new InvocationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: InvocationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for InvocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invocation Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for InvocationError {}

/// Trait for errors that can be classified as transient.
///
/// The pipeline performs no automatic retries; this classification exists
/// so callers can decide whether re-submitting the same request is sensible.
pub trait RetryableError {
    /// Returns true if re-submitting the request may succeed.
    ///
    /// Transient conditions like 503 (service unavailable) or 429 (rate
    /// limit) return true. Permanent conditions like 400 (bad request) or
    /// a schema violation return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for InvocationErrorKind {
    fn is_retryable(&self) -> bool {
        match self {
            InvocationErrorKind::Transport(_) => true,
            InvocationErrorKind::Overloaded { .. } => true,
            _ => false,
        }
    }
}

impl RetryableError for InvocationError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}
