//! Generation flow error taxonomy.
//!
//! Every flow exit path maps to exactly one of these four kinds, each
//! carrying a message suitable for direct display to the user. Raw
//! transport or parsing errors never escape a flow.

use crate::RetryableError;

/// The four terminal outcomes of a failed flow invocation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FlowErrorKind {
    /// Caller input failed validation; fixable by correcting the input
    InvalidInput {
        /// Path of the offending field, when known
        field: Option<String>,
        /// User-facing description of the violation
        message: String,
    },
    /// The model service is temporarily unavailable; retry is suggested
    UpstreamUnavailable {
        /// User-facing description
        message: String,
    },
    /// The model returned data that does not match the contract
    MalformedOutput {
        /// User-facing description (details are logged, not surfaced)
        message: String,
    },
    /// Output passed the schema but violated domain rules
    GenerationFailed {
        /// Feature-specific guidance, e.g. "try different criteria"
        message: String,
    },
}

impl std::fmt::Display for FlowErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FlowErrorKind::InvalidInput { field, message } => match field {
                Some(field) => write!(f, "Invalid input for '{}': {}", field, message),
                None => write!(f, "Invalid input: {}", message),
            },
            FlowErrorKind::UpstreamUnavailable { message } => {
                write!(f, "{}", message)
            }
            FlowErrorKind::MalformedOutput { message } => write!(f, "{}", message),
            FlowErrorKind::GenerationFailed { message } => write!(f, "{}", message),
        }
    }
}

/// Flow error with source location tracking.
///
/// # Examples
///
/// ```
/// use vidya_error::{FlowError, FlowErrorKind};
///
/// let err = FlowError::invalid_input(Some("difficulty"), "must be easy, medium, or hard");
/// assert!(matches!(err.kind, FlowErrorKind::InvalidInput { .. }));
/// assert!(format!("{}", err).contains("difficulty"));
/// ```
#[derive(Debug, Clone)]
pub struct FlowError {
    /// The terminal outcome kind
    pub kind: FlowErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl FlowError {
    /// Create a new FlowError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FlowErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Shorthand for an `InvalidInput` error.
    #[track_caller]
    pub fn invalid_input(field: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::InvalidInput {
            field: field.map(str::to_string),
            message: message.into(),
        })
    }

    /// Shorthand for an `UpstreamUnavailable` error.
    #[track_caller]
    pub fn upstream_unavailable(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::UpstreamUnavailable {
            message: message.into(),
        })
    }

    /// Shorthand for a `MalformedOutput` error.
    #[track_caller]
    pub fn malformed_output(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::MalformedOutput {
            message: message.into(),
        })
    }

    /// Shorthand for a `GenerationFailed` error.
    #[track_caller]
    pub fn generation_failed(message: impl Into<String>) -> Self {
        Self::new(FlowErrorKind::GenerationFailed {
            message: message.into(),
        })
    }

    /// The user-facing message carried by this error.
    pub fn user_message(&self) -> String {
        format!("{}", self.kind)
    }
}

impl std::fmt::Display for FlowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Flow Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for FlowError {}

impl RetryableError for FlowError {
    fn is_retryable(&self) -> bool {
        matches!(self.kind, FlowErrorKind::UpstreamUnavailable { .. })
    }
}
