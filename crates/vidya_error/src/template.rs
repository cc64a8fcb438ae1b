//! Template rendering error types.
//!
//! Rendering a template over input that already passed schema validation
//! should never fail; these errors indicate a template/schema mismatch
//! introduced at development time.

/// Specific error conditions for template rendering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TemplateErrorKind {
    /// Placeholder path not present in the input value
    MissingPath(String),
    /// Placeholder resolved to a non-scalar value
    NotScalar(String),
    /// Each directive resolved to a non-array value
    NotArray(String),
    /// Media directive resolved to something other than attachments
    NotAttachment(String),
}

impl std::fmt::Display for TemplateErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TemplateErrorKind::MissingPath(path) => {
                write!(f, "Template placeholder '{}' not found in input", path)
            }
            TemplateErrorKind::NotScalar(path) => write!(
                f,
                "Template placeholder '{}' resolved to a non-scalar value",
                path
            ),
            TemplateErrorKind::NotArray(path) => {
                write!(f, "Template iteration over '{}' requires an array", path)
            }
            TemplateErrorKind::NotAttachment(path) => write!(
                f,
                "Template media directive '{}' did not resolve to attachments",
                path
            ),
        }
    }
}

/// Template rendering error with source location tracking.
#[derive(Debug, Clone)]
pub struct TemplateError {
    /// The specific error condition
    pub kind: TemplateErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl TemplateError {
    /// Create a new TemplateError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: TemplateErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}

impl std::fmt::Display for TemplateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Template Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for TemplateError {}
