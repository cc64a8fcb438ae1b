//! Schema validation error types.

/// Specific constraint violations found while validating a value
/// against a schema.
///
/// Every variant carries the path of the offending field in dotted/indexed
/// form, e.g. `questions[2].answer`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SchemaErrorKind {
    /// Value has a different JSON type than the schema declares
    TypeMismatch {
        /// Field path
        path: String,
        /// Expected type name
        expected: &'static str,
        /// Actual type name found
        found: &'static str,
    },
    /// A required field is absent
    MissingField(String),
    /// A string field declared non-empty is empty or whitespace
    EmptyValue(String),
    /// Value is outside the closed set of allowed variants
    EnumViolation {
        /// Field path
        path: String,
        /// Allowed variants
        allowed: Vec<String>,
        /// Value found
        found: String,
    },
    /// Array length outside the declared bounds
    ArrayLength {
        /// Field path
        path: String,
        /// Human-readable bound description, e.g. "exactly 4" or "at least 1"
        expected: String,
        /// Actual length found
        found: usize,
    },
    /// Integer outside the declared bounds
    IntegerRange {
        /// Field path
        path: String,
        /// Human-readable bound description
        expected: String,
        /// Value found
        found: i64,
    },
}

impl std::fmt::Display for SchemaErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SchemaErrorKind::TypeMismatch {
                path,
                expected,
                found,
            } => write!(f, "Field '{}' expected {} but found {}", path, expected, found),
            SchemaErrorKind::MissingField(path) => {
                write!(f, "Required field '{}' is missing", path)
            }
            SchemaErrorKind::EmptyValue(path) => {
                write!(f, "Field '{}' must not be empty", path)
            }
            SchemaErrorKind::EnumViolation {
                path,
                allowed,
                found,
            } => write!(
                f,
                "Field '{}' must be one of [{}], found '{}'",
                path,
                allowed.join(", "),
                found
            ),
            SchemaErrorKind::ArrayLength {
                path,
                expected,
                found,
            } => write!(
                f,
                "Field '{}' expected {} items, found {}",
                path, expected, found
            ),
            SchemaErrorKind::IntegerRange {
                path,
                expected,
                found,
            } => write!(
                f,
                "Field '{}' expected {}, found {}",
                path, expected, found
            ),
        }
    }
}

/// Schema validation error with source location tracking.
///
/// # Examples
///
/// ```
/// use vidya_error::{SchemaError, SchemaErrorKind};
///
/// let err = SchemaError::new(SchemaErrorKind::MissingField("subject".to_string()));
/// assert!(format!("{}", err).contains("subject"));
/// ```
#[derive(Debug, Clone)]
pub struct SchemaError {
    /// The constraint that was violated
    pub kind: SchemaErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl SchemaError {
    /// Create a new SchemaError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: SchemaErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Path of the field that failed validation.
    pub fn path(&self) -> &str {
        match &self.kind {
            SchemaErrorKind::TypeMismatch { path, .. } => path,
            SchemaErrorKind::MissingField(path) => path,
            SchemaErrorKind::EmptyValue(path) => path,
            SchemaErrorKind::EnumViolation { path, .. } => path,
            SchemaErrorKind::ArrayLength { path, .. } => path,
            SchemaErrorKind::IntegerRange { path, .. } => path,
        }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Schema Error: {} at line {} in {}",
            self.kind, self.line, self.file
        )
    }
}

impl std::error::Error for SchemaError {}
