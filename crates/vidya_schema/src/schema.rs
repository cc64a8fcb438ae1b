//! Schema, field, and field-type definitions.

/// The type of a single schema field, including its value constraints.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldType {
    /// A string value.
    String {
        /// Reject empty or whitespace-only values
        non_empty: bool,
    },
    /// An integer value with optional inclusive bounds.
    Integer {
        /// Minimum allowed value
        min: Option<i64>,
        /// Maximum allowed value
        max: Option<i64>,
    },
    /// A floating-point value.
    Number,
    /// A boolean value.
    Boolean,
    /// A string restricted to a closed set of variants.
    Enumeration(&'static [&'static str]),
    /// An array with optional length constraints.
    Array {
        /// Type of each element
        item: Box<FieldType>,
        /// Minimum length (inclusive)
        min_len: Option<usize>,
        /// Maximum length (inclusive)
        max_len: Option<usize>,
        /// Exact required length; overrides min/max when set
        exact_len: Option<usize>,
    },
    /// A nested record described by its own schema.
    Object(Schema),
}

impl FieldType {
    /// A string that may be empty.
    pub fn string() -> Self {
        FieldType::String { non_empty: false }
    }

    /// A string that must contain at least one non-whitespace character.
    pub fn non_empty_string() -> Self {
        FieldType::String { non_empty: true }
    }

    /// An integer with inclusive bounds.
    pub fn integer(min: Option<i64>, max: Option<i64>) -> Self {
        FieldType::Integer { min, max }
    }

    /// A positive integer (>= 1).
    pub fn positive_integer() -> Self {
        FieldType::Integer {
            min: Some(1),
            max: None,
        }
    }

    /// An array of the given element type with no length bounds.
    pub fn array(item: FieldType) -> Self {
        FieldType::Array {
            item: Box::new(item),
            min_len: None,
            max_len: None,
            exact_len: None,
        }
    }

    /// An array that must contain at least one element.
    pub fn non_empty_array(item: FieldType) -> Self {
        FieldType::Array {
            item: Box::new(item),
            min_len: Some(1),
            max_len: None,
            exact_len: None,
        }
    }

    /// An array with an exact required length.
    pub fn fixed_array(item: FieldType, len: usize) -> Self {
        FieldType::Array {
            item: Box::new(item),
            min_len: None,
            max_len: None,
            exact_len: Some(len),
        }
    }

    /// An array with inclusive length bounds.
    pub fn bounded_array(item: FieldType, min_len: usize, max_len: usize) -> Self {
        FieldType::Array {
            item: Box::new(item),
            min_len: Some(min_len),
            max_len: Some(max_len),
            exact_len: None,
        }
    }
}

/// A single named field in a schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// Field name as it appears in the JSON record
    pub name: &'static str,
    /// Value type and constraints
    pub ty: FieldType,
    /// Whether the field must be present
    pub required: bool,
    /// Human-readable description forwarded to the model in the
    /// output-schema descriptor
    pub description: Option<&'static str>,
}

impl Field {
    /// A required field.
    pub fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: true,
            description: None,
        }
    }

    /// An optional field; absent or null values are skipped.
    pub fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            ty,
            required: false,
            description: None,
        }
    }

    /// Attach a description used in the output-schema descriptor.
    pub fn describe(mut self, description: &'static str) -> Self {
        self.description = Some(description);
        self
    }
}

/// A closed, typed description of a record's fields.
///
/// Fields not declared in the schema are ignored during validation:
/// models may decorate their output with extra keys, and callers may
/// carry presentation-only fields the pipeline does not care about.
///
/// # Examples
///
/// ```
/// use vidya_schema::{Field, FieldType, Schema};
///
/// let schema = Schema::new(
///     "note_request",
///     vec![
///         Field::required("subject", FieldType::non_empty_string()),
///         Field::required("difficulty", FieldType::Enumeration(&["easy", "medium", "hard"])),
///         Field::optional("remarks", FieldType::string()),
///     ],
/// );
///
/// let value = serde_json::json!({ "subject": "Science", "difficulty": "medium" });
/// assert!(schema.validate(&value).is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Schema {
    /// Schema name, used in tracing output
    pub name: &'static str,
    /// Declared fields
    pub fields: Vec<Field>,
}

impl Schema {
    /// Creates a schema from its field list.
    pub fn new(name: &'static str, fields: Vec<Field>) -> Self {
        Self { name, fields }
    }
}
