//! Value validation against a schema.

use crate::{FieldType, Schema};
use serde_json::Value;
use vidya_error::{SchemaError, SchemaErrorKind};

impl Schema {
    /// Validates a JSON value against this schema.
    ///
    /// The value must be an object; each declared field is checked for
    /// presence (when required), type, and constraints. Undeclared fields
    /// are ignored. The first violation found is returned, with the full
    /// path of the offending field.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] naming the field path and the constraint
    /// violated.
    pub fn validate(&self, value: &Value) -> Result<(), SchemaError> {
        self.validate_at(value, "")
    }

    pub(crate) fn validate_at(&self, value: &Value, prefix: &str) -> Result<(), SchemaError> {
        let object = match value.as_object() {
            Some(object) => object,
            None => {
                return Err(SchemaError::new(SchemaErrorKind::TypeMismatch {
                    path: path_or_root(prefix),
                    expected: "object",
                    found: type_name(value),
                }));
            }
        };

        for field in &self.fields {
            let path = join_path(prefix, field.name);
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        return Err(SchemaError::new(SchemaErrorKind::MissingField(path)));
                    }
                }
                Some(value) => validate_type(&field.ty, value, &path)?,
            }
        }

        Ok(())
    }
}

fn validate_type(ty: &FieldType, value: &Value, path: &str) -> Result<(), SchemaError> {
    match ty {
        FieldType::String { non_empty } => {
            let text = value.as_str().ok_or_else(|| {
                SchemaError::new(SchemaErrorKind::TypeMismatch {
                    path: path.to_string(),
                    expected: "string",
                    found: type_name(value),
                })
            })?;
            if *non_empty && text.trim().is_empty() {
                return Err(SchemaError::new(SchemaErrorKind::EmptyValue(
                    path.to_string(),
                )));
            }
            Ok(())
        }
        FieldType::Integer { min, max } => {
            let number = value.as_i64().ok_or_else(|| {
                SchemaError::new(SchemaErrorKind::TypeMismatch {
                    path: path.to_string(),
                    expected: "integer",
                    found: type_name(value),
                })
            })?;
            if let Some(min) = min {
                if number < *min {
                    return Err(SchemaError::new(SchemaErrorKind::IntegerRange {
                        path: path.to_string(),
                        expected: format!("at least {}", min),
                        found: number,
                    }));
                }
            }
            if let Some(max) = max {
                if number > *max {
                    return Err(SchemaError::new(SchemaErrorKind::IntegerRange {
                        path: path.to_string(),
                        expected: format!("at most {}", max),
                        found: number,
                    }));
                }
            }
            Ok(())
        }
        FieldType::Number => {
            if value.as_f64().is_none() {
                return Err(SchemaError::new(SchemaErrorKind::TypeMismatch {
                    path: path.to_string(),
                    expected: "number",
                    found: type_name(value),
                }));
            }
            Ok(())
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                return Err(SchemaError::new(SchemaErrorKind::TypeMismatch {
                    path: path.to_string(),
                    expected: "boolean",
                    found: type_name(value),
                }));
            }
            Ok(())
        }
        FieldType::Enumeration(allowed) => {
            let text = value.as_str().ok_or_else(|| {
                SchemaError::new(SchemaErrorKind::TypeMismatch {
                    path: path.to_string(),
                    expected: "string",
                    found: type_name(value),
                })
            })?;
            if !allowed.contains(&text) {
                return Err(SchemaError::new(SchemaErrorKind::EnumViolation {
                    path: path.to_string(),
                    allowed: allowed.iter().map(|s| s.to_string()).collect(),
                    found: text.to_string(),
                }));
            }
            Ok(())
        }
        FieldType::Array {
            item,
            min_len,
            max_len,
            exact_len,
        } => {
            let items = value.as_array().ok_or_else(|| {
                SchemaError::new(SchemaErrorKind::TypeMismatch {
                    path: path.to_string(),
                    expected: "array",
                    found: type_name(value),
                })
            })?;
            if let Some(exact) = exact_len {
                if items.len() != *exact {
                    return Err(SchemaError::new(SchemaErrorKind::ArrayLength {
                        path: path.to_string(),
                        expected: format!("exactly {}", exact),
                        found: items.len(),
                    }));
                }
            } else {
                if let Some(min) = min_len {
                    if items.len() < *min {
                        return Err(SchemaError::new(SchemaErrorKind::ArrayLength {
                            path: path.to_string(),
                            expected: format!("at least {}", min),
                            found: items.len(),
                        }));
                    }
                }
                if let Some(max) = max_len {
                    if items.len() > *max {
                        return Err(SchemaError::new(SchemaErrorKind::ArrayLength {
                            path: path.to_string(),
                            expected: format!("at most {}", max),
                            found: items.len(),
                        }));
                    }
                }
            }
            for (index, element) in items.iter().enumerate() {
                let element_path = format!("{}[{}]", path, index);
                validate_type(item, element, &element_path)?;
            }
            Ok(())
        }
        FieldType::Object(schema) => schema.validate_at(value, path),
    }
}

fn join_path(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}.{}", prefix, name)
    }
}

fn path_or_root(prefix: &str) -> String {
    if prefix.is_empty() {
        "$".to_string()
    } else {
        prefix.to_string()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
