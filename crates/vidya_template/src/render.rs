//! Template rendering over a JSON input value.

use crate::{Segment, Template};
use serde_json::Value;
use vidya_core::{Attachment, PromptPayload};
use vidya_error::{TemplateError, TemplateErrorKind};

impl Template {
    /// Renders this template over the given input value.
    ///
    /// The input is expected to have passed schema validation already;
    /// rendering failures indicate a template/schema mismatch, not bad
    /// user input.
    ///
    /// # Errors
    ///
    /// Returns a [`TemplateError`] when a placeholder path is missing,
    /// resolves to a non-scalar, an `Each` path is not an array, or a
    /// `Media` path does not hold attachments.
    pub fn render(&self, input: &Value) -> Result<PromptPayload, TemplateError> {
        let mut text = String::new();
        let mut attachments = Vec::new();
        render_segments(self.segments(), input, &mut text, &mut attachments)?;
        Ok(PromptPayload::new(text, attachments))
    }
}

fn render_segments(
    segments: &[Segment],
    scope: &Value,
    text: &mut String,
    attachments: &mut Vec<Attachment>,
) -> Result<(), TemplateError> {
    for segment in segments {
        match segment {
            Segment::Literal(literal) => text.push_str(literal),
            Segment::Placeholder { path } => {
                let value = resolve(scope, path).ok_or_else(|| {
                    TemplateError::new(TemplateErrorKind::MissingPath(path.clone()))
                })?;
                text.push_str(&scalar_text(value, path)?);
            }
            Segment::Conditional { path, body } => {
                if resolve(scope, path).map(is_truthy).unwrap_or(false) {
                    render_segments(body, scope, text, attachments)?;
                }
            }
            Segment::Each {
                path,
                body,
                separator,
            } => {
                let value = resolve(scope, path).ok_or_else(|| {
                    TemplateError::new(TemplateErrorKind::MissingPath(path.clone()))
                })?;
                let items = value.as_array().ok_or_else(|| {
                    TemplateError::new(TemplateErrorKind::NotArray(path.clone()))
                })?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        if let Some(separator) = separator {
                            text.push_str(separator);
                        }
                    }
                    render_segments(body, item, text, attachments)?;
                }
            }
            Segment::Media { path } => match resolve(scope, path) {
                None | Some(Value::Null) => {}
                Some(value) => collect_attachments(value, path, attachments)?,
            },
        }
    }
    Ok(())
}

/// Resolves a dotted path within the current scope.
///
/// `"."` refers to the scope value itself (the current `Each` element).
fn resolve<'a>(scope: &'a Value, path: &str) -> Option<&'a Value> {
    if path == "." {
        return Some(scope);
    }
    let mut current = scope;
    for part in path.split('.') {
        current = current.get(part)?;
    }
    Some(current)
}

fn scalar_text(value: &Value, path: &str) -> Result<String, TemplateError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        Value::Number(number) => Ok(number.to_string()),
        Value::Bool(flag) => Ok(flag.to_string()),
        _ => Err(TemplateError::new(TemplateErrorKind::NotScalar(
            path.to_string(),
        ))),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map(|n| n != 0.0).unwrap_or(false),
        Value::String(text) => !text.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(_) => true,
    }
}

fn collect_attachments(
    value: &Value,
    path: &str,
    attachments: &mut Vec<Attachment>,
) -> Result<(), TemplateError> {
    match value {
        Value::Array(items) => {
            for item in items {
                let attachment: Attachment =
                    serde_json::from_value(item.clone()).map_err(|_| {
                        TemplateError::new(TemplateErrorKind::NotAttachment(path.to_string()))
                    })?;
                attachments.push(attachment);
            }
            Ok(())
        }
        Value::Object(_) => {
            let attachment: Attachment = serde_json::from_value(value.clone()).map_err(|_| {
                TemplateError::new(TemplateErrorKind::NotAttachment(path.to_string()))
            })?;
            attachments.push(attachment);
            Ok(())
        }
        _ => Err(TemplateError::new(TemplateErrorKind::NotAttachment(
            path.to_string(),
        ))),
    }
}
