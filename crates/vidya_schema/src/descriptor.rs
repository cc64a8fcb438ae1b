//! Conversion of schemas into the JSON descriptor sent to the model.

use crate::{FieldType, Schema};
use serde_json::{Map, Value, json};

impl Schema {
    /// Produces the JSON-Schema-shaped descriptor of this record.
    ///
    /// The descriptor is attached to the generation request so providers
    /// with constrained decoding return output in the requested shape.
    pub fn to_descriptor(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();

        for field in &self.fields {
            let mut descriptor = type_descriptor(&field.ty);
            if let Some(description) = field.description {
                if let Some(object) = descriptor.as_object_mut() {
                    object.insert("description".to_string(), json!(description));
                }
            }
            properties.insert(field.name.to_string(), descriptor);
            if field.required {
                required.push(json!(field.name));
            }
        }

        json!({
            "type": "object",
            "properties": Value::Object(properties),
            "required": Value::Array(required),
        })
    }
}

fn type_descriptor(ty: &FieldType) -> Value {
    match ty {
        FieldType::String { .. } => json!({ "type": "string" }),
        FieldType::Integer { min, max } => {
            let mut descriptor = Map::new();
            descriptor.insert("type".to_string(), json!("integer"));
            if let Some(min) = min {
                descriptor.insert("minimum".to_string(), json!(min));
            }
            if let Some(max) = max {
                descriptor.insert("maximum".to_string(), json!(max));
            }
            Value::Object(descriptor)
        }
        FieldType::Number => json!({ "type": "number" }),
        FieldType::Boolean => json!({ "type": "boolean" }),
        FieldType::Enumeration(allowed) => json!({
            "type": "string",
            "enum": allowed.iter().map(|s| json!(s)).collect::<Vec<_>>(),
        }),
        FieldType::Array {
            item,
            min_len,
            max_len,
            exact_len,
        } => {
            let mut descriptor = Map::new();
            descriptor.insert("type".to_string(), json!("array"));
            descriptor.insert("items".to_string(), type_descriptor(item));
            match exact_len {
                Some(exact) => {
                    descriptor.insert("minItems".to_string(), json!(exact));
                    descriptor.insert("maxItems".to_string(), json!(exact));
                }
                None => {
                    if let Some(min) = min_len {
                        descriptor.insert("minItems".to_string(), json!(min));
                    }
                    if let Some(max) = max_len {
                        descriptor.insert("maxItems".to_string(), json!(max));
                    }
                }
            }
            Value::Object(descriptor)
        }
        FieldType::Object(schema) => schema.to_descriptor(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{Field, FieldType, Schema};
    use serde_json::json;

    #[test]
    fn descriptor_carries_required_and_enum() {
        let schema = Schema::new(
            "request",
            vec![
                Field::required(
                    "difficulty",
                    FieldType::Enumeration(&["easy", "medium", "hard"]),
                )
                .describe("Overall difficulty of the paper"),
                Field::optional("remarks", FieldType::string()),
            ],
        );

        let descriptor = schema.to_descriptor();
        assert_eq!(descriptor["type"], "object");
        assert_eq!(descriptor["required"], json!(["difficulty"]));
        assert_eq!(
            descriptor["properties"]["difficulty"]["enum"],
            json!(["easy", "medium", "hard"])
        );
        assert_eq!(
            descriptor["properties"]["difficulty"]["description"],
            json!("Overall difficulty of the paper")
        );
    }

    #[test]
    fn descriptor_exact_array_length_becomes_min_and_max() {
        let schema = Schema::new(
            "question",
            vec![Field::required(
                "options",
                FieldType::fixed_array(FieldType::string(), 4),
            )],
        );

        let descriptor = schema.to_descriptor();
        assert_eq!(descriptor["properties"]["options"]["minItems"], json!(4));
        assert_eq!(descriptor["properties"]["options"]["maxItems"], json!(4));
    }

    #[test]
    fn descriptor_is_deterministic() {
        let schema = Schema::new(
            "request",
            vec![
                Field::required("subject", FieldType::non_empty_string()),
                Field::required("count", FieldType::positive_integer()),
            ],
        );
        let first = serde_json::to_string(&schema.to_descriptor()).unwrap();
        let second = serde_json::to_string(&schema.to_descriptor()).unwrap();
        assert_eq!(first, second);
    }
}
