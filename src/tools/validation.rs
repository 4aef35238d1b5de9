//! Validate tool call arguments against a declared schema before dispatch.

use super::types::{PropertyType, SchemaNode};

/// Validate tool arguments against a one-level object schema.
///
/// Checks the argument bag is an object (or absent), that every required
/// field is present, and that each declared field has its declared type.
/// Returns `Err(message)` describing the first violation found.
pub fn validate_arguments(args: &serde_json::Value, schema: &SchemaNode) -> Result<(), String> {
    let empty = serde_json::Map::new();
    let obj = match args {
        serde_json::Value::Object(obj) => obj,
        serde_json::Value::Null => &empty,
        other => {
            return Err(format!(
                "expected object arguments, got {}",
                json_type_name(other)
            ))
        }
    };

    for name in &schema.required {
        if !obj.contains_key(name) {
            return Err(format!("missing required field '{name}'"));
        }
    }

    for (key, value) in obj {
        if let Some(prop) = schema.properties.get(key) {
            if !value_matches_type(value, prop.kind) {
                return Err(format!(
                    "field '{}' expected type '{}', got {}",
                    key,
                    prop.kind,
                    json_type_name(value)
                ));
            }
        }
    }

    Ok(())
}

fn value_matches_type(value: &serde_json::Value, expected: PropertyType) -> bool {
    match expected {
        PropertyType::String => value.is_string(),
        PropertyType::Number => value.is_number(),
        PropertyType::Integer => value.is_i64() || value.is_u64(),
        PropertyType::Boolean => value.is_boolean(),
        PropertyType::Object => value.is_object(),
        PropertyType::Array => value.is_array(),
        PropertyType::Unknown => true,
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}
