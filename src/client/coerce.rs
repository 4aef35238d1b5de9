//! Turning typed-in text into argument values.

use serde_json::{Number, Value};

use crate::tools::PropertyType;

/// Convert one answer according to the property's declared type.
///
/// Only an empty answer yields `None`, leaving the key out entirely.
/// Numbers parse as integers when the text is integral and as floats
/// otherwise; text that is not a number becomes `null`. Booleans are `true`
/// only for the exact answer `true`.
pub fn coerce_input(kind: PropertyType, raw: &str) -> Option<Value> {
    if raw.is_empty() {
        return None;
    }
    let value = match kind {
        PropertyType::Number | PropertyType::Integer => parse_number(raw.trim()),
        PropertyType::Boolean => Value::Bool(raw == "true"),
        _ => Value::String(raw.to_string()),
    };
    Some(value)
}

fn parse_number(text: &str) -> Value {
    if let Ok(int) = text.parse::<i64>() {
        return Value::from(int);
    }
    text.parse::<f64>()
        .ok()
        .and_then(Number::from_f64)
        .map(Value::Number)
        .unwrap_or(Value::Null)
}
