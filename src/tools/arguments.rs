//! Typed access to tool call arguments.

use crate::error::BridgeError;

/// Wrapper around a tool invocation's argument bag providing typed extraction.
#[derive(Debug, Clone, Default)]
pub struct ToolArguments {
    value: serde_json::Map<String, serde_json::Value>,
}

impl ToolArguments {
    fn new(value: serde_json::Map<String, serde_json::Value>) -> Self {
        Self { value }
    }

    /// Build from any JSON value; anything but an object yields an empty bag.
    pub fn from_value(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Object(map) => Self::new(map),
            _ => Self::default(),
        }
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.value.get(key)
    }

    /// Get a string argument by key.
    pub fn get_str(&self, key: &str) -> Result<&str, BridgeError> {
        self.get_str_opt(key)
            .ok_or_else(|| BridgeError::InvalidArgument(format!("Missing string argument: {key}")))
    }

    pub fn get_str_opt(&self, key: &str) -> Option<&str> {
        self.value.get(key).and_then(|v| v.as_str())
    }
}
