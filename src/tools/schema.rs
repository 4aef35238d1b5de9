//! Builder for tool input schemas.

use indexmap::IndexMap;

use super::types::{PropertySchema, PropertyType, SchemaNode};

/// Builder for constructing one-level object schemas.
///
/// ```
/// use shopbridge::tools::schema::SchemaBuilder;
///
/// let schema = SchemaBuilder::object()
///     .string("userId", "The unique identifier of the user", true)
///     .build();
/// assert!(schema.is_required("userId"));
/// ```
pub struct SchemaBuilder {
    properties: IndexMap<String, PropertySchema>,
    required: Vec<String>,
}

impl SchemaBuilder {
    pub fn object() -> Self {
        Self {
            properties: IndexMap::new(),
            required: Vec::new(),
        }
    }

    pub fn property(
        mut self,
        name: impl Into<String>,
        kind: PropertyType,
        description: impl Into<String>,
        required: bool,
    ) -> Self {
        let name = name.into();
        self.properties.insert(
            name.clone(),
            PropertySchema {
                kind,
                description: Some(description.into()),
            },
        );
        if required {
            self.required.push(name);
        }
        self
    }

    /// Add a string property.
    pub fn string(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.property(name, PropertyType::String, description, required)
    }

    /// Add a number property.
    pub fn number(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.property(name, PropertyType::Number, description, required)
    }

    /// Add a boolean property.
    pub fn boolean(self, name: impl Into<String>, description: impl Into<String>, required: bool) -> Self {
        self.property(name, PropertyType::Boolean, description, required)
    }

    pub fn build(self) -> SchemaNode {
        SchemaNode {
            kind: "object".to_string(),
            properties: self.properties,
            required: self.required,
        }
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::object()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builds_wire_schema_with_required_list() {
        let schema = SchemaBuilder::object()
            .string("userId", "The ID of the user placing the order", true)
            .number("productId", "The ID of the product to order", true)
            .boolean("gift", "Wrap as a gift", false)
            .build();

        assert_eq!(
            serde_json::Value::Object(schema.to_json_object()),
            json!({
                "type": "object",
                "properties": {
                    "userId": { "type": "string", "description": "The ID of the user placing the order" },
                    "productId": { "type": "number", "description": "The ID of the product to order" },
                    "gift": { "type": "boolean", "description": "Wrap as a gift" }
                },
                "required": ["userId", "productId"]
            })
        );
    }

    #[test]
    fn empty_schema_omits_required() {
        let wire = SchemaBuilder::object().build().to_json_object();
        assert_eq!(wire.get("type"), Some(&json!("object")));
        assert_eq!(wire.get("properties"), Some(&json!({})));
        assert!(wire.get("required").is_none());
    }
}
