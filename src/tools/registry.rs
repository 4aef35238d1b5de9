//! The fixed tool registry.
//!
//! Tools are data: [`ToolKind`] is the single table mapping a wire name to
//! its description, input schema, and bridge handler. Adding a tool means
//! adding a variant here and a match arm in the bridge.

use std::sync::OnceLock;

use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use super::schema::SchemaBuilder;
use super::types::{SchemaNode, ToolDescriptor};

static REGISTRY: OnceLock<Vec<ToolDescriptor>> = OnceLock::new();

/// Every tool the bridge can dispatch, in declaration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
pub enum ToolKind {
    GetUser,
    ListProducts,
    CreateOrder,
    CheckHealth,
}

impl ToolKind {
    /// Wire name, e.g. `get_user`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// Resolve a wire name; `None` for anything not in the registry.
    pub fn lookup(name: &str) -> Option<Self> {
        name.parse().ok()
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::GetUser => "Retrieve user information by user ID",
            Self::ListProducts => {
                "List products with optional filtering by category, price range, and stock availability"
            }
            Self::CreateOrder => "Create a new order for a user",
            Self::CheckHealth => "Check the health status of the microservice",
        }
    }

    /// Human phrase used in `Failed to <operation>` messages.
    pub fn operation(self) -> &'static str {
        match self {
            Self::GetUser => "get user",
            Self::ListProducts => "list products",
            Self::CreateOrder => "create order",
            Self::CheckHealth => "check health",
        }
    }

    pub fn input_schema(self) -> SchemaNode {
        match self {
            Self::GetUser => SchemaBuilder::object()
                .string("userId", "The unique identifier of the user", true)
                .build(),
            Self::ListProducts => SchemaBuilder::object()
                .string(
                    "category",
                    "Filter by product category (e.g., electronics, furniture, accessories)",
                    false,
                )
                .number("minPrice", "Minimum price filter", false)
                .number("maxPrice", "Maximum price filter", false)
                .boolean("inStock", "Filter to show only products in stock", false)
                .build(),
            Self::CreateOrder => SchemaBuilder::object()
                .string("userId", "The ID of the user placing the order", true)
                .number("productId", "The ID of the product to order", true)
                .number("quantity", "The quantity to order", true)
                .build(),
            Self::CheckHealth => SchemaBuilder::object().build(),
        }
    }

    pub fn descriptor(self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// The ordered tool list, built once per process.
pub fn list_tools() -> &'static [ToolDescriptor] {
    REGISTRY.get_or_init(|| ToolKind::iter().map(ToolKind::descriptor).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::types::PropertyType;
    use pretty_assertions::assert_eq;

    #[test]
    fn registry_order_is_declaration_order() {
        let names: Vec<_> = list_tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec!["get_user", "list_products", "create_order", "check_health"]
        );
    }

    #[test]
    fn list_tools_is_idempotent() {
        let first = list_tools().to_vec();
        let second = list_tools().to_vec();
        assert_eq!(first, second);
        assert!(std::ptr::eq(list_tools(), list_tools()));
    }

    #[test]
    fn lookup_round_trips_names() {
        for kind in ToolKind::iter() {
            assert_eq!(ToolKind::lookup(kind.name()), Some(kind));
        }
        assert_eq!(ToolKind::lookup("delete_user"), None);
        assert_eq!(ToolKind::lookup("GetUser"), None);
    }

    #[test]
    fn create_order_requires_all_three_fields() {
        let schema = ToolKind::CreateOrder.input_schema();
        assert_eq!(schema.required, vec!["userId", "productId", "quantity"]);
        assert_eq!(schema.properties["productId"].kind, PropertyType::Number);
    }

    #[test]
    fn list_products_filters_are_optional() {
        let schema = ToolKind::ListProducts.input_schema();
        assert!(schema.required.is_empty());
        let keys: Vec<_> = schema.properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["category", "minPrice", "maxPrice", "inStock"]);
    }

    #[test]
    fn check_health_takes_no_arguments() {
        let tool = ToolKind::CheckHealth.descriptor();
        assert!(tool.input_schema.properties.is_empty());
        assert_eq!(list_tools()[3], tool);
    }
}
