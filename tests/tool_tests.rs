//! Tests for the tool registry, schemas, and argument handling.

use serde_json::json;
use shopbridge::tools::schema::SchemaBuilder;
use shopbridge::tools::validation::validate_arguments;
use shopbridge::tools::*;

fn descriptor(name: &str) -> ToolDescriptor {
    ToolKind::lookup(name)
        .map(ToolKind::descriptor)
        .unwrap_or_else(|| panic!("{name} should be registered"))
}

#[test]
fn schema_builder_constructs_schema() {
    let schema = SchemaBuilder::object()
        .string("userId", "Who", true)
        .number("limit", "Max results", false)
        .boolean("verbose", "Enable verbose output", false)
        .build();

    let raw = serde_json::Value::Object(schema.to_json_object());
    assert_eq!(raw["type"], "object");
    assert_eq!(raw["properties"]["userId"]["type"], "string");
    assert_eq!(raw["properties"]["limit"]["type"], "number");
    assert_eq!(raw["required"], json!(["userId"]));
}

#[test]
fn empty_schema_omits_required() {
    let raw = serde_json::Value::Object(SchemaBuilder::object().build().to_json_object());
    assert_eq!(raw, json!({ "type": "object", "properties": {} }));
}

#[test]
fn registry_lists_four_tools_in_order() {
    let names: Vec<_> = list_tools().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(
        names,
        ["get_user", "list_products", "create_order", "check_health"]
    );
}

#[test]
fn registry_is_the_same_on_every_call() {
    assert_eq!(list_tools(), list_tools());
    assert!(std::ptr::eq(list_tools(), list_tools()));
}

#[test]
fn create_order_requires_all_three_fields() {
    let tool = descriptor("create_order");
    assert_eq!(tool.description, "Create a new order for a user");
    assert_eq!(tool.input_schema.required, ["userId", "productId", "quantity"]);
    assert_eq!(
        tool.input_schema.properties["productId"].kind,
        PropertyType::Number
    );
}

#[test]
fn list_products_has_only_optional_filters() {
    let tool = descriptor("list_products");
    assert!(tool.input_schema.required.is_empty());
    let keys: Vec<_> = tool.input_schema.properties.keys().map(String::as_str).collect();
    assert_eq!(keys, ["category", "minPrice", "maxPrice", "inStock"]);
}

#[test]
fn lookup_rejects_unknown_names() {
    assert_eq!(ToolKind::lookup("check_health"), Some(ToolKind::CheckHealth));
    assert_eq!(ToolKind::lookup("delete_user"), None);
    assert_eq!(ToolKind::lookup("Get_User"), None);
    assert_eq!(ToolKind::lookup(""), None);
}

#[test]
fn validation_accepts_absent_arguments_for_optional_schemas() {
    let tool = descriptor("check_health");
    assert!(validate_arguments(&serde_json::Value::Null, &tool.input_schema).is_ok());
    assert!(validate_arguments(&json!({ "extra": 1 }), &tool.input_schema).is_ok());
}

#[test]
fn validation_reports_first_violation() {
    let schema = &descriptor("create_order").input_schema;

    let err = validate_arguments(&json!({ "userId": "1", "productId": 2 }), schema).unwrap_err();
    assert_eq!(err, "missing required field 'quantity'");

    let err = validate_arguments(
        &json!({ "userId": 1, "productId": 2, "quantity": 1 }),
        schema,
    )
    .unwrap_err();
    assert_eq!(err, "field 'userId' expected type 'string', got number");

    let err = validate_arguments(&json!("1"), schema).unwrap_err();
    assert_eq!(err, "expected object arguments, got string");
}

#[test]
fn integer_properties_reject_fractions() {
    let schema = SchemaBuilder::object()
        .property("page", PropertyType::Integer, "Page", true)
        .build();
    assert!(validate_arguments(&json!({ "page": 2 }), &schema).is_ok());
    assert!(validate_arguments(&json!({ "page": 2.5 }), &schema).is_err());
}

#[test]
fn tool_arguments_typed_access() {
    let args = ToolArguments::from_value(json!({
        "userId": "1",
        "minPrice": 50,
        "inStock": true
    }));
    assert_eq!(args.get_str("userId").unwrap(), "1");
    assert_eq!(args.get("minPrice"), Some(&json!(50)));
    assert_eq!(args.get("inStock"), Some(&json!(true)));
    assert!(args.get_str("category").is_err());
    assert_eq!(args.get_str_opt("category"), None);
}

#[test]
fn tool_arguments_from_non_object_is_empty() {
    let args = ToolArguments::from_value(json!([1, 2]));
    assert!(args.get("0").is_none());
    assert!(args.get_str_opt("userId").is_none());
}

#[test]
fn tool_result_text_joins_items() {
    let result: ToolResult = serde_json::from_value(json!({
        "content": [
            { "type": "text", "text": "one" },
            { "type": "resource", "resource": { "uri": "file:///x" } },
            { "type": "text", "text": "two" }
        ],
        "isError": true
    }))
    .unwrap();

    assert!(result.is_error);
    assert_eq!(result.text(), "one\ntwo");
    assert_eq!(result.content.len(), 3);
}
