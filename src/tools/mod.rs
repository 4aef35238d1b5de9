//! Tool registry, schemas, and the result envelope shared by bridge and client.

pub mod arguments;
pub mod registry;
pub mod schema;
pub mod types;
pub mod validation;

pub use arguments::ToolArguments;
pub use registry::{list_tools, ToolKind};
pub use types::{PropertySchema, PropertyType, SchemaNode, ToolContent, ToolDescriptor, ToolResult};
