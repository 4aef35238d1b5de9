//! MCP client session against a tool server.

use rmcp::{
    model::{CallToolRequestParams, ClientCapabilities, ClientInfo, Implementation, JsonObject},
    service::{ClientInitializeError, DynService, RoleClient, RunningService, ServiceError},
    transport::IntoTransport,
    ServiceExt,
};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{BridgeError, Result};
use crate::tools::{SchemaNode, ToolDescriptor, ToolResult};

type DynClientService = Box<dyn DynService<RoleClient>>;
pub type McpRunningService = RunningService<RoleClient, DynClientService>;

fn client_info() -> ClientInfo {
    ClientInfo {
        protocol_version: Default::default(),
        capabilities: ClientCapabilities::default(),
        client_info: Implementation {
            name: "shopbridge-client".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// An initialized connection to one MCP server.
pub struct McpSession {
    service: McpRunningService,
}

impl McpSession {
    /// Run the initialize handshake over `transport`.
    pub async fn connect<T, E, A>(transport: T) -> Result<Self>
    where
        T: IntoTransport<RoleClient, E, A>,
        E: std::error::Error + Send + Sync + 'static,
    {
        let service = client_info()
            .into_dyn()
            .serve(transport)
            .await
            .map_err(map_client_initialize_error)?;
        if let Some(peer) = service.peer_info() {
            debug!(server = %peer.server_info.name, version = %peer.server_info.version, "MCP session initialized");
        }
        Ok(Self { service })
    }

    /// Name the server reported during the handshake.
    pub fn server_name(&self) -> Option<String> {
        self.service
            .peer_info()
            .map(|info| info.server_info.name.clone())
    }

    pub async fn list_tools(&self) -> Result<Vec<ToolDescriptor>> {
        let tools = match self.service.list_all_tools().await {
            Ok(tools) => tools,
            Err(ServiceError::UnexpectedResponse) => {
                self.service
                    .list_tools(None)
                    .await
                    .map_err(|e| map_service_error("list_tools", e))?
                    .tools
            }
            Err(e) => return Err(map_service_error("list_tools", e)),
        };
        Ok(tools.into_iter().map(map_tool).collect())
    }

    pub async fn call_tool(&self, name: &str, arguments: Value) -> Result<ToolResult> {
        let arguments = coerce_tool_arguments(arguments)?;
        let result = self
            .service
            .call_tool(CallToolRequestParams {
                meta: None,
                name: name.to_owned().into(),
                arguments,
                task: None,
            })
            .await
            .map_err(|e| map_service_error("call_tool", e))?;

        let raw = serde_json::to_value(&result)?;
        Ok(serde_json::from_value(raw)?)
    }

    /// Cancel the session; for a child-process transport this also ends the
    /// server process.
    pub async fn close(self) -> Result<()> {
        self.service
            .cancel()
            .await
            .map(|_| ())
            .map_err(|e| BridgeError::Connection(format!("failed to close MCP session: {e}")))
    }
}

fn map_tool(tool: rmcp::model::Tool) -> ToolDescriptor {
    let raw = Value::Object((*tool.input_schema).clone());
    let input_schema = SchemaNode::from_json(&raw).unwrap_or_else(|e| {
        warn!(tool = %tool.name, error = %e, "unreadable input schema, treating as empty");
        SchemaNode::empty()
    });
    ToolDescriptor {
        name: tool.name.to_string(),
        description: tool.description.map(|d| d.to_string()).unwrap_or_default(),
        input_schema,
    }
}

fn coerce_tool_arguments(value: Value) -> Result<Option<JsonObject>> {
    match value {
        Value::Null => Ok(None),
        Value::Object(map) => Ok(Some(map)),
        other => Err(BridgeError::InvalidArgument(format!(
            "tool arguments must be a JSON object; got {other}"
        ))),
    }
}

fn map_client_initialize_error(error: ClientInitializeError) -> BridgeError {
    match error {
        ClientInitializeError::ConnectionClosed(context) => {
            BridgeError::Connection(format!("MCP initialize connection closed: {context}"))
        }
        ClientInitializeError::TransportError { error, context } => BridgeError::Connection(
            format!("MCP initialize transport error ({context}): {error}"),
        ),
        ClientInitializeError::JsonRpcError(error) => BridgeError::Protocol(format!(
            "MCP initialize JSON-RPC error {}: {}",
            error.code.0, error.message
        )),
        ClientInitializeError::Cancelled => {
            BridgeError::Connection("MCP initialize cancelled".into())
        }
        other => BridgeError::Connection(format!("MCP initialize error: {other}")),
    }
}

fn map_service_error(context: &str, error: ServiceError) -> BridgeError {
    match error {
        ServiceError::McpError(error) => BridgeError::Protocol(format!(
            "{context}: MCP error {}: {}",
            error.code.0, error.message
        )),
        ServiceError::TransportSend(error) => {
            BridgeError::Connection(format!("{context}: MCP transport send failed: {error}"))
        }
        ServiceError::TransportClosed => {
            BridgeError::Connection(format!("{context}: MCP transport closed"))
        }
        ServiceError::UnexpectedResponse => {
            BridgeError::Protocol(format!("{context}: unexpected MCP response"))
        }
        ServiceError::Cancelled { reason } => {
            let suffix = reason
                .as_deref()
                .map(|r| format!(" ({r})"))
                .unwrap_or_default();
            BridgeError::Connection(format!("{context}: MCP request cancelled{suffix}"))
        }
        ServiceError::Timeout { timeout } => BridgeError::Connection(format!(
            "{context}: MCP request timed out after {}ms",
            timeout.as_millis()
        )),
        other => BridgeError::Protocol(format!("{context}: MCP service error: {other}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn coerce_tool_arguments_accepts_object_and_null() {
        let args = coerce_tool_arguments(json!({ "userId": "1" }))
            .unwrap()
            .unwrap();
        assert_eq!(args.get("userId"), Some(&json!("1")));
        assert!(coerce_tool_arguments(Value::Null).unwrap().is_none());
    }

    #[test]
    fn coerce_tool_arguments_rejects_non_object() {
        let err = coerce_tool_arguments(json!(["bad"])).unwrap_err();
        assert!(matches!(err, BridgeError::InvalidArgument(_)));
    }

    #[test]
    fn map_tool_reads_ordered_properties() {
        let schema = json!({
            "type": "object",
            "properties": {
                "userId": { "type": "string", "description": "who" },
                "quantity": { "type": "number" }
            },
            "required": ["userId"]
        });
        let tool = rmcp::model::Tool::new(
            "create_order",
            "Create a new order for a user",
            schema.as_object().unwrap().clone(),
        );

        let mapped = map_tool(tool);
        assert_eq!(mapped.name, "create_order");
        assert_eq!(mapped.description, "Create a new order for a user");
        let keys: Vec<_> = mapped.input_schema.properties.keys().cloned().collect();
        assert_eq!(keys, ["userId", "quantity"]);
        assert!(mapped.input_schema.is_required("userId"));
    }

    #[test]
    fn transport_failures_are_connection_errors() {
        let err = map_service_error("call_tool", ServiceError::TransportClosed);
        assert!(err.is_connection_error());

        let err = map_service_error(
            "call_tool",
            ServiceError::Timeout {
                timeout: Duration::from_millis(2750),
            },
        );
        assert!(matches!(err, BridgeError::Connection(message) if message.contains("2750ms")));
    }

    #[test]
    fn protocol_violations_are_not_connection_errors() {
        let err = map_service_error("list_tools", ServiceError::UnexpectedResponse);
        assert!(matches!(err, BridgeError::Protocol(message) if message.contains("unexpected")));
    }

    #[test]
    fn initialize_jsonrpc_error_is_a_protocol_error() {
        let err = map_client_initialize_error(ClientInitializeError::JsonRpcError(
            rmcp::model::ErrorData::invalid_request("bad initialize payload", None),
        ));
        assert!(matches!(
            err,
            BridgeError::Protocol(message) if message.contains("bad initialize payload")
        ));
    }
}
