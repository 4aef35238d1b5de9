//! MCP server exposing the tool bridge.

use std::future::Future;

use rmcp::{
    model::{
        CallToolRequestParams, CallToolResult, Content, Implementation, ListToolsResult,
        PaginatedRequestParams, ServerCapabilities, ServerInfo, Tool,
    },
    service::RequestContext,
    ErrorData, RoleServer, ServerHandler, ServiceExt,
};
use serde_json::Value;
use tracing::{debug, info};

use crate::bridge::ToolBridge;
use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::tools::{ToolDescriptor, ToolResult};

/// Serves the fixed tool registry and forwards calls to a [`ToolBridge`].
#[derive(Debug, Clone)]
pub struct BridgeServer {
    bridge: ToolBridge,
    name: String,
    version: String,
}

impl BridgeServer {
    pub fn new(bridge: ToolBridge, name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            bridge,
            name: name.into(),
            version: version.into(),
        }
    }

    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        Ok(Self::new(
            ToolBridge::from_config(config)?,
            config.server_name.clone(),
            config.server_version.clone(),
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Serve over this process's stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<()> {
        info!(
            name = %self.name,
            service = %self.bridge.base_url(),
            "MCP server running on stdio"
        );
        let service = ServiceExt::<RoleServer>::serve(self, rmcp::transport::stdio())
            .await
            .map_err(|e| BridgeError::Connection(format!("failed to start stdio server: {e}")))?;
        service
            .waiting()
            .await
            .map_err(|e| BridgeError::Protocol(format!("stdio server error: {e}")))?;
        Ok(())
    }
}

impl ServerHandler for BridgeServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: self.name.clone(),
                version: self.version.clone(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<ListToolsResult, ErrorData>> + Send + '_ {
        async move {
            Ok(ListToolsResult {
                tools: self.bridge.tools().iter().map(to_rmcp_tool).collect(),
                next_cursor: None,
                meta: None,
            })
        }
    }

    fn call_tool(
        &self,
        request: CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = std::result::Result<CallToolResult, ErrorData>> + Send + '_ {
        async move {
            let arguments = request.arguments.map(Value::Object).unwrap_or(Value::Null);
            debug!(tool = %request.name, "MCP tool call");
            let result = self.bridge.handle_invocation(&request.name, arguments).await;
            Ok(to_call_result(result))
        }
    }
}

pub(crate) fn to_rmcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.clone(),
        descriptor.description.clone(),
        descriptor.input_schema.to_json_object(),
    )
}

pub(crate) fn to_call_result(result: ToolResult) -> CallToolResult {
    let content = result
        .texts()
        .map(|text| Content::text(text.to_string()))
        .collect();
    if result.is_error {
        CallToolResult::error(content)
    } else {
        CallToolResult::success(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::list_tools;

    #[test]
    fn tool_conversion_keeps_schema_order() {
        let list_products = list_tools()
            .iter()
            .find(|t| t.name == "list_products")
            .unwrap();
        let tool = to_rmcp_tool(list_products);

        assert_eq!(tool.name, "list_products");
        let keys: Vec<_> = tool.input_schema["properties"]
            .as_object()
            .unwrap()
            .keys()
            .cloned()
            .collect();
        assert_eq!(keys, ["category", "minPrice", "maxPrice", "inStock"]);
    }

    #[test]
    fn error_results_set_the_flag() {
        let converted = to_call_result(ToolResult::error("Error: Unknown tool: nope"));
        assert_eq!(converted.is_error, Some(true));
        assert_eq!(
            converted.content[0].as_text().map(|t| t.text.as_str()),
            Some("Error: Unknown tool: nope")
        );

        let converted = to_call_result(ToolResult::success("{}"));
        assert_eq!(converted.is_error, Some(false));
    }

    #[test]
    fn server_info_uses_configured_identity() {
        let config = BridgeConfig::builder()
            .server_name("shop")
            .server_version("9.9.9")
            .build();
        let server = BridgeServer::from_config(&config).unwrap();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "shop");
        assert_eq!(info.server_info.version, "9.9.9");
        assert!(info.capabilities.tools.is_some());
    }
}
