//! Connecting to configured servers over a child process's stdio.

use std::path::Path;

use async_trait::async_trait;
use rmcp::transport::TokioChildProcess;
use serde_json::Value;
use tokio::process::Command;
use tracing::info;

use super::client::McpSession;
use crate::client::{Connector, ToolSession};
use crate::config::{ServerEntry, ServerKind};
use crate::error::{BridgeError, Result};
use crate::tools::{ToolDescriptor, ToolResult};

/// Spawn `command args...` and initialize an MCP session over its stdio.
pub async fn connect_stdio(command: &Path, args: &[String]) -> Result<McpSession> {
    let mut child = Command::new(command);
    child.args(args);
    let transport = TokioChildProcess::new(child).map_err(|e| {
        BridgeError::Connection(format!("failed to spawn {}: {e}", command.display()))
    })?;
    McpSession::connect(transport).await
}

/// Open a session for a configured entry. Only local entries can connect.
pub async fn connect_entry(entry: &ServerEntry) -> Result<McpSession> {
    match entry.kind {
        ServerKind::Local => {
            let command = entry.resolve_command()?;
            info!(server = %entry.name, command = %command.display(), "spawning local MCP server");
            connect_stdio(&command, &entry.args).await
        }
        ServerKind::Remote => Err(BridgeError::UnsupportedOperation(
            "Only local transport is supported".into(),
        )),
    }
}

/// [`Connector`] that launches local servers as child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdioConnector;

#[async_trait]
impl Connector for StdioConnector {
    async fn connect(&self, entry: &ServerEntry) -> Result<Box<dyn ToolSession>> {
        let session = connect_entry(entry).await?;
        Ok(Box::new(session))
    }
}

#[async_trait]
impl ToolSession for McpSession {
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>> {
        McpSession::list_tools(self).await
    }

    async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<ToolResult> {
        McpSession::call_tool(self, name, arguments).await
    }

    async fn close(self: Box<Self>) -> Result<()> {
        McpSession::close(*self).await
    }
}
