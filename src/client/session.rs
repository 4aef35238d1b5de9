//! Seams between the interactive client and a tool server.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::ServerEntry;
use crate::error::Result;
use crate::tools::{ToolDescriptor, ToolResult};

/// An open connection to one tool server.
#[async_trait]
pub trait ToolSession: Send {
    async fn list_tools(&mut self) -> Result<Vec<ToolDescriptor>>;

    /// Invoke a tool. Tool-level failures arrive as `Ok` results with
    /// `is_error` set; `Err` means the call itself could not complete.
    async fn call_tool(&mut self, name: &str, arguments: Value) -> Result<ToolResult>;

    async fn close(self: Box<Self>) -> Result<()>;
}

/// Opens sessions for configured server entries.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, entry: &ServerEntry) -> Result<Box<dyn ToolSession>>;
}
