//! Tool bridge: turns a tool invocation into an HTTP call against the
//! backing service and folds every outcome into a [`ToolResult`].

mod handlers;

use reqwest::Url;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::BridgeConfig;
use crate::error::{BridgeError, Result};
use crate::tools::validation::validate_arguments;
use crate::tools::{list_tools, ToolArguments, ToolDescriptor, ToolKind, ToolResult};

/// Dispatches tool calls to the backing service.
///
/// Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ToolBridge {
    http: reqwest::Client,
    base_url: Url,
}

impl ToolBridge {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(http: reqwest::Client, base_url: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            BridgeError::Configuration(format!("invalid service URL '{base_url}': {e}"))
        })?;
        if base_url.cannot_be_a_base() {
            return Err(BridgeError::Configuration(format!(
                "service URL '{base_url}' cannot carry a path"
            )));
        }
        Ok(Self { http, base_url })
    }

    pub fn from_config(config: &BridgeConfig) -> Result<Self> {
        Self::new(&config.service_base_url())
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The advertised tools, in registry order.
    pub fn tools(&self) -> &'static [ToolDescriptor] {
        list_tools()
    }

    /// Run one tool call. Never fails: unknown names, bad arguments,
    /// upstream errors, and transport errors all come back as
    /// `is_error` results.
    pub async fn handle_invocation(&self, name: &str, arguments: Value) -> ToolResult {
        let Some(kind) = ToolKind::lookup(name) else {
            warn!(tool = name, "unknown tool requested");
            return ToolResult::error(format!("Error: Unknown tool: {name}"));
        };

        debug!(tool = name, arguments = %arguments, "tool invoked");

        if let Err(violation) = validate_arguments(&arguments, &kind.input_schema()) {
            warn!(tool = name, %violation, "rejected tool arguments");
            return ToolResult::error(format!("Error: Invalid arguments for {name}: {violation}"));
        }

        let args = ToolArguments::from_value(arguments);
        match self.dispatch(kind, &args).await {
            Ok(text) => {
                debug!(tool = name, "tool completed");
                ToolResult::success(text)
            }
            Err(err) => {
                let message = failure_message(kind, err);
                warn!(tool = name, %message, "tool failed");
                ToolResult::error(format!("Error: {message}"))
            }
        }
    }

    async fn dispatch(&self, kind: ToolKind, args: &ToolArguments) -> Result<String> {
        match kind {
            ToolKind::GetUser => self.get_user(args).await,
            ToolKind::ListProducts => self.list_products(args).await,
            ToolKind::CreateOrder => self.create_order(args).await,
            ToolKind::CheckHealth => self.check_health().await,
        }
    }
}

/// Upstream errors keep their own message; anything else is reported as a
/// failed operation.
fn failure_message(kind: ToolKind, err: BridgeError) -> String {
    let cause = match err {
        BridgeError::Api { message, .. } => return message,
        BridgeError::Network(e) => e.to_string(),
        BridgeError::Serialization(e) => e.to_string(),
        other => other.to_string(),
    };
    format!("Failed to {}: {cause}", kind.operation())
}
