//! Configuration (layered: code > env > `.env` file > defaults).

pub mod servers;

pub use servers::{ServerEntry, ServerKind, ServerList};

use bon::Builder;

use crate::error::{BridgeError, Result};

pub const DEFAULT_SERVICE_HOST: &str = "localhost";
pub const DEFAULT_SERVICE_PORT: u16 = 3000;
pub const DEFAULT_SERVER_NAME: &str = "microservice-mcp";

/// Settings shared by the backing service and the tool bridge.
#[derive(Debug, Clone, Builder)]
pub struct BridgeConfig {
    #[builder(default = DEFAULT_SERVICE_HOST.to_string(), into)]
    pub service_host: String,
    #[builder(default = DEFAULT_SERVICE_PORT)]
    pub service_port: u16,
    /// Shared secret guarding the admin endpoints. Unset means every admin
    /// request is refused.
    #[builder(into)]
    pub api_key: Option<String>,
    #[builder(default = DEFAULT_SERVER_NAME.to_string(), into)]
    pub server_name: String,
    #[builder(default = env!("CARGO_PKG_VERSION").to_string(), into)]
    pub server_version: String,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl BridgeConfig {
    /// Load from environment variables, reading `.env` first when present.
    ///
    /// Recognized: `MICROSERVICE_HOST`, `MICROSERVICE_PORT`, `API_KEY`,
    /// `MCP_SERVER_NAME`, `MCP_SERVER_VERSION`.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let service_port = match non_empty("MICROSERVICE_PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| {
                BridgeError::Configuration(format!("MICROSERVICE_PORT '{raw}' is not a valid port: {e}"))
            })?,
            None => DEFAULT_SERVICE_PORT,
        };

        Ok(Self::builder()
            .service_host(non_empty("MICROSERVICE_HOST").unwrap_or_else(|| DEFAULT_SERVICE_HOST.into()))
            .service_port(service_port)
            .maybe_api_key(non_empty("API_KEY"))
            .server_name(non_empty("MCP_SERVER_NAME").unwrap_or_else(|| DEFAULT_SERVER_NAME.into()))
            .server_version(
                non_empty("MCP_SERVER_VERSION").unwrap_or_else(|| env!("CARGO_PKG_VERSION").into()),
            )
            .build())
    }

    /// Base URL the bridge uses to reach the backing service.
    pub fn service_base_url(&self) -> String {
        format!("http://{}:{}", self.service_host, self.service_port)
    }
}
