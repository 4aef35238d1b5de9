//! Error types for shopbridge.

use thiserror::Error;

/// Primary error type for bridge, client, and configuration operations.
///
/// Tool invocations never surface this type to a caller: the bridge folds
/// every failure into a [`ToolResult`](crate::tools::ToolResult) envelope.
/// It is reserved for faults that sit outside that envelope (loading
/// configuration, establishing a channel, protocol-level failures).
#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("HTTP {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid server list: {0}")]
    ServerList(#[from] toml::de::Error),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Protocol error: {0}")]
    Protocol(String),

    #[error("Unsupported operation: {0}")]
    UnsupportedOperation(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),
}

impl BridgeError {
    /// Create an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Whether this error was raised while establishing or using a channel.
    ///
    /// The interactive client routes these to its server-level recovery prompt.
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            Self::Connection(_) | Self::Io(_) | Self::UnsupportedOperation(_)
        )
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, BridgeError>;
