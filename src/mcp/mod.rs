//! Model Context Protocol surface: the tool server and the client session.

pub mod client;
pub mod server;
pub mod transport;

pub use client::McpSession;
pub use server::BridgeServer;
pub use transport::{connect_entry, connect_stdio, StdioConnector};
