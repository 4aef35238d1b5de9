//! shopbridge: a small shop microservice exposed as MCP tools.
//!
//! Three pieces share this crate:
//!
//! - [`service`]: an in-memory users/products/orders REST API.
//! - [`bridge`] and [`mcp`]: an MCP server whose tools are HTTP calls
//!   against that API, every outcome folded into a [`tools::ToolResult`].
//! - [`client`]: an interactive command-line client that discovers tools,
//!   prompts for their arguments, and renders results.
//!
//! # Quick Start
//!
//! ```no_run
//! use shopbridge::bridge::ToolBridge;
//! use serde_json::json;
//!
//! # async fn example() -> shopbridge::error::Result<()> {
//! let bridge = ToolBridge::new("http://localhost:3000")?;
//! let result = bridge.handle_invocation("get_user", json!({ "userId": "1" })).await;
//! println!("{}", result.text());
//! # Ok(())
//! # }
//! ```

pub mod bridge;
pub mod client;
pub mod config;
pub mod error;
pub mod service;
pub mod tools;

#[cfg(feature = "mcp")]
pub mod mcp;

#[cfg(feature = "cli")]
pub mod cli;
