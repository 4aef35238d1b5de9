//! Session output formatting.

use std::io::{self, Write};

use serde_json::Value;

use crate::config::ServerList;
use crate::error::BridgeError;
use crate::tools::{ToolDescriptor, ToolResult};

const HEAVY_RULE: usize = 60;

fn heavy_rule() -> String {
    "=".repeat(HEAVY_RULE)
}

fn light_rule() -> String {
    "-".repeat(HEAVY_RULE)
}

pub fn banner(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{}", heavy_rule())?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}\n", heavy_rule())
}

pub fn server_menu(out: &mut dyn Write, servers: &ServerList) -> io::Result<()> {
    writeln!(out, "Available MCP Servers:")?;
    for (index, server) in servers.entries().iter().enumerate() {
        writeln!(out, "  [{}] {} - {}", index + 1, server.name, server.description)?;
    }
    Ok(())
}

pub fn tool_menu(out: &mut dyn Write, tools: &[ToolDescriptor]) -> io::Result<()> {
    writeln!(out, "📚 Available Tools:")?;
    writeln!(out, "{}", heavy_rule())?;
    for (index, tool) in tools.iter().enumerate() {
        writeln!(out, "  [{}] {} - {}", index + 1, tool.name, tool.description)?;
    }
    writeln!(out, "{}\n", heavy_rule())
}

/// Header printed before a call goes out.
pub fn call_header(
    out: &mut dyn Write,
    name: &str,
    description: &str,
    arguments: &Value,
) -> io::Result<()> {
    writeln!(out, "🔧 Calling Tool")?;
    writeln!(out, "{}", light_rule())?;
    writeln!(out, "Tool: {name}")?;
    if !description.is_empty() {
        writeln!(out, "Description: {description}")?;
    }
    let pretty = serde_json::to_string_pretty(arguments).unwrap_or_else(|_| arguments.to_string());
    writeln!(out, "Arguments: {pretty}")?;
    writeln!(out, "{}", light_rule())
}

/// Print a call outcome: every text item verbatim, or the failure.
pub fn call_outcome(
    out: &mut dyn Write,
    outcome: &Result<ToolResult, BridgeError>,
) -> io::Result<()> {
    match outcome {
        Ok(result) => {
            writeln!(out, "✅ Response:")?;
            for text in result.texts() {
                writeln!(out, "{text}")?;
            }
        }
        Err(err) => writeln!(out, "❌ Error: {err}")?,
    }
    writeln!(out, "\n{}\n", heavy_rule())
}
