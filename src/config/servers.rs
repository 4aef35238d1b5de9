//! The list of MCP servers the interactive client can connect to.
//!
//! Loaded from TOML:
//!
//! ```toml
//! [[servers]]
//! name = "Local Microservice MCP Server"
//! description = "Runs on the local machine (default)"
//! type = "local"
//! command = "/usr/local/bin/shopbridge"
//! args = ["serve"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::{BridgeError, Result};

/// How the client reaches a server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ServerKind {
    /// Spawn a child process and speak MCP over its stdio.
    #[default]
    Local,
    /// Network transport; configurable but not connectable.
    Remote,
}

/// One selectable server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "type", default)]
    pub kind: ServerKind,
    /// Executable for local servers. `None` launches the running binary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ServerEntry {
    /// The built-in entry: this binary's own `serve` subcommand.
    pub fn local_default() -> Self {
        Self {
            name: "Local Microservice MCP Server".into(),
            description: "Runs on the local machine (default)".into(),
            kind: ServerKind::Local,
            command: None,
            args: vec!["serve".into()],
            url: None,
        }
    }

    /// Executable to spawn for a local entry.
    pub fn resolve_command(&self) -> Result<PathBuf> {
        match &self.command {
            Some(command) => Ok(PathBuf::from(command)),
            None => Ok(std::env::current_exe()?),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ServerListFile {
    #[serde(default)]
    servers: Vec<ServerEntry>,
}

/// Ordered, non-empty list of configured servers.
#[derive(Debug, Clone, PartialEq)]
pub struct ServerList {
    entries: Vec<ServerEntry>,
}

impl Default for ServerList {
    fn default() -> Self {
        Self {
            entries: vec![ServerEntry::local_default()],
        }
    }
}

impl ServerList {
    pub fn new(entries: Vec<ServerEntry>) -> Result<Self> {
        if entries.is_empty() {
            return Err(BridgeError::Configuration(
                "server list must contain at least one server".into(),
            ));
        }
        Ok(Self { entries })
    }

    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let file: ServerListFile = toml::from_str(raw)?;
        Self::new(file.servers)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path).map_err(|e| {
            BridgeError::Configuration(format!("cannot read server list {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&raw)
    }

    /// Resolve the server list: an explicit path wins, then
    /// `~/.shopbridge/servers.toml`, then the built-in local entry.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        let default_path = default_servers_path();
        if default_path.is_file() {
            tracing::debug!(path = %default_path.display(), "loading server list");
            return Self::load(&default_path);
        }
        Ok(Self::default())
    }

    pub fn entries(&self) -> &[ServerEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&ServerEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn default_servers_path() -> PathBuf {
    directories::UserDirs::new()
        .map(|dirs| dirs.home_dir().join(".shopbridge"))
        .unwrap_or_else(|| PathBuf::from(".shopbridge"))
        .join("servers.toml")
}
