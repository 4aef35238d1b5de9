//! Command-line interface for shopbridge.

pub mod commands;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Shop microservice, its MCP tool server, and an interactive client.
#[derive(Parser, Debug)]
#[command(name = "shopbridge", version, about = "Shop microservice exposed as MCP tools")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the backing REST service
    Service(ServiceArgs),
    /// Serve the tools over MCP on stdin/stdout
    Serve,
    /// Interactive client: pick a server, pick tools, call them
    Client(ServersArgs),
    /// Run the scripted example calls against the first configured server
    Examples(ServersArgs),
}

/// Arguments for `shopbridge service`. Flags override the environment.
#[derive(Args, Debug, Default)]
pub struct ServiceArgs {
    /// Interface to bind (default: MICROSERVICE_HOST or localhost)
    #[arg(long)]
    pub host: Option<String>,

    /// Port to bind (default: MICROSERVICE_PORT or 3000)
    #[arg(long)]
    pub port: Option<u16>,
}

/// Arguments shared by the client commands.
#[derive(Args, Debug, Default)]
pub struct ServersArgs {
    /// Server list TOML file (default: ~/.shopbridge/servers.toml)
    #[arg(long)]
    pub servers: Option<PathBuf>,
}

impl Commands {
    /// Log level used when `RUST_LOG` is unset. The client commands share
    /// the terminal with prompts, so they stay quiet by default.
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Self::Service(_) | Self::Serve => "info",
            Self::Client(_) | Self::Examples(_) => "warn",
        }
    }
}
