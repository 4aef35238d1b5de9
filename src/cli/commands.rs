//! Handlers for each CLI command.

use std::error::Error;
use std::io;

use crate::client::{Connector, ExampleRunner, InteractiveClient, StdinPrompter};
use crate::config::{BridgeConfig, ServerList};
use crate::error::BridgeError;
use crate::mcp::{BridgeServer, StdioConnector};

use super::{ServersArgs, ServiceArgs};

/// Handle `shopbridge service`.
pub async fn handle_service(args: ServiceArgs) -> Result<(), Box<dyn Error>> {
    let mut config = BridgeConfig::from_env()?;
    if let Some(host) = args.host {
        config.service_host = host;
    }
    if let Some(port) = args.port {
        config.service_port = port;
    }
    crate::service::run(&config).await?;
    Ok(())
}

/// Handle `shopbridge serve`.
pub async fn handle_serve() -> Result<(), Box<dyn Error>> {
    let config = BridgeConfig::from_env()?;
    BridgeServer::from_config(&config)?.serve_stdio().await?;
    Ok(())
}

/// Handle `shopbridge client`.
pub async fn handle_client(args: ServersArgs) -> Result<(), Box<dyn Error>> {
    let servers = ServerList::discover(args.servers.as_deref())?;
    let mut prompter = StdinPrompter::new();
    let mut stdout = io::stdout();
    InteractiveClient::new(&servers, &StdioConnector, &mut prompter, &mut stdout)
        .run()
        .await?;
    Ok(())
}

/// Handle `shopbridge examples`.
pub async fn handle_examples(args: ServersArgs) -> Result<(), Box<dyn Error>> {
    let servers = ServerList::discover(args.servers.as_deref())?;
    let entry = servers
        .get(0)
        .ok_or_else(|| BridgeError::Configuration("no servers configured".into()))?;

    let mut stdout = io::stdout();
    let mut session = StdioConnector.connect(entry).await?;
    println!("✅ Connected to MCP server: {}\n", entry.name);

    let outcome = ExampleRunner::default().run(session.as_mut(), &mut stdout).await;
    let closed = session.close().await;
    println!("👋 Disconnected from MCP server");

    let failures = outcome?;
    closed?;
    let total = crate::client::example_calls().len();
    println!("Completed {total} example calls ({failures} returned errors).");
    Ok(())
}
