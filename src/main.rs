//! shopbridge binary entry point.

use clap::Parser;
use shopbridge::cli::{commands, Cli, Commands};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.command.default_log_level());

    let result = match cli.command {
        Commands::Service(args) => commands::handle_service(args).await,
        Commands::Serve => commands::handle_serve().await,
        Commands::Client(args) => commands::handle_client(args).await,
        Commands::Examples(args) => commands::handle_examples(args).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Logs go to stderr; stdout belongs to the MCP protocol or the client UI.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
