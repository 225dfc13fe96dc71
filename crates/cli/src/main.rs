//! BriefClaw CLI — the main entry point.
//!
//! Commands:
//! - `gateway` — Start the HTTP API server
//! - `process` — Process a campaign brief from a JSON file
//! - `status`  — Show effective configuration and agent mode

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "briefclaw",
    about = "BriefClaw — AI marketing campaign agent",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP gateway server
    Gateway {
        /// Override the port
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Process a campaign brief from a JSON file and print the response
    Process {
        /// Path to the brief JSON file
        file: PathBuf,
    },

    /// Show effective configuration and agent mode
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    match cli.command {
        Commands::Gateway { port } => commands::gateway::run(port).await?,
        Commands::Process { file } => commands::process::run(&file).await?,
        Commands::Status => commands::status::run().await?,
    }

    Ok(())
}
