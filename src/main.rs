// src/main.rs

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve {
            config,
            manifest,
            packages,
        }) => commands::cmd_resolve(config, manifest, packages).await,
        Some(Commands::Status {
            config,
            manifest,
            packages,
        }) => commands::cmd_status(config, manifest, packages).await,
        Some(Commands::Watch {
            config,
            manifest,
            packages,
            interval,
        }) => commands::cmd_watch(config, manifest, packages, interval).await,
        Some(Commands::Completions { shell }) => commands::cmd_completions(shell),
        None => {
            // No command provided, show help
            println!("gitdeps v{}", env!("CARGO_PKG_VERSION"));
            println!("Run 'gitdeps --help' for usage information");
            Ok(())
        }
    }
}
