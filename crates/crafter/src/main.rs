//! Crafter CLI binary.
//!
//! This binary provides command-line access to Crafter's functionality:
//! - Generate a batch of avatars from a source image
//! - List, delete and clear the local generation history

use clap::Parser;

mod cli;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    use cli::{Cli, Commands, handle_history_command, run_generate};

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    // Load .env before any client reads its API key.
    dotenvy::dotenv().ok();

    // Execute the requested command
    match cli.command {
        Commands::Generate(args) => {
            run_generate(args).await?;
        }

        Commands::History(history_cmd) => {
            handle_history_command(history_cmd).await?;
        }
    }

    Ok(())
}
