//! Command-line interface definitions and handlers.

mod generate;
mod history;

pub use generate::run_generate;
pub use history::handle_history_command;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Batch avatar generation with a durable local history.
#[derive(Debug, Parser)]
#[command(name = "crafter", version, about)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a batch of avatars from a source image
    Generate(GenerateArgs),

    /// Inspect or prune the local generation history
    #[command(subcommand)]
    History(HistoryCommand),
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Path to the source image (png, jpeg, webp or gif)
    #[arg(long)]
    pub image: PathBuf,

    /// Rendering style (e.g. matte-clay, pixel-art)
    #[arg(long, default_value = "matte-clay")]
    pub style: String,

    /// Accessory (e.g. sunglasses, crown, none)
    #[arg(long, default_value = "sunglasses")]
    pub accessory: String,

    /// Clothing (e.g. hoodie, kimono, none)
    #[arg(long, default_value = "hoodie")]
    pub clothing: String,

    /// Scene background (e.g. pastel-rainbow, space-nebula)
    #[arg(long, default_value = "pastel-rainbow")]
    pub background: String,

    /// Transformation intensity, 0-100
    #[arg(long, default_value_t = 75)]
    pub intensity: u8,

    /// Creative theme for the series
    #[arg(long)]
    pub theme: Option<String>,

    /// Let the model invent accessory and clothing details
    #[arg(long)]
    pub random: bool,

    /// Let the model invent the creative theme
    #[arg(long)]
    pub random_theme: bool,

    /// Number of pieces to generate, 1-9
    #[arg(long, default_value_t = 1)]
    pub quantity: usize,

    /// Directory the generated images are written to
    #[arg(long, default_value = ".")]
    pub out: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum HistoryCommand {
    /// List persisted generations, newest first
    List,

    /// Delete one record by id
    Delete {
        /// Record identifier as printed by `history list`
        id: String,
    },

    /// Delete every record
    Clear,
}
