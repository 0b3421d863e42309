//! The `history` subcommand: list, delete and clear persisted generations.

use super::HistoryCommand;
use crafter::config::CrafterConfig;
use crafter::{ConfigError, CrafterResult, FileSystemHistory, HistoryStore};
use uuid::Uuid;

pub async fn handle_history_command(command: HistoryCommand) -> CrafterResult<()> {
    let config = CrafterConfig::load()?;
    let store = FileSystemHistory::new(config.history_dir())?;

    match command {
        HistoryCommand::List => {
            let items = store.get_all().await?;
            if items.is_empty() {
                println!("history is empty");
                return Ok(());
            }
            for item in &items {
                println!(
                    "{}  {}  {}",
                    item.id,
                    item.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    item.theme
                );
            }
            println!("{} records", items.len());
        }

        HistoryCommand::Delete { id } => {
            let id = Uuid::parse_str(&id)
                .map_err(|e| ConfigError::new(format!("Invalid history id '{}': {}", id, e)))?;
            store.delete(id).await?;
            println!("deleted {}", id);
        }

        HistoryCommand::Clear => {
            store.clear().await?;
            println!("history cleared");
        }
    }

    Ok(())
}
