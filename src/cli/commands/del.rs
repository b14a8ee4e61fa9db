use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::del::DeleteLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, all, yes } = cmd {
        //
        // Confirmation prompt
        //
        let prompt = match id {
            Some(id) => format!(
                "Delete dose #{} and its reminder? This action is irreversible.",
                id
            ),
            None => "Delete ALL doses and reminders? This action is irreversible.".to_string(),
        };

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        //
        // Execute deletion
        //
        let mut pool = DbPool::open(&cfg.database)?;

        match id {
            Some(id) if !*all => {
                DeleteLogic::delete_one(&mut pool, *id)?;
                success(format!("Dose #{} has been deleted.", id));
            }
            _ => {
                let removed = DeleteLogic::delete_all(&mut pool)?;
                success(format!("{} dose(s) have been deleted.", removed));
            }
        }
    }

    Ok(())
}
