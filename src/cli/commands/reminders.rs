use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::ListLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Reminders { due } = cmd {
        let pool = DbPool::open(&cfg.database)?;
        ListLogic::print_reminders(&pool, *due, &cfg.separator_char)?;
    }

    Ok(())
}
