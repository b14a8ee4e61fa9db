use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::take::TakeLogic;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Take { id, undo } = cmd {
        let mut pool = DbPool::open(&cfg.database)?;
        TakeLogic::apply(&mut pool, *id, *undo)?;
    }

    Ok(())
}
