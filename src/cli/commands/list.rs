use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::list::{ListLogic, ListOptions};
use crate::db::pool::DbPool;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        period,
        now,
        pending,
        details,
        json,
    } = cmd
    {
        let opts = ListOptions {
            period: period.clone(),
            today: *now,
            pending: *pending,
            json: *json,
            details: *details,
        };

        let pool = DbPool::open(&cfg.database)?;
        ListLogic::print(&pool, &opts, &cfg.separator_char)?;
    }
    Ok(())
}
