use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::{report_migrations, run_pending_migrations};
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{error, info, success};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info: show_info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        // schema first: --info and --check need the tables
        let applied = run_pending_migrations(&pool.conn)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            info("Running migrations…");
            report_migrations(&applied);
            success(format!("Migration completed ({} applied).", applied.len()));
        }

        //
        // 2) INFO
        //
        if *show_info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            info("Running integrity check…");

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                success("Integrity check passed.");
            } else {
                error(format!("Integrity check failed: {}", integrity));
            }
        }

        //
        // 4) VACUUM
        //
        if *vacuum {
            info("Running VACUUM…");
            pool.conn.execute_batch("VACUUM;")?;
            success("Vacuum completed.");
        }
    }

    Ok(())
}
