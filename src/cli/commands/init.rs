use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::log::audit_quiet;
use crate::db::migrate::{report_migrations, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and all pending migrations
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    //
    // 1️⃣ configuration
    //
    let db_path = Config::init_all(Some(cfg.database.clone()), cli.test)?;
    let db_path = db_path.to_string_lossy().to_string();

    println!("⚙️  Initializing rDose…");
    println!("📄 Config file : {}", Config::config_file().display());
    println!("🗄️  Database   : {}", &db_path);

    //
    // 2️⃣ database + migrations
    //
    let conn = Connection::open(&db_path)?;
    let applied = run_pending_migrations(&conn)?;
    report_migrations(&applied);

    println!("✅ Database initialized at {}", &db_path);

    //
    // 3️⃣ audit (non blocking)
    //
    audit_quiet(
        &conn,
        "init",
        "Database initialized",
        &format!("Database initialized at {}", &db_path),
    );

    println!("🎉 rDose initialization completed!");
    Ok(())
}
