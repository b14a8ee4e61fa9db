use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Schema steps, applied in order and recorded in the `log` table.
const MIGRATIONS: &[(&str, &str, &str)] = &[
    (
        "0001_create_doses",
        "Created doses table",
        r#"
        CREATE TABLE IF NOT EXISTS doses (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            name           TEXT NOT NULL CHECK(length(name) > 0),
            dosage         INTEGER NOT NULL DEFAULT 1,
            frequency      TEXT NOT NULL,
            start_date     TEXT NOT NULL,
            end_date       TEXT NOT NULL,
            taken          INTEGER NOT NULL DEFAULT 0,
            dose_time      TEXT NOT NULL,
            med_type       TEXT NOT NULL DEFAULT 'tablet',
            doctor_name    TEXT,
            rx_number      TEXT,
            pharmacy_name  TEXT,
            pharmacy_phone TEXT,
            instructions   TEXT,
            created_at     TEXT NOT NULL
        );
        "#,
    ),
    (
        "0002_dose_time_index",
        "Indexed doses by dose_time",
        r#"
        CREATE INDEX IF NOT EXISTS idx_doses_dose_time ON doses(dose_time);
        CREATE INDEX IF NOT EXISTS idx_doses_taken ON doses(taken, dose_time);
        "#,
    ),
    (
        "0003_create_reminders",
        "Created reminders table",
        r#"
        CREATE TABLE IF NOT EXISTS reminders (
            dose_id      INTEGER PRIMARY KEY REFERENCES doses(id) ON DELETE CASCADE,
            fire_at      TEXT NOT NULL,
            message      TEXT NOT NULL,
            scheduled_at TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reminders_fire_at ON reminders(fire_at);
        "#,
    ),
];

/// Ensure that the `log` table exists with the modern schema.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check whether a migration was already recorded in `log`.
pub fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply_migration(conn: &Connection, version: &str, message: &str, sql: &str) -> Result<bool> {
    if is_applied(conn, version)? {
        return Ok(false);
    }

    let tx = conn.unchecked_transaction()?;
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [version, message],
    )?;
    tx.commit()?;
    Ok(true)
}

/// Public entry point: run all pending migrations.
///
/// Prints nothing, so commands with machine-readable output can call it.
/// Returns `(version, message)` of every step that ran, in order.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<(&'static str, &'static str)>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for (version, message, sql) in MIGRATIONS {
        if apply_migration(conn, version, message, sql)? {
            applied.push((*version, *message));
        }
    }

    Ok(applied)
}

/// One status line per applied step, for `init` and `db --migrate`.
pub fn report_migrations(applied: &[(&str, &str)]) {
    for (version, message) in applied {
        success(format!("Migration applied: {} → {}", version, message));
    }
}
