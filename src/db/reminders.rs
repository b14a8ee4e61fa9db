//! Rows of the `reminders` table: one pending reminder per persisted dose.

use crate::db::queries::DOSE_TIME_FMT;
use crate::errors::{AppError, AppResult};
use chrono::{Local, NaiveDateTime};
use rusqlite::{Connection, Row, params};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reminder {
    pub dose_id: i64,
    pub fire_at: NaiveDateTime,
    pub message: String,
    pub scheduled_at: String,
}

fn map_reminder(row: &Row) -> rusqlite::Result<Reminder> {
    let fire_str: String = row.get("fire_at")?;
    let fire_at = NaiveDateTime::parse_from_str(&fire_str, DOSE_TIME_FMT).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Text,
            Box::new(AppError::InvalidTime(fire_str.clone())),
        )
    })?;

    Ok(Reminder {
        dose_id: row.get("dose_id")?,
        fire_at,
        message: row.get("message")?,
        scheduled_at: row.get("scheduled_at")?,
    })
}

/// Insert or replace the reminder of a dose.
pub fn upsert_reminder(
    conn: &Connection,
    dose_id: i64,
    fire_at: NaiveDateTime,
    message: &str,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO reminders (dose_id, fire_at, message, scheduled_at)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(dose_id) DO UPDATE SET
             fire_at = excluded.fire_at,
             message = excluded.message,
             scheduled_at = excluded.scheduled_at",
        params![
            dose_id,
            fire_at.format(DOSE_TIME_FMT).to_string(),
            message,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

/// Remove the reminder of a dose. Returns false if there was none.
pub fn delete_reminder(conn: &Connection, dose_id: i64) -> AppResult<bool> {
    let removed = conn.execute("DELETE FROM reminders WHERE dose_id = ?1", [dose_id])?;
    Ok(removed > 0)
}

pub fn delete_all_reminders(conn: &Connection) -> AppResult<usize> {
    Ok(conn.execute("DELETE FROM reminders", [])?)
}

/// Pending reminders ordered by fire time, optionally only those firing at
/// or before `until`.
pub fn load_reminders(conn: &Connection, until: Option<NaiveDateTime>) -> AppResult<Vec<Reminder>> {
    let mut out = Vec::new();

    match until {
        Some(limit) => {
            let mut stmt = conn.prepare(
                "SELECT * FROM reminders WHERE fire_at <= ?1 ORDER BY fire_at ASC, dose_id ASC",
            )?;
            let rows = stmt.query_map([limit.format(DOSE_TIME_FMT).to_string()], map_reminder)?;
            for r in rows {
                out.push(r?);
            }
        }
        None => {
            let mut stmt =
                conn.prepare("SELECT * FROM reminders ORDER BY fire_at ASC, dose_id ASC")?;
            let rows = stmt.query_map([], map_reminder)?;
            for r in rows {
                out.push(r?);
            }
        }
    }

    Ok(out)
}
