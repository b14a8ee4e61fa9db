use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RED, YELLOW, paint};
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> rusqlite::Result<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_kb = (file_size as f64) / 1024.0;

    println!("{} {}", paint(CYAN, "• File:"), paint(YELLOW, db_path));
    println!("{} {:.1} KB", paint(CYAN, "• Size:"), file_kb);

    //
    // 2) DOSES
    //
    let (total, taken): (i64, i64) = pool.conn.query_row(
        "SELECT COUNT(*), COALESCE(SUM(taken), 0) FROM doses",
        [],
        |row| Ok((row.get(0)?, row.get(1)?)),
    )?;
    println!("{} {}", paint(CYAN, "• Total doses:"), paint(GREEN, total));
    println!(
        "{} {} / {}",
        paint(CYAN, "• Taken / pending:"),
        paint(GREEN, taken),
        paint(RED, total - taken)
    );

    let medications: i64 =
        pool.conn
            .query_row("SELECT COUNT(DISTINCT name) FROM doses", [], |row| row.get(0))?;
    println!("{} {}", paint(CYAN, "• Medications:"), medications);

    //
    // 3) SCHEDULE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row(
            "SELECT MIN(dose_time), MAX(dose_time) FROM doses",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let fmt_first = first.unwrap_or_else(|| paint(GREY, "--"));
    let fmt_last = last.unwrap_or_else(|| paint(GREY, "--"));

    println!("{}", paint(CYAN, "• Schedule range:"));
    println!("    from: {}", fmt_first);
    println!("    to:   {}", fmt_last);

    //
    // 4) REMINDERS
    //
    let reminders: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM reminders", [], |row| row.get(0))?;
    println!("{} {}", paint(CYAN, "• Pending reminders:"), reminders);

    println!();
    Ok(())
}
