use crate::core::expander::{self, ScheduleRequest};
use crate::core::reminders::{ReminderQueue, ReminderScheduler};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::insert_batch;
use crate::errors::AppResult;
use crate::models::dose::DoseOccurrence;
use crate::ui::messages::{info, success};
use crate::utils::table::render_doses;

/// High-level business logic for the `add` command.
pub struct AddLogic;

impl AddLogic {
    /// Expand the schedule, then store every dose and queue its reminder in
    /// one transaction.
    ///
    /// With `dry_run` nothing is written; the expansion is only printed.
    pub fn apply(
        pool: &mut DbPool,
        request: &ScheduleRequest,
        dry_run: bool,
        separator: &str,
    ) -> AppResult<Vec<DoseOccurrence>> {
        let doses = expander::generate(request, None);

        if doses.is_empty() {
            info(format!(
                "No occurrences created for '{}' ({} → {}).",
                request.name, request.start_date, request.end_date
            ));
            return Ok(doses);
        }

        if dry_run {
            println!("{}", render_doses(&doses, separator));
            info(format!(
                "Dry run: {} dose(s) would be created for '{}'.",
                doses.len(),
                request.name
            ));
            return Ok(doses);
        }

        // doses and reminders commit together
        let tx = pool.conn.transaction()?;

        // 1️⃣ persist: ids must exist before reminders reference them
        let saved = insert_batch(&tx, &doses)?;

        // 2️⃣ schedule
        let scheduled = ReminderQueue::new(&tx).schedule_all(&saved)?;

        tx.commit()?;

        audit_quiet(
            &pool.conn,
            "add",
            &request.name,
            &format!(
                "{} dose(s) {} from {} to {}, {} reminder(s)",
                saved.len(),
                request.frequency.label(),
                request.start_date,
                request.end_date,
                scheduled
            ),
        );

        println!("{}", render_doses(&saved, separator));
        success(format!(
            "Added {} dose(s) of '{}' with {} reminder(s).",
            saved.len(),
            request.name,
            scheduled
        ));

        Ok(saved)
    }
}
