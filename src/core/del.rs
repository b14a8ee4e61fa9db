use crate::core::reminders::{ReminderQueue, ReminderScheduler};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{delete_all_doses, delete_dose, get_dose_by_id};
use crate::db::reminders::delete_all_reminders;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::info;

pub struct DeleteLogic;

impl DeleteLogic {
    /// Delete one dose and its pending reminder.
    pub fn delete_one(pool: &mut DbPool, id: i64) -> AppResult<()> {
        let dose = get_dose_by_id(&pool.conn, id)?.ok_or(AppError::NotFound(id))?;

        let tx = pool.conn.transaction()?;
        {
            let mut queue = ReminderQueue::new(&tx);
            queue.cancel(id)?;
        }
        delete_dose(&tx, id)?;
        tx.commit()?;

        audit_quiet(
            &pool.conn,
            "del",
            &format!("dose #{}", id),
            &format!("{} at {}", dose.name, dose.dose_time_str()),
        );

        info(format!(
            "Deleted dose #{} ({} at {})",
            id,
            dose.name,
            dose.dose_time_str()
        ));
        Ok(())
    }

    /// Delete every dose and every reminder. Returns the number of doses.
    pub fn delete_all(pool: &mut DbPool) -> AppResult<usize> {
        let tx = pool.conn.transaction()?;
        delete_all_reminders(&tx)?;
        let removed = delete_all_doses(&tx)?;
        tx.commit()?;

        audit_quiet(
            &pool.conn,
            "del",
            "all",
            &format!("{} dose(s) deleted", removed),
        );

        info(format!("Deleted {} dose(s)", removed));
        Ok(removed)
    }
}
