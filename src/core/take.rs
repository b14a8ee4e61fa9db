use crate::core::reminders::{ReminderQueue, ReminderScheduler};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{get_dose_by_id, set_taken};
use crate::errors::{AppError, AppResult};
use crate::models::dose::DoseOccurrence;
use crate::ui::messages::{info, success};

pub struct TakeLogic;

impl TakeLogic {
    /// Mark a dose as taken (or not taken with `undo`) and keep its
    /// reminder in sync: taken doses have none, pending doses get one back.
    pub fn apply(pool: &mut DbPool, id: i64, undo: bool) -> AppResult<DoseOccurrence> {
        let dose = get_dose_by_id(&pool.conn, id)?.ok_or(AppError::NotFound(id))?;
        let taken = !undo;

        if dose.taken == taken {
            info(format!(
                "Dose #{} ({} at {}) is already marked as {}.",
                id,
                dose.name,
                dose.dose_time_str(),
                if taken { "taken" } else { "not taken" }
            ));
            return Ok(dose);
        }

        let dose = DoseOccurrence { taken, ..dose };

        let tx = pool.conn.transaction()?;
        set_taken(&tx, id, taken)?;
        ReminderQueue::new(&tx).schedule(&dose)?;
        tx.commit()?;

        let op = if taken { "take" } else { "untake" };
        audit_quiet(
            &pool.conn,
            op,
            &format!("dose #{}", id),
            &format!("{} at {}", dose.name, dose.dose_time_str()),
        );

        if taken {
            success(format!(
                "💊 Dose #{} of {} at {} marked as taken.",
                id,
                dose.name,
                dose.dose_time_str()
            ));
        } else {
            success(format!(
                "↩️ Dose #{} of {} at {} marked as not taken, reminder restored.",
                id,
                dose.name,
                dose.dose_time_str()
            ));
        }

        Ok(dose)
    }
}
