//! Reminder scheduling for persisted doses.

use crate::db::reminders::{self, Reminder};
use crate::errors::{AppError, AppResult};
use crate::models::dose::DoseOccurrence;
use chrono::NaiveDateTime;
use rusqlite::Connection;

/// Schedules one reminder per persisted dose.
///
/// Scheduling the same dose again replaces its pending reminder.
pub trait ReminderScheduler {
    fn schedule(&mut self, dose: &DoseOccurrence) -> AppResult<()>;

    /// Drop the pending reminder of a dose, if any.
    fn cancel(&mut self, dose_id: i64) -> AppResult<bool>;

    fn schedule_all(&mut self, doses: &[DoseOccurrence]) -> AppResult<usize> {
        let mut scheduled = 0;
        for dose in doses {
            self.schedule(dose)?;
            if !dose.taken {
                scheduled += 1;
            }
        }
        Ok(scheduled)
    }
}

/// Reminders stored in the `reminders` table of the dose database.
pub struct ReminderQueue<'a> {
    conn: &'a Connection,
}

impl<'a> ReminderQueue<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn pending(&self) -> AppResult<Vec<Reminder>> {
        reminders::load_reminders(self.conn, None)
    }

    /// Reminders firing at or before `now`.
    pub fn due(&self, now: NaiveDateTime) -> AppResult<Vec<Reminder>> {
        reminders::load_reminders(self.conn, Some(now))
    }
}

impl ReminderScheduler for ReminderQueue<'_> {
    fn schedule(&mut self, dose: &DoseOccurrence) -> AppResult<()> {
        if !dose.is_persisted() {
            return Err(AppError::InvalidArgument(format!(
                "Cannot schedule a reminder for unsaved dose '{}' at {}",
                dose.name,
                dose.dose_time_str()
            )));
        }

        // nothing to remind for a dose already taken
        if dose.taken {
            reminders::delete_reminder(self.conn, dose.id)?;
            return Ok(());
        }

        reminders::upsert_reminder(self.conn, dose.id, dose.dose_time, &dose.reminder_message())
    }

    fn cancel(&mut self, dose_id: i64) -> AppResult<bool> {
        reminders::delete_reminder(self.conn, dose_id)
    }
}
