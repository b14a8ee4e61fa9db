use crate::core::expander::{self, CyclePolicy, ScheduleRequest};
use crate::core::reminders::{ReminderQueue, ReminderScheduler};
use crate::db::log::audit_quiet;
use crate::db::pool::DbPool;
use crate::db::queries::{get_dose_by_id, store_edit};
use crate::errors::{AppError, AppResult};
use crate::models::dose::{DoseOccurrence, Prescription};
use crate::models::frequency::Frequency;
use crate::models::medication_type::MedicationType;
use crate::models::time_of_day::TimeOfDay;
use crate::ui::messages::success;
use crate::utils::table::render_doses;
use chrono::NaiveDate;

/// Requested changes for an existing dose. `None` keeps the stored value;
/// an empty prescription string clears the field.
#[derive(Debug, Clone, Default)]
pub struct DoseChanges {
    pub name: Option<String>,
    pub dosage: Option<i32>,
    pub frequency: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub times: Vec<TimeOfDay>,
    pub med_type: Option<MedicationType>,
    pub doctor_name: Option<String>,
    pub rx_number: Option<String>,
    pub pharmacy_name: Option<String>,
    pub pharmacy_phone: Option<String>,
    pub instructions: Option<String>,
}

fn merge_field(current: &Option<String>, change: &Option<String>) -> Option<String> {
    match change {
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(v.clone()),
        None => current.clone(),
    }
}

impl DoseChanges {
    /// Build the schedule that replaces `existing`.
    pub fn to_request(
        &self,
        existing: &DoseOccurrence,
        policy: CyclePolicy,
    ) -> AppResult<ScheduleRequest> {
        let frequency = match &self.frequency {
            Some(token) => Frequency::from_token(token)?,
            None => existing.frequency(),
        };

        let times = if self.times.is_empty() {
            vec![TimeOfDay::from(existing.dose_time.time())]
        } else {
            self.times.clone()
        };

        let current = &existing.prescription;
        let prescription = Prescription {
            doctor_name: merge_field(&current.doctor_name, &self.doctor_name),
            rx_number: merge_field(&current.rx_number, &self.rx_number),
            pharmacy_name: merge_field(&current.pharmacy_name, &self.pharmacy_name),
            pharmacy_phone: merge_field(&current.pharmacy_phone, &self.pharmacy_phone),
            instructions: merge_field(&current.instructions, &self.instructions),
        };

        let name = self.name.clone().unwrap_or_else(|| existing.name.clone());
        if name.trim().is_empty() {
            return Err(AppError::InvalidArgument("Medication name cannot be empty".into()));
        }

        Ok(ScheduleRequest::with_frequency(
            name,
            self.dosage.unwrap_or(existing.dosage),
            frequency,
            self.start_date.unwrap_or(existing.start_date),
            self.end_date.unwrap_or(existing.end_date),
            times,
        )
        .med_type(self.med_type.unwrap_or(existing.med_type))
        .prescription(prescription)
        .policy(policy))
    }
}

/// High-level business logic for the `edit` command.
pub struct EditLogic;

impl EditLogic {
    /// Update dose `id` with the first requested time and add the other
    /// times as new doses over the schedule range.
    pub fn apply(
        pool: &mut DbPool,
        id: i64,
        changes: &DoseChanges,
        policy: CyclePolicy,
        separator: &str,
    ) -> AppResult<Vec<DoseOccurrence>> {
        let existing = get_dose_by_id(&pool.conn, id)?.ok_or(AppError::NotFound(id))?;
        let request = changes.to_request(&existing, policy)?;

        let doses = expander::generate(&request, Some(&existing));
        let Some((updated, added)) = doses.split_first() else {
            return Err(AppError::Other(format!("Edit of dose {} produced nothing", id)));
        };

        let tx = pool.conn.transaction()?;
        let saved = store_edit(&tx, updated, added)?;
        ReminderQueue::new(&tx).schedule_all(&saved)?;
        tx.commit()?;

        audit_quiet(
            &pool.conn,
            "edit",
            &format!("dose #{}", id),
            &format!(
                "{} at {}, {} new dose(s)",
                updated.name,
                updated.dose_time_str(),
                added.len()
            ),
        );

        println!("{}", render_doses(&saved, separator));
        success(format!(
            "✏️ Dose #{} updated, {} new dose(s) added.",
            id,
            added.len()
        ));

        Ok(saved)
    }
}
