//! Expansion of a medication schedule into concrete dose occurrences.
//!
//! A schedule is a date range, a repeat interval and one or more slots per
//! day. Every cycle starts `interval` days after the previous one and emits
//! one dose per slot, in the order the slots were given.
//!
//! Nothing here touches the database: the result is handed to
//! `db::queries` for persistence and to a `ReminderScheduler` afterwards.

use crate::errors::AppResult;
use crate::models::dose::{DoseOccurrence, Prescription};
use crate::models::frequency::Frequency;
use crate::models::medication_type::MedicationType;
use crate::models::time_of_day::TimeOfDay;
use chrono::{Days, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// How many cycles a date range holds when its length is not a multiple of
/// the interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CyclePolicy {
    /// `max(1, days / interval)`: a trailing partial cycle is dropped
    /// (20 days every 7 days → 2 cycles).
    #[default]
    WholeCycles,
    /// `ceil(days / interval)`: a trailing partial cycle still gets its
    /// dose date (20 days every 7 days → 3 cycles).
    IncludePartial,
}

impl CyclePolicy {
    pub fn cycles(&self, duration_days: i64, interval: u32) -> u64 {
        if duration_days <= 0 {
            return 0;
        }

        let days = duration_days as u64;
        let interval = u64::from(interval.max(1));

        match self {
            CyclePolicy::WholeCycles => (days / interval).max(1),
            CyclePolicy::IncludePartial => days.div_ceil(interval),
        }
    }
}

/// Everything needed to expand one medication schedule.
#[derive(Debug, Clone)]
pub struct ScheduleRequest {
    pub name: String,
    pub dosage: i32,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub times: Vec<TimeOfDay>,
    pub med_type: MedicationType,
    pub prescription: Prescription,
    pub policy: CyclePolicy,
}

impl ScheduleRequest {
    /// Build a request from a frequency token (`EVERY_2_DAYS`, ...).
    ///
    /// Fails with `InvalidArgument` if the token is unknown.
    pub fn new(
        name: impl Into<String>,
        dosage: i32,
        frequency_token: &str,
        start_date: NaiveDate,
        end_date: NaiveDate,
        times: Vec<TimeOfDay>,
    ) -> AppResult<Self> {
        let frequency = Frequency::from_token(frequency_token)?;
        Ok(Self::with_frequency(
            name, dosage, frequency, start_date, end_date, times,
        ))
    }

    pub fn with_frequency(
        name: impl Into<String>,
        dosage: i32,
        frequency: Frequency,
        start_date: NaiveDate,
        end_date: NaiveDate,
        times: Vec<TimeOfDay>,
    ) -> Self {
        Self {
            name: name.into(),
            dosage,
            frequency,
            start_date,
            end_date,
            times,
            med_type: MedicationType::default(),
            prescription: Prescription::default(),
            policy: CyclePolicy::default(),
        }
    }

    pub fn med_type(mut self, med_type: MedicationType) -> Self {
        self.med_type = med_type;
        self
    }

    pub fn prescription(mut self, prescription: Prescription) -> Self {
        self.prescription = prescription;
        self
    }

    pub fn policy(mut self, policy: CyclePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Inclusive number of days between start and end.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Calendar dates of every cycle, ascending.
    pub fn cycle_dates(&self) -> Vec<NaiveDate> {
        let interval = self.frequency.days();
        let cycles = self.policy.cycles(self.duration_days(), interval);

        (0..cycles)
            .map_while(|cycle| {
                self.start_date
                    .checked_add_days(Days::new(cycle * u64::from(interval)))
            })
            .collect()
    }

    fn occurrence(&self, id: i64, taken: bool, dose_time: NaiveDateTime) -> DoseOccurrence {
        DoseOccurrence {
            id,
            name: self.name.clone(),
            dosage: self.dosage,
            frequency_label: self.frequency.label(),
            start_date: self.start_date,
            end_date: self.end_date,
            taken,
            dose_time,
            med_type: self.med_type,
            prescription: self.prescription.clone(),
        }
    }

    /// New, unpersisted doses for the given slots over every cycle.
    fn expand_slots(&self, slots: &[TimeOfDay]) -> Vec<DoseOccurrence> {
        if slots.is_empty() {
            return Vec::new();
        }

        let dates = self.cycle_dates();
        let mut out = Vec::with_capacity(dates.len() * slots.len());

        for date in dates {
            for slot in slots {
                out.push(self.occurrence(0, false, slot.on(date)));
            }
        }

        out
    }
}

/// Expand a schedule into dose occurrences.
///
/// Without `existing` every dose is new (`id = 0`, not taken). With
/// `existing` the first slot updates that dose in place: same id, same
/// `taken` flag, same calendar date, new hour and minute. The remaining
/// slots are expanded over the whole range as new doses.
pub fn generate(
    request: &ScheduleRequest,
    existing: Option<&DoseOccurrence>,
) -> Vec<DoseOccurrence> {
    let Some(original) = existing else {
        return request.expand_slots(&request.times);
    };

    let dose_time = match request.times.first() {
        Some(slot) => slot.on(original.dose_time.date()),
        None => original.dose_time,
    };

    let mut out = vec![request.occurrence(original.id, original.taken, dose_time)];

    if request.times.len() > 1 {
        out.extend(request.expand_slots(&request.times[1..]));
    }

    out
}
