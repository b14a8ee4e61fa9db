use crate::core::reminders::ReminderQueue;
use crate::db::pool::DbPool;
use crate::db::queries::{DoseFilter, load_doses};
use crate::db::reminders::Reminder;
use crate::errors::{AppError, AppResult};
use crate::models::dose::DoseOccurrence;
use crate::utils::colors::{color_for_dose, colorize_optional, paint};
use crate::utils::date;
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table, render_doses};
use chrono::{Local, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    pub period: Option<String>,
    pub today: bool,
    pub pending: bool,
    pub json: bool,
    pub details: bool,
}

impl ListOptions {
    /// Dose filter for these options. Without a period the current month
    /// is listed.
    pub fn filter(&self) -> AppResult<DoseFilter> {
        let bounds = if self.today {
            let d = date::today();
            Some((d, d))
        } else {
            match &self.period {
                Some(p) => date::resolve_period(p).map_err(AppError::InvalidDate)?,
                None => Some(date::current_month_bounds()),
            }
        };

        Ok(DoseFilter {
            from: bounds.map(|(from, _)| from),
            to: bounds.map(|(_, to)| to),
            pending_only: self.pending,
        })
    }
}

pub struct ListLogic;

impl ListLogic {
    pub fn load(pool: &DbPool, opts: &ListOptions) -> AppResult<Vec<DoseOccurrence>> {
        load_doses(&pool.conn, &opts.filter()?)
    }

    pub fn print(pool: &DbPool, opts: &ListOptions, separator: &str) -> AppResult<()> {
        let doses = Self::load(pool, opts)?;

        if opts.json {
            println!("{}", serde_json::to_string_pretty(&doses)?);
            return Ok(());
        }

        if doses.is_empty() {
            println!("No doses for the selected period.");
            return Ok(());
        }

        if !opts.details {
            println!("{}", render_doses(&doses, separator));
            return Ok(());
        }

        let now = Local::now().naive_local();
        let mut by_day: BTreeMap<NaiveDate, Vec<&DoseOccurrence>> = BTreeMap::new();
        for d in &doses {
            by_day.entry(d.dose_date()).or_default().push(d);
        }

        for (day, list) in by_day {
            println!("\n{}", bold(&format!("=== {} ===", day.format("%Y-%m-%d (%a)"))));
            for d in list {
                let color = color_for_dose(d.taken, d.dose_time < now);
                println!(
                    "  {} #{} {} | {} × {} ({})",
                    paint(color, d.dose_time.format("%H:%M")),
                    d.id,
                    d.name,
                    d.dosage,
                    d.med_type.display_name(),
                    d.frequency_label
                );
                let p = &d.prescription;
                if !p.is_empty() {
                    println!(
                        "      doctor: {} | rx: {} | pharmacy: {} {}",
                        colorize_optional(p.doctor_name.as_deref().unwrap_or("")),
                        colorize_optional(p.rx_number.as_deref().unwrap_or("")),
                        colorize_optional(p.pharmacy_name.as_deref().unwrap_or("")),
                        colorize_optional(p.pharmacy_phone.as_deref().unwrap_or("")),
                    );
                    if let Some(text) = &p.instructions {
                        println!("      {}", text);
                    }
                }
            }
        }

        Ok(())
    }

    /// Pending reminders, optionally only those already due.
    pub fn reminders(pool: &DbPool, due_only: bool) -> AppResult<Vec<Reminder>> {
        let queue = ReminderQueue::new(&pool.conn);
        if due_only {
            queue.due(Local::now().naive_local())
        } else {
            queue.pending()
        }
    }

    pub fn print_reminders(pool: &DbPool, due_only: bool, separator: &str) -> AppResult<()> {
        let reminders = Self::reminders(pool, due_only)?;

        if reminders.is_empty() {
            println!(
                "{}",
                if due_only {
                    "No reminders due."
                } else {
                    "No pending reminders."
                }
            );
            return Ok(());
        }

        let mut table = Table::new(
            vec![Column::right("DOSE"), Column::left("FIRES AT"), Column::left("MESSAGE")],
            separator,
        );
        for r in &reminders {
            table.add_row(vec![
                r.dose_id.to_string(),
                r.fire_at.format("%Y-%m-%d %H:%M").to_string(),
                r.message.clone(),
            ]);
        }

        println!("🔔 {} reminder(s):\n", reminders.len());
        println!("{}", table.render());
        Ok(())
    }
}
