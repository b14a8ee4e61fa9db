use crate::cli::commands::add::parse_med_type;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::edit::{DoseChanges, EditLogic};
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::utils::time::parse_times;
use chrono::NaiveDate;

fn parse_optional_date(value: &Option<String>) -> AppResult<Option<NaiveDate>> {
    match value {
        Some(s) => date::parse_date(s)
            .map(Some)
            .ok_or_else(|| AppError::InvalidDate(s.to_string())),
        None => Ok(None),
    }
}

/// Edit an existing dose.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        name,
        dosage,
        frequency,
        from,
        to,
        at,
        med_type,
        prescription,
    } = cmd
    {
        let changes = DoseChanges {
            name: name.clone(),
            dosage: *dosage,
            frequency: frequency.clone(),
            start_date: parse_optional_date(from)?,
            end_date: parse_optional_date(to)?,
            times: parse_times(at)?,
            med_type: med_type.as_deref().map(parse_med_type).transpose()?,
            doctor_name: prescription.doctor.clone(),
            rx_number: prescription.rx.clone(),
            pharmacy_name: prescription.pharmacy.clone(),
            pharmacy_phone: prescription.phone.clone(),
            instructions: prescription.instructions.clone(),
        };

        let mut pool = DbPool::open(&cfg.database)?;
        EditLogic::apply(
            &mut pool,
            *id,
            &changes,
            cfg.cycle_policy,
            &cfg.separator_char,
        )?;
    }

    Ok(())
}
