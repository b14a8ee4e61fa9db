use crate::cli::parser::{Commands, PrescriptionArgs};
use crate::config::Config;
use crate::core::add::AddLogic;
use crate::core::expander::ScheduleRequest;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::models::dose::Prescription;
use crate::models::medication_type::MedicationType;
use crate::utils::date;
use crate::utils::time::parse_times;

/// Empty strings are treated as "not given".
fn non_empty(v: &Option<String>) -> Option<String> {
    v.as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

impl From<&PrescriptionArgs> for Prescription {
    fn from(args: &PrescriptionArgs) -> Self {
        Prescription {
            doctor_name: non_empty(&args.doctor),
            rx_number: non_empty(&args.rx),
            pharmacy_name: non_empty(&args.pharmacy),
            pharmacy_phone: non_empty(&args.phone),
            instructions: non_empty(&args.instructions),
        }
    }
}

pub fn parse_med_type(code: &str) -> AppResult<MedicationType> {
    MedicationType::from_code(code).ok_or_else(|| {
        AppError::InvalidMedicationType(format!(
            "'{}'. Use one of: tablet, capsule, syrup, drops, spray, injection, inhaler, cream",
            code
        ))
    })
}

/// Add a medication schedule.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        name,
        dosage,
        frequency,
        from,
        to,
        at,
        med_type,
        prescription,
        dry_run,
    } = cmd
    {
        //
        // 1. Parse name and dates
        //
        if name.trim().is_empty() {
            return Err(AppError::InvalidArgument(
                "Medication name cannot be empty".into(),
            ));
        }

        let start = match from {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
            None => date::today(),
        };
        let end = match to {
            Some(s) => date::parse_date(s).ok_or_else(|| AppError::InvalidDate(s.to_string()))?,
            None => start,
        };

        //
        // 2. Parse times and type
        //
        let times = parse_times(at)?;

        let kind = match med_type {
            Some(code) => parse_med_type(code)?,
            None => cfg.default_medication_type()?,
        };

        //
        // 3. Build request (fails on unknown frequency)
        //
        let request = ScheduleRequest::new(name.trim(), *dosage, frequency, start, end, times)?
            .med_type(kind)
            .prescription(Prescription::from(prescription))
            .policy(cfg.cycle_policy);

        //
        // 4. Execute logic
        //
        let mut pool = DbPool::open(&cfg.database)?;
        AddLogic::apply(&mut pool, &request, *dry_run, &cfg.separator_char)?;
    }

    Ok(())
}
