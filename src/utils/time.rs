//! Time utilities: parsing HH:MM dosing slots.

use crate::errors::{AppError, AppResult};
use crate::models::time_of_day::TimeOfDay;

pub fn parse_time_of_day(t: &str) -> AppResult<TimeOfDay> {
    t.parse::<TimeOfDay>()
        .map_err(|_| AppError::InvalidTime(t.to_string()))
}

/// Parse every `--at` value. A single value may hold several slots
/// separated by commas ("08:00,20:00").
pub fn parse_times(values: &[String]) -> AppResult<Vec<TimeOfDay>> {
    let mut out = Vec::new();
    for v in values {
        for part in v.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            out.push(parse_time_of_day(part)?);
        }
    }
    Ok(out)
}
