use chrono::{Datelike, NaiveDate};

pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// First and last day of a period: `YYYY-MM-DD`, `YYYY-MM` or `YYYY`.
pub fn bounds_of_period(p: &str) -> Result<(NaiveDate, NaiveDate), String> {
    let p = p.trim();

    // YYYY-MM-DD
    if let Some(d) = parse_date(p) {
        return Ok((d, d));
    }

    // YYYY-MM
    if let Ok(first) = NaiveDate::parse_from_str(&format!("{}-01", p), "%Y-%m-%d") {
        return Ok((first, last_day_of_month(first.year(), first.month())));
    }

    // YYYY
    if p.len() == 4
        && let Ok(year) = p.parse::<i32>()
        && let (Some(first), Some(last)) = (
            NaiveDate::from_ymd_opt(year, 1, 1),
            NaiveDate::from_ymd_opt(year, 12, 31),
        )
    {
        return Ok((first, last));
    }

    Err(format!("Invalid period: {}", p))
}

/// Bounds of a period expression. `all` has no bounds; `A:B` spans from the
/// start of period A to the end of period B.
pub fn resolve_period(p: &str) -> Result<Option<(NaiveDate, NaiveDate)>, String> {
    if p.trim() == "all" {
        return Ok(None);
    }

    if let Some((start, end)) = p.split_once(':') {
        let (from, _) = bounds_of_period(start)?;
        let (_, to) = bounds_of_period(end)?;
        if to < from {
            return Err(format!("Invalid range: {} is after {}", start, end));
        }
        return Ok(Some((from, to)));
    }

    bounds_of_period(p).map(Some)
}

pub fn current_month_bounds() -> (NaiveDate, NaiveDate) {
    let today = today();
    let first = today.with_day(1).unwrap_or(today);
    (first, last_day_of_month(today.year(), today.month()))
}

pub fn last_day_of_month(year: i32, month: u32) -> NaiveDate {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .unwrap_or(NaiveDate::MAX)
}
