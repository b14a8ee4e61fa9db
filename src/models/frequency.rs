//! Named repeat intervals between dose dates.
//!
//! The label rendered by [`Frequency::label`] is what gets stored on every
//! dose row; [`Frequency::from_localized_string`] turns it back into a
//! `Frequency` when a dose is edited.

use crate::errors::{AppError, AppResult};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Frequency {
    Everyday,
    Every2Days,
    Every3Days,
    Every4Days,
    Every5Days,
    Every6Days,
    EveryWeek,
    Every2Weeks,
    Every3Weeks,
    EveryMonth,
}

const ALL: [Frequency; 10] = [
    Frequency::Everyday,
    Frequency::Every2Days,
    Frequency::Every3Days,
    Frequency::Every4Days,
    Frequency::Every5Days,
    Frequency::Every6Days,
    Frequency::EveryWeek,
    Frequency::Every2Weeks,
    Frequency::Every3Weeks,
    Frequency::EveryMonth,
];

fn first_number() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("static regex"))
}

impl Frequency {
    /// All frequencies, shortest interval first.
    pub fn all() -> &'static [Frequency] {
        &ALL
    }

    /// Number of days between two consecutive dose dates.
    pub fn days(&self) -> u32 {
        match self {
            Frequency::Everyday => 1,
            Frequency::Every2Days => 2,
            Frequency::Every3Days => 3,
            Frequency::Every4Days => 4,
            Frequency::Every5Days => 5,
            Frequency::Every6Days => 6,
            Frequency::EveryWeek => 7,
            Frequency::Every2Weeks => 14,
            Frequency::Every3Weeks => 21,
            Frequency::EveryMonth => 30,
        }
    }

    /// Command-line token, e.g. `EVERY_2_DAYS`.
    pub fn token(&self) -> &'static str {
        match self {
            Frequency::Everyday => "EVERYDAY",
            Frequency::Every2Days => "EVERY_2_DAYS",
            Frequency::Every3Days => "EVERY_3_DAYS",
            Frequency::Every4Days => "EVERY_4_DAYS",
            Frequency::Every5Days => "EVERY_5_DAYS",
            Frequency::Every6Days => "EVERY_6_DAYS",
            Frequency::EveryWeek => "EVERY_WEEK",
            Frequency::Every2Weeks => "EVERY_2_WEEKS",
            Frequency::Every3Weeks => "EVERY_3_WEEKS",
            Frequency::EveryMonth => "EVERY_MONTH",
        }
    }

    /// Strict lookup by token. Case-insensitive, `-` and `_` are interchangeable.
    pub fn from_token(token: &str) -> AppResult<Self> {
        let normalized = token.trim().to_uppercase().replace('-', "_");

        ALL.iter()
            .copied()
            .find(|f| f.token() == normalized)
            .ok_or_else(|| AppError::InvalidArgument(format!("Invalid frequency: {}", token)))
    }

    /// Map a day interval back to its frequency. Unknown intervals are daily.
    pub fn from_days(days: u32) -> Self {
        ALL.iter()
            .copied()
            .find(|f| f.days() == days)
            .unwrap_or(Frequency::Everyday)
    }

    /// Human-readable label stored on dose rows.
    pub fn label(&self) -> String {
        match self {
            Frequency::Everyday => "Everyday".to_string(),
            Frequency::EveryWeek => "Every Week".to_string(),
            Frequency::EveryMonth => "Every Month".to_string(),
            Frequency::Every2Weeks | Frequency::Every3Weeks => {
                format!("Every {} Weeks", self.days() / 7)
            }
            _ => format!("Every {} Days", self.days()),
        }
    }

    /// Best-effort parse of a rendered label ("Every 2 Days", "Every 3 Weeks").
    ///
    /// Never fails: anything that cannot be classified is daily.
    pub fn from_localized_string(s: &str) -> Self {
        let lower = s.to_lowercase();
        let number = first_number()
            .find(s)
            .and_then(|m| m.as_str().parse::<u32>().ok());

        if lower.contains("everyday") {
            Frequency::Everyday
        } else if lower.contains("every week") && number.is_none() {
            Frequency::EveryWeek
        } else if lower.contains("every month") {
            Frequency::EveryMonth
        } else if lower.contains("days") {
            Self::from_days(number.unwrap_or(1))
        } else if lower.contains("weeks") {
            Self::from_days(number.unwrap_or(1).saturating_mul(7))
        } else {
            Frequency::Everyday
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
