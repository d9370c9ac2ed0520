//! Day-of-year date encoding
//!
//! Dates arrive as `YYYYMMDD`. DSSAT wants them as `YYDDD` (legacy) or
//! `YYYYDDD` (four-digit year). Anything shorter than eight characters is
//! taken to be a sentinel or a partial date and passes through untouched.

use chrono::{Datelike, NaiveDate};
use tracing::warn;

/// Selected by the `y2k` option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateFormat {
    Legacy,
    Extended,
}

impl DateFormat {
    pub fn from_y2k(y2k: bool) -> Self {
        if y2k {
            DateFormat::Extended
        } else {
            DateFormat::Legacy
        }
    }

    pub fn encode(self, date: &str) -> String {
        match self {
            DateFormat::Legacy => legacy(date),
            DateFormat::Extended => extended(date),
        }
    }
}

/// `YYYYMMDD` -> `YYDDD`.
///
/// Years before 1900 are shifted forward a century to resolve the day of
/// year; the two-digit year printed is that of the original year.
pub fn legacy(date: &str) -> String {
    if date.len() < 8 {
        return date.to_string();
    }
    let parts = (
        date.get(..4).and_then(|s| s.parse::<i32>().ok()),
        date.get(4..6).and_then(|s| s.parse::<u32>().ok()),
        date.get(6..8).and_then(|s| s.parse::<u32>().ok()),
    );
    let (year, month, day) = match parts {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return passthrough(date),
    };
    let resolved = if year < 1900 { year + 100 } else { year };
    match NaiveDate::from_ymd_opt(resolved, month, day) {
        Some(d) => format!("{:02}{:03}", year.rem_euclid(100), d.ordinal()),
        None => passthrough(date),
    }
}

/// `YYYYMMDD` -> `YYYYDDD`. The year is everything before the last four
/// characters.
pub fn extended(date: &str) -> String {
    if date.len() < 8 {
        return date.to_string();
    }
    let n = date.len();
    let parts = (
        date.get(..n - 4).and_then(|s| s.parse::<i32>().ok()),
        date.get(n - 4..n - 2).and_then(|s| s.parse::<u32>().ok()),
        date.get(n - 2..).and_then(|s| s.parse::<u32>().ok()),
    );
    let (year, month, day) = match parts {
        (Some(y), Some(m), Some(d)) => (y, m, d),
        _ => return passthrough(date),
    };
    match NaiveDate::from_ymd_opt(year, month, day) {
        Some(d) => format!("{}{:03}", year, d.ordinal()),
        None => passthrough(date),
    }
}

fn passthrough(date: &str) -> String {
    warn!(date, "unparsable date written unchanged");
    date.to_string()
}
