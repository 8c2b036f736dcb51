// 🏖️ Holiday Policy - normalize holidays and turn them into deducted hours
// Caller-supplied holiday lists are parsed permissively: an entry without a
// usable date is dropped, a missing name or hours value is defaulted.
// Normalization and window filtering are separate steps (normalize first).

use crate::calendar::parse_date;
use crate::error::ForecastError;
use crate::holidays::federal_holidays;
use crate::workweek::{workday_hours, WorkSchedule, STANDARD_DAY_HOURS};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

pub const DEFAULT_HOLIDAY_NAME: &str = "Holiday";
pub const DEFAULT_HOLIDAY_HOURS: f64 = 8.0;

/// Extra hour owed when an 8-hour holiday credit lands on a 9-hour 9/80 day
const LONG_DAY_TOP_UP_HOURS: f64 = 1.0;

// ============================================================================
// HOLIDAY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub date: NaiveDate,
    pub name: String,
    /// Base credit before workweek adjustment
    pub hours: f64,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: impl Into<String>, hours: f64) -> Self {
        Holiday {
            date,
            name: name.into(),
            hours,
        }
    }

    pub fn in_window(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.date >= start && self.date <= end
    }
}

// ============================================================================
// PAYLOAD HELPERS
// ============================================================================

/// The `date` member of a payload entry, if present and parseable
pub(crate) fn entry_date(entry: &Value) -> Option<NaiveDate> {
    entry.get("date").and_then(Value::as_str).and_then(parse_date)
}

/// Numbers and numeric strings are accepted; anything else yields `fallback`
pub(crate) fn entry_hours(entry: &Value, fallback: f64) -> f64 {
    match entry.get("hours") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(fallback),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|h| h.is_finite()).unwrap_or(fallback),
        _ => fallback,
    }
}

// ============================================================================
// NORMALIZATION
// ============================================================================

/// Parse raw holiday entries; no window filtering happens here
pub fn normalize_holiday_payload(entries: &[Value]) -> Vec<Holiday> {
    entries
        .iter()
        .filter_map(|entry| {
            let Some(date) = entry_date(entry) else {
                warn!(entry = %entry, "dropping holiday without a valid date");
                return None;
            };

            let name = entry
                .get("name")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or(DEFAULT_HOLIDAY_NAME);

            Some(Holiday::new(date, name, entry_hours(entry, DEFAULT_HOLIDAY_HOURS)))
        })
        .collect()
}

pub fn filter_holidays_in_window(holidays: Vec<Holiday>, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
    holidays
        .into_iter()
        .filter(|holiday| holiday.in_window(start, end))
        .collect()
}

/// Federal holidays for a window, each at `hours` base credit
pub fn federal_holiday_list(start: NaiveDate, end: NaiveDate, hours: f64) -> Result<Vec<Holiday>, ForecastError> {
    if start > end {
        return Err(ForecastError::InvalidWindow { start, end });
    }

    Ok(federal_holidays(start, end)
        .into_iter()
        .map(|(date, name)| Holiday::new(date, name, hours))
        .collect())
}

// ============================================================================
// DEDUCTION
// ============================================================================

/// Hours a holiday takes off the balance on `date`.
///
/// Nothing is deducted for a non-positive credit or for a day that was not
/// going to be worked (weekend, off-Friday). A 9-hour 9/80 day costs the
/// base credit plus one hour.
pub fn holiday_deduction_hours(date: NaiveDate, base_hours: f64, schedule: &WorkSchedule) -> f64 {
    if base_hours <= 0.0 {
        return 0.0;
    }

    let worked = workday_hours(date, schedule);
    if worked <= 0.0 {
        return 0.0;
    }

    if schedule.is_compressed() && worked > STANDARD_DAY_HOURS {
        base_hours + LONG_DAY_TOP_UP_HOURS
    } else {
        base_hours
    }
}

/// Deducted hours by date; zero-deduction holidays are left out and
/// same-date holidays add up
pub fn deductions_by_date(holidays: &[Holiday], schedule: &WorkSchedule) -> BTreeMap<NaiveDate, f64> {
    let mut deductions = BTreeMap::new();

    for holiday in holidays {
        let hours = holiday_deduction_hours(holiday.date, holiday.hours, schedule);
        if hours != 0.0 {
            *deductions.entry(holiday.date).or_insert(0.0) += hours;
        }
    }

    deductions
}

// ============================================================================
// TESTS
// ============================================================================
