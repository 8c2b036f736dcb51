// 💵 Pay Schedule - pay dates under a recurrence rule
// Every rule strictly advances the date, so generation always terminates.
// Unrecognized schedule names are rejected at parse time.

use crate::calendar::last_day_of_month;
use crate::error::ForecastError;
use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayRecurrence {
    Weekly,
    #[default]
    Biweekly,
    /// Same day-of-month, clamped to the month's last day
    Monthly,
    /// The 15th and the last day of each month
    Semimonthly,
}

impl PayRecurrence {
    pub fn name(&self) -> &'static str {
        match self {
            PayRecurrence::Weekly => "weekly",
            PayRecurrence::Biweekly => "biweekly",
            PayRecurrence::Monthly => "monthly",
            PayRecurrence::Semimonthly => "semimonthly",
        }
    }

    /// Next pay date after `current`; None only past chrono's date range
    pub fn step(&self, current: NaiveDate) -> Option<NaiveDate> {
        match self {
            PayRecurrence::Weekly => current.checked_add_days(Days::new(7)),
            PayRecurrence::Biweekly => current.checked_add_days(Days::new(14)),
            PayRecurrence::Monthly => {
                let (year, month) = next_month(current);
                let last = last_day_of_month(year, month)?;
                NaiveDate::from_ymd_opt(year, month, current.day().min(last.day()))
            }
            PayRecurrence::Semimonthly => {
                if current.day() == 15 {
                    last_day_of_month(current.year(), current.month())
                } else {
                    let (year, month) = next_month(current);
                    NaiveDate::from_ymd_opt(year, month, 15)
                }
            }
        }
    }
}

impl fmt::Display for PayRecurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PayRecurrence {
    type Err = ForecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "weekly" => Ok(PayRecurrence::Weekly),
            "biweekly" => Ok(PayRecurrence::Biweekly),
            "monthly" => Ok(PayRecurrence::Monthly),
            "semimonthly" => Ok(PayRecurrence::Semimonthly),
            _ => Err(ForecastError::UnknownSchedule(s.to_string())),
        }
    }
}

fn next_month(date: NaiveDate) -> (i32, u32) {
    if date.month() == 12 {
        (date.year() + 1, 1)
    } else {
        (date.year(), date.month() + 1)
    }
}

pub fn step_date(current: NaiveDate, rule: PayRecurrence) -> Option<NaiveDate> {
    rule.step(current)
}

/// Pay dates from `start` through `end` inclusive; empty when `start > end`
pub fn build_pay_dates(start: NaiveDate, end: NaiveDate, rule: PayRecurrence) -> BTreeSet<NaiveDate> {
    let mut pay_dates = BTreeSet::new();
    let mut cursor = Some(start);

    while let Some(date) = cursor {
        if date > end {
            break;
        }
        pay_dates.insert(date);
        cursor = rule.step(date);
    }

    pay_dates
}

// ============================================================================
// TESTS
// ============================================================================
