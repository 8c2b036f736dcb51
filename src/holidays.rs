// 🇺🇸 Holiday Calendar - U.S. federal holidays as data
// Fixed-date holidays move to their observed weekday; floating holidays are
// defined by weekday rules and never land on a weekend.

use crate::calendar::{last_weekday, nth_weekday, observed_date};
use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::BTreeMap;

// ============================================================================
// HOLIDAY RULES
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HolidayRule {
    /// Same month/day every year, shifted off weekends
    Fixed { month: u32, day: u32 },
    /// n-th weekday of the month (1-based)
    NthWeekday { month: u32, weekday: Weekday, n: u32 },
    /// Last weekday of the month
    LastWeekday { month: u32, weekday: Weekday },
}

impl HolidayRule {
    /// Date this rule resolves to in `year`, observance already applied
    pub fn resolve(&self, year: i32) -> Option<NaiveDate> {
        match *self {
            HolidayRule::Fixed { month, day } => {
                NaiveDate::from_ymd_opt(year, month, day).map(observed_date)
            }
            HolidayRule::NthWeekday { month, weekday, n } => nth_weekday(year, month, weekday, n),
            HolidayRule::LastWeekday { month, weekday } => last_weekday(year, month, weekday),
        }
    }
}

/// Federal holidays: five fixed-date, six floating
pub const FEDERAL_HOLIDAYS: &[(&str, HolidayRule)] = &[
    ("New Year's Day", HolidayRule::Fixed { month: 1, day: 1 }),
    ("Juneteenth", HolidayRule::Fixed { month: 6, day: 19 }),
    ("Independence Day", HolidayRule::Fixed { month: 7, day: 4 }),
    ("Veterans Day", HolidayRule::Fixed { month: 11, day: 11 }),
    ("Christmas Day", HolidayRule::Fixed { month: 12, day: 25 }),
    (
        "Martin Luther King Jr. Day",
        HolidayRule::NthWeekday { month: 1, weekday: Weekday::Mon, n: 3 },
    ),
    (
        "Presidents' Day",
        HolidayRule::NthWeekday { month: 2, weekday: Weekday::Mon, n: 3 },
    ),
    (
        "Memorial Day",
        HolidayRule::LastWeekday { month: 5, weekday: Weekday::Mon },
    ),
    (
        "Labor Day",
        HolidayRule::NthWeekday { month: 9, weekday: Weekday::Mon, n: 1 },
    ),
    (
        "Columbus Day",
        HolidayRule::NthWeekday { month: 10, weekday: Weekday::Mon, n: 2 },
    ),
    (
        "Thanksgiving Day",
        HolidayRule::NthWeekday { month: 11, weekday: Weekday::Thu, n: 4 },
    ),
];

// ============================================================================
// CALENDAR
// ============================================================================

/// Federal holidays (observed date -> name) inside `[window_start, window_end]`.
///
/// Years one either side of the window are evaluated so that observance
/// shifts across a year boundary are caught (New Year's Day on a Saturday is
/// observed on Dec 31 of the previous year). A later year overwrites an
/// earlier one on a date collision.
pub fn federal_holidays(window_start: NaiveDate, window_end: NaiveDate) -> BTreeMap<NaiveDate, String> {
    let mut holidays = BTreeMap::new();
    if window_start > window_end {
        return holidays;
    }

    for year in (window_start.year() - 1)..=(window_end.year() + 1) {
        for (name, rule) in FEDERAL_HOLIDAYS {
            if let Some(date) = rule.resolve(year) {
                if date >= window_start && date <= window_end {
                    holidays.insert(date, (*name).to_string());
                }
            }
        }
    }

    holidays
}

// ============================================================================
// TESTS
// ============================================================================
