// 🗓️ Workweek Model - hours worked per calendar day
// Standard schedule: 8 hours Monday-Friday.
// 9/80 schedule: 9 hours Monday-Thursday, Fridays alternate between an
// 8-hour working Friday and an off-Friday. The anchor Friday is a working one.

use chrono::{Datelike, Days, NaiveDate, Weekday};

pub const STANDARD_DAY_HOURS: f64 = 8.0;
pub const COMPRESSED_DAY_HOURS: f64 = 9.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkSchedule {
    compressed: bool,
    /// Always a Friday when set (see `normalize_anchor`)
    anchor_friday: Option<NaiveDate>,
}

impl WorkSchedule {
    /// Five 8-hour days
    pub fn standard() -> Self {
        WorkSchedule::default()
    }

    /// 9/80 schedule. A non-Friday anchor is moved forward to the next Friday;
    /// without an anchor every Friday is an ordinary 8-hour day.
    pub fn nine_eighty(anchor: Option<NaiveDate>) -> Self {
        WorkSchedule {
            compressed: true,
            anchor_friday: anchor.and_then(normalize_anchor),
        }
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn anchor_friday(&self) -> Option<NaiveDate> {
        self.anchor_friday
    }

    pub fn hours_on(&self, date: NaiveDate) -> f64 {
        workday_hours(date, self)
    }
}

/// The given date if it is a Friday, else the next Friday (0-6 days ahead)
pub fn normalize_anchor(date: NaiveDate) -> Option<NaiveDate> {
    let days_ahead = (Weekday::Fri.num_days_from_monday() + 7 - date.weekday().num_days_from_monday()) % 7;
    date.checked_add_days(Days::new(u64::from(days_ahead)))
}

/// True for the Fridays that fall an odd number of whole weeks from the anchor.
///
/// Uses floor division so Fridays before the anchor keep the same alternation.
pub fn is_off_friday(date: NaiveDate, anchor_friday: NaiveDate) -> bool {
    if date.weekday() != Weekday::Fri {
        return false;
    }
    let weeks = (date - anchor_friday).num_days().div_euclid(7);
    weeks.rem_euclid(2) == 1
}

pub fn workday_hours(date: NaiveDate, schedule: &WorkSchedule) -> f64 {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => 0.0,
        _ if !schedule.compressed => STANDARD_DAY_HOURS,
        Weekday::Fri => match schedule.anchor_friday {
            Some(anchor) if is_off_friday(date, anchor) => 0.0,
            _ => STANDARD_DAY_HOURS,
        },
        _ => COMPRESSED_DAY_HOURS,
    }
}

// ============================================================================
// TESTS
// ============================================================================
