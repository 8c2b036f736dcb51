// 📅 Calendar Math - primitive date helpers
// Weekday arithmetic shared by the holiday calendar, the pay schedule and
// the workweek model. Everything here is a pure function of its arguments.

use chrono::{Datelike, Days, NaiveDate, Weekday};

/// ISO `YYYY-MM-DD`, no timezone
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO calendar date, tolerating surrounding whitespace
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Last calendar day of `month` in `year` (Feb 29 in leap years)
pub fn last_day_of_month(year: i32, month: u32) -> Option<NaiveDate> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()
}

/// The n-th occurrence (1-based) of `weekday` in the month.
///
/// No bounds check against the month length: asking for a 5th Monday that
/// does not exist yields a date in the following month. Callers only ask for
/// occurrences that always exist (e.g. 4th Thursday of November).
pub fn nth_weekday(year: i32, month: u32, weekday: Weekday, n: u32) -> Option<NaiveDate> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let offset = (weekday.num_days_from_monday() + 7 - first.weekday().num_days_from_monday()) % 7;
    let weeks = u64::from(n.saturating_sub(1));
    first.checked_add_days(Days::new(u64::from(offset) + 7 * weeks))
}

/// Last occurrence of `weekday` in the month, walking back from the last day
pub fn last_weekday(year: i32, month: u32, weekday: Weekday) -> Option<NaiveDate> {
    let mut day = last_day_of_month(year, month)?;
    while day.weekday() != weekday {
        day = day.pred_opt()?;
    }
    Some(day)
}

/// U.S. federal observance rule: Saturday -> Friday before, Sunday -> Monday after
pub fn observed_date(date: NaiveDate) -> NaiveDate {
    match date.weekday() {
        Weekday::Sat => date.pred_opt().unwrap_or(date),
        Weekday::Sun => date.succ_opt().unwrap_or(date),
        _ => date,
    }
}

// ============================================================================
// TESTS
// ============================================================================
