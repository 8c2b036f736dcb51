// 📈 Forecast Engine - project the PTO balance day by day
// Walks [today, end_date] once:
//   balance(d) = balance(d-1) + accrual(d) - planned(d) - holiday(d)
// Values are kept unrounded; rounding happens when a response is built.

use crate::calendar::is_weekend;
use crate::holiday_policy::{deductions_by_date, filter_holidays_in_window, Holiday, DEFAULT_HOLIDAY_HOURS};
use crate::holidays::federal_holidays;
use crate::pay_schedule::{build_pay_dates, PayRecurrence};
use crate::workweek::WorkSchedule;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

// ============================================================================
// INPUT
// ============================================================================

/// Planned time off; entries on the same date add up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlannedEntry {
    pub date: NaiveDate,
    pub hours: f64,
}

impl PlannedEntry {
    pub fn new(date: NaiveDate, hours: f64) -> Self {
        PlannedEntry { date, hours }
    }
}

#[derive(Debug, Clone)]
pub struct ForecastInput {
    pub opening_balance: f64,
    /// Hours added on every pay date (negative rates are applied as given)
    pub accrual_rate: f64,
    pub pay_schedule: PayRecurrence,
    pub next_pay_date: NaiveDate,
    pub end_date: NaiveDate,
    pub work_schedule: WorkSchedule,
    /// Count planned hours on Saturdays and Sundays too
    pub include_weekends: bool,
    pub planned: Vec<PlannedEntry>,
    /// Already-normalized holidays; `None` falls back to the federal calendar
    pub holidays: Option<Vec<Holiday>>,
}

// ============================================================================
// OUTPUT
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ForecastTotals {
    pub accrued: f64,
    pub planned_consumed: f64,
    pub holiday_consumed: f64,
}

impl ForecastTotals {
    pub fn net_change(&self) -> f64 {
        self.accrued - self.planned_consumed - self.holiday_consumed
    }
}

/// One day of the timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub pay_date: bool,
    pub accrued: f64,
    pub planned: f64,
    pub holiday: f64,
    /// Running balance at the end of the day
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastReport {
    pub opening_balance: f64,
    /// Exactly one entry per day of the window, strictly increasing dates
    pub timeline: Vec<ForecastDay>,
    pub totals: ForecastTotals,
    /// Holidays resolved for the window, sorted by date
    pub holidays: Vec<Holiday>,
}

impl ForecastReport {
    pub fn balances(&self) -> BTreeMap<NaiveDate, f64> {
        self.timeline.iter().map(|day| (day.date, day.balance)).collect()
    }

    pub fn balance_on(&self, date: NaiveDate) -> Option<f64> {
        self.timeline
            .binary_search_by(|day| day.date.cmp(&date))
            .ok()
            .map(|i| self.timeline[i].balance)
    }

    /// Balance on the last day, or the opening balance for an empty window
    pub fn closing_balance(&self) -> f64 {
        self.timeline.last().map_or(self.opening_balance, |day| day.balance)
    }

    /// Lowest running balance and the first day it is reached
    pub fn lowest_balance(&self) -> Option<(NaiveDate, f64)> {
        self.timeline.iter().fold(None, |lowest, day| match lowest {
            Some((_, balance)) if balance <= day.balance => lowest,
            _ => Some((day.date, day.balance)),
        })
    }

    pub fn summary(&self) -> String {
        match (self.timeline.first(), self.timeline.last()) {
            (Some(first), Some(last)) => format!(
                "Forecast {} → {}: {} days, accrued {:.2}h, planned {:.2}h, holidays {:.2}h, net {:+.2}h, closing balance {:.2}h",
                first.date,
                last.date,
                self.timeline.len(),
                self.totals.accrued,
                self.totals.planned_consumed,
                self.totals.holiday_consumed,
                self.totals.net_change(),
                self.closing_balance()
            ),
            _ => format!("Forecast window is empty, balance stays at {:.2}h", self.opening_balance),
        }
    }
}

/// Round to cents for presentation
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// PLANNED HOURS
// ============================================================================

/// Sum planned hours per date inside `[start, end]`, skipping weekend dates
/// unless `include_weekends` is set
pub fn build_planned_hours(
    entries: &[PlannedEntry],
    start: NaiveDate,
    end: NaiveDate,
    include_weekends: bool,
) -> BTreeMap<NaiveDate, f64> {
    let mut planned = BTreeMap::new();

    for entry in entries {
        if entry.date < start || entry.date > end {
            continue;
        }
        if !include_weekends && is_weekend(entry.date) {
            continue;
        }
        *planned.entry(entry.date).or_insert(0.0) += entry.hours;
    }

    planned
}

// ============================================================================
// FORECAST ENGINE
// ============================================================================

pub struct ForecastEngine {
    /// Base credit given to federal-calendar holidays
    pub default_holiday_hours: f64,
}

impl ForecastEngine {
    pub fn new() -> Self {
        ForecastEngine {
            default_holiday_hours: DEFAULT_HOLIDAY_HOURS,
        }
    }

    pub fn with_default_holiday_hours(hours: f64) -> Self {
        ForecastEngine {
            default_holiday_hours: hours,
        }
    }

    /// Holidays that apply to `[start, end]`
    pub fn resolve_holidays(&self, supplied: Option<&[Holiday]>, start: NaiveDate, end: NaiveDate) -> Vec<Holiday> {
        let mut holidays = match supplied {
            Some(holidays) => filter_holidays_in_window(holidays.to_vec(), start, end),
            None => federal_holidays(start, end)
                .into_iter()
                .map(|(date, name)| Holiday::new(date, name, self.default_holiday_hours))
                .collect(),
        };
        holidays.sort_by_key(|holiday| holiday.date);
        holidays
    }

    /// Project the balance from `today` through `input.end_date`
    pub fn forecast(&self, input: &ForecastInput, today: NaiveDate) -> ForecastReport {
        let window_start = today;
        let window_end = input.end_date;

        let pay_dates = build_pay_dates(input.next_pay_date, window_end, input.pay_schedule);
        let planned = build_planned_hours(&input.planned, window_start, window_end, input.include_weekends);
        let holidays = self.resolve_holidays(input.holidays.as_deref(), window_start, window_end);
        let deductions = deductions_by_date(&holidays, &input.work_schedule);

        debug!(
            start = %window_start,
            end = %window_end,
            schedule = %input.pay_schedule,
            pay_dates = pay_dates.len(),
            planned_days = planned.len(),
            holidays = holidays.len(),
            "forecast inputs resolved"
        );

        let mut balance = input.opening_balance;
        let mut totals = ForecastTotals::default();
        let mut timeline = Vec::new();

        for date in window_start.iter_days().take_while(|date| *date <= window_end) {
            let pay_date = pay_dates.contains(&date);
            let accrued = if pay_date { input.accrual_rate } else { 0.0 };
            let planned_hours = planned.get(&date).copied().unwrap_or(0.0);
            let holiday_hours = deductions.get(&date).copied().unwrap_or(0.0);

            balance += accrued;
            balance -= planned_hours;
            balance -= holiday_hours;

            totals.accrued += accrued;
            totals.planned_consumed += planned_hours;
            totals.holiday_consumed += holiday_hours;

            timeline.push(ForecastDay {
                date,
                pay_date,
                accrued,
                planned: planned_hours,
                holiday: holiday_hours,
                balance,
            });
        }

        debug!(
            days = timeline.len(),
            accrued = totals.accrued,
            planned = totals.planned_consumed,
            holiday = totals.holiday_consumed,
            "forecast complete"
        );

        ForecastReport {
            opening_balance: input.opening_balance,
            timeline,
            totals,
            holidays,
        }
    }
}

impl Default for ForecastEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================
