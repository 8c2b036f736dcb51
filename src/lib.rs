// PTO Forecast - Core Library
// Exposes the calendar and forecast engine for the CLI, the API server and tests

pub mod calendar;       // Calendar Math - weekday helpers, observance shift
pub mod holidays;       // Holiday Calendar - federal holiday rules
pub mod workweek;       // Workweek Model - standard and 9/80 hours
pub mod pay_schedule;   // Pay Schedule - recurrence rules
pub mod holiday_policy; // Holiday Policy - normalization and deductions
pub mod forecast;       // Forecast Engine - day-by-day balance
pub mod request;        // JSON request/response contract
pub mod error;
pub mod config;
pub mod logging;

// Re-export commonly used types
pub use calendar::{
    is_weekend, last_day_of_month, last_weekday, nth_weekday, observed_date, parse_date,
};
pub use holidays::{federal_holidays, HolidayRule, FEDERAL_HOLIDAYS};
pub use workweek::{is_off_friday, normalize_anchor, workday_hours, WorkSchedule};
pub use pay_schedule::{build_pay_dates, step_date, PayRecurrence};
pub use holiday_policy::{
    deductions_by_date, federal_holiday_list, filter_holidays_in_window,
    holiday_deduction_hours, normalize_holiday_payload, Holiday,
};
pub use forecast::{
    build_planned_hours, round2, ForecastDay, ForecastEngine, ForecastInput,
    ForecastReport, ForecastTotals, PlannedEntry,
};
pub use request::{
    normalize_planned_payload, ForecastRequest, ForecastResponse, HolidayResponse,
};
pub use error::ForecastError;
pub use config::ServerConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
