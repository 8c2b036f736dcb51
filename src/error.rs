// Forecast errors - caller-input contract violations
// Anything recoverable (a malformed planned day, a holiday without a name)
// is skipped or defaulted where it is parsed; only these abort a forecast.

use chrono::NaiveDate;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ForecastError {
    /// A date field that must be present could not be parsed as YYYY-MM-DD
    #[error("invalid date for `{field}`: {value:?} (expected YYYY-MM-DD)")]
    InvalidDate { field: String, value: String },

    /// Pay recurrence outside weekly/biweekly/monthly/semimonthly
    #[error("unknown pay schedule {0:?} (expected weekly, biweekly, monthly or semimonthly)")]
    UnknownSchedule(String),

    #[error("window start {start} is after window end {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },
}

impl ForecastError {
    pub fn invalid_date(field: &str, value: &str) -> Self {
        ForecastError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        }
    }
}
