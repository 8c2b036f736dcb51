// 🔌 Request / Response - the JSON contract around the forecast engine
// Required fields are strict: a bad `next_pay_date`, `end_date` or
// `schedule` fails the whole request. Entries inside `days` and `holidays`
// are permissive: unusable ones are dropped, bad hours fall back.

use crate::calendar::{parse_date, DATE_FORMAT};
use crate::error::ForecastError;
use crate::forecast::{round2, ForecastEngine, ForecastInput, ForecastReport, PlannedEntry};
use crate::holiday_policy::{entry_date, entry_hours, federal_holiday_list, normalize_holiday_payload, Holiday};
use crate::pay_schedule::PayRecurrence;
use crate::workweek::WorkSchedule;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

// ============================================================================
// REQUEST
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRequest {
    #[serde(default)]
    pub pto_today: f64,

    #[serde(default)]
    pub accrual_rate: f64,

    #[serde(default = "default_schedule")]
    pub schedule: String,

    pub next_pay_date: String,

    pub end_date: String,

    #[serde(default)]
    pub include_weekends: bool,

    #[serde(default)]
    pub nine_eighty: bool,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nine_eighty_anchor: Option<String>,

    /// `{date, hours}` entries, parsed leniently
    #[serde(default)]
    pub days: Vec<Value>,

    /// `{date, name?, hours?}` entries; absent or null means "use the
    /// federal calendar", an empty array means "no holidays"
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holidays: Option<Vec<Value>>,

    /// Window for the federal holiday list returned when `holidays` is
    /// absent (a front-end seeds its editor from it). Parsed leniently and
    /// never widens the deductions, which stay within `[today, end_date]`.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_window_start: Option<String>,

    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub holiday_window_end: Option<String>,
}

fn default_schedule() -> String {
    PayRecurrence::default().name().to_string()
}

fn required_date(field: &str, value: &str) -> Result<NaiveDate, ForecastError> {
    parse_date(value).ok_or_else(|| ForecastError::invalid_date(field, value))
}

/// Planned days with a usable date; non-numeric hours count as 0
pub fn normalize_planned_payload(entries: &[Value]) -> Vec<PlannedEntry> {
    entries
        .iter()
        .filter_map(|entry| match entry_date(entry) {
            Some(date) => Some(PlannedEntry::new(date, entry_hours(entry, 0.0))),
            None => {
                warn!(entry = %entry, "dropping planned day without a valid date");
                None
            }
        })
        .collect()
}

impl ForecastRequest {
    /// Validate and convert into engine input
    pub fn to_input(&self) -> Result<ForecastInput, ForecastError> {
        let pay_schedule: PayRecurrence = self.schedule.parse()?;
        let next_pay_date = required_date("next_pay_date", &self.next_pay_date)?;
        let end_date = required_date("end_date", &self.end_date)?;

        let anchor = match self.nine_eighty_anchor.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(value) => Some(required_date("nine_eighty_anchor", value)?),
        };

        let work_schedule = if self.nine_eighty {
            WorkSchedule::nine_eighty(anchor)
        } else {
            WorkSchedule::standard()
        };

        Ok(ForecastInput {
            opening_balance: self.pto_today,
            accrual_rate: self.accrual_rate,
            pay_schedule,
            next_pay_date,
            end_date,
            work_schedule,
            include_weekends: self.include_weekends,
            planned: normalize_planned_payload(&self.days),
            holidays: self.holidays.as_deref().map(normalize_holiday_payload),
        })
    }

    /// Holiday seed window; only used when no holidays are supplied
    pub fn seed_window(&self) -> Option<(NaiveDate, NaiveDate)> {
        if self.holidays.is_some() {
            return None;
        }
        let start = self.holiday_window_start.as_deref()?;
        let end = self.holiday_window_end.as_deref()?;

        match (parse_date(start), parse_date(end)) {
            (Some(start), Some(end)) if start <= end => Some((start, end)),
            _ => {
                warn!(start, end, "ignoring unusable holiday window");
                None
            }
        }
    }

    /// Validate, run the engine and shape the response
    pub fn run(&self, engine: &ForecastEngine, today: NaiveDate) -> Result<ForecastResponse, ForecastError> {
        let input = self.to_input()?;
        let report = engine.forecast(&input, today);
        let mut response = ForecastResponse::from(&report);

        if let Some((start, end)) = self.seed_window() {
            let seeded = federal_holiday_list(start, end, engine.default_holiday_hours)?;
            response.holidays = seeded.iter().map(HolidayResponse::from).collect();
        }

        Ok(response)
    }
}

// ============================================================================
// RESPONSE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HolidayResponse {
    pub date: String,
    pub name: String,
    pub hours: f64,
}

impl From<&Holiday> for HolidayResponse {
    fn from(holiday: &Holiday) -> Self {
        HolidayResponse {
            date: holiday.date.format(DATE_FORMAT).to_string(),
            name: holiday.name.clone(),
            hours: holiday.hours,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    /// ISO date -> balance rounded to 2 decimals
    pub balances: BTreeMap<String, f64>,
    pub accrued_total: f64,
    pub planned_total: f64,
    pub holiday_total: f64,
    pub holidays: Vec<HolidayResponse>,
}

impl From<&ForecastReport> for ForecastResponse {
    fn from(report: &ForecastReport) -> Self {
        ForecastResponse {
            balances: report
                .timeline
                .iter()
                .map(|day| (day.date.format(DATE_FORMAT).to_string(), round2(day.balance)))
                .collect(),
            accrued_total: round2(report.totals.accrued),
            planned_total: round2(report.totals.planned_consumed),
            holiday_total: round2(report.totals.holiday_consumed),
            holidays: report.holidays.iter().map(HolidayResponse::from).collect(),
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn request(value: Value) -> ForecastRequest {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_defaults() {
        let req = request(json!({"next_pay_date": "2024-01-05", "end_date": "2024-02-01"}));
        assert_eq!(req.pto_today, 0.0);
        assert_eq!(req.accrual_rate, 0.0);
        assert_eq!(req.schedule, "biweekly");
        assert!(!req.include_weekends);
        assert!(!req.nine_eighty);
        assert!(req.days.is_empty());
        assert!(req.holidays.is_none());

        let input = req.to_input().unwrap();
        assert_eq!(input.pay_schedule, PayRecurrence::Biweekly);
        assert_eq!(input.work_schedule, WorkSchedule::standard());
        assert!(input.holidays.is_none());
    }

    #[test]
    fn test_missing_required_date_is_rejected_by_serde() {
        let result: Result<ForecastRequest, _> = serde_json::from_value(json!({"end_date": "2024-02-01"}));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_numeric_balance_is_rejected() {
        let result: Result<ForecastRequest, _> = serde_json::from_value(json!({
            "pto_today": "lots",
            "next_pay_date": "2024-01-05",
            "end_date": "2024-02-01"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unparseable_required_dates_fail() {
        let req = request(json!({"next_pay_date": "01/05/2024", "end_date": "2024-02-01"}));
        assert_eq!(
            req.to_input().unwrap_err(),
            ForecastError::invalid_date("next_pay_date", "01/05/2024")
        );

        let req = request(json!({"next_pay_date": "2024-01-05", "end_date": "2024-02-30"}));
        assert_eq!(
            req.to_input().unwrap_err(),
            ForecastError::invalid_date("end_date", "2024-02-30")
        );
    }

    #[test]
    fn test_unknown_schedule_fails() {
        let req = request(json!({
            "schedule": "quarterly",
            "next_pay_date": "2024-01-05",
            "end_date": "2024-02-01"
        }));
        assert_eq!(
            req.to_input().unwrap_err(),
            ForecastError::UnknownSchedule("quarterly".to_string())
        );
    }

    #[test]
    fn test_nine_eighty_anchor_handling() {
        let req = request(json!({
            "next_pay_date": "2024-05-03",
            "end_date": "2024-06-01",
            "nine_eighty": true,
            "nine_eighty_anchor": "2024-05-15"
        }));
        let input = req.to_input().unwrap();
        assert!(input.work_schedule.is_compressed());
        assert_eq!(input.work_schedule.anchor_friday(), Some(ymd(2024, 5, 17)));

        let req = request(json!({
            "next_pay_date": "2024-05-03",
            "end_date": "2024-06-01",
            "nine_eighty": true,
            "nine_eighty_anchor": ""
        }));
        assert_eq!(req.to_input().unwrap().work_schedule.anchor_friday(), None);

        let req = request(json!({
            "next_pay_date": "2024-05-03",
            "end_date": "2024-06-01",
            "nine_eighty": true,
            "nine_eighty_anchor": "soon"
        }));
        assert!(req.to_input().is_err());

        // Anchor without 9/80 is ignored
        let req = request(json!({
            "next_pay_date": "2024-05-03",
            "end_date": "2024-06-01",
            "nine_eighty_anchor": "2024-05-03"
        }));
        assert_eq!(req.to_input().unwrap().work_schedule, WorkSchedule::standard());
    }

    #[test]
    fn test_planned_payload_is_lenient() {
        let entries = vec![
            json!({"date": "2024-01-08", "hours": 8}),
            json!({"date": "2024-01-09", "hours": "4"}),
            json!({"date": "2024-01-10", "hours": "all day"}),
            json!({"date": "2024-01-11"}),
            json!({"hours": 8}),
            json!({"date": "not-a-date", "hours": 8}),
        ];
        let planned = normalize_planned_payload(&entries);
        assert_eq!(
            planned,
            vec![
                PlannedEntry::new(ymd(2024, 1, 8), 8.0),
                PlannedEntry::new(ymd(2024, 1, 9), 4.0),
                PlannedEntry::new(ymd(2024, 1, 10), 0.0),
                PlannedEntry::new(ymd(2024, 1, 11), 0.0),
            ]
        );
    }

    #[test]
    fn test_explicit_empty_holidays_disable_federal_calendar() {
        let req = request(json!({
            "next_pay_date": "2024-01-05",
            "end_date": "2024-02-01",
            "holidays": []
        }));
        assert_eq!(req.to_input().unwrap().holidays, Some(Vec::new()));

        let req = request(json!({
            "next_pay_date": "2024-01-05",
            "end_date": "2024-02-01",
            "holidays": null
        }));
        assert!(req.to_input().unwrap().holidays.is_none());
    }

    #[test]
    fn test_holiday_window_seeds_the_full_year() {
        let req = request(json!({
            "pto_today": 40,
            "next_pay_date": "2024-05-15",
            "end_date": "2024-06-30",
            "holidays": null,
            "holiday_window_start": "2024-01-01",
            "holiday_window_end": "2024-12-31"
        }));
        let response = req.run(&ForecastEngine::new(), ymd(2024, 5, 1)).unwrap();

        assert_eq!(response.holidays.len(), 11);
        assert_eq!(response.holidays[0].date, "2024-01-01");
        assert_eq!(response.holidays[10].name, "Christmas Day");
        // Only Memorial Day and Juneteenth fall inside [today, end_date]
        assert_eq!(response.holiday_total, 16.0);
        assert_eq!(response.balances["2024-06-30"], 24.0);
    }

    #[test]
    fn test_holiday_window_ignored_when_unusable_or_holidays_supplied() {
        let base = json!({
            "next_pay_date": "2024-05-15",
            "end_date": "2024-06-30",
            "holiday_window_start": "2024-12-31",
            "holiday_window_end": "2024-01-01"
        });
        assert_eq!(request(base.clone()).seed_window(), None);
        let response = request(base).run(&ForecastEngine::new(), ymd(2024, 5, 1)).unwrap();
        assert_eq!(response.holidays.len(), 2);

        let req = request(json!({
            "next_pay_date": "2024-05-15",
            "end_date": "2024-06-30",
            "holiday_window_start": "2024-01-01",
            "holiday_window_end": "later"
        }));
        assert_eq!(req.seed_window(), None);

        let req = request(json!({
            "next_pay_date": "2024-05-15",
            "end_date": "2024-06-30",
            "holidays": [],
            "holiday_window_start": "2024-01-01",
            "holiday_window_end": "2024-12-31"
        }));
        assert_eq!(req.seed_window(), None);
        assert!(req.run(&ForecastEngine::new(), ymd(2024, 5, 1)).unwrap().holidays.is_empty());
    }

    #[test]
    fn test_response_rounds_at_the_boundary() {
        let req = request(json!({
            "pto_today": 10.0,
            "accrual_rate": 1.0 / 3.0,
            "schedule": "weekly",
            "next_pay_date": "2024-01-01",
            "end_date": "2024-01-21",
            "holidays": []
        }));
        let response = req.run(&ForecastEngine::new(), ymd(2024, 1, 1)).unwrap();

        assert_eq!(response.balances.len(), 21);
        assert_eq!(response.balances.get("2024-01-01"), Some(&10.33));
        assert_eq!(response.balances.get("2024-01-08"), Some(&10.67));
        // Accumulated unrounded, three accruals land on a whole hour
        assert_eq!(response.balances.get("2024-01-15"), Some(&11.0));
        assert_eq!(response.accrued_total, 1.0);
        assert!(response.holidays.is_empty());
    }

    #[test]
    fn test_response_serializes_contract_keys() {
        let req = request(json!({
            "next_pay_date": "2024-01-05",
            "end_date": "2024-01-02",
        }));
        let response = req.run(&ForecastEngine::new(), ymd(2024, 1, 1)).unwrap();
        let value = serde_json::to_value(&response).unwrap();

        for key in ["balances", "accrued_total", "planned_total", "holiday_total", "holidays"] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["holidays"][0]["date"], "2024-01-01");
        assert_eq!(value["holidays"][0]["name"], "New Year's Day");
        assert_eq!(value["holidays"][0]["hours"], 8.0);
        assert_eq!(value["balances"]["2024-01-01"], -8.0);
    }
}
