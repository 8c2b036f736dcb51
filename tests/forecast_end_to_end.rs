use chrono::NaiveDate;
use pto_forecast::{ForecastEngine, ForecastRequest, ForecastResponse};
use serde_json::{json, Value};

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn run(payload: Value, today: NaiveDate) -> ForecastResponse {
    let request: ForecastRequest = serde_json::from_value(payload).unwrap();
    request.run(&ForecastEngine::new(), today).unwrap()
}

#[test]
fn biweekly_accrual_without_holidays() {
    let response = run(
        json!({
            "pto_today": 0,
            "accrual_rate": 40,
            "schedule": "biweekly",
            "next_pay_date": "2024-01-05",
            "end_date": "2024-02-01",
            "holidays": []
        }),
        ymd(2024, 1, 1),
    );

    assert_eq!(response.balances.len(), 32);
    assert_eq!(response.balances["2024-01-04"], 0.0);
    assert_eq!(response.balances["2024-01-05"], 40.0);
    assert_eq!(response.balances["2024-01-18"], 40.0);
    assert_eq!(response.balances["2024-01-19"], 80.0);
    assert_eq!(response.balances["2024-02-01"], 80.0);
    assert_eq!(response.accrued_total, 80.0);
    assert_eq!(response.planned_total, 0.0);
    assert_eq!(response.holiday_total, 0.0);
}

#[test]
fn end_date_on_a_pay_date_is_inclusive() {
    let response = run(
        json!({
            "accrual_rate": 40,
            "next_pay_date": "2024-01-05",
            "end_date": "2024-02-02",
            "holidays": []
        }),
        ymd(2024, 1, 1),
    );

    assert_eq!(response.balances["2024-02-02"], 120.0);
    assert_eq!(response.accrued_total, 120.0);
}

#[test]
fn nine_eighty_schedule_with_planned_days_and_federal_holidays() {
    let response = run(
        json!({
            "pto_today": 80,
            "accrual_rate": 6.15,
            "schedule": "semimonthly",
            "next_pay_date": "2024-05-15",
            "end_date": "2024-06-30",
            "nine_eighty": true,
            "nine_eighty_anchor": "2024-05-03",
            "days": [
                {"date": "2024-05-20", "hours": 9},
                {"date": "2024-05-20", "hours": 0.5},
                {"date": "2024-05-25", "hours": 8},
                {"date": "garbage", "hours": 8}
            ]
        }),
        ymd(2024, 5, 1),
    );

    // Pay dates: May 15, May 31, Jun 15, Jun 30
    assert_eq!(response.accrued_total, 24.6);
    // Saturday entry dropped, same-day entries summed
    assert_eq!(response.planned_total, 9.5);

    // Memorial Day (Mon May 27, 9-hour day) and Juneteenth (Wed Jun 19)
    let names: Vec<_> = response.holidays.iter().map(|h| h.name.as_str()).collect();
    assert_eq!(names, vec!["Memorial Day", "Juneteenth"]);
    assert_eq!(response.holiday_total, 18.0);

    assert_eq!(response.balances["2024-05-14"], 80.0);
    assert_eq!(response.balances["2024-05-15"], 86.15);
    assert_eq!(response.balances["2024-05-20"], 76.65);
    assert_eq!(response.balances["2024-05-27"], 67.65);
    assert_eq!(response.balances["2024-06-30"], 77.1);
}

#[test]
fn supplied_holidays_replace_the_federal_calendar() {
    let response = run(
        json!({
            "pto_today": 40,
            "next_pay_date": "2024-12-31",
            "end_date": "2024-12-31",
            "holidays": [
                {"date": "2024-12-24", "name": "Christmas Eve", "hours": 8},
                {"date": "2024-12-25"},
                {"date": "2025-01-01", "name": "Next year"},
                {"name": "no date"}
            ]
        }),
        ymd(2024, 12, 1),
    );

    assert_eq!(response.holidays.len(), 2);
    assert_eq!(response.holidays[0].name, "Christmas Eve");
    assert_eq!(response.holidays[1].name, "Holiday");
    assert_eq!(response.holidays[1].hours, 8.0);
    assert_eq!(response.holiday_total, 16.0);
    assert_eq!(response.balances["2024-12-31"], 24.0);
}

#[test]
fn invalid_end_date_fails_the_request() {
    let request: ForecastRequest = serde_json::from_value(json!({
        "next_pay_date": "2024-01-05",
        "end_date": "tomorrow"
    }))
    .unwrap();

    let err = request.run(&ForecastEngine::new(), ymd(2024, 1, 1)).unwrap_err();
    assert!(err.to_string().contains("end_date"));
}
