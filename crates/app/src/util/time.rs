use chrono::{Duration, Local, NaiveDate, SecondsFormat, Utc};

use crate::error::{AppError, Result};

pub fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Current date in the server's timezone; day boundaries are local and
/// consistent within a deployment.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_day(day: NaiveDate) -> String {
    day.format("%Y-%m-%d").to_string()
}

pub fn parse_day(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| AppError::Message(format!("invalid stored date {}: {}", value, err)))
}

pub fn window_start(today: NaiveDate, window_days: u32) -> NaiveDate {
    today - Duration::days(window_days as i64)
}
