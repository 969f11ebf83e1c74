use chrono::{Local, NaiveDate};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn current_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("System time is before Unix epoch")
        .as_secs() as i64
}

/// Current calendar date in the server's local timezone.
///
/// Used when an exercise is logged without an explicit date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Render a date as a calendar string: weekday, month, day, year.
///
/// Matches the `Sun Jan 01 2023` shape clients of the original API expect.
pub fn to_date_string(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}
