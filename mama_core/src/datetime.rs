//! Timestamp formatting and calendar-window helpers.
//!
//! Weeks run from Monday 00:00 (inclusive) to the following Monday 00:00
//! (exclusive).

use crate::{Error, Result};
use chrono::{Datelike, Duration, Local, NaiveDateTime, NaiveTime, Timelike};

/// On-disk and display format, e.g. `28/10/25 01:14`
pub const TIMESTAMP_FORMAT: &str = "%d/%m/%y %H:%M";

/// Current local wall-clock time, truncated to whole seconds
pub fn now() -> NaiveDateTime {
    truncate_to_seconds(Local::now().naive_local())
}

pub fn truncate_to_seconds(dt: NaiveDateTime) -> NaiveDateTime {
    dt.with_nanosecond(0).unwrap_or(dt)
}

pub fn format_timestamp(dt: &NaiveDateTime) -> String {
    dt.format(TIMESTAMP_FORMAT).to_string()
}

pub fn parse_timestamp(s: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s.trim(), TIMESTAMP_FORMAT)
        .map_err(|e| Error::Format(format!("Invalid timestamp '{}': {}", s.trim(), e)))
}

/// Monday 00:00 of the week containing `dt`
pub fn week_start(dt: &NaiveDateTime) -> NaiveDateTime {
    let days_from_monday = i64::from(dt.weekday().num_days_from_monday());
    let monday = dt.date() - Duration::days(days_from_monday);
    monday.and_time(NaiveTime::MIN)
}

pub fn is_same_week(ts: &NaiveDateTime, now: &NaiveDateTime) -> bool {
    let start = week_start(now);
    let end = start + Duration::days(7);
    *ts >= start && *ts < end
}

pub fn is_same_day(ts: &NaiveDateTime, now: &NaiveDateTime) -> bool {
    ts.date() == now.date()
}
