//! Date helpers shared by rate lookups and error messages

use chrono::{DateTime, NaiveDate, Utc};

/// en-US short date, e.g. `1/15/2023`.
pub const DEFAULT_DATE_FORMAT: &str = "%-m/%-d/%Y";

/// Returns true when `probe` falls in the half-open window `[start, end)`.
pub fn in_range(probe: DateTime<Utc>, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
    start <= probe && probe < end
}

pub fn format(date: DateTime<Utc>, fmt: &str) -> String {
    date.format(fmt).to_string()
}

/// Midnight UTC of a calendar date.
pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(chrono::NaiveTime::MIN).and_utc()
}
