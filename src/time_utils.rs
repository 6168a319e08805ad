use chrono::{Duration, Local, LocalResult, NaiveDate, NaiveTime, TimeZone};

/// Calendar date layout used by the provider and by the date pickers.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Epoch milliseconds of local midnight at the start of `date`.
///
/// When a DST jump skips midnight the first existing instant of the day is used.
pub fn local_midnight_millis(date: NaiveDate) -> i64 {
    let midnight = date.and_time(NaiveTime::MIN);
    match Local.from_local_datetime(&midnight) {
        LocalResult::Single(dt) => dt.timestamp_millis(),
        LocalResult::Ambiguous(earliest, _) => earliest.timestamp_millis(),
        LocalResult::None => Local
            .from_local_datetime(&(midnight + Duration::hours(1)))
            .earliest()
            .map(|dt| dt.timestamp_millis())
            .unwrap_or_else(|| midnight.and_utc().timestamp_millis()),
    }
}

/// Local calendar date containing the instant `millis`.
pub fn calendar_date(millis: i64) -> Option<NaiveDate> {
    Local.timestamp_millis_opt(millis).earliest().map(|dt| dt.date_naive())
}

/// `YYYY-MM-DD` label for an instant, empty when the instant is out of range.
pub fn format_date_label(millis: i64) -> String {
    calendar_date(millis)
        .map(|date| date.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
