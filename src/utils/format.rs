use chrono::{Local, TimeZone};

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a millisecond Unix timestamp in local time.
///
/// Falls back to the raw number when the value is outside chrono's range.
pub fn format_timestamp(timestamp_ms: i64, fmt: &str) -> String {
    match Local.timestamp_millis_opt(timestamp_ms).single() {
        Some(datetime) => datetime.format(fmt).to_string(),
        None => timestamp_ms.to_string(),
    }
}
