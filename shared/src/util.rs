/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Render a millisecond timestamp as local `YYYY-MM-DD HH:MM:SS`.
///
/// Out-of-range values render as an empty string.
pub fn format_millis(millis: i64) -> String {
    use chrono::{Local, TimeZone};

    match Local.timestamp_millis_opt(millis).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
        None => String::new(),
    }
}
