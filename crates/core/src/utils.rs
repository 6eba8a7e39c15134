use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

/// Format the store uses for `last_modified` and `publish_date`
pub const STORE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const DISPLAY_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Current local time in the store's timestamp format
pub fn now_timestamp() -> String {
    Local::now().format(STORE_TIMESTAMP_FORMAT).to_string()
}

/// Formats a stored timestamp for display on a card.
/// Store timestamps are local wall-clock time and are shown as-is; timestamps
/// carrying an offset are converted to the local timezone.
pub fn format_timestamp_for_display(timestamp_str: &str) -> String {
    let timestamp_str = timestamp_str.trim();
    if timestamp_str.is_empty() {
        return String::new();
    }

    // SQLite datetime format (e.g., "2025-12-16 10:30:00")
    if let Ok(naive_dt) = NaiveDateTime::parse_from_str(timestamp_str, STORE_TIMESTAMP_FORMAT) {
        return naive_dt.format(DISPLAY_FORMAT).to_string();
    }

    // ISO 8601 without timezone
    if let Ok(naive_dt) = NaiveDateTime::parse_from_str(timestamp_str, "%Y-%m-%dT%H:%M:%S") {
        return naive_dt.format(DISPLAY_FORMAT).to_string();
    }

    if let Ok(date) = NaiveDate::parse_from_str(timestamp_str, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(timestamp_str) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }

    // Anything else dateparser understands, e.g. "May 2, 2024 10:00 pm"
    if let Ok(dt) = dateparser::parse(timestamp_str) {
        return dt.with_timezone(&Local).format(DISPLAY_FORMAT).to_string();
    }

    timestamp_str.to_string()
}
