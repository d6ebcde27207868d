//! Display formatting for dates and file sizes.

use chrono::{DateTime, NaiveDate};

const INVALID_DATE: &str = "Invalid Date";
const SIZE_UNITS: &[&str] = &["Bytes", "KB", "MB", "GB"];

/// Format an ISO 8601 date (or RFC 3339 timestamp) as `"Mar 5, 2025"`.
///
/// Unparsable input renders as `"Invalid Date"` rather than failing.
pub fn format_date(value: &str) -> String {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.date_naive()));
    match date {
        Some(d) => d.format("%b %-d, %Y").to_string(),
        None => INVALID_DATE.to_string(),
    }
}

/// Human-readable size in base-1024 units, at most two decimals.
///
/// 0 → "0 Bytes", 1536 → "1.5 KB". Sizes beyond the gigabyte range stay in GB.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }
    let mut unit = 0;
    let mut scaled = bytes as f64;
    while scaled >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }
    let fixed = format!("{scaled:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}
