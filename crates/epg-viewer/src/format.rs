//! Presentation helpers for program timestamps.
//!
//! The API sends timestamps as strings. Anything that does not parse is
//! rendered as `-` rather than failing the row. A naive wall-clock time that
//! falls in a daylight-saving gap is shifted forward by the gap, the same as
//! the browser's `Date` does.

use std::fmt::Display;

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};

/// Placeholder for values that cannot be rendered.
pub const MISSING: &str = "-";

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Longest daylight-saving jump searched when resolving a skipped local time.
const MAX_GAP_MINUTES: i64 = 120;

/// Parse an API timestamp. Strings without an offset are read in `tz`;
/// a bare date is UTC midnight.
pub fn parse_timestamp_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return resolve_local(&naive, tz);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Earliest instant for a wall-clock time in `tz`. Inside a gap the time is
/// moved forward by the gap's length.
fn resolve_local<Tz: TimeZone>(naive: &NaiveDateTime, tz: &Tz) -> Option<DateTime<Utc>> {
    if let Some(dt) = tz.from_local_datetime(naive).earliest() {
        return Some(dt.with_timezone(&Utc));
    }
    // Offset in force just before the gap, applied to the skipped time.
    (1..=MAX_GAP_MINUTES).find_map(|back| {
        let before = *naive - Duration::minutes(back);
        let offset = tz.from_local_datetime(&before).latest()?.offset().fix();
        Some((*naive - offset).and_utc())
    })
}

/// Time of day (`HH:MM`, 24-hour) of `raw` as seen in `tz`.
pub fn format_time_in<Tz>(raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    match parse_timestamp_in(raw, tz) {
        Some(dt) => dt.with_timezone(tz).format("%H:%M").to_string(),
        None => MISSING.to_string(),
    }
}

/// Time of day in the browser's local zone.
pub fn format_time(raw: &str) -> String {
    format_time_in(raw, &Local)
}

/// `start - end` range as shown in the table and the details dialog.
pub fn time_range_in<Tz>(start: &str, end: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    format!("{} - {}", format_time_in(start, tz), format_time_in(end, tz))
}

/// Human readable length of a program, e.g. `1h 5m` or `45 min`.
pub fn duration_str_in<Tz: TimeZone>(start: &str, end: &str, tz: &Tz) -> String {
    let (Some(start), Some(end)) = (parse_timestamp_in(start, tz), parse_timestamp_in(end, tz))
    else {
        return MISSING.to_string();
    };
    let diff_ms = (end - start).num_milliseconds();
    if diff_ms < 0 {
        return MISSING.to_string();
    }
    format_minutes((diff_ms + 30_000) / 60_000)
}

/// Duration in the browser's local zone.
pub fn duration_str(start: &str, end: &str) -> String {
    duration_str_in(start, end, &Local)
}

fn format_minutes(minutes: i64) -> String {
    let h = minutes / 60;
    let m = minutes % 60;
    if h > 0 {
        format!("{h}h {m}m")
    } else {
        format!("{m} min")
    }
}
