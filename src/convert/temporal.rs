//! Date, time and duration parsing
//!
//! Provides flexible date parsing supporting ISO 8601 formats and relative
//! dates, plus compact and spelled-out durations.

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use regex::Regex;
use std::sync::OnceLock;

/// Parse a date string into a UTC timestamp
///
/// Supports:
/// - ISO 8601 dates: "2024-01-15", "2024-01-15T10:30:00Z", "2024-01-15 10:30:00"
/// - Relative past dates: "yesterday", "1 week ago", "2 months ago"
/// - Relative future dates: "in 2 days", "3 hours from now", "tomorrow"
pub fn parse_datetime(date_str: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = parse_iso_datetime(date_str) {
        return Ok(dt);
    }

    if let Ok(dt) = parse_relative_datetime(date_str, Utc::now()) {
        return Ok(dt);
    }

    Err(format!(
        "Invalid date format: '{}'. Expected ISO 8601 (YYYY-MM-DD), past relative (e.g., 'yesterday', '1 week ago'), or future relative (e.g., 'in 2 days', '3 hours from now')",
        date_str
    ))
}

/// RFC 3339 timestamp keeping its offset
pub fn parse_fixed_offset(text: &str) -> Result<DateTime<FixedOffset>, String> {
    DateTime::parse_from_rfc3339(text.trim()).map_err(|e| e.to_string())
}

pub fn parse_naive_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d").map_err(|e| e.to_string())
}

pub fn parse_naive_time(text: &str) -> Result<NaiveTime, String> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map_err(|e| e.to_string())
}

pub fn parse_naive_datetime(text: &str) -> Result<NaiveDateTime, String> {
    let text = text.trim();
    NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S"))
        .map_err(|e| e.to_string())
}

fn parse_iso_datetime(date_str: &str) -> Result<DateTime<Utc>, String> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(dt) = date_str.parse::<DateTime<Utc>>() {
        return Ok(dt);
    }

    if let Ok(naive) = parse_naive_datetime(date_str) {
        return Ok(Utc.from_utc_datetime(&naive));
    }

    if let Ok(date) = NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
        let datetime = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| "Invalid time".to_string())?;
        return Ok(Utc.from_utc_datetime(&datetime));
    }

    Err("Not an ISO date".to_string())
}

/// Parse a relative date string against `now`
fn parse_relative_datetime(date_str: &str, now: DateTime<Utc>) -> Result<DateTime<Utc>, String> {
    let lower = date_str.trim().to_lowercase();

    match lower.as_str() {
        "now" | "today" => return Ok(now),
        "yesterday" => return shift(now, -1, "day"),
        "tomorrow" => return shift(now, 1, "day"),
        _ => {}
    }

    let parts: Vec<&str> = lower.split_whitespace().collect();

    // "N unit ago"
    if parts.len() == 3 && parts[2] == "ago" {
        let count = parse_count(parts[0])?;
        let span = parse_time_unit(parts[1], count)?;
        return now
            .checked_sub_signed(span)
            .ok_or_else(|| format!("'{}' is out of range", date_str.trim()));
    }

    // "in N unit"
    if parts.len() == 3 && parts[0] == "in" {
        let count = parse_count(parts[1])?;
        return shift(now, count, parts[2]);
    }

    // "N unit from now"
    if parts.len() == 4 && parts[2..] == ["from", "now"] {
        let count = parse_count(parts[0])?;
        return shift(now, count, parts[1]);
    }

    Err("Not a recognized relative date format".to_string())
}

fn shift(now: DateTime<Utc>, count: i64, unit: &str) -> Result<DateTime<Utc>, String> {
    let span = parse_time_unit(unit, count)?;
    now.checked_add_signed(span)
        .ok_or_else(|| format!("{} {} from now is out of range", count, unit))
}

fn parse_count(text: &str) -> Result<i64, String> {
    text.parse::<i64>()
        .map_err(|_| format!("Invalid number in relative date: '{}'", text))
}

/// Parse a time unit string and count into a chrono Duration
fn parse_time_unit(unit: &str, count: i64) -> Result<Duration, String> {
    let out_of_range = || format!("{} {} is out of range", count, unit);
    let span = match unit {
        "second" | "seconds" | "sec" | "secs" | "s" => Duration::try_seconds(count),
        "minute" | "minutes" | "min" | "mins" | "m" => Duration::try_minutes(count),
        "hour" | "hours" | "hr" | "hrs" | "h" => Duration::try_hours(count),
        "day" | "days" | "d" => Duration::try_days(count),
        "week" | "weeks" | "w" => Duration::try_weeks(count),
        // months and years are approximate
        "month" | "months" => count.checked_mul(30).and_then(Duration::try_days),
        "year" | "years" | "y" => count.checked_mul(365).and_then(Duration::try_days),
        _ => return Err(format!("Unknown time unit: '{}'", unit)),
    };
    span.ok_or_else(out_of_range)
}

fn duration_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)^\s*(?:(\d+)\s*([a-z]+)\s*)+$").expect("duration pattern is valid")
    })
}

fn duration_part() -> &'static Regex {
    static PART: OnceLock<Regex> = OnceLock::new();
    PART.get_or_init(|| Regex::new(r"(?i)(\d+)\s*([a-z]+)").expect("duration part is valid"))
}

/// Parse a duration such as "90s", "1h30m", "2 hours" or a bare number of seconds
pub fn parse_duration(text: &str) -> Result<Duration, String> {
    let trimmed = text.trim();
    if let Ok(seconds) = trimmed.parse::<i64>() {
        return Duration::try_seconds(seconds)
            .ok_or_else(|| format!("Duration '{}' is out of range", text));
    }

    if !duration_pattern().is_match(trimmed) {
        return Err(format!(
            "Invalid duration: '{}'. Expected e.g. '90s', '5m', '1h30m' or '2 hours'",
            text
        ));
    }

    let mut total = Duration::zero();
    for caps in duration_part().captures_iter(trimmed) {
        let count = parse_count(&caps[1])?;
        let part = parse_time_unit(&caps[2].to_lowercase(), count)?;
        total = total
            .checked_add(&part)
            .ok_or_else(|| format!("Duration '{}' is out of range", text))?;
    }
    Ok(total)
}

/// Same as [`parse_duration`] but rejecting negative spans
pub fn parse_std_duration(text: &str) -> Result<std::time::Duration, String> {
    parse_duration(text)?
        .to_std()
        .map_err(|_| format!("Duration '{}' is out of range", text))
}
