//! Upload time parser
//!
//! The site shows upload times in several shapes:
//! `"5 mins ago"`, `"Today 14:31"`, `"Y-day 09:12"`, `"03-14 22:05"`
//! (current year) and `"03-14 2012"`.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveDateTime, TimeZone};

const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M", "%Y-%m-%d %H:%M:%S"];
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m-%d %Y"];

/// Resolves a raw upload time to an absolute local timestamp
///
/// Relative and day-relative values are resolved against `now`. Anything
/// that cannot be parsed resolves to `now`.
pub fn parse_created(raw: &str, now: DateTime<Local>) -> DateTime<Local> {
    let raw = raw.replace('\u{a0}', " ");
    let raw = raw.trim();

    if raw.ends_with("ago") {
        return parse_relative(raw, now).unwrap_or(now);
    }

    let today = now.date_naive();
    let yesterday = today - Duration::days(1);
    let timestamp = raw
        .replace("Y-day", &yesterday.to_string())
        .replace("Today", &today.to_string());

    parse_absolute(&timestamp, now).unwrap_or(now)
}

/// `"{quantity} {unit} ago"` with seconds, minutes or hours
fn parse_relative(raw: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let mut parts = raw.split_whitespace();
    let quantity: i64 = parts.next()?.parse().ok()?;
    let unit = parts.next()?;

    let delta = if unit.starts_with("sec") {
        Duration::try_seconds(quantity)?
    } else if unit.starts_with("min") {
        Duration::try_minutes(quantity)?
    } else if unit.starts_with("hour") {
        Duration::try_hours(quantity)?
    } else {
        return None;
    };

    now.checked_sub_signed(delta)
}

fn parse_absolute(timestamp: &str, now: DateTime<Local>) -> Option<DateTime<Local>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(timestamp) {
        return Some(parsed.with_timezone(&Local));
    }

    for format in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(timestamp, format) {
            return localize(naive);
        }
    }

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(timestamp, format) {
            return localize(date.and_hms_opt(0, 0, 0)?);
        }
    }

    // "MM-DD HH:MM" means the current year
    let with_year = format!("{} {}", now.format("%Y"), timestamp);
    NaiveDateTime::parse_from_str(&with_year, "%Y %m-%d %H:%M")
        .ok()
        .and_then(localize)
}

fn localize(naive: NaiveDateTime) -> Option<DateTime<Local>> {
    Local.from_local_datetime(&naive).earliest()
}
