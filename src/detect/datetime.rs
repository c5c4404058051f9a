//! Strict date/time parsing and datetime format detection.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Timelike};

use super::regexes::*;
use crate::sample::{DatePreference, FormatSampling};
use crate::table::Column;

/// Format reported for columns whose first value falls on midnight.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Format reported for columns carrying a time of day.
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const ISO_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%dT%H:%M:%S%.f",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%dT%H:%M",
    "%Y/%m/%d %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%dT%H:%M%z",
    "%Y-%m-%d %H:%M%z",
];

const ISO_DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

const MONTH_NAME_FORMATS: &[&str] = &["%b %d, %Y", "%b %d %Y", "%d %b %Y", "%d %b, %Y"];

const TIME_FORMATS: &[&str] = &[
    "%H:%M:%S%.f",
    "%H:%M",
    "%I:%M:%S %p",
    "%I:%M %p",
    "%I:%M:%S%p",
    "%I:%M%p",
];

/// Parse a value as a calendar date or timestamp.
///
/// Returns the wall-clock time; offsets are kept as written, not converted
/// to UTC. Date-only values resolve to midnight. Anything that is not a real
/// calendar value (`2024-02-30`, bare numbers, free text) yields `None`.
pub fn parse_datetime(value: &str, preference: DatePreference) -> Option<NaiveDateTime> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if DATETIME_OFFSET_PATTERN.is_match(trimmed) {
        return parse_offset_datetime(trimmed);
    }

    if DATETIME_ISO_PATTERN.is_match(trimmed) {
        return first_datetime(trimmed, ISO_DATETIME_FORMATS);
    }

    if DATE_ISO_PATTERN.is_match(trimmed) {
        return first_date(trimmed, ISO_DATE_FORMATS).map(at_midnight);
    }

    if DATE_SLASH_PATTERN.is_match(trimmed) {
        return parse_split(trimmed, |date| parse_slash_date(date, preference));
    }

    if DATE_EURO_PATTERN.is_match(trimmed) {
        return parse_split(trimmed, |date| {
            let format = if year_digits(date, '.') == 2 { "%d.%m.%y" } else { "%d.%m.%Y" };
            NaiveDate::parse_from_str(date, format).ok()
        });
    }

    if DATE_MONTH_NAME_PATTERN.is_match(trimmed) {
        return first_date(trimmed, MONTH_NAME_FORMATS).map(at_midnight);
    }

    if RFC2822_PATTERN.is_match(trimmed) {
        return DateTime::parse_from_rfc2822(trimmed)
            .ok()
            .map(|dt| dt.naive_local());
    }

    None
}

/// Returns true when every value parses as a date/time.
///
/// Stops at the first failure; there is no majority threshold.
pub fn all_datetimes<S: AsRef<str>>(values: &[S], preference: DatePreference) -> bool {
    values
        .iter()
        .all(|v| parse_datetime(v.as_ref(), preference).is_some())
}

/// Infer the display format for a datetime column.
///
/// With [`FormatSampling::First`] only the first non-missing value is
/// consulted. Returns `None` when that value does not parse.
pub fn detect_datetime_format(
    column: &Column,
    preference: DatePreference,
    sampling: FormatSampling,
) -> Option<&'static str> {
    let mut parsed = column
        .present()
        .take(sampling.values())
        .map(|cell| parse_datetime(&cell.to_text(), preference));

    let first = parsed.next()??;
    let has_time = has_time_of_day(&first) || parsed.flatten().any(|dt| has_time_of_day(&dt));

    Some(if has_time { DATETIME_FORMAT } else { DATE_FORMAT })
}

#[inline]
fn has_time_of_day(dt: &NaiveDateTime) -> bool {
    dt.hour() != 0 || dt.minute() != 0 || dt.second() != 0
}

#[inline]
fn at_midnight(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::MIN)
}

fn first_datetime(value: &str, formats: &[&str]) -> Option<NaiveDateTime> {
    formats
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
}

fn first_date(value: &str, formats: &[&str]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(value, f).ok())
}

fn parse_offset_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_local());
    }

    // `Z` without seconds is not RFC 3339; read it as UTC wall-clock time.
    if let Some(stripped) = value.strip_suffix(['Z', 'z']) {
        return first_datetime(stripped.trim_end(), ISO_DATETIME_FORMATS);
    }

    let value = expand_hour_offset(value);
    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|f| DateTime::parse_from_str(&value, f).ok())
        .map(|dt| dt.naive_local())
}

/// Pad an hour-only offset (`+05`) to `+0500`; `%z` needs the minutes.
fn expand_hour_offset(value: &str) -> Cow<'_, str> {
    let bytes = value.as_bytes();
    match bytes.len().checked_sub(3).map(|idx| &bytes[idx..]) {
        Some([b'+' | b'-', h1, h2]) if h1.is_ascii_digit() && h2.is_ascii_digit() => {
            Cow::Owned(format!("{value}00"))
        }
        _ => Cow::Borrowed(value),
    }
}

/// Parse `<date>[ <time>]` where the date part needs custom handling.
fn parse_split<F>(value: &str, parse_date: F) -> Option<NaiveDateTime>
where
    F: Fn(&str) -> Option<NaiveDate>,
{
    let (date_part, time_part) = match value.split_once(char::is_whitespace) {
        Some((date, time)) => (date, Some(time.trim())),
        None => (value, None),
    };

    let date = parse_date(date_part)?;
    match time_part {
        None => Some(at_midnight(date)),
        Some(time) => TIME_FORMATS
            .iter()
            .find_map(|f| NaiveTime::parse_from_str(time, f).ok())
            .map(|t| date.and_time(t)),
    }
}

/// Month-first or day-first slash dates, falling back to the other order
/// when the preferred one is not a valid calendar date.
fn parse_slash_date(date: &str, preference: DatePreference) -> Option<NaiveDate> {
    let sep = if date.contains('/') { '/' } else { '-' };
    let year = if year_digits(date, sep) == 2 { "%y" } else { "%Y" };
    let mdy = format!("%m{sep}%d{sep}{year}");
    let dmy = format!("%d{sep}%m{sep}{year}");

    let (preferred, fallback) = if preference.is_dmy() { (dmy, mdy) } else { (mdy, dmy) };

    NaiveDate::parse_from_str(date, &preferred)
        .or_else(|_| NaiveDate::parse_from_str(date, &fallback))
        .ok()
}

fn year_digits(date: &str, sep: char) -> usize {
    date.rsplit(sep).next().map_or(0, str::len)
}
