//! Compiled regex patterns that pre-screen the shape of date/time values.
//!
//! A match only says which chrono formats are worth trying; calendar
//! validity is decided by chrono.

use regex::Regex;

/// Pattern for ISO 8601 timestamps carrying a `Z` or numeric UTC offset.
pub static DATETIME_OFFSET_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(
        r"^\d{4}-\d{1,2}-\d{1,2}[T ]\d{1,2}:\d{2}(:\d{2})?(\.\d+)?\s?([Zz]|[+-]\d{2}(:?\d{2})?)$",
    )
    .expect("Invalid offset datetime pattern")
});

/// Pattern for ISO 8601 datetimes without offset (YYYY-MM-DD[T ]HH:MM[:SS[.f]]).
pub static DATETIME_ISO_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}[T ]\d{1,2}:\d{2}(:\d{2})?(\.\d+)?$")
        .expect("Invalid ISO datetime pattern")
});

/// Pattern for ISO 8601 dates (YYYY-MM-DD or YYYY/MM/DD).
pub static DATE_ISO_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^\d{4}[-/]\d{1,2}[-/]\d{1,2}$").expect("Invalid ISO date pattern")
});

/// Pattern for slash or dash dates with optional time (MM/DD/YYYY or DD/MM/YYYY).
pub static DATE_SLASH_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^\d{1,2}([-/])\d{1,2}([-/])(\d{2}|\d{4})(\s+\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?(\s*(AM|PM|am|pm))?)?$")
        .expect("Invalid slash date pattern")
});

/// Pattern for European-style dotted dates (DD.MM.YYYY) with optional time.
pub static DATE_EURO_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"^\d{1,2}\.\d{1,2}\.(\d{2}|\d{4})(\s+\d{1,2}:\d{2}(:\d{2}(\.\d+)?)?)?$")
        .expect("Invalid Euro date pattern")
});

/// Pattern for dates spelling out the month (Jan 5, 2024 / 5 January 2024).
pub static DATE_MONTH_NAME_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}\s+[a-z]{3,9},?\s+\d{4}|[a-z]{3,9}\s+\d{1,2},?\s+\d{4})$")
        .expect("Invalid month name date pattern")
});

/// Pattern for RFC 2822 timestamps (Tue, 1 Jul 2003 10:52:37 +0200).
pub static RFC2822_PATTERN: std::sync::LazyLock<Regex> = std::sync::LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z]{3},\s*)?\d{1,2}\s+[a-z]{3}\s+\d{4}\s+\d{2}:\d{2}(:\d{2})?\s+([+-]\d{4}|[a-z]{1,3})$")
        .expect("Invalid RFC 2822 pattern")
});
