//! Ordered semantic type detection for a single column.

use std::borrow::Cow;

use foldhash::{HashSet, HashSetExt};

use super::datetime::all_datetimes;
use crate::sample::DatePreference;
use crate::sdtype::SemanticType;
use crate::table::{Cell, Column};

/// Share of boolean-like values a column needs to be called boolean.
pub const BOOLEAN_RATIO: f64 = 0.95;

/// Upper bound on distinct values for any categorical column.
pub const MAX_CATEGORIES: usize = 20;

/// Mean text length a categorical column must stay below.
pub const MAX_CATEGORY_LEN: f64 = 30.0;

/// Check for boolean tokens using exhaustive match instead of lowercasing.
#[inline]
fn is_boolean_token(s: &str) -> bool {
    match s.len() {
        1 => matches!(s.as_bytes()[0], b'0' | b'1'),
        2 => s.eq_ignore_ascii_case("no"),
        3 => s.eq_ignore_ascii_case("yes"),
        4 => s.eq_ignore_ascii_case("true"),
        5 => s.eq_ignore_ascii_case("false"),
        _ => false,
    }
}

/// Detect the semantic type of a column.
///
/// Missing cells are dropped first; a column with nothing left is
/// [`SemanticType::String`]. The remaining values go through the rules in
/// order and the first rule that holds decides:
///
/// 1. boolean: more than 95% of values are true/false/yes/no/0/1
/// 2. datetime: every value parses as a calendar date/time
/// 3. numeric storage: categorical when distinct ≤ min(20, rows / 10),
///    numerical otherwise
/// 4. categorical: distinct ≤ min(20, 0.1 × values) and mean length < 30
/// 5. dynamic: every value parses as JSON
/// 6. string
pub fn detect_sdtype(column: &Column, preference: DatePreference) -> SemanticType {
    let sample: Vec<&Cell> = column.present().collect();
    if sample.is_empty() {
        return SemanticType::String;
    }

    let texts: Vec<Cow<'_, str>> = sample.iter().map(|c| c.to_text()).collect();

    if is_boolean_like(&texts) {
        return SemanticType::Boolean;
    }

    if all_datetimes(&texts, preference) {
        return SemanticType::Datetime;
    }

    if column.is_numeric_storage() {
        return numeric_sdtype(distinct_count(&sample), column.len());
    }

    if is_categorical_text(&sample, &texts) {
        return SemanticType::Categorical;
    }

    if all_json(&texts) {
        return SemanticType::Dynamic;
    }

    SemanticType::String
}

/// Rule 1: fraction of boolean tokens strictly above [`BOOLEAN_RATIO`].
fn is_boolean_like<S: AsRef<str>>(texts: &[S]) -> bool {
    let hits = texts.iter().filter(|t| is_boolean_token(t.as_ref())).count();
    hits as f64 / texts.len() as f64 > BOOLEAN_RATIO
}

/// Rule 3: the threshold uses integer division over the full row count,
/// missing rows included. Columns under 10 rows can never be categorical.
fn numeric_sdtype(distinct: usize, total_rows: usize) -> SemanticType {
    if distinct <= MAX_CATEGORIES.min(total_rows / 10) {
        SemanticType::Categorical
    } else {
        SemanticType::Numerical
    }
}

/// Rule 4: few distinct values relative to the sample, and short ones.
fn is_categorical_text<S: AsRef<str>>(sample: &[&Cell], texts: &[S]) -> bool {
    let n = sample.len() as f64;
    let limit = (MAX_CATEGORIES as f64).min(0.1 * n);
    let distinct = distinct_count(sample) as f64;
    let mean_len = texts
        .iter()
        .map(|t| t.as_ref().chars().count())
        .sum::<usize>() as f64
        / n;

    distinct <= limit && mean_len < MAX_CATEGORY_LEN
}

/// Rule 5: every value is a JSON document.
fn all_json<S: AsRef<str>>(texts: &[S]) -> bool {
    texts
        .iter()
        .all(|t| serde_json::from_str::<serde_json::Value>(t.as_ref()).is_ok())
}

fn distinct_count(sample: &[&Cell]) -> usize {
    let mut seen = HashSet::with_capacity(sample.len());
    for cell in sample {
        if let Some(key) = cell.key() {
            seen.insert(key);
        }
    }
    seen.len()
}
