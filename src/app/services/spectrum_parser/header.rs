//! Metadata extraction from the header block
//!
//! Each field is extracted by an ordered cascade of rules: a labelled-row
//! rule first (match the first cell against known labels, take the last
//! cell), then a free-text pattern fallback. The first non-empty result
//! wins; when no rule matches, the caller keeps the documented default
//! sentinel and no error is raised.

use crate::constants::{field_labels, field_values};
use regex::Regex;
use std::sync::LazyLock;

static DATE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(field_labels::DATE).expect("date label pattern compiles"));
static TIME_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(field_labels::TIME).expect("time label pattern compiles"));
static MODE_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(field_labels::MODE).expect("mode label pattern compiles"));
static DATE_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(field_values::DATE).expect("date value pattern compiles"));
static TIME_VALUE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(field_values::TIME).expect("time value pattern compiles"));

/// Title: the last cell of the first header row
pub fn extract_title(header: &[Vec<String>]) -> Option<String> {
    header.first().and_then(|row| row.last()).cloned()
}

/// Date: labelled row, then free-text DD.MM.YYYY / DD/MM/YYYY fallback
///
/// The labelled value normalizes '/' to '.' so dates compare uniformly.
pub fn extract_date(header: &[Vec<String>]) -> Option<String> {
    labelled_value(header, &DATE_LABEL)
        .map(|value| value.replace('/', "."))
        .or_else(|| first_row_value(header, &DATE_VALUE))
}

/// Time: labelled row, then free-text HH:MM:SS fallback
pub fn extract_time(header: &[Vec<String>]) -> Option<String> {
    labelled_value(header, &TIME_LABEL).or_else(|| first_row_value(header, &TIME_VALUE))
}

/// Mode code: labelled row, then the last cell of the final header row
///
/// The final header row is the one immediately preceding the data block;
/// many exports place the column unit there without a label.
pub fn extract_mode(header: &[Vec<String>]) -> Option<String> {
    labelled_value(header, &MODE_LABEL)
        .or_else(|| header.last().and_then(|row| row.last()).cloned())
}

/// Labelled-row rule: first header row whose first cell matches the label
/// pattern yields its last cell
fn labelled_value(header: &[Vec<String>], label: &Regex) -> Option<String> {
    header
        .iter()
        .find(|row| row.first().is_some_and(|cell| label.is_match(cell)))
        .and_then(|row| row.last())
        .cloned()
}

/// Free-text fallback rule, deliberately scoped to the first header row only
///
/// The historical heuristic stops after the first row rather than scanning
/// the whole header. Existing exports rely on that narrow scope, so it is
/// preserved here as-is. Possibly a latent bug, not confirmed intent.
fn first_row_value(header: &[Vec<String>], value: &Regex) -> Option<String> {
    let first_row = header.first()?;
    let joined = first_row.concat();
    value.find(&joined).map(|m| m.as_str().to_string())
}
