//! Numeric series construction and derived statistics
//!
//! The wavelength column must parse on every data row - a malformed
//! wavelength aborts the file so point counts are never silently wrong.
//! The intensity column is tolerant: malformed or missing cells become the
//! NaN sentinel and parsing continues.

use crate::{Error, Result};
use tracing::debug;

/// Series values plus derived statistics
#[derive(Debug, Clone)]
pub struct BuiltSeries {
    pub wavelength: Vec<f64>,
    pub intensity: Vec<f64>,

    /// First wavelength entry (source order, not sorted)
    pub x_min: f64,

    /// Last wavelength entry (source order, not sorted)
    pub x_max: f64,

    /// NaN-ignoring intensity minimum; `None` for an all-NaN column
    pub y_min: Option<f64>,

    /// NaN-ignoring intensity maximum; `None` for an all-NaN column
    pub y_max: Option<f64>,

    /// Spacing of the first two points; `None` below 2 points
    pub delta_x: Option<f64>,
}

/// Build the series from the data block rows
///
/// `data_start` is only used to report absolute row numbers in errors.
pub fn build(data_rows: &[Vec<String>], data_start: usize, file: &str) -> Result<BuiltSeries> {
    let mut wavelength = Vec::with_capacity(data_rows.len());
    let mut intensity = Vec::with_capacity(data_rows.len());

    for (offset, row) in data_rows.iter().enumerate() {
        if is_blank(row) {
            debug!("Skipping blank row {} in '{}'", data_start + offset, file);
            continue;
        }

        // Trim before parsing: aligned exports pad their columns with spaces
        let first = row.first().map(String::as_str).unwrap_or_default();
        let x = first.trim().parse::<f64>().map_err(|_| {
            Error::format(
                file,
                format!(
                    "row {}: wavelength cell '{}' is not a number",
                    data_start + offset,
                    first
                ),
            )
        })?;

        // Intensity tolerates malformed and missing cells
        let y = row
            .get(1)
            .and_then(|cell| cell.trim().parse::<f64>().ok())
            .unwrap_or(f64::NAN);

        wavelength.push(x);
        intensity.push(y);
    }

    let (&x_min, &x_max) = match (wavelength.first(), wavelength.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(Error::format(file, "data block contains no usable rows")),
    };

    let y_min = nan_ignoring(&intensity, f64::min);
    let y_max = nan_ignoring(&intensity, f64::max);
    let delta_x = (wavelength.len() >= 2).then(|| wavelength[1] - wavelength[0]);

    Ok(BuiltSeries {
        wavelength,
        intensity,
        x_min,
        x_max,
        y_min,
        y_max,
        delta_x,
    })
}

/// Fold over the non-NaN entries; `None` when every entry is NaN
fn nan_ignoring(values: &[f64], fold: fn(f64, f64) -> f64) -> Option<f64> {
    values
        .iter()
        .copied()
        .filter(|v| !v.is_nan())
        .reduce(fold)
}

/// A blank line splits into a single empty cell
fn is_blank(row: &[String]) -> bool {
    row.len() == 1 && row[0].trim().is_empty()
}
