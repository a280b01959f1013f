//! Peak detection for parsed spectra
//!
//! Runs on demand, not at parse time: the intensity series is optionally
//! normalized to a 0-100 scale, smoothed with a fixed 31-point cubic
//! Savitzky-Golay filter, and scanned for strict local maxima. Each
//! maximum is returned with its coordinates on the smoothed curve and a
//! human-readable annotation label.
//!
//! ## Architecture
//!
//! - [`smoothing`] - the Savitzky-Golay filter implementation

pub mod smoothing;

#[cfg(test)]
mod tests;

use tracing::debug;

use crate::Result;
use crate::app::models::{Peak, Spectrum};
use crate::constants::{NORMALIZED_SCALE, SMOOTHING_WINDOW};

/// Detect peaks of a spectrum's (optionally normalized) intensity series
///
/// Fails with a short-series error when the spectrum has fewer points than
/// the smoothing window; callers skip that spectrum's overlay and continue
/// with the rest of the batch.
pub fn detect_peaks(spectrum: &Spectrum, normalize: bool) -> Result<Vec<Peak>> {
    let values = display_intensity(spectrum, normalize);
    let smoothed = smoothing::savgol_filter(&values, SMOOTHING_WINDOW)?;

    let peaks: Vec<Peak> = local_maxima(&smoothed)
        .into_iter()
        .map(|i| {
            let wavelength = spectrum.wavelength[i];
            Peak {
                index: i,
                wavelength,
                smoothed: smoothed[i],
                label: peak_label(wavelength, smoothed[i], normalize),
            }
        })
        .collect();

    debug!(
        "Detected {} peaks in '{}' (normalize: {})",
        peaks.len(),
        spectrum.display_name(),
        normalize
    );
    Ok(peaks)
}

/// Annotation text for one peak
///
/// Floats print in their shortest round-trip form ("500.0", not "500"),
/// and the raw smoothed value is rounded to two decimals with trailing
/// zeros dropped ("0.5", not "0.50").
pub fn peak_label(wavelength: f64, smoothed: f64, normalize: bool) -> String {
    if normalize {
        format!("{:?} nm", wavelength)
    } else {
        let rounded = (smoothed * 100.0).round() / 100.0;
        format!("({:?}|{:?})", wavelength, rounded)
    }
}

/// The intensity series as displayed: raw, or normalized to 0-100 via
/// `(y - y_min) / (y_max - y_min) * 100`
///
/// Normalization is skipped when `y_max == 0` to avoid division collapse.
/// The guard checks only `y_max`, not the full span - a known-narrow edge
/// case that existing exports depend on, preserved as-is. An all-NaN
/// column has no defined extrema and is likewise left raw.
pub fn display_intensity(spectrum: &Spectrum, normalize: bool) -> Vec<f64> {
    if !normalize {
        return spectrum.intensity.clone();
    }

    match (spectrum.y_min, spectrum.y_max) {
        (Some(y_min), Some(y_max)) if y_max != 0.0 => spectrum
            .intensity
            .iter()
            .map(|y| (y - y_min) / (y_max - y_min) * NORMALIZED_SCALE)
            .collect(),
        _ => {
            debug!(
                "Normalization skipped for '{}' (y_max zero or undefined)",
                spectrum.display_name()
            );
            spectrum.intensity.clone()
        }
    }
}

/// Indices of strict local maxima: a point greater than both neighbors.
/// Flat plateaus are not maxima.
pub fn local_maxima(values: &[f64]) -> Vec<usize> {
    if values.len() < 3 {
        return Vec::new();
    }

    (1..values.len() - 1)
        .filter(|&i| values[i] > values[i - 1] && values[i] > values[i + 1])
        .collect()
}
