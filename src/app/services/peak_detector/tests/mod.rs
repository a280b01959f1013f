//! Test utilities and fixtures for peak detection testing.

use std::path::PathBuf;

use crate::app::models::{Spectrum, UnitLabel};
use crate::constants::UNKNOWN_FIELD;

// Test modules
mod detector_tests;

/// Build a synthetic spectrum around a given intensity series
pub fn synthetic_spectrum(intensity: Vec<f64>) -> Spectrum {
    let wavelength: Vec<f64> = (0..intensity.len()).map(|i| 400.0 + i as f64).collect();

    let y_min = intensity.iter().copied().filter(|v| !v.is_nan()).reduce(f64::min);
    let y_max = intensity.iter().copied().filter(|v| !v.is_nan()).reduce(f64::max);

    let x_min = wavelength.first().copied().unwrap_or(f64::NAN);
    let x_max = wavelength.last().copied().unwrap_or(f64::NAN);
    let delta_x = (wavelength.len() >= 2).then(|| wavelength[1] - wavelength[0]);

    Spectrum {
        source_path: PathBuf::from("synthetic.txt"),
        wavelength,
        intensity,
        metadata_pairs: Vec::new(),
        title: UNKNOWN_FIELD.to_string(),
        date: UNKNOWN_FIELD.to_string(),
        time: UNKNOWN_FIELD.to_string(),
        mode_code: "INTENSITY".to_string(),
        unit_label: UnitLabel::resolve("INTENSITY"),
        x_min,
        x_max,
        y_min,
        y_max,
        delta_x,
    }
}

/// A 40-point bell-shaped series with its true maximum at index 20
pub fn bell_series() -> Vec<f64> {
    (0..40)
        .map(|i| {
            let d = i as f64 - 20.0;
            (-d * d / 30.0).exp()
        })
        .collect()
}
