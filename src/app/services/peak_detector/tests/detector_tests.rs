//! Tests for normalization, strict maxima, and peak labelling.

use super::{bell_series, synthetic_spectrum};
use crate::Error;
use crate::app::services::peak_detector::{detect_peaks, display_intensity, local_maxima, peak_label};

#[test]
fn test_normalization_scales_to_percent() {
    let spectrum = synthetic_spectrum(vec![0.0, 5.0, 10.0]);
    let values = display_intensity(&spectrum, true);
    assert_eq!(values, vec![0.0, 50.0, 100.0]);
}

#[test]
fn test_normalization_guard_fires_on_zero_maximum() {
    // All-nonpositive series whose maximum is exactly zero
    let spectrum = synthetic_spectrum(vec![-5.0, -2.0, 0.0, -4.0]);
    assert_eq!(spectrum.y_max, Some(0.0));

    let values = display_intensity(&spectrum, true);
    assert_eq!(values, spectrum.intensity);
}

#[test]
fn test_normalization_skipped_for_degenerate_column() {
    let spectrum = synthetic_spectrum(vec![f64::NAN, f64::NAN]);
    let values = display_intensity(&spectrum, true);
    assert!(values.iter().all(|v| v.is_nan()));
}

#[test]
fn test_raw_display_leaves_series_untouched() {
    let spectrum = synthetic_spectrum(vec![1.0, 2.0, 3.0]);
    assert_eq!(display_intensity(&spectrum, false), vec![1.0, 2.0, 3.0]);
}

#[test]
fn test_flat_plateau_is_not_a_maximum() {
    let values = [1.0, 2.0, 5.0, 5.0, 5.0, 5.0, 5.0, 2.0, 1.0];
    assert!(local_maxima(&values).is_empty());
}

#[test]
fn test_strict_interior_maximum_is_found() {
    assert_eq!(local_maxima(&[0.0, 1.0, 0.0]), vec![1]);
    assert_eq!(local_maxima(&[0.0, 1.0, 0.5, 2.0, 0.0]), vec![1, 3]);
}

#[test]
fn test_endpoints_are_never_maxima() {
    assert!(local_maxima(&[3.0, 1.0, 2.0]).iter().all(|&i| i == 1));
    assert!(local_maxima(&[1.0, 2.0]).is_empty());
}

#[test]
fn test_bell_peak_is_detected_near_its_true_location() {
    let spectrum = synthetic_spectrum(bell_series());
    let peaks = detect_peaks(&spectrum, false).unwrap();

    assert!(
        peaks.iter().any(|p| p.index.abs_diff(20) <= 1),
        "expected a peak within one index of 20, got {:?}",
        peaks.iter().map(|p| p.index).collect::<Vec<_>>()
    );
}

#[test]
fn test_short_series_is_a_recoverable_error() {
    let spectrum = synthetic_spectrum(vec![1.0; 10]);
    let err = detect_peaks(&spectrum, false).unwrap_err();
    assert!(matches!(
        err,
        Error::SeriesTooShort {
            len: 10,
            window: 31
        }
    ));
}

#[test]
fn test_peak_labels_follow_display_mode() {
    let spectrum = synthetic_spectrum(bell_series());

    let raw = detect_peaks(&spectrum, false).unwrap();
    assert!(raw.iter().all(|p| p.label.starts_with('(') && p.label.contains('|')));

    let normalized = detect_peaks(&spectrum, true).unwrap();
    assert!(normalized.iter().all(|p| p.label.ends_with(" nm")));
}

#[test]
fn test_peak_label_prints_shortest_float_form() {
    assert_eq!(peak_label(500.0, 12.0, true), "500.0 nm");
    assert_eq!(peak_label(420.5, 1.0, true), "420.5 nm");

    // Raw labels round to two decimals without padded zeros
    assert_eq!(peak_label(500.0, 0.5034, false), "(500.0|0.5)");
    assert_eq!(peak_label(500.5, 1.257, false), "(500.5|1.26)");
    assert_eq!(peak_label(600.0, 2.0, false), "(600.0|2.0)");
}
