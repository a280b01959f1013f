//! Pure render-plan assembly for the display layer
//!
//! `build_render_plan` is a pure function from the spectrum collection and
//! the view flags to an immutable plot description. Embedded and
//! standalone views both draw from the same plan, so there is no shared
//! mutable figure state anywhere in the core.

use tracing::warn;

use crate::app::models::{RenderPlan, SeriesPlan, ViewFlags};
use crate::app::services::peak_detector;
use crate::app::services::spectrum_store::SpectrumStore;
use crate::constants::WAVELENGTH_AXIS_LABEL;

/// Assemble a render plan for the current collection and view flags
///
/// Unit heterogeneity degrades the y-axis label and raises the mismatch
/// flag (informational, never an error). A series too short for smoothing
/// simply loses its peak overlay; every other series keeps its own.
pub fn build_render_plan(store: &SpectrumStore, flags: ViewFlags) -> RenderPlan {
    let uniform = store.labels_uniform();
    let units_mismatch = !uniform;

    if units_mismatch && !flags.normalize {
        warn!("Loaded spectra use different units; comparability is not guaranteed");
    }

    let y_label = y_axis_label(store, flags, uniform);

    let series = store
        .iter()
        .map(|(_, spectrum)| {
            let peaks = if flags.show_peaks {
                match peak_detector::detect_peaks(spectrum, flags.normalize) {
                    Ok(peaks) => Some(peaks),
                    Err(e) => {
                        warn!(
                            "Skipping peak overlay for '{}': {}",
                            spectrum.display_name(),
                            e
                        );
                        None
                    }
                }
            } else {
                None
            };

            SeriesPlan {
                name: spectrum.legend_name(),
                wavelength: spectrum.wavelength.clone(),
                intensity: peak_detector::display_intensity(spectrum, flags.normalize),
                peaks,
            }
        })
        .collect();

    RenderPlan {
        x_label: WAVELENGTH_AXIS_LABEL.to_string(),
        y_label,
        uniform_units: uniform,
        units_mismatch,
        series,
    }
}

/// Y-axis label for the four uniformity/normalization combinations
fn y_axis_label(store: &SpectrumStore, flags: ViewFlags, uniform: bool) -> String {
    if store.is_empty() {
        return String::new();
    }

    match (uniform, flags.normalize) {
        (true, true) => {
            let quantity = store
                .first_unit_label()
                .map(|unit| unit.quantity.clone())
                .unwrap_or_default();
            format!("Normalized {} in %", quantity)
        }
        (true, false) => store
            .first_unit_label()
            .map(|unit| unit.joined())
            .unwrap_or_default(),
        (false, true) => "Caution: different units (normalized to 100 %)".to_string(),
        (false, false) => "Caution: different units".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::models::{Spectrum, UnitLabel};
    use std::path::PathBuf;

    fn spectrum(file_name: &str, mode_code: &str, intensity: Vec<f64>) -> Spectrum {
        let wavelength: Vec<f64> = (0..intensity.len()).map(|i| 400.0 + i as f64).collect();
        let y_min = intensity.iter().copied().filter(|v| !v.is_nan()).reduce(f64::min);
        let y_max = intensity.iter().copied().filter(|v| !v.is_nan()).reduce(f64::max);
        let x_min = wavelength.first().copied().unwrap_or(f64::NAN);
        let x_max = wavelength.last().copied().unwrap_or(f64::NAN);
        let delta_x = (wavelength.len() >= 2).then(|| wavelength[1] - wavelength[0]);

        Spectrum {
            source_path: PathBuf::from(file_name),
            wavelength,
            intensity,
            metadata_pairs: Vec::new(),
            title: "t".to_string(),
            date: "d".to_string(),
            time: "t".to_string(),
            mode_code: mode_code.to_string(),
            unit_label: UnitLabel::resolve(mode_code),
            x_min,
            x_max,
            y_min,
            y_max,
            delta_x,
        }
    }

    fn bell(points: usize) -> Vec<f64> {
        let mid = points as f64 / 2.0;
        (0..points)
            .map(|i| {
                let d = i as f64 - mid;
                (-d * d / 30.0).exp()
            })
            .collect()
    }

    #[test]
    fn test_uniform_raw_uses_joined_unit_label() {
        let mut store = SpectrumStore::new();
        store.insert(spectrum("a.txt", "%T", vec![1.0, 2.0])).unwrap();
        store.insert(spectrum("b.txt", "%T", vec![3.0, 4.0])).unwrap();

        let plan = build_render_plan(&store, ViewFlags::default());
        assert!(plan.uniform_units);
        assert!(!plan.units_mismatch);
        assert_eq!(plan.y_label, "Transmission in %");
        assert_eq!(plan.x_label, "Wavelength λ in nm");
    }

    #[test]
    fn test_uniform_normalized_label() {
        let mut store = SpectrumStore::new();
        store.insert(spectrum("a.txt", "%T", vec![1.0, 2.0])).unwrap();

        let flags = ViewFlags {
            normalize: true,
            show_peaks: false,
        };
        let plan = build_render_plan(&store, flags);
        assert_eq!(plan.y_label, "Normalized Transmission in %");
    }

    #[test]
    fn test_heterogeneous_units_degrade_the_label() {
        let mut store = SpectrumStore::new();
        store.insert(spectrum("a.txt", "%T", vec![1.0, 2.0])).unwrap();
        store
            .insert(spectrum("b.txt", "INTENSITY", vec![3.0, 4.0]))
            .unwrap();

        let plan = build_render_plan(&store, ViewFlags::default());
        assert!(plan.units_mismatch);
        assert_eq!(plan.y_label, "Caution: different units");

        let flags = ViewFlags {
            normalize: true,
            show_peaks: false,
        };
        let plan = build_render_plan(&store, flags);
        assert_eq!(plan.y_label, "Caution: different units (normalized to 100 %)");
    }

    #[test]
    fn test_empty_store_renders_empty_plan() {
        let plan = build_render_plan(&SpectrumStore::new(), ViewFlags::default());
        assert!(plan.series.is_empty());
        assert_eq!(plan.y_label, "");
        assert!(plan.uniform_units);
    }

    #[test]
    fn test_legend_names_strip_extension() {
        let mut store = SpectrumStore::new();
        store.insert(spectrum("a.txt", "%T", vec![1.0, 2.0])).unwrap();

        let plan = build_render_plan(&store, ViewFlags::default());
        assert_eq!(plan.series[0].name, "a");
    }

    #[test]
    fn test_short_series_loses_only_its_own_overlay() {
        let mut store = SpectrumStore::new();
        store.insert(spectrum("long.txt", "%T", bell(40))).unwrap();
        store.insert(spectrum("short.txt", "%T", bell(10))).unwrap();

        let flags = ViewFlags {
            normalize: false,
            show_peaks: true,
        };
        let plan = build_render_plan(&store, flags);

        let long = plan.series.iter().find(|s| s.name == "long").unwrap();
        let short = plan.series.iter().find(|s| s.name == "short").unwrap();
        assert!(long.peaks.is_some());
        assert!(short.peaks.is_none());
    }

    #[test]
    fn test_normalized_series_values_are_scaled() {
        let mut store = SpectrumStore::new();
        store.insert(spectrum("a.txt", "%T", vec![0.0, 5.0, 10.0])).unwrap();

        let flags = ViewFlags {
            normalize: true,
            show_peaks: false,
        };
        let plan = build_render_plan(&store, flags);
        assert_eq!(plan.series[0].intensity, vec![0.0, 50.0, 100.0]);
    }
}
