//! Integration tests for the spectrum import pipeline
//!
//! These tests exercise the full file-to-spectrum path with temp-file
//! fixtures covering the delimiter conventions seen in real instrument
//! exports, plus the batch behaviors built on top: duplicate rejection,
//! failure isolation, and render-plan assembly with peak overlays.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use uvvis_processor::Error;
use uvvis_processor::app::models::ViewFlags;
use uvvis_processor::app::services::render_plan::build_render_plan;
use uvvis_processor::app::services::spectrum_parser::SpectrumParser;
use uvvis_processor::app::services::spectrum_store::SpectrumStore;

/// Write fixture content to a temp file
fn fixture(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

/// A bell-shaped 40-point tab export with a labelled header
fn bell_export() -> String {
    let mut content = String::from("Probe\tBell sample\nYUNITS\tINTENSITY\n");
    for i in 0..40 {
        let d = i as f64 - 20.0;
        let y = (-d * d / 30.0).exp();
        content.push_str(&format!("{}\t{}\n", 400.0 + i as f64, y));
    }
    content
}

#[test]
fn test_tab_export_with_decimal_commas() {
    let file = fixture(
        "Probe\tTestlauf\n\
         Datum\t01.02.2003\n\
         Modus\tE\n\
         500,0\t0,10\n\
         501,0\t0,20\n",
    );

    let spectrum = SpectrumParser::new().parse_file(file.path()).unwrap();
    assert_eq!(spectrum.title, "Testlauf");
    assert_eq!(spectrum.date, "01.02.2003");
    assert_eq!(spectrum.mode_code, "E");
    assert_eq!(spectrum.unit_label.joined(), "Extinction E");
    assert_eq!(spectrum.wavelength, vec![500.0, 501.0]);
    assert_eq!(spectrum.intensity, vec![0.10, 0.20]);
}

#[test]
fn test_comma_space_export_keeps_decimal_points() {
    let file = fixture("Sample X\n500.5, 1.25\n501.5, 1.75\n");

    let spectrum = SpectrumParser::new().parse_file(file.path()).unwrap();
    assert_eq!(spectrum.title, "Sample X");
    assert_eq!(spectrum.wavelength, vec![500.5, 501.5]);
    assert_eq!(spectrum.intensity, vec![1.25, 1.75]);
    assert_eq!(spectrum.delta_x, Some(1.0));
}

#[test]
fn test_semicolon_export_with_decimal_commas() {
    let file = fixture("gemessen am;12/03/2021\n400,0;0,5\n410,0;0,7\n");

    let spectrum = SpectrumParser::new().parse_file(file.path()).unwrap();
    // " am" label rule fires and normalizes the slashes
    assert_eq!(spectrum.date, "12.03.2021");
    assert_eq!(spectrum.wavelength, vec![400.0, 410.0]);
    assert_eq!(spectrum.delta_x, Some(10.0));
}

#[test]
fn test_malformed_cells_do_not_abort_the_file() {
    let file = fixture("600\tNOTANUMBER\n601\t0.5\n602\t0.6\n");

    let spectrum = SpectrumParser::new().parse_file(file.path()).unwrap();
    assert_eq!(spectrum.len(), 3);
    assert!(spectrum.intensity[0].is_nan());
    assert_eq!(spectrum.y_min, Some(0.5));
    assert_eq!(spectrum.y_max, Some(0.6));
}

#[test]
fn test_unrecognized_layout_is_a_format_error() {
    let file = fixture("just prose with no structure\nand a second line\n");

    let result = SpectrumParser::new().parse_file(file.path());
    assert!(matches!(result, Err(Error::Format { .. })));
}

#[test]
fn test_missing_file_is_an_io_error() {
    let result = SpectrumParser::new().parse_file(Path::new("no/such/file.txt"));
    assert!(matches!(result, Err(Error::Io { .. })));
}

#[test]
fn test_duplicate_display_name_leaves_one_entry() {
    let file = fixture("500.0\t0.1\n501.0\t0.2\n");
    let parser = SpectrumParser::new();

    let mut store = SpectrumStore::new();
    store.insert(parser.parse_file(file.path()).unwrap()).unwrap();

    let err = store
        .insert(parser.parse_file(file.path()).unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateName { .. }));
    assert_eq!(store.len(), 1);
}

#[test]
fn test_batch_failure_isolation() {
    let good = fixture("500.0\t0.1\n501.0\t0.2\n");
    let corrupt = fixture("prose only, nothing numeric\n");
    let parser = SpectrumParser::new();

    let mut store = SpectrumStore::new();
    let mut failures = 0;
    for path in [corrupt.path(), good.path()] {
        match parser.parse_file(path).and_then(|s| store.insert(s)) {
            Ok(()) => {}
            Err(_) => failures += 1,
        }
    }

    // The corrupt file is reported; the good file still imports
    assert_eq!(failures, 1);
    assert_eq!(store.len(), 1);
}

#[test]
fn test_render_plan_with_peak_overlays() {
    let long = fixture(&bell_export());
    let short = fixture("500.0\t0.1\n501.0\t0.3\n502.0\t0.2\n");
    let parser = SpectrumParser::new();

    let mut store = SpectrumStore::new();
    store.insert(parser.parse_file(long.path()).unwrap()).unwrap();
    store.insert(parser.parse_file(short.path()).unwrap()).unwrap();

    let flags = ViewFlags {
        normalize: true,
        show_peaks: true,
    };
    let plan = build_render_plan(&store, flags);
    assert_eq!(plan.series.len(), 2);

    // The 40-point series gets an overlay with its maximum near 420 nm;
    // the 3-point series is too short for smoothing and loses only its own
    let with_peaks: Vec<_> = plan
        .series
        .iter()
        .filter(|series| series.peaks.is_some())
        .collect();
    assert_eq!(with_peaks.len(), 1);
    let peaks = with_peaks[0].peaks.as_ref().unwrap();
    assert!(
        peaks.iter().any(|p| (p.wavelength - 420.0).abs() <= 1.0),
        "expected a peak near 420 nm"
    );
    assert!(peaks.iter().all(|p| p.label.ends_with(" nm")));
}

#[test]
fn test_render_plan_serializes_to_json() {
    let file = fixture(&bell_export());
    let mut store = SpectrumStore::new();
    store
        .insert(SpectrumParser::new().parse_file(file.path()).unwrap())
        .unwrap();

    let plan = build_render_plan(&store, ViewFlags::default());
    let json = serde_json::to_string(&plan).unwrap();
    assert!(json.contains("\"x_label\""));
    assert!(json.contains("Wavelength"));
}
