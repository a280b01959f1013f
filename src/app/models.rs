//! Data models for UV/Vis spectrum processing
//!
//! This module contains the core data structures for representing a parsed
//! spectrum, its resolved display unit, detected peaks, and the pure render
//! plan handed to an external plotting layer.

use crate::constants::{self, mode_codes};
use serde::Serialize;
use std::path::{Path, PathBuf};

// =============================================================================
// Unit Label
// =============================================================================

/// Display unit resolved from an instrument mode code
///
/// Rendered as `quantity + separator + symbol`, e.g. "Intensity I in a.u.".
/// Resolution never fails: unknown codes pass through as the bare symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnitLabel {
    /// Physical quantity name, e.g. "Transmission"
    pub quantity: String,

    /// Separator text between quantity and symbol, e.g. " in "
    pub separator: String,

    /// Unit symbol, e.g. "%" - the raw mode code for unknown modes
    pub symbol: String,
}

impl UnitLabel {
    /// Resolve a raw mode code through the fixed unit table
    pub fn resolve(mode_code: &str) -> Self {
        let (quantity, separator, symbol) = match mode_code {
            mode_codes::INTENSITY => ("Intensity I", " in ", "a.u."),
            mode_codes::ABSORBANCE | mode_codes::EXTINCTION => ("Extinction E", "", ""),
            mode_codes::TRANSMISSION => ("Transmission", " in ", "%"),
            other => ("", "", other),
        };

        Self {
            quantity: quantity.to_string(),
            separator: separator.to_string(),
            symbol: symbol.to_string(),
        }
    }

    /// Full axis label, e.g. "Intensity I in a.u."
    pub fn joined(&self) -> String {
        format!("{}{}{}", self.quantity, self.separator, self.symbol)
    }
}

// =============================================================================
// Spectrum
// =============================================================================

/// A normalized in-memory spectrum parsed from a single instrument export
///
/// Constructed once, synchronously, from one file; immutable thereafter.
/// The intensity series may contain NaN for malformed cells - consumers
/// must tolerate the not-a-number sentinel.
#[derive(Debug, Clone, Serialize)]
pub struct Spectrum {
    /// Source file path, set at creation
    pub source_path: PathBuf,

    /// Wavelength series in instrument order (monotonicity not guaranteed)
    pub wavelength: Vec<f64>,

    /// Intensity series, aligned index-for-index with `wavelength`
    pub intensity: Vec<f64>,

    /// Header rows as (label, value) pairs, insertion order preserved
    pub metadata_pairs: Vec<(String, String)>,

    /// Measurement title, `"unknown"` when undiscoverable
    pub title: String,

    /// Measurement date, `"unknown"` when undiscoverable
    pub date: String,

    /// Measurement time, `"unknown"` when undiscoverable
    pub time: String,

    /// Raw mode/unit code found in the header
    pub mode_code: String,

    /// Display unit resolved from `mode_code`
    pub unit_label: UnitLabel,

    /// First wavelength entry (position-based, not a sorted minimum)
    pub x_min: f64,

    /// Last wavelength entry (position-based, not a sorted maximum)
    pub x_max: f64,

    /// Minimum intensity ignoring NaN; `None` when every entry is NaN
    pub y_min: Option<f64>,

    /// Maximum intensity ignoring NaN; `None` when every entry is NaN
    pub y_max: Option<f64>,

    /// Spacing of the first two wavelength entries; `None` below 2 points
    pub delta_x: Option<f64>,
}

impl Spectrum {
    /// Number of data points in the series
    pub fn len(&self) -> usize {
        self.wavelength.len()
    }

    /// True when the spectrum holds no data points
    pub fn is_empty(&self) -> bool {
        self.wavelength.is_empty()
    }

    /// Display name: the source file's base name, used as the store key
    pub fn display_name(&self) -> String {
        file_display_name(&self.source_path)
    }

    /// Legend name: the display name without the conventional extension
    pub fn legend_name(&self) -> String {
        constants::legend_name(&self.display_name()).to_string()
    }

    /// True when the entire intensity column is the NaN sentinel
    pub fn is_degenerate(&self) -> bool {
        self.y_min.is_none()
    }
}

/// Display name for a source path: its base name, or the full path text
/// when no base name exists
pub fn file_display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

// =============================================================================
// Peaks
// =============================================================================

/// A detected local maximum of the smoothed intensity series
#[derive(Debug, Clone, Serialize)]
pub struct Peak {
    /// Index into the wavelength/intensity series
    pub index: usize,

    /// Wavelength at the maximum
    pub wavelength: f64,

    /// Smoothed intensity at the maximum (marker y-coordinate)
    pub smoothed: f64,

    /// Human-readable annotation text
    pub label: String,
}

// =============================================================================
// Render Plan
// =============================================================================

/// View flags owned by the display layer
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ViewFlags {
    /// Normalize every series to a 0-100 scale before display
    pub normalize: bool,

    /// Compute and overlay peak markers per series
    pub show_peaks: bool,
}

/// Pure description of one plotted series
#[derive(Debug, Clone, Serialize)]
pub struct SeriesPlan {
    /// Legend label (display name without extension)
    pub name: String,

    /// X values (wavelength, instrument order)
    pub wavelength: Vec<f64>,

    /// Y values after optional normalization
    pub intensity: Vec<f64>,

    /// Peak overlay; `None` when peaks are off or smoothing failed
    pub peaks: Option<Vec<Peak>>,
}

/// Pure description of a complete plot, consumed by an external renderer
///
/// Replaces shared mutable figure state: embedded and standalone views both
/// draw from the same immutable plan.
#[derive(Debug, Clone, Serialize)]
pub struct RenderPlan {
    /// X-axis label
    pub x_label: String,

    /// Y-axis label derived from unit uniformity and normalization
    pub y_label: String,

    /// True when every loaded spectrum shares one unit label
    pub uniform_units: bool,

    /// True when heterogeneous units degrade comparability
    pub units_mismatch: bool,

    /// One entry per loaded spectrum, in store order
    pub series: Vec<SeriesPlan>,
}
