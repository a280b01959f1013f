//! Application constants for the UV/Vis processor
//!
//! This module contains the sentinels, delimiter literals, extraction
//! patterns, and smoothing parameters used throughout the application.

// =============================================================================
// Field Sentinels
// =============================================================================

/// Sentinel for header fields that could not be discovered
pub const UNKNOWN_FIELD: &str = "unknown";

/// Sentinel for an undiscoverable measurement mode
pub const UNKNOWN_UNITS: &str = "unknown units";

// =============================================================================
// Delimiter Detection
// =============================================================================

/// Tab delimiter - checked first, takes strict precedence
pub const DELIMITER_TAB: &str = "\t";

/// Comma-space delimiter - values already use decimal points
pub const DELIMITER_COMMA_SPACE: &str = ", ";

/// Semicolon delimiter - common in decimal-comma locales
pub const DELIMITER_SEMICOLON: &str = ";";

// =============================================================================
// Metadata Extraction Patterns
// =============================================================================

/// Label patterns matched against the first cell of header rows
pub mod field_labels {
    /// Date row labels (English, German, and free-text "am ...")
    pub const DATE: &str = "(?i)date|Datum| am";

    /// Time row labels (English, German, and free-text "um ...")
    pub const TIME: &str = "(?i)time|Zeit| um";

    /// Measurement mode / y-axis unit row labels
    pub const MODE: &str = "(?i)YUNITS|Modus";
}

/// Value patterns used as fallbacks when no labelled row exists
pub mod field_values {
    /// Free-text date: DD.MM.YYYY or DD/MM/YYYY
    pub const DATE: &str = r"[0-9]{2}[./][0-9]{2}[./][0-9]{4}";

    /// Free-text time: HH:MM:SS
    pub const TIME: &str = "[0-9]{2}:[0-9]{2}:[0-9]{2}";
}

// =============================================================================
// Mode Codes
// =============================================================================

/// Known instrument mode codes mapped to display units
pub mod mode_codes {
    pub const INTENSITY: &str = "INTENSITY";
    pub const ABSORBANCE: &str = "A";
    pub const EXTINCTION: &str = "E";
    pub const TRANSMISSION: &str = "%T";
}

// =============================================================================
// Peak Detection
// =============================================================================

/// Fixed Savitzky-Golay smoothing window (points, odd)
pub const SMOOTHING_WINDOW: usize = 31;

/// Fixed Savitzky-Golay polynomial order
pub const SMOOTHING_POLY_ORDER: usize = 3;

/// Scale of the normalized intensity axis (percent)
pub const NORMALIZED_SCALE: f64 = 100.0;

// =============================================================================
// Display
// =============================================================================

/// X-axis label shared by all render plans
pub const WAVELENGTH_AXIS_LABEL: &str = "Wavelength λ in nm";

/// Extension stripped from display names for legend labels
pub const SOURCE_FILE_EXTENSION: &str = ".txt";

/// Strip the conventional export extension from a display name
pub fn legend_name(display_name: &str) -> &str {
    display_name
        .strip_suffix(SOURCE_FILE_EXTENSION)
        .unwrap_or(display_name)
}
