//! Spectrum parser for sniffed instrument exports
//!
//! Consumes the row matrix produced by the format sniffer, splits it into a
//! header block and a numeric data block, extracts metadata with fallback
//! heuristics, and builds the wavelength/intensity series with
//! missing-value tolerance.
//!
//! ## Architecture
//!
//! - [`header`] - metadata extraction rule cascades
//! - [`series`] - numeric series construction and derived statistics
//!
//! ## Usage
//!
//! ```rust
//! use uvvis_processor::app::services::spectrum_parser::SpectrumParser;
//!
//! # fn example() -> uvvis_processor::Result<()> {
//! let parser = SpectrumParser::new();
//! let spectrum = parser.parse_file(std::path::Path::new("sample.txt"))?;
//!
//! println!(
//!     "{} points from {} to {} nm",
//!     spectrum.len(),
//!     spectrum.x_min,
//!     spectrum.x_max
//! );
//! # Ok(())
//! # }
//! ```

pub mod header;
pub mod series;

#[cfg(test)]
mod tests;

use std::path::Path;
use tracing::{debug, info};

use crate::app::models::{Spectrum, UnitLabel, file_display_name};
use crate::app::services::format_sniffer::{self, DelimiterPrompt, NoPrompt, SniffedRows};
use crate::constants::{UNKNOWN_FIELD, UNKNOWN_UNITS};
use crate::{Error, Result};

/// Parser turning raw export files into [`Spectrum`] entities
///
/// Holds the delimiter-prompt collaborator invoked when automatic sniffing
/// fails; everything else is stateless.
#[derive(Debug, Clone, Default)]
pub struct SpectrumParser<P = NoPrompt> {
    prompt: P,
}

impl SpectrumParser<NoPrompt> {
    /// Create a parser that never asks for a manual delimiter
    pub fn new() -> Self {
        Self { prompt: NoPrompt }
    }
}

impl<P: DelimiterPrompt> SpectrumParser<P> {
    /// Create a parser with a delimiter-prompt collaborator
    pub fn with_prompt(prompt: P) -> Self {
        Self { prompt }
    }

    /// Read, sniff, and parse a single export file
    pub fn parse_file(&self, file_path: &Path) -> Result<Spectrum> {
        info!("Parsing spectrum file: {}", file_path.display());

        let content = std::fs::read_to_string(file_path).map_err(|e| {
            Error::io(format!("Failed to read file {}", file_path.display()), e)
        })?;

        let display_name = file_display_name(file_path);
        let sniffed = format_sniffer::sniff(&display_name, &content, &self.prompt)?;

        parse_rows(&sniffed, file_path)
    }
}

/// Parse sniffed rows into a spectrum
///
/// Fails with a format error when no row's first cell parses as a float
/// (no data block) or when a wavelength cell inside the data block is
/// malformed. Malformed intensity cells become NaN and never abort.
pub fn parse_rows(sniffed: &SniffedRows, source_path: &Path) -> Result<Spectrum> {
    let rows = &sniffed.rows;
    let display_name = file_display_name(source_path);

    let data_start = locate_data_start(rows).ok_or_else(|| {
        Error::format(&display_name, "no numeric data row found")
    })?;
    debug!(
        "Data block starts at row {} of {} ({})",
        data_start,
        rows.len(),
        display_name
    );

    let header = &rows[..data_start];
    let metadata_pairs = pad_to_pairs(header);

    // Zero header rows: keep every default verbatim and skip extraction
    // entirely, including the free-text fallback scans.
    let (title, date, time, mode_code) = if data_start == 0 {
        (
            UNKNOWN_FIELD.to_string(),
            UNKNOWN_FIELD.to_string(),
            UNKNOWN_FIELD.to_string(),
            UNKNOWN_UNITS.to_string(),
        )
    } else {
        (
            header::extract_title(header).unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            header::extract_date(header).unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            header::extract_time(header).unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
            header::extract_mode(header).unwrap_or_else(|| UNKNOWN_UNITS.to_string()),
        )
    };

    let unit_label = UnitLabel::resolve(&mode_code);

    let built = series::build(&rows[data_start..], data_start, &display_name)?;

    Ok(Spectrum {
        source_path: source_path.to_path_buf(),
        wavelength: built.wavelength,
        intensity: built.intensity,
        metadata_pairs,
        title,
        date,
        time,
        mode_code,
        unit_label,
        x_min: built.x_min,
        x_max: built.x_max,
        y_min: built.y_min,
        y_max: built.y_max,
        delta_x: built.delta_x,
    })
}

/// First row whose first cell parses as a float marks the data start
///
/// Cells are trimmed first: aligned exports pad columns with spaces.
fn locate_data_start(rows: &[Vec<String>]) -> Option<usize> {
    rows.iter().position(|row| {
        row.first()
            .is_some_and(|cell| cell.trim().parse::<f64>().is_ok())
    })
}

/// Pad header rows into (label, value) pairs
///
/// Rows with a single cell get an empty value; rows with extra cells keep
/// their last cell as the value, matching the extractors.
fn pad_to_pairs(header: &[Vec<String>]) -> Vec<(String, String)> {
    header
        .iter()
        .map(|row| {
            let label = row.first().cloned().unwrap_or_default();
            let value = if row.len() < 2 {
                String::new()
            } else {
                row.last().cloned().unwrap_or_default()
            };
            (label, value)
        })
        .collect()
}
