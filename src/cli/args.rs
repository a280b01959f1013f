//! Command-line argument definitions for the UV/Vis processor
//!
//! This module defines the complete CLI interface using the clap derive
//! API. Logging verbosity flags are global; everything else lives on the
//! individual subcommands.

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// CLI arguments for the UV/Vis spectrum processor
///
/// Normalizes ad-hoc plain-text spectroscopy exports into comparable
/// spectra, with optional peak detection and normalization.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "uvvis-processor",
    version,
    about = "Normalize ad-hoc UV/Vis spectroscopy text exports and detect peaks",
    long_about = "A tool that imports plain-text spectroscopy exports with unknown \
                  delimiters and decimal conventions, extracts header metadata with \
                  fallback heuristics, tolerates malformed numeric cells, and reports \
                  normalized spectra with optional Savitzky-Golay peak detection."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

impl Args {
    /// Log level derived from the verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}

/// Available subcommands for the UV/Vis processor
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Import a batch of export files and report the parsed spectra
    Process(ProcessArgs),
    /// Probe a single file and report its detected layout
    Sniff(SniffArgs),
}

/// Arguments for the process command (batch import and report)
#[derive(Debug, Clone, Parser)]
pub struct ProcessArgs {
    /// Export files to import; plain paths and glob patterns both work
    ///
    /// Files are imported strictly one at a time; a file that fails to
    /// parse is reported and skipped without aborting the rest.
    #[arg(
        value_name = "FILE|GLOB",
        required = true,
        help = "Export files or glob patterns to import"
    )]
    pub files: Vec<String>,

    /// Detect peaks and include them in the report
    ///
    /// Peaks are strict local maxima of the Savitzky-Golay smoothed
    /// intensity series. Spectra shorter than the smoothing window keep
    /// their data but lose only their own peak overlay.
    #[arg(long = "peaks", help = "Detect and report peaks per spectrum")]
    pub peaks: bool,

    /// Normalize every intensity series to a 0-100 scale
    ///
    /// Useful when comparing spectra recorded in different units; the
    /// report marks the axis as normalized.
    #[arg(long = "normalize", help = "Normalize intensities to a 0-100 scale")]
    pub normalize: bool,

    /// Manual delimiter for files whose layout cannot be sniffed
    ///
    /// Only consulted after automatic detection (tab, comma-space,
    /// semicolon) fails. Must not contain '.'; a delimiter containing ','
    /// disables decimal-comma rewriting.
    #[arg(
        long = "delimiter",
        value_name = "STRING",
        help = "Manual delimiter used when automatic sniffing fails"
    )]
    pub delimiter: Option<String>,

    /// Report output format
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        help = "Report output format"
    )]
    pub format: OutputFormat,
}

/// Arguments for the sniff command (single-file layout probe)
#[derive(Debug, Clone, Parser)]
pub struct SniffArgs {
    /// The export file to probe
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Manual delimiter used when automatic sniffing fails
    #[arg(long = "delimiter", value_name = "STRING")]
    pub delimiter: Option<String>,
}

/// Report output formats
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable terminal report
    #[default]
    Text,
    /// Machine-readable JSON report
    Json,
}
