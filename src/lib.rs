//! UV/Vis Processor Library
//!
//! A Rust library for turning ad-hoc, inconsistently formatted plain-text
//! spectroscopy exports into normalized in-memory spectra suitable for
//! reporting and comparison.
//!
//! This library provides tools for:
//! - Sniffing field delimiters and decimal conventions from raw file content
//! - Splitting files into a header block and a numeric data block
//! - Extracting metadata (title, date, time, measurement mode) via ordered
//!   pattern rules with fallback heuristics
//! - Building wavelength/intensity series with missing-value tolerance
//! - Resolving display units from instrument mode codes
//! - Detecting peaks via Savitzky-Golay smoothing and strict local maxima
//! - Assembling pure render plans for an external plotting layer

pub mod config;
pub mod constants;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services {
        pub mod format_sniffer;
        pub mod peak_detector;
        pub mod render_plan;
        pub mod spectrum_parser;
        pub mod spectrum_store;
    }
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{Peak, RenderPlan, Spectrum, UnitLabel, ViewFlags};
pub use config::Config;

/// Result type alias for the UV/Vis processor
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for spectrum import and analysis operations
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// I/O operation failed
    #[error("I/O error: {message}")]
    Io {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// File content does not match any recognizable spectrum layout
    #[error("Format error in file '{file}': {message}")]
    Format { file: String, message: String },

    /// A spectrum with the same display name is already loaded
    #[error("A spectrum named '{name}' is already loaded")]
    DuplicateName { name: String },

    /// Series too short for the fixed smoothing window
    #[error("Series of {len} points is shorter than the {window}-point smoothing window")]
    SeriesTooShort { len: usize, window: usize },

    /// Configuration error
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Batch-level processing failure
    #[error("Processing failed: {message}")]
    Processing { message: String },
}

impl Error {
    /// Create an I/O error with context
    pub fn io(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a format error for a specific file
    pub fn format(file: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Format {
            file: file.into(),
            message: message.into(),
        }
    }

    /// Create a duplicate display name error
    pub fn duplicate_name(name: impl Into<String>) -> Self {
        Self::DuplicateName { name: name.into() }
    }

    /// Create a short series error
    pub fn series_too_short(len: usize, window: usize) -> Self {
        Self::SeriesTooShort { len, window }
    }

    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Create a batch processing error
    pub fn processing(message: impl Into<String>) -> Self {
        Self::Processing {
            message: message.into(),
        }
    }
}

// Automatic conversions from common error types
impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Self::Io {
            message: "I/O operation failed".to_string(),
            source: error,
        }
    }
}

impl From<glob::PatternError> for Error {
    fn from(error: glob::PatternError) -> Self {
        Self::Configuration {
            message: format!("Invalid file pattern: {}", error),
        }
    }
}
