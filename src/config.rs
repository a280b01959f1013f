//! Configuration for processing runs
//!
//! Collapses the CLI arguments into a validated configuration consumed by
//! the command implementations. Delimiter rules are checked here, before
//! any file is read, so a bad flag fails the run up front instead of once
//! per file.

use serde::{Deserialize, Serialize};

use crate::app::models::ViewFlags;
use crate::cli::args::{OutputFormat, ProcessArgs};
use crate::{Error, Result};

/// Validated processing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Normalize every intensity series to a 0-100 scale
    pub normalize: bool,

    /// Detect peaks and include them in the report
    pub show_peaks: bool,

    /// Manual delimiter consulted when automatic sniffing fails
    pub delimiter: Option<String>,

    /// Report output format
    pub output_format: OutputFormat,
}

impl Config {
    /// Build and validate a configuration from process-command arguments
    pub fn from_process_args(args: &ProcessArgs) -> Result<Self> {
        let config = Self {
            normalize: args.normalize,
            show_peaks: args.peaks,
            delimiter: args.delimiter.clone(),
            output_format: args.format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate delimiter rules shared with the sniffer
    pub fn validate(&self) -> Result<()> {
        if let Some(delimiter) = &self.delimiter {
            if delimiter.is_empty() {
                return Err(Error::configuration("manual delimiter must not be empty"));
            }
            if delimiter.contains('.') {
                return Err(Error::configuration(
                    "manual delimiter must not contain '.'",
                ));
            }
        }
        Ok(())
    }

    /// The view flags owned by the display layer
    pub fn view_flags(&self) -> ViewFlags {
        ViewFlags {
            normalize: self.normalize,
            show_peaks: self.show_peaks,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn process_args(delimiter: Option<&str>) -> ProcessArgs {
        ProcessArgs {
            files: vec!["a.txt".to_string()],
            peaks: true,
            normalize: false,
            delimiter: delimiter.map(str::to_string),
            format: OutputFormat::Text,
        }
    }

    #[test]
    fn test_flags_carry_over() {
        let config = Config::from_process_args(&process_args(None)).unwrap();
        assert!(config.show_peaks);
        assert!(!config.normalize);
        assert!(config.view_flags().show_peaks);
    }

    #[test]
    fn test_delimiter_with_dot_is_rejected() {
        let result = Config::from_process_args(&process_args(Some(".")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_empty_delimiter_is_rejected() {
        let result = Config::from_process_args(&process_args(Some("")));
        assert!(matches!(result, Err(Error::Configuration { .. })));
    }

    #[test]
    fn test_pipe_delimiter_is_accepted() {
        let config = Config::from_process_args(&process_args(Some("|"))).unwrap();
        assert_eq!(config.delimiter.as_deref(), Some("|"));
    }
}
