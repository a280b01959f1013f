//! Test utilities and fixtures for spectrum parser testing
//!
//! Provides helpers for sniffing inline fixture content and running the
//! parser end-to-end without touching the filesystem.

use std::path::Path;

use crate::Result;
use crate::app::models::Spectrum;
use crate::app::services::format_sniffer::{self, NoPrompt};
use crate::app::services::spectrum_parser;


/// Sniff fixture content and parse it as if it came from `test.txt`
pub fn parse_fixture(content: &str) -> Result<Spectrum> {
    let sniffed = format_sniffer::sniff("test.txt", content, &NoPrompt)?;
    spectrum_parser::parse_rows(&sniffed, Path::new("test.txt"))
}

/// A typical tab-delimited export with a labelled header block
pub fn labelled_tab_export() -> String {
    "Sample\tCuSO4 solution\n\
     Date\t12/03/2021\n\
     Time\t14:25:01\n\
     YUNITS\t%T\n\
     500.0\t0.10\n\
     501.0\t0.20\n\
     502.0\t0.15\n"
        .to_string()
}
