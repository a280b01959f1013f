//! Delimiter and decimal-format sniffing for raw instrument exports
//!
//! Instrument exports never guarantee a single format: fields may be
//! separated by tabs, ", ", semicolons, or something site-specific, and
//! decimal separators may be points or commas. The sniffer inspects the
//! whole file content, picks the delimiter, and splits every line into a
//! row of string cells with decimal commas normalized where applicable.

use crate::constants::{DELIMITER_COMMA_SPACE, DELIMITER_SEMICOLON, DELIMITER_TAB};
use crate::{Error, Result};
use tracing::debug;

/// Collaborator asked for a manual delimiter when automatic sniffing fails
///
/// The display layer owns the actual dialog; the core only sees the result.
/// Returning `None` means the user declined.
pub trait DelimiterPrompt {
    fn prompt_delimiter(&self, file_name: &str) -> Option<String>;
}

/// Prompt that always declines - for non-interactive callers
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl DelimiterPrompt for NoPrompt {
    fn prompt_delimiter(&self, _file_name: &str) -> Option<String> {
        None
    }
}

/// Prompt that answers with a pre-supplied delimiter (e.g. a CLI flag)
#[derive(Debug, Clone)]
pub struct FixedDelimiter(pub String);

impl DelimiterPrompt for FixedDelimiter {
    fn prompt_delimiter(&self, _file_name: &str) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Sniffed file layout: the chosen delimiter and the resulting row matrix
///
/// Rows may be ragged - cell counts per row are not enforced here.
#[derive(Debug, Clone)]
pub struct SniffedRows {
    /// The delimiter every line was split on
    pub delimiter: String,

    /// Whether decimal commas were rewritten to decimal points
    pub decimal_commas_rewritten: bool,

    /// One row of string cells per file line
    pub rows: Vec<Vec<String>>,
}

/// Detect the delimiter and split raw content into rows
///
/// Detection order on the whole content, first match wins:
/// 1. tab (strict precedence - the most common and least ambiguous export)
/// 2. ", " comma-space (values already use decimal points)
/// 3. ";" semicolon
/// 4. manual delimiter from the prompt collaborator
///
/// Tab, semicolon, and manual delimiters without a comma trigger
/// decimal-comma-to-point rewriting on every line before splitting.
pub fn sniff(file_name: &str, content: &str, prompt: &dyn DelimiterPrompt) -> Result<SniffedRows> {
    let (delimiter, rewrite) = if content.contains(DELIMITER_TAB) {
        (DELIMITER_TAB.to_string(), true)
    } else if content.contains(DELIMITER_COMMA_SPACE) {
        (DELIMITER_COMMA_SPACE.to_string(), false)
    } else if content.contains(DELIMITER_SEMICOLON) {
        (DELIMITER_SEMICOLON.to_string(), true)
    } else {
        manual_delimiter(file_name, prompt)?
    };

    debug!(
        "Sniffed delimiter {:?} for '{}' (decimal rewrite: {})",
        delimiter, file_name, rewrite
    );

    let rows = split_rows(content, &delimiter, rewrite);

    Ok(SniffedRows {
        delimiter,
        decimal_commas_rewritten: rewrite,
        rows,
    })
}

/// Resolve the manual-delimiter fallback via the prompt collaborator
fn manual_delimiter(file_name: &str, prompt: &dyn DelimiterPrompt) -> Result<(String, bool)> {
    let Some(delimiter) = prompt.prompt_delimiter(file_name) else {
        return Err(Error::format(
            file_name,
            "delimiter not recognized and no manual delimiter supplied",
        ));
    };

    if delimiter.is_empty() {
        return Err(Error::format(file_name, "manual delimiter is empty"));
    }
    if delimiter.contains('.') {
        return Err(Error::format(
            file_name,
            "manual delimiter must not contain '.'",
        ));
    }

    // A comma inside the delimiter rules out decimal-comma values
    let rewrite = !delimiter.contains(',');
    Ok((delimiter, rewrite))
}

/// Split content into rows of cells, stripping line terminators
fn split_rows(content: &str, delimiter: &str, rewrite: bool) -> Vec<Vec<String>> {
    content
        .lines()
        .map(|line| {
            let line = line.strip_suffix('\r').unwrap_or(line);
            let line = if rewrite {
                line.replace(',', ".")
            } else {
                line.to_string()
            };
            line.split(delimiter).map(str::to_string).collect()
        })
        .collect()
}
