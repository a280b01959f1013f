//! Command implementations for the UV/Vis processor CLI
//!
//! This module contains the batch import loop with per-file failure
//! isolation, progress reporting, and the text/JSON report output.

use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::app::models::{RenderPlan, Spectrum, file_display_name};
use crate::app::services::format_sniffer::{self, FixedDelimiter, NoPrompt};
use crate::app::services::render_plan::build_render_plan;
use crate::app::services::spectrum_parser::{self, SpectrumParser};
use crate::app::services::spectrum_store::SpectrumStore;
use crate::cli::args::{Args, Commands, OutputFormat, ProcessArgs, SniffArgs};
use crate::config::Config;
use crate::{Error, Result};

/// Batch statistics for reporting
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunStats {
    /// Number of files the patterns expanded to
    pub files_requested: usize,
    /// Number of spectra successfully imported
    pub spectra_loaded: usize,
    /// Number of files that failed to import
    pub files_failed: usize,
    /// Total peaks across all overlays
    pub peaks_detected: usize,
    /// Wall-clock processing time
    #[serde(skip)]
    pub processing_time: std::time::Duration,
}

/// A reported per-file import failure
#[derive(Debug, Clone, Serialize)]
pub struct ImportFailure {
    pub file: String,
    pub error: String,
}

/// Main command runner
///
/// Sets up logging, dispatches the subcommand, and returns batch
/// statistics. `main` has already handled the no-subcommand case.
pub fn run(args: Args) -> Result<RunStats> {
    setup_logging(&args);

    match &args.command {
        Some(Commands::Process(process_args)) => run_process(process_args, args.quiet),
        Some(Commands::Sniff(sniff_args)) => run_sniff(sniff_args),
        None => Err(Error::configuration("no command supplied")),
    }
}

/// Set up tracing with an env-filter honoring the verbosity flags
fn setup_logging(args: &Args) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("uvvis_processor={}", args.get_log_level())));

    // try_init: tests may install a subscriber first
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false))
        .try_init()
        .ok();
}

// =============================================================================
// Process Command
// =============================================================================

fn run_process(args: &ProcessArgs, quiet: bool) -> Result<RunStats> {
    let start_time = Instant::now();

    let config = Config::from_process_args(args)?;
    debug!("Loaded configuration: {:?}", config);

    let files = expand_patterns(&args.files)?;
    if files.is_empty() {
        return Err(Error::configuration("no input files matched the patterns"));
    }

    info!("Importing {} files", files.len());
    let mut stats = RunStats {
        files_requested: files.len(),
        ..Default::default()
    };

    let progress_bar = if config.output_format == OutputFormat::Text && !quiet {
        Some(create_progress_bar(files.len() as u64))
    } else {
        None
    };

    // Import one file at a time; a failure is reported and the loop
    // proceeds to the next file without touching the store.
    let mut store = SpectrumStore::new();
    let mut failures = Vec::new();

    for file in &files {
        if let Some(pb) = &progress_bar {
            pb.set_message(file_display_name(file));
        }

        match import_file(file, config.delimiter.as_ref()).and_then(|s| store.insert(s)) {
            Ok(()) => stats.spectra_loaded += 1,
            Err(error) => {
                warn!("Skipping '{}': {}", file.display(), error);
                stats.files_failed += 1;
                failures.push(ImportFailure {
                    file: file.display().to_string(),
                    error: error.to_string(),
                });
            }
        }

        if let Some(pb) = &progress_bar {
            pb.inc(1);
        }
    }

    if let Some(pb) = &progress_bar {
        pb.finish_and_clear();
    }

    if store.is_empty() {
        return Err(Error::processing(format!(
            "none of the {} input files could be imported",
            files.len()
        )));
    }

    let plan = build_render_plan(&store, config.view_flags());
    stats.peaks_detected = plan
        .series
        .iter()
        .filter_map(|series| series.peaks.as_ref().map(Vec::len))
        .sum();
    stats.processing_time = start_time.elapsed();

    match config.output_format {
        OutputFormat::Text => print_text_report(&store, &plan, &failures, &stats, &config),
        OutputFormat::Json => print_json_report(&store, &plan, &failures, &stats)?,
    }

    Ok(stats)
}

/// Parse one file, using the manual delimiter as the prompt answer if set
fn import_file(path: &Path, delimiter: Option<&String>) -> Result<Spectrum> {
    match delimiter {
        Some(d) => SpectrumParser::with_prompt(FixedDelimiter(d.clone())).parse_file(path),
        None => SpectrumParser::new().parse_file(path),
    }
}

/// Expand plain paths and glob patterns into a concrete file list
fn expand_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        if pattern.contains(['*', '?', '[']) {
            let mut matched = false;
            for entry in glob::glob(pattern)? {
                match entry {
                    Ok(path) if path.is_file() => {
                        files.push(path);
                        matched = true;
                    }
                    Ok(_) => {}
                    Err(e) => warn!("Unreadable glob entry in '{}': {}", pattern, e),
                }
            }
            if !matched {
                warn!("Pattern '{}' matched no files", pattern);
            }
        } else {
            // Plain path: keep it even if missing so the import loop
            // reports the I/O failure per file
            files.push(PathBuf::from(pattern));
        }
    }

    Ok(files)
}

fn create_progress_bar(total: u64) -> ProgressBar {
    let pb = ProgressBar::new(total);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    pb.set_style(style);
    pb
}

// =============================================================================
// Text Report
// =============================================================================

fn print_text_report(
    store: &SpectrumStore,
    plan: &RenderPlan,
    failures: &[ImportFailure],
    stats: &RunStats,
    config: &Config,
) {
    println!("{}", "UV/Vis Spectrum Report".bold());
    println!("{}", "======================".bold());
    println!();
    println!("  X axis: {}", plan.x_label);
    println!("  Y axis: {}", plan.y_label);
    if plan.units_mismatch {
        println!(
            "  {}",
            "Warning: loaded spectra use different units".yellow()
        );
    }
    println!();

    for (name, spectrum) in store.iter() {
        print_spectrum_details(name, spectrum, plan, config);
    }

    if !failures.is_empty() {
        println!("{}", "Failed imports".red().bold());
        for failure in failures {
            println!("  {} {}", failure.file.red(), failure.error);
        }
        println!();
    }

    println!(
        "{} {} loaded, {} failed, {} peaks in {}",
        "Summary:".bold(),
        stats.spectra_loaded,
        stats.files_failed,
        stats.peaks_detected,
        HumanDuration(stats.processing_time)
    );
}

fn print_spectrum_details(name: &str, spectrum: &Spectrum, plan: &RenderPlan, config: &Config) {
    println!("{}", name.green().bold());
    println!("  Path:   {}", spectrum.source_path.display());
    println!("  Title:  {}", spectrum.title);
    println!(
        "  Mode:   {} ({})",
        spectrum.mode_code,
        spectrum.unit_label.joined()
    );
    println!("  Date:   {}", spectrum.date);
    println!("  Time:   {}", spectrum.time);
    println!(
        "  Range:  {} nm to {} nm ({} points)",
        spectrum.x_min,
        spectrum.x_max,
        spectrum.len()
    );
    match spectrum.delta_x {
        Some(delta_x) => println!("  Δx:     {}", delta_x),
        None => println!("  Δx:     undefined"),
    }
    match (spectrum.y_min, spectrum.y_max) {
        (Some(y_min), Some(y_max)) => println!(
            "  Min/Max: {}/{} {}",
            y_min, y_max, spectrum.unit_label.symbol
        ),
        _ => println!("  Min/Max: {}", "undefined (no numeric intensities)".yellow()),
    }

    for (label, value) in &spectrum.metadata_pairs {
        println!("    {}: {}", label.dimmed(), value);
    }

    if config.show_peaks {
        let legend = spectrum.legend_name();
        let peaks = plan
            .series
            .iter()
            .find(|series| series.name == legend)
            .and_then(|series| series.peaks.as_ref());
        match peaks {
            Some(peaks) if !peaks.is_empty() => {
                println!("  Peaks:");
                for peak in peaks {
                    println!("    {}", peak.label.cyan());
                }
            }
            Some(_) => println!("  Peaks:  none detected"),
            None => println!("  Peaks:  {}", "skipped (series too short)".yellow()),
        }
    }
    println!();
}

// =============================================================================
// JSON Report
// =============================================================================

/// Per-spectrum summary for machine-readable output
#[derive(Debug, Serialize)]
struct SpectrumSummary {
    name: String,
    path: String,
    title: String,
    date: String,
    time: String,
    mode_code: String,
    unit: String,
    points: usize,
    x_min: f64,
    x_max: f64,
    delta_x: Option<f64>,
    y_min: Option<f64>,
    y_max: Option<f64>,
    degenerate: bool,
    metadata_pairs: Vec<(String, String)>,
}

impl SpectrumSummary {
    fn new(name: &str, spectrum: &Spectrum) -> Self {
        Self {
            name: name.to_string(),
            path: spectrum.source_path.display().to_string(),
            title: spectrum.title.clone(),
            date: spectrum.date.clone(),
            time: spectrum.time.clone(),
            mode_code: spectrum.mode_code.clone(),
            unit: spectrum.unit_label.joined(),
            points: spectrum.len(),
            x_min: spectrum.x_min,
            x_max: spectrum.x_max,
            delta_x: spectrum.delta_x,
            y_min: spectrum.y_min,
            y_max: spectrum.y_max,
            degenerate: spectrum.is_degenerate(),
            metadata_pairs: spectrum.metadata_pairs.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
struct JsonReport<'a> {
    stats: &'a RunStats,
    spectra: Vec<SpectrumSummary>,
    failures: &'a [ImportFailure],
    render_plan: &'a RenderPlan,
}

fn print_json_report(
    store: &SpectrumStore,
    plan: &RenderPlan,
    failures: &[ImportFailure],
    stats: &RunStats,
) -> Result<()> {
    let report = JsonReport {
        stats,
        spectra: store
            .iter()
            .map(|(name, spectrum)| SpectrumSummary::new(name, spectrum))
            .collect(),
        failures,
        render_plan: plan,
    };

    let json = serde_json::to_string_pretty(&report)
        .map_err(|e| Error::processing(format!("Failed to serialize report: {}", e)))?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Sniff Command
// =============================================================================

fn run_sniff(args: &SniffArgs) -> Result<RunStats> {
    let start_time = Instant::now();

    let content = std::fs::read_to_string(&args.file).map_err(|e| {
        Error::io(format!("Failed to read file {}", args.file.display()), e)
    })?;

    let display_name = file_display_name(&args.file);
    let sniffed = match &args.delimiter {
        Some(d) => format_sniffer::sniff(&display_name, &content, &FixedDelimiter(d.clone()))?,
        None => format_sniffer::sniff(&display_name, &content, &NoPrompt)?,
    };

    println!("{}", display_name.green().bold());
    println!("  Delimiter:       {}", printable_delimiter(&sniffed.delimiter));
    println!(
        "  Decimal commas:  {}",
        if sniffed.decimal_commas_rewritten {
            "rewritten to points"
        } else {
            "kept (values use points)"
        }
    );
    println!("  Rows:            {}", sniffed.rows.len());

    let mut stats = RunStats {
        files_requested: 1,
        ..Default::default()
    };

    match spectrum_parser::parse_rows(&sniffed, &args.file) {
        Ok(spectrum) => {
            println!("  Header rows:     {}", spectrum.metadata_pairs.len());
            println!("  Data points:     {}", spectrum.len());
            println!(
                "  Mode:            {} ({})",
                spectrum.mode_code,
                spectrum.unit_label.joined()
            );
            stats.spectra_loaded = 1;
        }
        Err(error) => {
            println!("  {} {}", "No data block:".yellow(), error);
            stats.files_failed = 1;
        }
    }

    stats.processing_time = start_time.elapsed();
    Ok(stats)
}

/// Human-readable delimiter text for control characters
fn printable_delimiter(delimiter: &str) -> String {
    match delimiter {
        "\t" => "tab (\\t)".to_string(),
        other => format!("{:?}", other),
    }
}
