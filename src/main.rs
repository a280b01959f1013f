use clap::Parser;
use std::process;
use uvvis_processor::cli::{args::Args, commands};

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    // Top-level error boundary: every failure below this point has been
    // reported per file already or is surfaced here once, non-fatally.
    match commands::run(args) {
        Ok(_stats) => {
            // Success - the report has already been printed by the command
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("UV/Vis Processor - Spectroscopy Export Normalizer");
    println!("=================================================");
    println!();
    println!("Import plain-text spectroscopy exports with unknown delimiters and");
    println!("decimal conventions, and report normalized, comparable spectra.");
    println!();
    println!("USAGE:");
    println!("    uvvis-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    process     Import a batch of export files and report the spectra");
    println!("    sniff       Probe a single file and report its detected layout");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -v, --verbose    Enable debug logging");
    println!("    -q, --quiet      Only log errors");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # Import every export in a directory:");
    println!("    uvvis-processor process 'measurements/*.txt'");
    println!();
    println!("    # Compare spectra with normalization and peak overlays:");
    println!("    uvvis-processor process a.txt b.txt --normalize --peaks");
    println!();
    println!("    # Machine-readable report:");
    println!("    uvvis-processor process a.txt --peaks --format json");
    println!();
    println!("    # Probe an export whose delimiter is unclear:");
    println!("    uvvis-processor sniff odd_export.txt --delimiter '|'");
    println!();
    println!("For detailed help on any command, use:");
    println!("    uvvis-processor <COMMAND> --help");
}
