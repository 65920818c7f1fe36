// sqldump2csv: write the INSERT data of a SQL dump as one CSV file per table.

use clap::{CommandFactory, Parser};
use sqldump2csv::progress::InputProgress;
use sqldump2csv::{extract_file, logger, ExtractError, ExtractSummary};
use std::io;
use std::path::{Path, PathBuf};

// Command-line flags and positional arguments.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// SQL dump to read.
    input: PathBuf,

    /// Directory receiving `<table>.csv` files. Must already exist.
    #[arg(short, long, default_value = "csv")]
    output_dir: PathBuf,

    /// Enable debug logging (disables the progress bar).
    #[arg(long)]
    debug: bool,

    /// Only log errors.
    #[arg(short, long)]
    quiet: bool,

    /// Do not draw a progress bar.
    #[arg(long)]
    no_progress: bool,

    /// Write a JSON summary of the extraction to this file.
    #[arg(long)]
    summary_json: Option<PathBuf>,
}

fn main() -> io::Result<()> {
    if std::env::args().len() == 1 {
        Args::command().print_help()?;
        eprintln!();
        std::process::exit(1);
    }
    let args = Args::parse();
    logger::configure(args.debug, args.quiet);

    if let Err(e) = run(&args) {
        logger::error(&e.to_string());
        std::process::exit(1);
    }
    Ok(())
}

fn run(args: &Args) -> Result<(), ExtractError> {
    logger::debug(&format!("main: input {}", args.input.display()));
    logger::debug(&format!("main: output dir {}", args.output_dir.display()));

    let progress = InputProgress::new(&args.input, !(args.debug || args.no_progress));
    let summary = extract_file(&args.input, &args.output_dir, &progress, |table| {
        progress.suspend(|| println!("Processing table: {}", table));
    })?;

    if summary.malformed_tuples > 0 {
        logger::info(&format!(
            "{} tuple(s) had unbalanced quotes or parentheses; their values may be incomplete (rerun with --debug for line numbers)",
            summary.malformed_tuples
        ));
    }

    if let Some(path) = &args.summary_json {
        write_summary(path, &summary)?;
    }

    println!(
        "\nExtracted {} tables to CSV files in the '{}/' directory",
        summary.tables.len(),
        display_dir(&args.output_dir)
    );
    Ok(())
}

fn write_summary(path: &Path, summary: &ExtractSummary) -> Result<(), ExtractError> {
    let json = serde_json::to_string_pretty(summary)?;
    std::fs::write(path, json).map_err(|source| ExtractError::Report {
        path: path.to_path_buf(),
        source,
    })
}

fn display_dir(dir: &Path) -> String {
    dir.display().to_string().trim_end_matches('/').to_string()
}
