//! treedu - disk usage tree scanner.
//!
//! Usage:
//!   treedu [PATH]              Scan and print the size-annotated tree
//!   treedu -L [PATH]           Follow directory symlinks (cycle-safe)
//!   treedu --json [PATH]       Emit the full scan report as JSON
//!   treedu --help              Show help

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use color_eyre::eyre::{Context, Result};

use treedu_report::{render, RenderOptions, SizeFormat};
use treedu_walk::{ScanError, ScanReport, TreeScan, WalkConfig};

#[derive(Parser)]
#[command(
    name = "treedu",
    version,
    about = "Disk usage tree scanner",
    long_about = "treedu walks a directory tree, accumulates entry sizes, and prints\n\
                  a size-annotated tree. Symbolic link cycles are detected and\n\
                  attached as leaves instead of being re-expanded; unreadable\n\
                  entries never abort the scan."
)]
struct Cli {
    /// Path to scan (defaults to current directory)
    #[arg(default_value = ".")]
    path: PathBuf,

    /// Descend into directories reached through symbolic links
    #[arg(short = 'L', long)]
    follow_links: bool,

    /// Maximum directory depth to display
    #[arg(short, long, default_value = "10")]
    depth: usize,

    /// Number of entries to show per directory (largest first)
    #[arg(short = 'n', long, default_value = "16")]
    limit: usize,

    /// Size-suffix family for the size column
    #[arg(short, long, default_value = "binary")]
    size_format: SizeFormatArg,

    /// Emit the full scan report as JSON instead of text
    #[arg(long)]
    json: bool,

    /// Suppress the error block and summary footer
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum, Default)]
enum SizeFormatArg {
    #[default]
    Binary,
    Decimal,
}

impl From<SizeFormatArg> for SizeFormat {
    fn from(arg: SizeFormatArg) -> Self {
        match arg {
            SizeFormatArg::Binary => SizeFormat::Binary,
            SizeFormatArg::Decimal => SizeFormat::Decimal,
        }
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let config = WalkConfig::builder()
        .root(&cli.path)
        .follow_links(cli.follow_links)
        .build()
        .map_err(ScanError::from)?;

    let report = TreeScan::run(&config)
        .with_context(|| format!("scanning {}", cli.path.display()))?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let options = RenderOptions::builder()
        .max_depth(cli.depth)
        .per_dir_limit(cli.limit)
        .size_format(SizeFormat::from(cli.size_format))
        .build()
        .map_err(|e| color_eyre::eyre::eyre!(e))?;

    println!("{}", render(&report.tree, report.root, &options));

    if !cli.quiet {
        print_summary(&report);
        print_errors(&report);
    }

    Ok(())
}

/// Print the totals footer to stdout.
fn print_summary(report: &ScanReport) {
    let stats = &report.stats;
    println!();
    println!(
        "{} in {} files, {} directories, {} links ({} unreadable)",
        humansize::format_size(stats.total_size, humansize::BINARY),
        stats.total_files,
        stats.total_dirs,
        stats.total_symlinks,
        stats.total_unreadable,
    );
    println!("scanned in {:.3}s", report.duration.as_secs_f64());
}

/// Print every suppressed error to stderr, in encounter order.
fn print_errors(report: &ScanReport) {
    if !report.has_errors() {
        return;
    }
    eprintln!();
    eprintln!("tree build errors:");
    for error in &report.errors {
        eprintln!("  {error}");
    }
}
