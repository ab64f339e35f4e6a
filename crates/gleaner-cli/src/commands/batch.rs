//! Batch command - import every export file matching a pattern.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{error, warn};

use gleaner_core::{ImportBatch, Importer, SourceFormat};

use super::import::{deliver, import_file};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern for export files
    #[arg(required = true)]
    input: String,

    /// Print merged records as JSON instead of submitting them
    #[arg(long)]
    print: bool,

    /// Write merged records as JSON to a file instead of submitting them
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| SourceFormat::from_path(p).is_ok())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to import",
        style("ℹ").blue(),
        files.len()
    );

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let importer = Importer::new(&config)?;
    let mut merged = ImportBatch::default();
    let mut failed: Vec<(PathBuf, String)> = Vec::new();

    for path in &files {
        match import_file(&importer, path, None) {
            Ok(batch) => merged = merged.merge(batch),
            Err(e) if args.continue_on_error => {
                warn!("Failed to import {}: {}", path.display(), e);
                failed.push((path.clone(), e.to_string()));
            }
            Err(e) => {
                error!("Failed to import {}: {}", path.display(), e);
                pb.abandon();
                anyhow::bail!("Import of {} failed: {}", path.display(), e);
            }
        }
        pb.inc(1);
    }

    pb.finish_and_clear();

    eprintln!(
        "{} Imported {} files in {:?}",
        style("✓").green(),
        files.len() - failed.len(),
        start.elapsed()
    );
    eprintln!(
        "   Found {} highlights, reduced to {} after deduplication",
        merged.found,
        merged.unique()
    );

    if !failed.is_empty() {
        eprintln!("{}", style("Failed files:").red());
        for (path, reason) in &failed {
            eprintln!("  - {}: {}", path.display(), reason);
        }
    }

    deliver(&merged.records, args.print, args.output.as_deref(), &config).await
}
