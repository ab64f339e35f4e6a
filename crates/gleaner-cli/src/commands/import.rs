//! Import command - extract highlights from a single export file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use gleaner_core::{
    submit_all, GleanerConfig, IllustrationSink, ImportBatch, Importer, Record, SinkError,
    SourceDocument, SourceFormat, SubmitOutcome, SubmitReport,
};

use crate::api::HttpSink;

/// Arguments for the import command.
#[derive(Args)]
pub struct ImportArgs {
    /// Export file (JSON, CSV, DOCX or HTML)
    #[arg(required = true)]
    input: PathBuf,

    /// Input format (default: detected from the file extension)
    #[arg(short, long, value_enum)]
    format: Option<InputFormat>,

    /// Print records as JSON instead of submitting them
    #[arg(long)]
    print: bool,

    /// Write records as JSON to a file instead of submitting them
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum InputFormat {
    /// Annotation store or highlight dump
    Json,
    /// Highlight CSV export
    Csv,
    /// Book export document
    Docx,
    /// Book export web page
    Html,
}

impl From<InputFormat> for SourceFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => SourceFormat::Json,
            InputFormat::Csv => SourceFormat::Tabular,
            InputFormat::Docx => SourceFormat::Docx,
            InputFormat::Html => SourceFormat::Html,
        }
    }
}

pub async fn run(args: ImportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = super::load_config(config_path)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Importing file: {}", args.input.display());

    let importer = Importer::new(&config)?;
    let batch = import_file(&importer, &args.input, args.format.map(SourceFormat::from))?;

    eprintln!(
        "{} Found {} highlights, reduced to {} after deduplication",
        style("ℹ").blue(),
        batch.found,
        batch.unique()
    );

    deliver(&batch.records, args.print, args.output.as_deref(), &config).await?;

    debug!("Total import time: {:?}", start.elapsed());

    Ok(())
}

/// Decode and import one file.
///
/// Kept synchronous so the decoded document never lives across an await.
pub fn import_file(
    importer: &Importer,
    path: &Path,
    format: Option<SourceFormat>,
) -> anyhow::Result<ImportBatch> {
    let document = SourceDocument::load(path, format)?;
    debug!("Decoded {} as {}", path.display(), document.format());
    Ok(importer.import(&document)?)
}

/// Print, write, or submit the final records.
pub async fn deliver(
    records: &[Record],
    print: bool,
    output: Option<&Path>,
    config: &GleanerConfig,
) -> anyhow::Result<()> {
    if print || output.is_some() {
        let json = serde_json::to_string_pretty(records)?;
        match output {
            Some(path) => {
                fs::write(path, &json)?;
                eprintln!(
                    "{} Output written to {}",
                    style("✓").green(),
                    path.display()
                );
            }
            None => println!("{}", json),
        }
        return Ok(());
    }

    if records.is_empty() {
        eprintln!("{} Nothing to submit", style("ℹ").blue());
        return Ok(());
    }

    let sink = HttpSink::from_config(&config.api)?;

    let pb = ProgressBar::new(records.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} {msg}")?
            .progress_chars("##-"),
    );
    pb.set_message("Submitting...");

    let report = submit_all(&ProgressSink { inner: &sink, pb: &pb }, records).await;

    pb.finish_with_message("Done");
    print_report(&report);

    Ok(())
}

/// Advances a progress bar as records go through the inner sink.
struct ProgressSink<'a, S> {
    inner: &'a S,
    pb: &'a ProgressBar,
}

impl<S: IllustrationSink + Sync> IllustrationSink for ProgressSink<'_, S> {
    async fn submit(&self, record: &Record) -> Result<SubmitOutcome, SinkError> {
        let result = self.inner.submit(record).await;
        self.pb.inc(1);
        result
    }
}

fn print_report(report: &SubmitReport) {
    eprintln!(
        "{} Submitted {} records",
        style("✓").green(),
        report.total()
    );
    eprintln!(
        "   {} created, {} duplicates, {} rejected, {} failed",
        style(report.created).green(),
        style(report.duplicates).yellow(),
        style(report.rejected).red(),
        style(report.failed).red()
    );
}
