//! Highlight extraction from the supported export formats.

mod docx;
mod html;
mod json;
mod pipeline;
pub mod rules;
mod tabular;

pub use docx::DocxTableExtractor;
pub use html::HtmlTableExtractor;
pub use json::StructuredDocumentWalker;
pub use pipeline::{ImportBatch, Importer};
pub use tabular::TabularRecordExtractor;

use std::time::Instant;

use tracing::{debug, info};

use crate::error::StructureError;
use crate::models::record::{RawCapture, Record};
use rules::RecordNormalizer;

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, StructureError>;

/// Trait for format-specific highlight extractors.
pub trait HighlightExtractor {
    /// The decoded document this extractor walks.
    type Input: ?Sized;

    /// Extract every highlight record from a decoded document.
    ///
    /// Records are normalized but not deduplicated.
    fn extract(&self, input: &Self::Input) -> Result<ExtractionResult>;
}

/// Counters for one extraction pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Candidate highlights considered.
    pub candidates: usize,
    /// Records produced.
    pub emitted: usize,
    /// Candidates with no content (or, for HTML, no locator).
    pub skipped_empty: usize,
    /// Candidates matching an export notice.
    pub skipped_boilerplate: usize,
}

impl ExtractionStats {
    /// Add another pass's counters to this one.
    pub fn absorb(&mut self, other: &ExtractionStats) {
        self.candidates += other.candidates;
        self.emitted += other.emitted;
        self.skipped_empty += other.skipped_empty;
        self.skipped_boilerplate += other.skipped_boilerplate;
    }
}

/// Result of one extraction pass.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Normalized records in emission order.
    pub records: Vec<Record>,
    /// Candidate counters.
    pub stats: ExtractionStats,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Output accumulator shared by the extractors during one pass.
struct Collector {
    format: &'static str,
    normalizer: RecordNormalizer,
    records: Vec<Record>,
    stats: ExtractionStats,
    start: Instant,
}

impl Collector {
    fn new(format: &'static str) -> Self {
        Self {
            format,
            normalizer: RecordNormalizer::new(),
            records: Vec::new(),
            stats: ExtractionStats::default(),
            start: Instant::now(),
        }
    }

    /// Run the shared derivation on a capture and keep the record, if any.
    fn offer(&mut self, raw: RawCapture) {
        self.stats.candidates += 1;
        match self.normalizer.derive(&raw) {
            Some(record) => {
                debug!("Emitting {} highlight from {:?}", self.format, record.source);
                self.stats.emitted += 1;
                self.records.push(record);
            }
            None => self.stats.skipped_empty += 1,
        }
    }

    fn skip_empty(&mut self) {
        self.stats.candidates += 1;
        self.stats.skipped_empty += 1;
    }

    fn skip_boilerplate(&mut self, text: &str) {
        debug!("Skipping export notice: {}", text);
        self.stats.candidates += 1;
        self.stats.skipped_boilerplate += 1;
    }

    fn finish(self) -> ExtractionResult {
        info!(
            "Extracted {} {} highlights from {} candidates ({} empty, {} boilerplate)",
            self.stats.emitted,
            self.format,
            self.stats.candidates,
            self.stats.skipped_empty,
            self.stats.skipped_boilerplate
        );

        ExtractionResult {
            records: self.records,
            stats: self.stats,
            processing_time_ms: self.start.elapsed().as_millis() as u64,
        }
    }
}
