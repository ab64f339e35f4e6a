//! End-to-end import: extract, normalize, deduplicate.

use tracing::info;

use crate::models::config::GleanerConfig;
use crate::models::record::Record;
use crate::source::SourceDocument;

use super::rules::{dedup, Deduplicator};
use super::{
    DocxTableExtractor, ExtractionResult, ExtractionStats, HighlightExtractor, HtmlTableExtractor,
    StructuredDocumentWalker, TabularRecordExtractor,
};

/// Deduplicated records from one or more inputs.
#[derive(Debug, Clone, Default)]
pub struct ImportBatch {
    /// Unique records in first-occurrence order.
    pub records: Vec<Record>,
    /// Records extracted before deduplication.
    pub found: usize,
    /// Candidate counters summed over every input.
    pub stats: ExtractionStats,
}

impl ImportBatch {
    fn from_extraction(result: ExtractionResult) -> Self {
        let found = result.records.len();
        Self {
            records: dedup(result.records),
            found,
            stats: result.stats,
        }
    }

    /// Number of records after deduplication.
    pub fn unique(&self) -> usize {
        self.records.len()
    }

    /// Fold another batch in, deduplicating across both.
    pub fn merge(self, other: ImportBatch) -> ImportBatch {
        let mut stats = self.stats;
        stats.absorb(&other.stats);

        let mut seen = Deduplicator::new();
        seen.extend(self.records);
        seen.extend(other.records);

        ImportBatch {
            records: seen.into_records(),
            found: self.found + other.found,
            stats,
        }
    }
}

/// Dispatches decoded documents to their extractor.
pub struct Importer {
    walker: StructuredDocumentWalker,
    tabular: TabularRecordExtractor,
    docx: DocxTableExtractor,
    html: HtmlTableExtractor,
}

impl Importer {
    /// Build every extractor from configuration.
    pub fn new(config: &GleanerConfig) -> crate::Result<Self> {
        Ok(Self {
            walker: StructuredDocumentWalker::new(config.extraction.clone()),
            tabular: TabularRecordExtractor::new(config.tabular.clone()),
            docx: DocxTableExtractor::new(&config.docx),
            html: HtmlTableExtractor::new(&config.html)?,
        })
    }

    /// Extract records without deduplicating them.
    pub fn extract(&self, document: &SourceDocument) -> crate::Result<ExtractionResult> {
        let result = match document {
            SourceDocument::Json(value) => self.walker.extract(value)?,
            SourceDocument::Tabular(input) => self.tabular.extract(input)?,
            SourceDocument::Docx(body) => self.docx.extract(body)?,
            SourceDocument::Html(page) => self.html.extract(page)?,
        };
        Ok(result)
    }

    /// Extract and deduplicate one document.
    pub fn import(&self, document: &SourceDocument) -> crate::Result<ImportBatch> {
        let batch = ImportBatch::from_extraction(self.extract(document)?);
        info!(
            "Found {} highlights, reduced to {} after deduplication",
            batch.found,
            batch.unique()
        );
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{SourceFormat, TabularInput};

    #[test]
    fn test_import_dispatches_and_dedups() {
        let importer = Importer::new(&GleanerConfig::default()).unwrap();
        let document = SourceDocument::decode(
            SourceFormat::Json,
            br#"{"title": "T", "highlights": [{"text": "a"}, {"text": "a"}, {"text": "b"}]}"#,
        )
        .unwrap();

        let batch = importer.import(&document).unwrap();

        assert_eq!(batch.found, 6);
        assert_eq!(batch.unique(), 2);
        assert_eq!(batch.records[0].content, "a");
        assert_eq!(batch.records[1].content, "b");
    }

    #[test]
    fn test_structure_errors_surface() {
        let importer = Importer::new(&GleanerConfig::default()).unwrap();
        let document = SourceDocument::Tabular(TabularInput::from_rows(&["Highlight"], &[]));

        assert!(matches!(
            importer.import(&document),
            Err(crate::GleanerError::Structure(_))
        ));
    }

    #[test]
    fn test_merge_dedups_across_batches() {
        let record = |content: &str| Record {
            title: content.to_string(),
            author: String::new(),
            source: "S".to_string(),
            content: content.to_string(),
            tags: Vec::new(),
        };
        let first = ImportBatch {
            records: vec![record("x"), record("y")],
            found: 3,
            stats: ExtractionStats { candidates: 3, emitted: 3, ..Default::default() },
        };
        let second = ImportBatch {
            records: vec![record("y"), record("z")],
            found: 2,
            stats: ExtractionStats { candidates: 2, emitted: 2, ..Default::default() },
        };

        let merged = first.merge(second);

        assert_eq!(merged.found, 5);
        assert_eq!(merged.stats.candidates, 5);
        let contents: Vec<&str> = merged.records.iter().map(|r| r.content.as_str()).collect();
        assert_eq!(contents, vec!["x", "y", "z"]);
    }
}
