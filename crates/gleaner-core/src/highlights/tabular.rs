//! Highlight extraction from the CSV highlight export.

use std::collections::HashMap;

use csv::StringRecord;

use crate::error::StructureError;
use crate::models::config::TabularConfig;
use crate::models::record::RawCapture;
use crate::source::TabularInput;

use super::{Collector, ExtractionResult, HighlightExtractor, Result};

/// Column positions resolved from a header row.
struct ColumnIndex {
    highlight: usize,
    book_title: usize,
    book_author: usize,
    external_id: usize,
    color: usize,
    location_type: usize,
    location: usize,
}

/// Maps CSV rows to records by header name.
pub struct TabularRecordExtractor {
    columns: TabularConfig,
}

impl TabularRecordExtractor {
    pub fn new(columns: TabularConfig) -> Self {
        Self { columns }
    }

    fn resolve(&self, header: &StringRecord) -> Result<ColumnIndex> {
        let positions: HashMap<&str, usize> = header
            .iter()
            .enumerate()
            .map(|(i, name)| (name.trim_start_matches('\u{feff}').trim(), i))
            .collect();

        let find = |name: &String| {
            positions
                .get(name.as_str())
                .copied()
                .ok_or_else(|| StructureError::MissingColumn(name.clone()))
        };

        Ok(ColumnIndex {
            highlight: find(&self.columns.highlight)?,
            book_title: find(&self.columns.book_title)?,
            book_author: find(&self.columns.book_author)?,
            external_id: find(&self.columns.external_id)?,
            color: find(&self.columns.color)?,
            location_type: find(&self.columns.location_type)?,
            location: find(&self.columns.location)?,
        })
    }

    fn capture(&self, index: &ColumnIndex, row: &StringRecord, row_number: usize) -> Result<RawCapture> {
        let value = |column: usize, name: &String| {
            row.get(column).ok_or_else(|| StructureError::ShortRow {
                row: row_number,
                column: name.clone(),
            })
        };

        Ok(RawCapture::new(value(index.highlight, &self.columns.highlight)?)
            .with_author(value(index.book_author, &self.columns.book_author)?)
            .with_book_title(value(index.book_title, &self.columns.book_title)?)
            .with_locator(
                value(index.location_type, &self.columns.location_type)?,
                value(index.location, &self.columns.location)?,
            )
            .with_seed_tag(value(index.external_id, &self.columns.external_id)?)
            .with_seed_tag(value(index.color, &self.columns.color)?))
    }
}

impl Default for TabularRecordExtractor {
    fn default() -> Self {
        Self::new(TabularConfig::default())
    }
}

impl HighlightExtractor for TabularRecordExtractor {
    type Input = TabularInput;

    fn extract(&self, input: &TabularInput) -> Result<ExtractionResult> {
        let mut out = Collector::new("CSV");
        let index = self.resolve(&input.header)?;

        for (i, row) in input.rows.iter().enumerate() {
            out.offer(self.capture(&index, row, i + 1)?);
        }

        Ok(out.finish())
    }
}
