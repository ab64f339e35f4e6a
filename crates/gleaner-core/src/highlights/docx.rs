//! Highlight extraction from the DOCX book export.
//!
//! The export lays out book metadata in the first table (first row, second
//! cell: title paragraph, then author paragraph). Every highlight sits in a
//! table nested inside a cell, whose first row reads `[label, text, page]`.

use crate::error::StructureError;
use crate::models::config::DocxConfig;
use crate::models::record::RawCapture;
use crate::source::docx::{Cell, DocxBody, Row, Table};

use super::rules::normalize;
use super::{Collector, ExtractionResult, HighlightExtractor, Result};

const CONTENT_CELL: usize = 1;
const LOCATOR_CELL: usize = 2;

/// Extractor for the two-level DOCX table layout.
pub struct DocxTableExtractor {
    boilerplate: Vec<String>,
}

impl DocxTableExtractor {
    /// Create an extractor with the given export notices.
    pub fn new(config: &DocxConfig) -> Self {
        Self {
            boilerplate: config.boilerplate.clone(),
        }
    }

    /// Whether the text contains any export-generated notice.
    pub fn is_boilerplate(&self, text: &str) -> bool {
        self.boilerplate.iter().any(|phrase| text.contains(phrase.as_str()))
    }

    fn book_metadata(&self, body: &DocxBody) -> Result<(String, String)> {
        let table = body.tables.first().ok_or(StructureError::MissingTable(0))?;
        let cell = cell(row(table, 0, "metadata table")?, 1, "metadata row")?;
        let title = paragraph_text(cell, 0, "metadata cell")?;
        let author = paragraph_text(cell, 1, "metadata cell")?;
        Ok((title, author))
    }
}

impl Default for DocxTableExtractor {
    fn default() -> Self {
        Self::new(&DocxConfig::default())
    }
}

impl HighlightExtractor for DocxTableExtractor {
    type Input = DocxBody;

    fn extract(&self, body: &DocxBody) -> Result<ExtractionResult> {
        let mut out = Collector::new("DOCX");
        let (book_title, author) = self.book_metadata(body)?;

        let nested_tables = body
            .tables
            .iter()
            .flat_map(|table| &table.rows)
            .flat_map(|row| &row.cells)
            .flat_map(|cell| &cell.tables);

        for nested in nested_tables {
            let first_row = row(nested, 0, "highlight table")?;
            let text = paragraph_text(cell(first_row, CONTENT_CELL, "highlight row")?, 0, "content cell")?;

            if text.is_empty() {
                out.skip_empty();
                continue;
            }
            if self.is_boilerplate(&text) {
                out.skip_boilerplate(&text);
                continue;
            }

            let page = paragraph_text(cell(first_row, LOCATOR_CELL, "highlight row")?, 0, "locator cell")?;

            out.offer(
                RawCapture::new(text)
                    .with_author(author.clone())
                    .with_book_title(book_title.clone())
                    .with_locator("", page),
            );
        }

        Ok(out.finish())
    }
}

fn row<'a>(table: &'a Table, index: usize, context: &str) -> Result<&'a Row> {
    table.rows.get(index).ok_or_else(|| StructureError::MissingRow {
        context: context.to_string(),
        row: index,
    })
}

fn cell<'a>(row: &'a Row, index: usize, context: &str) -> Result<&'a Cell> {
    row.cells.get(index).ok_or_else(|| StructureError::MissingCell {
        context: context.to_string(),
        cell: index,
    })
}

fn paragraph_text(cell: &Cell, index: usize, context: &str) -> Result<String> {
    cell.paragraphs
        .get(index)
        .map(|p| normalize(&p.text))
        .ok_or_else(|| StructureError::MissingParagraph {
            context: context.to_string(),
            paragraph: index,
        })
}
