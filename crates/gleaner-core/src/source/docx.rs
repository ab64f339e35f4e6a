//! Table tree of a DOCX package body.
//!
//! Only the parts the highlight export uses are modeled: body-level tables
//! and paragraphs, rows, cells, nested tables and paragraph text.

use std::io::{Cursor, Read};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::debug;
use zip::ZipArchive;

use crate::error::DecodeError;

use super::Result;

const DOCUMENT_PART: &str = "word/document.xml";

/// Body of the main document part.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocxBody {
    pub tables: Vec<Table>,
    pub paragraphs: Vec<Paragraph>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

/// A table cell; may hold paragraphs and further tables.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cell {
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Table>,
}

/// A paragraph reduced to its raw text, runs and hyperlinks in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
}

impl Table {
    pub fn new(rows: Vec<Row>) -> Self {
        Self { rows }
    }
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }
}

impl Cell {
    /// A cell holding one paragraph per given text.
    pub fn with_text(texts: &[&str]) -> Self {
        Self {
            paragraphs: texts.iter().map(|t| Paragraph::new(*t)).collect(),
            tables: Vec::new(),
        }
    }

    /// A cell wrapping a nested table.
    pub fn with_table(table: Table) -> Self {
        Self {
            paragraphs: Vec::new(),
            tables: vec![table],
        }
    }
}

impl Paragraph {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Open a DOCX package and parse its main document part.
pub fn read_package(data: &[u8]) -> Result<DocxBody> {
    let mut archive = ZipArchive::new(Cursor::new(data))?;

    let mut xml = String::new();
    match archive.by_name(DOCUMENT_PART) {
        Ok(mut part) => {
            part.read_to_string(&mut xml)
                .map_err(|e| DecodeError::Xml(format!("failed to read {}: {}", DOCUMENT_PART, e)))?;
        }
        Err(zip::result::ZipError::FileNotFound) => {
            return Err(DecodeError::MissingPart(DOCUMENT_PART.to_string()));
        }
        Err(e) => return Err(e.into()),
    }

    parse_document_xml(&xml)
}

/// Element currently being built.
enum Frame {
    Table(Table),
    Row(Row),
    Cell(Cell),
    Paragraph(Paragraph),
}

/// Parse `word/document.xml` into a table tree.
pub fn parse_document_xml(xml: &str) -> Result<DocxBody> {
    let mut reader = Reader::from_str(xml);
    let mut body = DocxBody::default();
    let mut stack: Vec<Frame> = Vec::new();
    let mut in_body = false;
    let mut in_text = false;

    loop {
        match reader.read_event()? {
            Event::Start(e) => match e.local_name().as_ref() {
                b"body" => in_body = true,
                b"tbl" if in_body => stack.push(Frame::Table(Table::default())),
                b"tr" if in_body => stack.push(Frame::Row(Row::default())),
                b"tc" if in_body => stack.push(Frame::Cell(Cell::default())),
                b"p" if in_body => stack.push(Frame::Paragraph(Paragraph::default())),
                b"t" => in_text = matches!(stack.last(), Some(Frame::Paragraph(_))),
                _ => {}
            },
            Event::Empty(e) => {
                // Self-closing paragraphs still count as (empty) paragraphs
                if in_body && e.local_name().as_ref() == b"p" {
                    attach(&mut stack, &mut body, Frame::Paragraph(Paragraph::default()));
                }
            }
            Event::Text(e) if in_text => {
                let text = e.unescape().map_err(|e| DecodeError::Xml(e.to_string()))?;
                if let Some(Frame::Paragraph(paragraph)) = stack.last_mut() {
                    paragraph.text.push_str(&text);
                }
            }
            Event::End(e) => match e.local_name().as_ref() {
                b"body" => in_body = false,
                b"t" => in_text = false,
                b"tbl" | b"tr" | b"tc" | b"p" if in_body => {
                    if let Some(frame) = stack.pop() {
                        attach(&mut stack, &mut body, frame);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    debug!(
        "Parsed DOCX body with {} tables and {} paragraphs",
        body.tables.len(),
        body.paragraphs.len()
    );

    Ok(body)
}

/// Attach a finished element to its parent. Elements in positions the
/// export never uses are dropped.
fn attach(stack: &mut [Frame], body: &mut DocxBody, frame: Frame) {
    match (stack.last_mut(), frame) {
        (None, Frame::Table(table)) => body.tables.push(table),
        (None, Frame::Paragraph(paragraph)) => body.paragraphs.push(paragraph),
        (Some(Frame::Cell(cell)), Frame::Table(table)) => cell.tables.push(table),
        (Some(Frame::Cell(cell)), Frame::Paragraph(paragraph)) => cell.paragraphs.push(paragraph),
        (Some(Frame::Table(table)), Frame::Row(row)) => table.rows.push(row),
        (Some(Frame::Row(row)), Frame::Cell(cell)) => row.cells.push(cell),
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const BODY: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p><w:r><w:t>Intro</w:t></w:r></w:p>
    <w:tbl>
      <w:tr>
        <w:tc><w:p/></w:tc>
        <w:tc>
          <w:p><w:r><w:t>My </w:t></w:r><w:r><w:t xml:space="preserve">Book</w:t></w:r></w:p>
          <w:p><w:hyperlink><w:r><w:t>Jane &amp; Co</w:t></w:r></w:hyperlink></w:p>
        </w:tc>
      </w:tr>
    </w:tbl>
    <w:tbl>
      <w:tr>
        <w:tc>
          <w:tbl>
            <w:tr>
              <w:tc><w:p/></w:tc>
              <w:tc><w:p><w:r><w:t>Quoted text</w:t></w:r></w:p></w:tc>
              <w:tc><w:p><w:hyperlink><w:r><w:t>17</w:t></w:r></w:hyperlink></w:p></w:tc>
            </w:tr>
          </w:tbl>
        </w:tc>
      </w:tr>
    </w:tbl>
  </w:body>
</w:document>"#;

    #[test]
    fn test_parse_document_tree() {
        let body = parse_document_xml(BODY).unwrap();

        assert_eq!(body.paragraphs, vec![Paragraph::new("Intro")]);
        assert_eq!(body.tables.len(), 2);

        let meta = &body.tables[0].rows[0].cells[1];
        assert_eq!(meta.paragraphs, vec![Paragraph::new("My Book"), Paragraph::new("Jane & Co")]);

        let wrapper = &body.tables[1].rows[0].cells[0];
        assert_eq!(wrapper.tables.len(), 1);
        assert_eq!(
            wrapper.tables[0],
            Table::new(vec![Row::new(vec![
                Cell::with_text(&[""]),
                Cell::with_text(&["Quoted text"]),
                Cell::with_text(&["17"]),
            ])])
        );
    }

    #[test]
    fn test_malformed_xml_is_decode_error() {
        let result = parse_document_xml("<w:document><w:body><w:tbl></w:body>");
        assert!(matches!(result, Err(DecodeError::Xml(_))));
    }

    fn package(parts: &[(&str, &str)]) -> Vec<u8> {
        let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
        for (name, content) in parts {
            writer
                .start_file(*name, zip::write::SimpleFileOptions::default())
                .unwrap();
            writer.write_all(content.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_read_package() {
        let data = package(&[("[Content_Types].xml", "<Types/>"), ("word/document.xml", BODY)]);
        let body = read_package(&data).unwrap();
        assert_eq!(body.tables.len(), 2);
    }

    #[test]
    fn test_package_without_document_part() {
        let data = package(&[("word/styles.xml", "<w:styles/>")]);
        assert!(matches!(read_package(&data), Err(DecodeError::MissingPart(_))));
    }

    #[test]
    fn test_not_an_archive() {
        assert!(matches!(read_package(b"plain text"), Err(DecodeError::Archive(_))));
    }
}
