//! Header-plus-rows view of a CSV highlight export.

use std::io::Read;

use csv::{ReaderBuilder, StringRecord};

use crate::error::DecodeError;

use super::Result;

/// Decoded tabular export: the header row and every data row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TabularInput {
    pub header: StringRecord,
    pub rows: Vec<StringRecord>,
}

impl TabularInput {
    /// Build an input from plain string slices.
    pub fn from_rows(header: &[&str], rows: &[&[&str]]) -> Self {
        Self {
            header: StringRecord::from(header.to_vec()),
            rows: rows.iter().map(|row| StringRecord::from(row.to_vec())).collect(),
        }
    }
}

/// Read a CSV export. The first record is the header; rows of a different
/// width than the header are a decode error.
pub fn read_csv<R: Read>(reader: R) -> Result<TabularInput> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let header = reader.headers()?.clone();
    if header.is_empty() {
        return Err(DecodeError::MissingHeader);
    }

    let rows = reader.records().collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(TabularInput { header, rows })
}
