//! Error types for the gleaner-core library.

use thiserror::Error;

/// Main error type for the gleaner library.
#[derive(Error, Debug)]
pub enum GleanerError {
    /// The raw input could not be decoded into a document tree.
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),

    /// The decoded document does not match the expected export template.
    #[error("structure error: {0}")]
    Structure(#[from] StructureError),

    /// No extractor is registered for the input.
    #[error("unsupported input format: {0}")]
    UnsupportedFormat(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors raised while turning raw bytes into a document tree.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// Malformed JSON.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed or ragged CSV.
    #[error("invalid CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The document package could not be opened.
    #[error("unreadable archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// The package body is not well-formed XML.
    #[error("invalid XML: {0}")]
    Xml(String),

    /// A required part is absent from the package.
    #[error("missing package part: {0}")]
    MissingPart(String),

    /// The input contains no header row.
    #[error("tabular input has no header row")]
    MissingHeader,
}

impl From<quick_xml::Error> for DecodeError {
    fn from(err: quick_xml::Error) -> Self {
        Self::Xml(err.to_string())
    }
}

/// The input decoded fine but is not laid out like the export it claims to be.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum StructureError {
    /// Expected table is absent.
    #[error("missing table {0}")]
    MissingTable(usize),

    /// Expected row is absent from a table.
    #[error("missing row {row} in {context}")]
    MissingRow { context: String, row: usize },

    /// Expected cell is absent from a row.
    #[error("missing cell {cell} in {context}")]
    MissingCell { context: String, cell: usize },

    /// Expected paragraph is absent from a cell.
    #[error("missing paragraph {paragraph} in {context}")]
    MissingParagraph { context: String, paragraph: usize },

    /// A required column is not named in the header row.
    #[error("missing column: {0}")]
    MissingColumn(String),

    /// A data row is shorter than the header claims.
    #[error("row {row} has no value for column {column}")]
    ShortRow { row: usize, column: String },
}

/// Errors raised by a submission sink.
#[derive(Error, Debug)]
pub enum SinkError {
    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// No credential is available for the remote API.
    #[error("missing API token: {0} is not set")]
    MissingToken(String),
}

/// Result type for the gleaner library.
pub type Result<T> = std::result::Result<T, GleanerError>;
