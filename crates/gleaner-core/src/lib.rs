//! Core library for importing reading highlights.
//!
//! This crate provides:
//! - Decoding of e-reader JSON, highlight CSV, DOCX and HTML book exports
//! - Format-specific highlight extraction over the decoded trees
//! - Shared normalization (titles, sources, tags) and deduplication
//! - A sink interface for submitting records to the illustration API

pub mod error;
pub mod highlights;
pub mod models;
pub mod sink;
pub mod source;

pub use error::{DecodeError, GleanerError, Result, SinkError, StructureError};
pub use highlights::{
    DocxTableExtractor, ExtractionResult, ExtractionStats, HighlightExtractor, HtmlTableExtractor,
    ImportBatch, Importer, StructuredDocumentWalker, TabularRecordExtractor,
};
pub use models::config::GleanerConfig;
pub use models::record::{RawCapture, Record};
pub use sink::{submit_all, IllustrationSink, SubmitOutcome, SubmitReport};
pub use source::{SourceDocument, SourceFormat};
