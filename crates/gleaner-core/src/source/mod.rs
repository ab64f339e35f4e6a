//! Decoding of raw export files into document trees.

pub mod docx;
mod tabular;

pub use docx::{read_package, DocxBody};
pub use tabular::{read_csv, TabularInput};

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use scraper::Html;
use serde_json::Value;
use tracing::debug;

use crate::error::{DecodeError, GleanerError};

/// Result type for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceFormat {
    /// Annotation store or highlight dump, any JSON shape.
    Json,
    /// Highlight CSV with a named header row.
    Tabular,
    /// Book export as a DOCX package.
    Docx,
    /// Book export as a rendered HTML page.
    Html,
}

impl SourceFormat {
    /// Detect the format from a file extension, case-insensitively.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "json" => Some(Self::Json),
            "csv" => Some(Self::Tabular),
            "docx" => Some(Self::Docx),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }

    /// Detect the format of a file from its path.
    pub fn from_path(path: &Path) -> crate::Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
            .ok_or_else(|| GleanerError::UnsupportedFormat(format!("{} ({})", path.display(), ext)))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Tabular => "csv",
            Self::Docx => "docx",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SourceFormat {
    type Err = GleanerError;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::from_extension(s).ok_or_else(|| GleanerError::UnsupportedFormat(s.to_string()))
    }
}

/// A decoded export, ready for its extractor.
pub enum SourceDocument {
    Json(Value),
    Tabular(TabularInput),
    Docx(DocxBody),
    Html(Html),
}

impl SourceDocument {
    /// Decode raw bytes in the given format.
    pub fn decode(format: SourceFormat, data: &[u8]) -> Result<Self> {
        debug!("Decoding {} bytes as {}", data.len(), format);
        let document = match format {
            SourceFormat::Json => Self::Json(serde_json::from_slice(data)?),
            SourceFormat::Tabular => Self::Tabular(read_csv(data)?),
            SourceFormat::Docx => Self::Docx(read_package(data)?),
            SourceFormat::Html => Self::Html(Html::parse_document(&String::from_utf8_lossy(data))),
        };
        Ok(document)
    }

    /// Read and decode a file, detecting the format unless one is forced.
    pub fn load(path: &Path, format: Option<SourceFormat>) -> crate::Result<Self> {
        let format = match format {
            Some(format) => format,
            None => SourceFormat::from_path(path)?,
        };
        let data = std::fs::read(path)?;
        Ok(Self::decode(format, &data)?)
    }

    pub fn format(&self) -> SourceFormat {
        match self {
            Self::Json(_) => SourceFormat::Json,
            Self::Tabular(_) => SourceFormat::Tabular,
            Self::Docx(_) => SourceFormat::Docx,
            Self::Html(_) => SourceFormat::Html,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_detection() {
        assert_eq!(SourceFormat::from_path(Path::new("a/b/export.JSON")).unwrap(), SourceFormat::Json);
        assert_eq!(SourceFormat::from_path(Path::new("data.csv")).unwrap(), SourceFormat::Tabular);
        assert_eq!(SourceFormat::from_path(Path::new("book.docx")).unwrap(), SourceFormat::Docx);
        assert_eq!(SourceFormat::from_path(Path::new("book.htm")).unwrap(), SourceFormat::Html);
        assert!(matches!(
            SourceFormat::from_path(Path::new("notes.txt")),
            Err(GleanerError::UnsupportedFormat(_))
        ));
        assert!(SourceFormat::from_path(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("csv".parse::<SourceFormat>().unwrap(), SourceFormat::Tabular);
        assert!("pdf".parse::<SourceFormat>().is_err());
    }

    #[test]
    fn test_decode_json() {
        let document = SourceDocument::decode(SourceFormat::Json, br#"{"text": "x"}"#).unwrap();
        assert_eq!(document.format(), SourceFormat::Json);
    }

    #[test]
    fn test_decode_malformed_json() {
        let result = SourceDocument::decode(SourceFormat::Json, b"{\"text\": ");
        assert!(matches!(result, Err(DecodeError::Json(_))));
    }
}
