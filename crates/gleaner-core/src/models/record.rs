//! Highlight record models shared by every extractor.

use serde::{Deserialize, Serialize};

/// A normalized highlight, serialized as an `Illustration` on the wire.
///
/// Field names and order match the remote API payload exactly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Display title, a prefix of `content` of at most 100 characters.
    pub title: String,

    /// Book author, may be empty.
    pub author: String,

    /// Book title plus locator.
    pub source: String,

    /// Normalized highlight text, never empty.
    pub content: String,

    /// Provenance seeds, then the review marker, then an optional quote marker.
    pub tags: Vec<String>,
}

impl Record {
    /// Whether the record carries the given tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Number of characters in the content.
    pub fn content_len(&self) -> usize {
        self.content.chars().count()
    }
}

/// Loosely-typed fields captured by a format-specific extractor before
/// the shared derivation rules run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCapture {
    /// Highlight text as found in the input.
    pub content: String,

    /// Book author.
    pub author: String,

    /// Book title or file name.
    pub book_title: String,

    /// Kind of locator ("page", "location", ...).
    pub locator_type: String,

    /// Page, location or position value.
    pub locator: String,

    /// External ids and colors, in capture order.
    pub seed_tags: Vec<String>,
}

impl RawCapture {
    /// Start a capture from highlight text.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = author.into();
        self
    }

    pub fn with_book_title(mut self, title: impl Into<String>) -> Self {
        self.book_title = title.into();
        self
    }

    pub fn with_locator(mut self, locator_type: impl Into<String>, locator: impl Into<String>) -> Self {
        self.locator_type = locator_type.into();
        self.locator = locator.into();
        self
    }

    pub fn with_seed_tag(mut self, tag: impl Into<String>) -> Self {
        self.seed_tags.push(tag.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_wire_shape() {
        let record = Record {
            title: "Hi".to_string(),
            author: "A".to_string(),
            source: "Book p. 1".to_string(),
            content: "Hi".to_string(),
            tags: vec!["To Fix".to_string(), "Quotes".to_string()],
        };

        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"title":"Hi","author":"A","source":"Book p. 1","content":"Hi","tags":["To Fix","Quotes"]}"#
        );
    }

    #[test]
    fn test_raw_capture_builder() {
        let raw = RawCapture::new("text")
            .with_author("Author")
            .with_book_title("Book")
            .with_locator("page", "4")
            .with_seed_tag("blue");

        assert_eq!(raw.book_title, "Book");
        assert_eq!(raw.locator_type, "page");
        assert_eq!(raw.seed_tags, vec!["blue".to_string()]);
    }

    #[test]
    fn test_content_len_counts_chars() {
        let record = Record {
            title: String::new(),
            author: String::new(),
            source: String::new(),
            content: "żółw".to_string(),
            tags: Vec::new(),
        };
        assert_eq!(record.content_len(), 4);
    }
}
