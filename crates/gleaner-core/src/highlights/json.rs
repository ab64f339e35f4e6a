//! Highlight extraction from JSON exports of unknown shape.
//!
//! The walker visits every node of the tree. Each object is tried both as
//! a highlight on its own and as a book carrying a highlight list, and its
//! children are always visited too. The same highlight is routinely emitted
//! more than once; deduplication downstream collapses the copies.

use serde_json::{Map, Value};
use tracing::trace;

use crate::models::config::JsonKeysConfig;
use crate::models::record::RawCapture;

use super::rules::{pick, pick_page};
use super::{Collector, ExtractionResult, HighlightExtractor, Result};

/// Book-level fields handed down to the entries of a highlight list.
#[derive(Debug, Clone, Default)]
struct BookContext {
    title: String,
    author: String,
}

/// Recursive visitor over arbitrarily nested JSON highlight exports.
pub struct StructuredDocumentWalker {
    keys: JsonKeysConfig,
}

impl StructuredDocumentWalker {
    /// Create a walker with the given candidate keys.
    pub fn new(keys: JsonKeysConfig) -> Self {
        Self { keys }
    }

    fn walk(&self, value: &Value, inherited: Option<&BookContext>, out: &mut Collector) {
        match value {
            Value::Array(items) => {
                for item in items {
                    self.walk(item, inherited, out);
                }
            }
            Value::Object(object) => self.visit_object(object, inherited, out),
            _ => {}
        }
    }

    fn visit_object(&self, object: &Map<String, Value>, inherited: Option<&BookContext>, out: &mut Collector) {
        if let Some(raw) = self.capture_highlight(object, inherited) {
            out.offer(raw);
        }

        let book = BookContext {
            title: pick(object, &self.keys.book_title_keys),
            author: pick(object, &self.keys.author_keys),
        };

        for key in &self.keys.highlight_list_keys {
            if let Some(Value::Array(entries)) = object.get(key) {
                trace!("Book {:?} lists {} entries under {:?}", book.title, entries.len(), key);
                for entry in entries.iter().filter_map(Value::as_object) {
                    match self.capture_listed(entry, &book) {
                        Some(raw) => out.offer(raw),
                        None => out.skip_empty(),
                    }
                }
            }
        }

        for (key, child) in object {
            let context = (child.is_array() && self.is_highlight_list(key)).then_some(&book);
            self.walk(child, context, out);
        }
    }

    /// Read an object as a self-describing highlight.
    fn capture_highlight(&self, object: &Map<String, Value>, inherited: Option<&BookContext>) -> Option<RawCapture> {
        let content = pick(object, &self.keys.content_keys);
        if content.is_empty() {
            return None;
        }

        let mut title = pick(object, &self.keys.book_title_keys);
        let mut author = pick(object, &self.keys.author_keys);
        if let Some(book) = inherited {
            if title.is_empty() {
                title = book.title.clone();
            }
            if author.is_empty() {
                author = book.author.clone();
            }
        }

        Some(
            RawCapture::new(content)
                .with_author(author)
                .with_book_title(title)
                .with_locator(pick(object, &self.keys.locator_type_keys), self.locator(object))
                .with_seed_tag(pick(object, &self.keys.external_id_keys))
                .with_seed_tag(pick(object, &self.keys.color_keys)),
        )
    }

    /// Read an entry of a book's highlight list. Source is the book title
    /// alone, plus an integer page when the entry has one, and only the
    /// color seeds the tags.
    fn capture_listed(&self, entry: &Map<String, Value>, book: &BookContext) -> Option<RawCapture> {
        let content = pick(entry, &self.keys.content_keys);
        if content.is_empty() {
            return None;
        }

        Some(
            RawCapture::new(content)
                .with_author(book.author.clone())
                .with_book_title(book.title.clone())
                .with_locator("", pick_page(entry, &self.keys.locator_keys))
                .with_seed_tag(pick(entry, &self.keys.color_keys)),
        )
    }

    /// String locator, falling back to a numeric page.
    fn locator(&self, object: &Map<String, Value>) -> String {
        let locator = pick(object, &self.keys.locator_keys);
        if locator.is_empty() {
            pick_page(object, &self.keys.locator_keys)
        } else {
            locator
        }
    }

    fn is_highlight_list(&self, key: &str) -> bool {
        self.keys.highlight_list_keys.iter().any(|k| k == key)
    }
}

impl Default for StructuredDocumentWalker {
    fn default() -> Self {
        Self::new(JsonKeysConfig::default())
    }
}

impl HighlightExtractor for StructuredDocumentWalker {
    type Input = Value;

    fn extract(&self, input: &Value) -> Result<ExtractionResult> {
        let mut out = Collector::new("JSON");
        self.walk(input, None, &mut out);
        Ok(out.finish())
    }
}
