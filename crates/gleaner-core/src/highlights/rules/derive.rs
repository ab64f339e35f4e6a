//! Shared title, source and tag derivation applied to every raw capture.

use tracing::trace;

use crate::models::record::{RawCapture, Record};

use super::text::{normalize, truncate_chars};
use super::{QUOTE_MAX_CHARS, QUOTE_TAG, REVIEW_TAG, TITLE_MAX_CHARS};

/// Turns format-specific raw captures into canonical records.
#[derive(Debug, Clone)]
pub struct RecordNormalizer {
    title_max_chars: usize,
    quote_max_chars: usize,
}

impl RecordNormalizer {
    /// Create a normalizer with the standard limits.
    pub fn new() -> Self {
        Self {
            title_max_chars: TITLE_MAX_CHARS,
            quote_max_chars: QUOTE_MAX_CHARS,
        }
    }

    /// Derive a record, or `None` when the content is empty after
    /// normalization.
    pub fn derive(&self, raw: &RawCapture) -> Option<Record> {
        let content = normalize(&raw.content);
        if content.is_empty() {
            trace!("Suppressing capture with empty content");
            return None;
        }

        let seeds = raw.seed_tags.iter().map(|tag| normalize(tag));
        Some(Record {
            title: truncate_chars(&content, self.title_max_chars).to_string(),
            author: normalize(&raw.author),
            source: compose_source(&raw.book_title, &raw.locator_type, &raw.locator),
            tags: self.derive_tags(seeds, &content),
            content,
        })
    }

    fn derive_tags(&self, seeds: impl Iterator<Item = String>, content: &str) -> Vec<String> {
        let mut tags: Vec<String> = seeds.filter(|tag| !tag.is_empty()).collect();
        tags.push(REVIEW_TAG.to_string());
        if content.chars().count() < self.quote_max_chars {
            tags.push(QUOTE_TAG.to_string());
        }
        tags
    }
}

impl Default for RecordNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Compose a source string from book title and locator parts.
///
/// A bare locator is read as a page number (`"{book} p. {locator}"`);
/// otherwise the non-empty parts are joined by single spaces.
pub fn compose_source(book_title: &str, locator_type: &str, locator: &str) -> String {
    let book_title = normalize(book_title);
    let locator_type = normalize(locator_type);
    let locator = normalize(locator);

    if locator_type.is_empty() && !locator.is_empty() {
        return format!("{} p. {}", book_title, locator).trim().to_string();
    }

    [book_title, locator_type, locator]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
