//! Configuration structures for the import pipeline.

use serde::{Deserialize, Serialize};

/// Main configuration for the gleaner pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GleanerConfig {
    /// Candidate keys for structured (JSON) exports.
    pub extraction: JsonKeysConfig,

    /// Column names of the CSV export.
    pub tabular: TabularConfig,

    /// Document package (DOCX) export configuration.
    pub docx: DocxConfig,

    /// Rendered page (HTML) export configuration.
    pub html: HtmlConfig,

    /// Remote content API configuration.
    pub api: ApiConfig,
}

impl Default for GleanerConfig {
    fn default() -> Self {
        Self {
            extraction: JsonKeysConfig::default(),
            tabular: TabularConfig::default(),
            docx: DocxConfig::default(),
            html: HtmlConfig::default(),
            api: ApiConfig::default(),
        }
    }
}

/// Prioritized candidate key lists for heterogeneous JSON exports.
///
/// Every list is tried in order and the first non-empty string wins.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JsonKeysConfig {
    /// Highlight text.
    pub content_keys: Vec<String>,

    /// Book author.
    pub author_keys: Vec<String>,

    /// Book title or source file.
    pub book_title_keys: Vec<String>,

    /// Locator kind ("page", "location").
    pub locator_type_keys: Vec<String>,

    /// Locator value.
    pub locator_keys: Vec<String>,

    /// External book identifier, used as the first seed tag.
    pub external_id_keys: Vec<String>,

    /// Highlight color, used as a seed tag.
    pub color_keys: Vec<String>,

    /// Keys whose array value holds the highlights of a book-level object.
    pub highlight_list_keys: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for JsonKeysConfig {
    fn default() -> Self {
        Self {
            content_keys: keys(&["text", "highlight", "content", "annotation"]),
            author_keys: keys(&["author", "bookAuthor", "book_author"]),
            book_title_keys: keys(&["title", "bookTitle", "book_title", "file", "book"]),
            locator_type_keys: keys(&["locationType", "location_type"]),
            locator_keys: keys(&["location", "page", "position"]),
            external_id_keys: keys(&["amazonID", "amazon_book_id", "amazon"]),
            color_keys: keys(&["color", "highlightColor"]),
            highlight_list_keys: keys(&["highlights", "entries"]),
        }
    }
}

/// Header names of the CSV export. Columns are looked up by name since
/// their order differs between exports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TabularConfig {
    pub highlight: String,
    pub book_title: String,
    pub book_author: String,
    pub external_id: String,
    pub color: String,
    pub location_type: String,
    pub location: String,
}

impl Default for TabularConfig {
    fn default() -> Self {
        Self {
            highlight: "Highlight".to_string(),
            book_title: "Book Title".to_string(),
            book_author: "Book Author".to_string(),
            external_id: "Amazon Book ID".to_string(),
            color: "Color".to_string(),
            location_type: "Location Type".to_string(),
            location: "Location".to_string(),
        }
    }
}

/// DOCX export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DocxConfig {
    /// Export-generated notices; a cell containing any of them is skipped.
    pub boilerplate: Vec<String>,
}

impl Default for DocxConfig {
    fn default() -> Self {
        Self {
            boilerplate: keys(&[
                "Created by",
                "Last synced",
                "This document is overwritten",
                "You should make a copy",
            ]),
        }
    }
}

/// CSS selectors for the rendered HTML export.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HtmlConfig {
    /// Table element wrapping one highlight.
    pub table_selector: String,

    /// Text-bearing element inside a highlight table.
    pub content_selector: String,

    /// Page link inside a highlight table.
    pub locator_selector: String,

    /// Book title selectors, first non-empty match wins.
    pub title_selectors: Vec<String>,

    /// Book author selectors, first non-empty match wins.
    pub author_selectors: Vec<String>,
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            table_selector: "table.c4".to_string(),
            content_selector: "span.c9".to_string(),
            locator_selector: "a.c10".to_string(),
            title_selectors: keys(&["h1 span.c33", "h1", ".title"]),
            author_selectors: keys(&["p span.c17", "p", ".subtitle"]),
        }
    }
}

/// Remote content API settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Endpoint receiving one illustration per POST.
    pub endpoint: String,

    /// Environment variable holding the bearer token.
    pub token_env: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://sw-api.wplr.rocks/illustration".to_string(),
            token_env: "API_TOKEN".to_string(),
            timeout_secs: 30,
        }
    }
}

impl GleanerConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_key_priorities() {
        let config = JsonKeysConfig::default();
        assert_eq!(config.content_keys[0], "text");
        assert_eq!(config.highlight_list_keys[0], "highlights");
        assert_eq!(config.locator_keys, vec!["location", "page", "position"]);
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: GleanerConfig =
            serde_json::from_str(r#"{"api": {"endpoint": "http://localhost/illustration"}}"#).unwrap();

        assert_eq!(config.api.endpoint, "http://localhost/illustration");
        assert_eq!(config.api.token_env, "API_TOKEN");
        assert_eq!(config.docx.boilerplate.len(), 4);
        assert_eq!(config.html.table_selector, "table.c4");
    }

    #[test]
    fn test_config_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = GleanerConfig::default();
        config.docx.boilerplate.push("Generated automatically".to_string());
        config.save(&path).unwrap();

        let loaded = GleanerConfig::from_file(&path).unwrap();
        assert_eq!(loaded.docx.boilerplate.last().unwrap(), "Generated automatically");
    }
}
