//! Highlight extraction from the rendered HTML book export.

use scraper::{ElementRef, Html, Selector};

use crate::error::GleanerError;
use crate::models::config::HtmlConfig;
use crate::models::record::RawCapture;

use super::rules::normalize;
use super::{Collector, ExtractionResult, HighlightExtractor, Result};

/// Extractor for highlight tables on an exported page.
pub struct HtmlTableExtractor {
    table: Selector,
    content: Selector,
    locator: Selector,
    title: Vec<Selector>,
    author: Vec<Selector>,
}

fn parse_selector(selector: &str) -> crate::Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| GleanerError::Config(format!("invalid selector {:?}: {}", selector, e)))
}

fn parse_selectors(selectors: &[String]) -> crate::Result<Vec<Selector>> {
    selectors.iter().map(|s| parse_selector(s)).collect()
}

/// Normalized text of every element matching `selector` under `scope`.
fn text_of(scope: ElementRef<'_>, selector: &Selector) -> String {
    let text: String = scope.select(selector).flat_map(|el| el.text()).collect();
    normalize(&text)
}

impl HtmlTableExtractor {
    /// Compile the configured selectors.
    pub fn new(config: &HtmlConfig) -> crate::Result<Self> {
        Ok(Self {
            table: parse_selector(&config.table_selector)?,
            content: parse_selector(&config.content_selector)?,
            locator: parse_selector(&config.locator_selector)?,
            title: parse_selectors(&config.title_selectors)?,
            author: parse_selectors(&config.author_selectors)?,
        })
    }

    /// Text of the first element matched by the first selector that
    /// yields non-empty text.
    fn first_text(document: &Html, selectors: &[Selector]) -> String {
        selectors
            .iter()
            .filter_map(|selector| document.select(selector).next())
            .map(|el| normalize(&el.text().collect::<String>()))
            .find(|text| !text.is_empty())
            .unwrap_or_default()
    }
}

impl HighlightExtractor for HtmlTableExtractor {
    type Input = Html;

    fn extract(&self, document: &Html) -> Result<ExtractionResult> {
        let mut out = Collector::new("HTML");

        let book_title = Self::first_text(document, &self.title);
        let author = Self::first_text(document, &self.author);

        for table in document.select(&self.table) {
            let content = text_of(table, &self.content);
            let page = text_of(table, &self.locator);
            if content.is_empty() || page.is_empty() {
                out.skip_empty();
                continue;
            }

            out.offer(
                RawCapture::new(content)
                    .with_author(author.clone())
                    .with_book_title(book_title.clone())
                    .with_locator("", page),
            );
        }

        Ok(out.finish())
    }
}
