//! Data models for highlight records and pipeline configuration.

pub mod config;
pub mod record;

pub use config::{ApiConfig, DocxConfig, GleanerConfig, HtmlConfig, JsonKeysConfig, TabularConfig};
pub use record::{RawCapture, Record};
