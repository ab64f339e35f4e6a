//! Shared normalization rules used by every highlight extractor.

pub mod dedup;
pub mod derive;
pub mod fields;
pub mod patterns;
pub mod text;

pub use dedup::{dedup, dedup_key, Deduplicator};
pub use derive::{compose_source, RecordNormalizer};
pub use fields::{pick, pick_page};
pub use text::{normalize, truncate_chars};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 100;

/// Content shorter than this (in characters) is tagged as a quote.
pub const QUOTE_MAX_CHARS: usize = 150;

/// Marker appended to every record: extracted heuristically, needs review.
pub const REVIEW_TAG: &str = "To Fix";

/// Marker for short content.
pub const QUOTE_TAG: &str = "Quotes";
