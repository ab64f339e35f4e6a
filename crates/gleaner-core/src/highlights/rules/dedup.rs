//! Deduplication of records by normalized content and source.

use std::collections::HashSet;

use tracing::trace;

use crate::models::record::Record;

use super::text::normalize;

const KEY_SEPARATOR: &str = "::";

/// Identity of a record: normalized content, separator, normalized source.
pub fn dedup_key(record: &Record) -> String {
    format!(
        "{}{}{}",
        normalize(&record.content),
        KEY_SEPARATOR,
        normalize(&record.source)
    )
}

/// Order-preserving deduplicator.
///
/// The first record seen for a key wins and output keeps first-occurrence
/// order, so repeated runs over the same input are deterministic.
#[derive(Debug, Default)]
pub struct Deduplicator {
    seen: HashSet<String>,
    records: Vec<Record>,
    dropped: usize,
}

impl Deduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, returning `false` if its key was already taken.
    pub fn insert(&mut self, record: Record) -> bool {
        if self.seen.insert(dedup_key(&record)) {
            self.records.push(record);
            true
        } else {
            trace!("Dropping duplicate record from {:?}", record.source);
            self.dropped += 1;
            false
        }
    }

    /// Number of records dropped so far.
    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<Record> {
        self.records
    }
}

impl Extend<Record> for Deduplicator {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

/// Collapse a sequence to one record per key, first-seen wins.
pub fn dedup(records: impl IntoIterator<Item = Record>) -> Vec<Record> {
    let mut dedup = Deduplicator::new();
    dedup.extend(records);
    dedup.into_records()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(content: &str, source: &str, tag: &str) -> Record {
        Record {
            title: content.to_string(),
            author: String::new(),
            source: source.to_string(),
            content: content.to_string(),
            tags: vec![tag.to_string()],
        }
    }

    #[test]
    fn test_first_seen_wins_and_order_kept() {
        let input = vec![
            record("a", "Book", "first"),
            record("b", "Book", "only"),
            record("a", "Book", "second"),
            record("a", "Other", "distinct source"),
        ];

        let output = dedup(input);

        assert_eq!(
            output,
            vec![
                record("a", "Book", "first"),
                record("b", "Book", "only"),
                record("a", "Other", "distinct source"),
            ]
        );
    }

    #[test]
    fn test_key_normalizes_whitespace() {
        assert_eq!(
            dedup_key(&record("a  b", " Book ", "x")),
            dedup_key(&record("a b", "Book", "y"))
        );
        assert_eq!(dedup_key(&record("dup", "", "x")), "dup::");
    }

    #[test]
    fn test_output_length_matches_distinct_keys() {
        let input: Vec<Record> = (0..30)
            .map(|i| record(&format!("c{}", i % 7), &format!("s{}", i % 2), "t"))
            .collect();
        let distinct: HashSet<String> = input.iter().map(dedup_key).collect();

        let output = dedup(input);
        assert_eq!(output.len(), distinct.len());
    }

    #[test]
    fn test_dedup_is_idempotent() {
        let input = vec![
            record("x", "A", "1"),
            record("y", "A", "2"),
            record("x", "A", "3"),
        ];
        let once = dedup(input);
        let twice = dedup(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_insert_counts_dropped() {
        let mut dedup = Deduplicator::new();
        assert!(dedup.insert(record("x", "A", "1")));
        assert!(!dedup.insert(record("x", "A", "2")));
        assert_eq!(dedup.len(), 1);
        assert_eq!(dedup.dropped(), 1);
    }
}
