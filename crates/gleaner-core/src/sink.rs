//! Submission of deduplicated records to an external sink.

use std::future::Future;

use tracing::{debug, info, warn};

use crate::error::SinkError;
use crate::models::record::Record;

/// What the remote side did with one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Stored; the id is reported when the API returns one.
    Created(Option<String>),
    /// Already present remotely.
    Duplicate(Option<String>),
    /// Refused with a status code and response body.
    Rejected { status: u16, body: String },
}

/// Destination for normalized records.
pub trait IllustrationSink {
    /// Submit a single record.
    fn submit(&self, record: &Record) -> impl Future<Output = Result<SubmitOutcome, SinkError>> + Send;
}

/// Tally of a submission run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitReport {
    pub created: usize,
    pub duplicates: usize,
    pub rejected: usize,
    /// Records whose request failed before a response arrived.
    pub failed: usize,
}

impl SubmitReport {
    pub fn total(&self) -> usize {
        self.created + self.duplicates + self.rejected + self.failed
    }

    fn record(&mut self, title: &str, result: Result<SubmitOutcome, SinkError>) {
        match result {
            Ok(SubmitOutcome::Created(id)) => {
                debug!("Created illustration: {} (id: {})", title, id.as_deref().unwrap_or("unknown"));
                self.created += 1;
            }
            Ok(SubmitOutcome::Duplicate(id)) => {
                debug!("Skipped duplicate: {} (id: {})", title, id.as_deref().unwrap_or("unknown"));
                self.duplicates += 1;
            }
            Ok(SubmitOutcome::Rejected { status, body }) => {
                warn!("Error posting {}: status {} body: {}", title, status, body);
                self.rejected += 1;
            }
            Err(e) => {
                warn!("Error posting {}: {}", title, e);
                self.failed += 1;
            }
        }
    }
}

/// Submit records one at a time, in order.
///
/// A failing record never stops the run; every outcome is counted.
pub async fn submit_all<S: IllustrationSink>(sink: &S, records: &[Record]) -> SubmitReport {
    let mut report = SubmitReport::default();
    for record in records {
        let result = sink.submit(record).await;
        report.record(&record.title, result);
    }

    info!(
        "Submitted {} records: {} created, {} duplicates, {} rejected, {} failed",
        report.total(),
        report.created,
        report.duplicates,
        report.rejected,
        report.failed
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct ScriptedSink {
        seen: Mutex<Vec<String>>,
    }

    impl IllustrationSink for ScriptedSink {
        async fn submit(&self, record: &Record) -> Result<SubmitOutcome, SinkError> {
            self.seen.lock().unwrap().push(record.content.clone());
            match record.content.as_str() {
                "new" => Ok(SubmitOutcome::Created(Some("1".to_string()))),
                "old" => Ok(SubmitOutcome::Duplicate(None)),
                "bad" => Ok(SubmitOutcome::Rejected {
                    status: 422,
                    body: "{}".to_string(),
                }),
                _ => Err(SinkError::Transport("connection refused".to_string())),
            }
        }
    }

    fn record(content: &str) -> Record {
        Record {
            title: content.to_string(),
            author: String::new(),
            source: String::new(),
            content: content.to_string(),
            tags: Vec::new(),
        }
    }

    #[tokio::test]
    async fn test_submit_all_counts_every_outcome() {
        let sink = ScriptedSink { seen: Mutex::new(Vec::new()) };
        let records = vec![record("new"), record("old"), record("bad"), record("down"), record("new")];

        let report = submit_all(&sink, &records).await;

        assert_eq!(
            report,
            SubmitReport {
                created: 2,
                duplicates: 1,
                rejected: 1,
                failed: 1,
            }
        );
        assert_eq!(report.total(), 5);
        assert_eq!(*sink.seen.lock().unwrap(), vec!["new", "old", "bad", "down", "new"]);
    }
}
