//! Submission sink
//!
//! The boundary a completed achievement record crosses when the user
//! submits the form. Nothing in this application persists records; the
//! only implementation logs the record as a single JSON line. A backend
//! client would implement the same trait and be injected into the form.

use thiserror::Error;

use crate::state::data::AchievementRecord;

/// Errors that can occur while handing a record to a sink
#[derive(Error, Debug)]
pub enum SubmissionError {
    /// The record could not be serialized for the sink
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The sink refused the record
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Destination for completed achievement records
pub trait SubmissionSink {
    /// Unique name for this sink, used in logs
    fn name(&self) -> &str;

    /// Hand over a completed record
    fn submit_draft(&mut self, record: &AchievementRecord) -> Result<(), SubmissionError>;
}

/// Sink that logs submitted records instead of persisting them
pub struct DiagnosticSink;

impl SubmissionSink for DiagnosticSink {
    fn name(&self) -> &str {
        "diagnostic"
    }

    fn submit_draft(&mut self, record: &AchievementRecord) -> Result<(), SubmissionError> {
        let json = record.to_json()?;
        tracing::info!(sink = self.name(), record = %json, "submitted achievement");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::data::ImageBlob;
    use chrono::NaiveDate;

    fn record() -> AchievementRecord {
        AchievementRecord {
            description: "Club championship".to_string(),
            venue: "Riverside Courts".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 3, 8).unwrap(),
            images: vec![ImageBlob {
                file_name: "trophy.png".to_string(),
                bytes: vec![1, 2, 3],
            }],
        }
    }

    #[test]
    fn test_diagnostic_sink_accepts_record() {
        let mut sink = DiagnosticSink;
        assert!(sink.submit_draft(&record()).is_ok());
    }

    #[test]
    fn test_rejection_formats_reason() {
        let err = SubmissionError::Rejected("backend offline".to_string());
        assert_eq!(err.to_string(), "submission rejected: backend offline");
    }
}
