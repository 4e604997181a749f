use serde::{Deserialize, Serialize};
use snapline_compare::Mismatch;
use snapline_store::StoreError;
use thiserror::Error;

/// A snapshot and the received text differ.
///
/// Carries the structured comparison payload so tests can inspect it; the
/// `Display` output is a one-line summary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("mismatched snapshot with {difference_count} differences")]
pub struct MismatchError {
    /// Number of differing line positions.
    pub difference_count: u64,
    /// Snapshot lines at the differing positions.
    pub expected_report: String,
    /// Received lines at the differing positions.
    pub received_report: String,
}

impl MismatchError {
    /// Multi-line report: the summary followed by both transcripts.
    pub fn render(&self) -> String {
        format!(
            "{self}\n\nexpected (snapshot):\n{}\n\nreceived:\n{}",
            self.expected_report, self.received_report
        )
    }
}

impl From<Mismatch> for MismatchError {
    fn from(m: Mismatch) -> Self {
        Self {
            difference_count: m.difference_count,
            expected_report: m.expected_report,
            received_report: m.received_report,
        }
    }
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error(transparent)]
    InvalidId(StoreError),

    #[error("snapshot read failed: {0}")]
    StorageRead(#[source] StoreError),

    #[error("snapshot write failed: {0}")]
    StorageWrite(#[source] StoreError),

    #[error(transparent)]
    Mismatch(#[from] MismatchError),

    #[error("invalid configuration {location}: {reason}")]
    Config { location: String, reason: String },
}

impl SnapshotError {
    /// The mismatch payload, if this error is a mismatch.
    pub fn as_mismatch(&self) -> Option<&MismatchError> {
        match self {
            SnapshotError::Mismatch(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, SnapshotError::Mismatch(_))
    }

    /// The underlying I/O error of a storage failure.
    pub fn io_error(&self) -> Option<&std::io::Error> {
        match self {
            SnapshotError::StorageRead(e) | SnapshotError::StorageWrite(e) => e.io_error(),
            _ => None,
        }
    }
}

pub type SnapshotResult<T> = Result<T, SnapshotError>;
