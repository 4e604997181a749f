use crate::error::StoreResult;
use crate::id::SnapshotId;

/// Result of looking up a snapshot.
///
/// I/O failures are carried by the surrounding `Result`, so a read has
/// exactly three outcomes: found, not found, or error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReadOutcome {
    /// The snapshot exists; holds its full text.
    Found(String),
    /// No snapshot has been recorded for the identifier.
    NotFound,
}

impl ReadOutcome {
    /// Returns `true` if a snapshot was found.
    pub fn is_found(&self) -> bool {
        matches!(self, ReadOutcome::Found(_))
    }

    /// The snapshot text, if found.
    pub fn into_text(self) -> Option<String> {
        match self {
            ReadOutcome::Found(text) => Some(text),
            ReadOutcome::NotFound => None,
        }
    }
}

/// Storage for recorded snapshots.
///
/// All implementations must satisfy these invariants:
/// - `read` after a successful `write` returns exactly the written text.
/// - A missing snapshot is `Ok(ReadOutcome::NotFound)`, never an error.
/// - Any other failure is an error and is never retried internally.
/// - `write` replaces the previous text in full.
pub trait SnapshotStore: Send + Sync {
    /// Read the snapshot recorded for `id`.
    fn read(&self, id: &SnapshotId) -> StoreResult<ReadOutcome>;

    /// Record `text` as the snapshot for `id`, replacing any previous one.
    fn write(&self, id: &SnapshotId, text: &str) -> StoreResult<()>;

    /// Check whether a snapshot is recorded for `id`.
    ///
    /// Default implementation reads the snapshot. Backends may override with
    /// a cheaper check.
    fn exists(&self, id: &SnapshotId) -> StoreResult<bool> {
        Ok(self.read(id)?.is_found())
    }

    /// Human-readable location of the snapshot for `id`, used in messages.
    fn location(&self, id: &SnapshotId) -> String;
}
