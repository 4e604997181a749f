use std::fmt;

use serde::Serialize;
use snapline_compare::{compare_text, ComparisonResult};
use snapline_store::{FsSnapshotStore, ReadOutcome, SnapshotId, SnapshotStore};
use tracing::{debug, info};

use crate::config::SnapshotConfig;
use crate::error::{MismatchError, SnapshotError, SnapshotResult};

/// Successful outcome of a snapshot check.
///
/// Every variant is a passing verdict; a failing check is always an
/// `Err(SnapshotError::Mismatch)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// The received text matched the recorded snapshot.
    Matched,
    /// No snapshot existed; the received text was recorded.
    Recorded,
    /// `always_overwrite` is set; the snapshot was rewritten without comparing.
    Updated,
}

impl Verdict {
    /// Returns `true` if a snapshot was written by this check.
    pub fn wrote_snapshot(&self) -> bool {
        !matches!(self, Verdict::Matched)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Verdict::Matched => "snapshot matched",
            Verdict::Recorded => "snapshot recorded",
            Verdict::Updated => "snapshot updated",
        };
        f.write_str(s)
    }
}

/// Matches received text against snapshots held in a [`SnapshotStore`].
pub struct Snapshotter<S = FsSnapshotStore> {
    store: S,
    config: SnapshotConfig,
}

impl Snapshotter<FsSnapshotStore> {
    /// Filesystem-backed snapshotter rooted at `config.storage_location`.
    pub fn from_config(config: SnapshotConfig) -> Self {
        let store = config.fs_store();
        Self { store, config }
    }
}

impl<S: SnapshotStore> Snapshotter<S> {
    /// Use a custom store. `config.storage_location` and `config.extension`
    /// are ignored; the store decides where snapshots live.
    pub fn with_store(store: S, config: SnapshotConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Check `received` against the snapshot recorded under `id`.
    ///
    /// - With `always_overwrite`, the snapshot is rewritten and no comparison
    ///   runs.
    /// - Without a recorded snapshot, `received` is recorded verbatim.
    /// - Otherwise the two texts are compared line by line; any difference
    ///   is returned as [`SnapshotError::Mismatch`].
    ///
    /// Storage failures are returned as-is and never retried.
    pub fn match_snapshot(&self, id: &str, received: &str) -> SnapshotResult<Verdict> {
        let id = SnapshotId::new(id).map_err(SnapshotError::InvalidId)?;

        if self.config.always_overwrite {
            self.record(&id, received)?;
            info!(id = %id, location = %self.store.location(&id), "snapshot overwritten");
            return Ok(Verdict::Updated);
        }

        let reference = match self.store.read(&id).map_err(SnapshotError::StorageRead)? {
            ReadOutcome::Found(text) => text,
            ReadOutcome::NotFound => {
                self.record(&id, received)?;
                info!(id = %id, location = %self.store.location(&id), "snapshot recorded");
                return Ok(Verdict::Recorded);
            }
        };

        match compare_text(&reference, received) {
            ComparisonResult::Match => {
                debug!(id = %id, "snapshot matched");
                Ok(Verdict::Matched)
            }
            ComparisonResult::Mismatch(mismatch) => {
                debug!(
                    id = %id,
                    differences = mismatch.difference_count,
                    "snapshot mismatched"
                );
                Err(MismatchError::from(mismatch).into())
            }
        }
    }

    /// Read the snapshot recorded under `id`, if any.
    pub fn recorded(&self, id: &str) -> SnapshotResult<Option<String>> {
        let id = SnapshotId::new(id).map_err(SnapshotError::InvalidId)?;
        let outcome = self.store.read(&id).map_err(SnapshotError::StorageRead)?;
        Ok(outcome.into_text())
    }

    fn record(&self, id: &SnapshotId, received: &str) -> SnapshotResult<()> {
        self.store
            .write(id, received)
            .map_err(SnapshotError::StorageWrite)
    }
}

/// Check `received` against the snapshot file for `id` under
/// `config.storage_location`.
pub fn match_snapshot(id: &str, received: &str, config: &SnapshotConfig) -> SnapshotResult<Verdict> {
    Snapshotter::from_config(config.clone()).match_snapshot(id, received)
}

/// Like [`match_snapshot`], but panics with a readable report on any failure.
/// Intended for use inside `#[test]` functions.
#[track_caller]
pub fn assert_snapshot(id: &str, received: &str, config: &SnapshotConfig) {
    match match_snapshot(id, received, config) {
        Ok(_) => {}
        Err(SnapshotError::Mismatch(mismatch)) => {
            panic!("snapshot `{id}`: {}", mismatch.render())
        }
        Err(err) => panic!("snapshot `{id}`: {err}"),
    }
}
