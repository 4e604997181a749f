//! High-level Snapline API.
//!
//! Compares freshly produced text against a recorded snapshot. When no
//! snapshot exists yet, the received text is recorded and the check passes.
//!
//! ```no_run
//! use snapline_sdk::{match_snapshot, SnapshotConfig};
//!
//! let config = SnapshotConfig::default().with_storage_location("tests/snapshots");
//! match match_snapshot("greeting", "hello\nworld\n", &config) {
//!     Ok(verdict) => println!("{verdict}"),
//!     Err(err) => match err.as_mismatch() {
//!         Some(mismatch) => eprintln!("{}", mismatch.render()),
//!         None => eprintln!("{err}"),
//!     },
//! }
//! ```

pub mod config;
pub mod error;
pub mod snapshotter;

pub use config::SnapshotConfig;
pub use error::{MismatchError, SnapshotError, SnapshotResult};
pub use snapshotter::{assert_snapshot, match_snapshot, Snapshotter, Verdict};

pub use snapline_compare::{compare, compare_text, ComparisonResult, LineSequence, Mismatch};
pub use snapline_store::{
    FsSnapshotStore, InMemorySnapshotStore, ReadOutcome, SnapshotId, SnapshotStore, StoreError,
};
