//! Snapshot storage for Snapline.
//!
//! A snapshot is the recorded reference text for one logical identifier. This
//! crate locates, reads and writes those texts; it never interprets them.
//!
//! # Storage Backends
//!
//! All backends implement the [`SnapshotStore`] trait:
//!
//! - [`FsSnapshotStore`] -- one file per identifier under a base directory
//! - [`InMemorySnapshotStore`] -- `HashMap`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. A read is tri-state: found, not found, or an error. Only a missing
//!    snapshot is reported as [`ReadOutcome::NotFound`].
//! 2. Stored bytes are exactly the text that was written.
//! 3. Writes replace the whole snapshot; readers never see a partial file.
//! 4. All I/O errors are propagated, never silently ignored.

pub mod error;
pub mod fs;
pub mod id;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fs::{FsSnapshotStore, DEFAULT_EXTENSION};
pub use id::SnapshotId;
pub use memory::InMemorySnapshotStore;
pub use traits::{ReadOutcome, SnapshotStore};
