use std::fmt;

use crate::error::{StoreError, StoreResult};

/// Logical name of a snapshot.
///
/// Identifiers must be unique across a test suite: the same identifier always
/// resolves to the same stored snapshot. A `/` separates nested names, which
/// filesystem backends map to sub-directories.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Validate and wrap an identifier.
    ///
    /// Rejects empty names, NUL bytes, absolute paths (including a leading
    /// drive prefix such as `C:`) and any empty, `.` or `..` path segment, so
    /// an identifier can never escape its store root.
    pub fn new(name: impl Into<String>) -> StoreResult<Self> {
        let name = name.into();
        if !Self::is_valid(&name) {
            return Err(StoreError::InvalidId(name));
        }
        Ok(Self(name))
    }

    fn is_valid(name: &str) -> bool {
        if name.is_empty() || name.contains('\0') {
            return false;
        }
        if name.starts_with('/') || name.starts_with('\\') || has_drive_prefix(name) {
            return false;
        }
        name.split(['/', '\\'])
            .all(|segment| !matches!(segment, "" | "." | ".."))
    }

    /// The identifier as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn has_drive_prefix(name: &str) -> bool {
    let bytes = name.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SnapshotId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<&str> for SnapshotId {
    type Error = StoreError;

    fn try_from(name: &str) -> StoreResult<Self> {
        Self::new(name)
    }
}

impl TryFrom<String> for SnapshotId {
    type Error = StoreError;

    fn try_from(name: String) -> StoreResult<Self> {
        Self::new(name)
    }
}
