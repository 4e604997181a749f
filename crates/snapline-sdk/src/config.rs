use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snapline_store::{FsSnapshotStore, DEFAULT_EXTENSION};

use crate::error::{SnapshotError, SnapshotResult};

/// Snapshot matching behavior.
///
/// The default configuration stores `.snap` files in the current directory
/// and compares against existing snapshots.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SnapshotConfig {
    /// Skip comparison and always rewrite the snapshot from the received text.
    pub always_overwrite: bool,
    /// Base directory snapshot files live in.
    pub storage_location: PathBuf,
    /// Extension of snapshot files, without the leading dot.
    pub extension: String,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            always_overwrite: false,
            storage_location: PathBuf::from("."),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }
}

impl SnapshotConfig {
    /// Parse a TOML configuration document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> SnapshotResult<Self> {
        toml::from_str(source).map_err(|e| SnapshotError::Config {
            location: "<inline>".into(),
            reason: e.to_string(),
        })
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> SnapshotResult<Self> {
        let location = path.display().to_string();
        let source = fs::read_to_string(path).map_err(|e| SnapshotError::Config {
            location: location.clone(),
            reason: e.to_string(),
        })?;
        toml::from_str(&source).map_err(|e| SnapshotError::Config {
            location,
            reason: e.to_string(),
        })
    }

    pub fn with_storage_location(mut self, location: impl Into<PathBuf>) -> Self {
        self.storage_location = location.into();
        self
    }

    pub fn with_always_overwrite(mut self, always_overwrite: bool) -> Self {
        self.always_overwrite = always_overwrite;
        self
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Filesystem store described by this configuration.
    pub fn fs_store(&self) -> FsSnapshotStore {
        FsSnapshotStore::new(&self.storage_location).with_extension(self.extension.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = SnapshotConfig::default();
        assert!(!c.always_overwrite);
        assert_eq!(c.storage_location, PathBuf::from("."));
        assert_eq!(c.extension, "snap");
    }

    #[test]
    fn empty_toml_is_default() {
        assert_eq!(
            SnapshotConfig::from_toml_str("").unwrap(),
            SnapshotConfig::default()
        );
    }

    #[test]
    fn parses_all_keys() {
        let c = SnapshotConfig::from_toml_str(
            r#"
            always_overwrite = true
            storage_location = "tests/snapshots"
            extension = "txt"
            "#,
        )
        .unwrap();
        assert!(c.always_overwrite);
        assert_eq!(c.storage_location, PathBuf::from("tests/snapshots"));
        assert_eq!(c.extension, "txt");
    }

    #[test]
    fn unknown_key_is_rejected() {
        let err = SnapshotConfig::from_toml_str("always_update = true").unwrap_err();
        assert!(matches!(err, SnapshotError::Config { .. }), "{err}");
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapline.toml");
        fs::write(&path, "storage_location = \"snaps\"\n").unwrap();

        let c = SnapshotConfig::load(&path).unwrap();
        assert_eq!(c.storage_location, PathBuf::from("snaps"));
        assert!(!c.always_overwrite);
    }

    #[test]
    fn load_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = SnapshotConfig::load(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, SnapshotError::Config { .. }));
    }

    #[test]
    fn builders_and_store() {
        let c = SnapshotConfig::default()
            .with_storage_location("snaps")
            .with_always_overwrite(true)
            .with_extension(".out");
        assert!(c.always_overwrite);

        let store = c.fs_store();
        assert_eq!(store.root(), Path::new("snaps"));
        assert_eq!(store.extension(), "out");
    }
}
