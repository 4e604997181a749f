use std::fs::{self, File};
use std::io::{self, ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::id::SnapshotId;
use crate::traits::{ReadOutcome, SnapshotStore};

/// File extension used for snapshot files unless configured otherwise.
pub const DEFAULT_EXTENSION: &str = "snap";

/// Filesystem snapshot store.
///
/// Each snapshot lives in its own file at `<root>/<id>.<extension>`. Nested
/// identifiers (`a/b`) become sub-directories, created on first write.
///
/// Writes go to a temporary file in the destination directory which is then
/// renamed over the target, so a concurrent reader sees either the old or the
/// new snapshot, never a mix. Concurrent writers to the same identifier are
/// not serialized: the last rename wins.
#[derive(Clone, Debug)]
pub struct FsSnapshotStore {
    root: PathBuf,
    extension: String,
}

impl FsSnapshotStore {
    /// Create a store rooted at `root` using [`DEFAULT_EXTENSION`].
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    /// Use `extension` (with or without a leading dot) for snapshot files.
    /// An empty extension stores snapshots under the bare identifier.
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        let extension = extension.into();
        self.extension = extension.trim_start_matches('.').to_string();
        self
    }

    /// Base directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File extension of snapshot files, without the leading dot.
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Path of the file holding the snapshot for `id`.
    pub fn path_for(&self, id: &SnapshotId) -> PathBuf {
        let file_name = if self.extension.is_empty() {
            id.as_str().to_string()
        } else {
            format!("{}.{}", id, self.extension)
        };
        self.root.join(file_name)
    }

    fn write_atomic(path: &Path, text: &str) -> io::Result<()> {
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir)?;

        // Dropped (and removed) on any early return before `persist`.
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(text.as_bytes())?;
        tmp.as_file().sync_all()?;
        set_snapshot_permissions(tmp.as_file())?;
        if let Err(e) = tmp.persist(path) {
            let tmp_path = e.file.path().to_path_buf();
            if let Err(cleanup) = e.file.close() {
                warn!(path = %tmp_path.display(), error = %cleanup, "removing temporary snapshot file");
            }
            return Err(e.error);
        }
        Ok(())
    }
}

#[cfg(unix)]
fn set_snapshot_permissions(file: &File) -> io::Result<()> {
    use std::os::unix::fs::PermissionsExt;
    file.set_permissions(fs::Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn set_snapshot_permissions(_file: &File) -> io::Result<()> {
    Ok(())
}

impl SnapshotStore for FsSnapshotStore {
    fn read(&self, id: &SnapshotId) -> StoreResult<ReadOutcome> {
        let path = self.path_for(id);
        let mut file = match File::open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no snapshot recorded");
                return Ok(ReadOutcome::NotFound);
            }
            Err(e) => return Err(StoreError::read(path.display().to_string(), e)),
        };

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)
            .map_err(|e| StoreError::read(path.display().to_string(), e))?;
        debug!(path = %path.display(), bytes = bytes.len(), "read snapshot");
        // Invalid UTF-8 is content, not a read failure: it decodes to U+FFFD
        // and shows up as a difference.
        let text = String::from_utf8_lossy(&bytes).into_owned();
        Ok(ReadOutcome::Found(text))
    }

    fn write(&self, id: &SnapshotId, text: &str) -> StoreResult<()> {
        let path = self.path_for(id);
        Self::write_atomic(&path, text)
            .map_err(|e| StoreError::write(path.display().to_string(), e))?;
        debug!(path = %path.display(), bytes = text.len(), "wrote snapshot");
        Ok(())
    }

    fn exists(&self, id: &SnapshotId) -> StoreResult<bool> {
        let path = self.path_for(id);
        path.try_exists()
            .map_err(|e| StoreError::read(path.display().to_string(), e))
    }

    fn location(&self, id: &SnapshotId) -> String {
        self.path_for(id).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> SnapshotId {
        SnapshotId::new(name).unwrap()
    }

    fn temp_store() -> (tempfile::TempDir, FsSnapshotStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn path_uses_extension() {
        let store = FsSnapshotStore::new("snaps");
        assert_eq!(store.path_for(&id("render")), PathBuf::from("snaps/render.snap"));

        let store = store.with_extension(".txt");
        assert_eq!(store.extension(), "txt");
        assert_eq!(store.path_for(&id("render")), PathBuf::from("snaps/render.txt"));

        let store = store.with_extension("");
        assert_eq!(store.path_for(&id("render")), PathBuf::from("snaps/render"));
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_dir, store) = temp_store();
        assert_eq!(store.read(&id("absent")).unwrap(), ReadOutcome::NotFound);
        assert!(!store.exists(&id("absent")).unwrap());
    }

    #[test]
    fn missing_root_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsSnapshotStore::new(dir.path().join("does/not/exist"));
        assert_eq!(store.read(&id("absent")).unwrap(), ReadOutcome::NotFound);
    }

    #[test]
    fn write_then_read_returns_exact_text() {
        let (_dir, store) = temp_store();
        let text = "first line\r\n\tsecond\n\nno trailing newline";
        store.write(&id("exact"), text).unwrap();

        assert!(store.exists(&id("exact")).unwrap());
        assert_eq!(
            store.read(&id("exact")).unwrap(),
            ReadOutcome::Found(text.to_string())
        );
        let on_disk = fs::read(store.path_for(&id("exact"))).unwrap();
        assert_eq!(on_disk, text.as_bytes());
    }

    #[test]
    fn write_replaces_previous_text() {
        let (_dir, store) = temp_store();
        store.write(&id("replace"), "a much longer original text").unwrap();
        store.write(&id("replace"), "short").unwrap();
        assert_eq!(
            store.read(&id("replace")).unwrap().into_text().as_deref(),
            Some("short")
        );
    }

    #[test]
    fn nested_ids_create_directories() {
        let (dir, store) = temp_store();
        store.write(&id("suite/case"), "nested").unwrap();
        assert!(dir.path().join("suite").join("case.snap").is_file());
    }

    #[test]
    fn write_leaves_no_temp_files() {
        let (dir, store) = temp_store();
        store.write(&id("clean"), "x").unwrap();
        let names: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("clean.snap")]);
    }

    #[test]
    fn unreadable_snapshot_is_read_error() {
        let (dir, store) = temp_store();
        // A directory where the snapshot file should be cannot be read as text.
        fs::create_dir(dir.path().join("blocked.snap")).unwrap();

        let err = store.read(&id("blocked")).unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }), "{err}");
        assert!(err.io_error().is_some());
    }

    #[test]
    fn invalid_utf8_is_read_lossily() {
        let (dir, store) = temp_store();
        fs::write(dir.path().join("binary.snap"), b"line1\n\xff\n").unwrap();

        assert_eq!(
            store.read(&id("binary")).unwrap(),
            ReadOutcome::Found("line1\n\u{FFFD}\n".to_string())
        );
    }

    #[test]
    fn unwritable_location_is_write_error() {
        let (dir, store) = temp_store();
        // A regular file in place of the parent directory.
        fs::write(dir.path().join("suite"), "not a directory").unwrap();

        let err = store.write(&id("suite/case"), "text").unwrap_err();
        assert!(matches!(err, StoreError::Write { .. }), "{err}");
        assert!(err.to_string().starts_with("writing snapshot"));
    }

    #[cfg(unix)]
    #[test]
    fn written_snapshot_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let (_dir, store) = temp_store();
        store.write(&id("mode"), "x").unwrap();
        let mode = fs::metadata(store.path_for(&id("mode")))
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[test]
    fn location_is_the_file_path() {
        let store = FsSnapshotStore::new("snaps");
        assert_eq!(
            store.location(&id("x")),
            PathBuf::from("snaps/x.snap").display().to_string()
        );
    }
}
