//! Individual segment files.

use crate::error::{StorageError, StorageResult};
use spillway_codec::{join_records, split_records};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Extension used for in-progress segment writes.
const TEMP_EXTENSION: &str = "json.tmp";

/// An on-disk segment: a file holding `len` line-delimited records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    path: PathBuf,
    len: usize,
    bytes: u64,
}

impl Segment {
    /// Writes `records` to `path` and returns the resulting segment.
    ///
    /// The body goes to a sibling temporary file which is synced and then
    /// renamed over `path`, so a segment is either fully written or absent.
    /// Parent directories are created as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if `records` is empty or any file operation fails.
    pub fn write(path: &Path, records: &[String]) -> StorageResult<Self> {
        if records.is_empty() {
            return Err(StorageError::corrupted(path, "refusing to write an empty segment"));
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let body = join_records(records);
        let temp_path = path.with_extension(TEMP_EXTENSION);

        let mut file = File::create(&temp_path)?;
        file.write_all(body.as_bytes())?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp_path, path)?;

        Ok(Self {
            path: path.to_path_buf(),
            len: records.len(),
            bytes: body.len() as u64,
        })
    }

    /// Returns the path to the segment file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the number of records the segment holds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the segment holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the size of the segment body in bytes.
    #[must_use]
    pub fn bytes(&self) -> u64 {
        self.bytes
    }

    /// Reads the whole segment body as text.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the file cannot be read (check
    /// [`StorageError::is_not_found`] for a vanished file) and
    /// [`StorageError::InvalidUtf8`] if its contents are not text.
    pub fn read_body(&self) -> StorageResult<String> {
        let bytes = fs::read(&self.path)?;
        String::from_utf8(bytes).map_err(|_| StorageError::InvalidUtf8(self.path.clone()))
    }

    /// Reads every raw record of the segment, in order.
    ///
    /// # Errors
    ///
    /// Same as [`Segment::read_body`].
    pub fn read(&self) -> StorageResult<Vec<String>> {
        Ok(split_records(&self.read_body()?))
    }

    /// Rewrites the segment in place with `records`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn rewrite(&mut self, records: &[String]) -> StorageResult<()> {
        *self = Self::write(&self.path, records)?;
        Ok(())
    }

    /// Deletes the segment file.
    ///
    /// Deletion is best-effort: a missing file counts as deleted and other
    /// failures are logged. Returns `true` if the file is gone afterwards.
    pub fn delete(&self) -> bool {
        remove_file_best_effort(&self.path)
    }
}

/// Removes a file, treating "not found" as success and logging other errors.
pub(crate) fn remove_file_best_effort(path: &Path) -> bool {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!(path = %path.display(), "deleted segment");
            true
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => true,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to delete segment");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn records(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| (*v).to_string()).collect()
    }

    #[test]
    fn write_and_read() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("list_batch_1.json");

        let segment = Segment::write(&path, &records(&["1", "2", "3"])).unwrap();
        assert_eq!(segment.len(), 3);
        assert_eq!(segment.bytes(), 5);
        assert_eq!(fs::read_to_string(&path).unwrap(), "1\n2\n3");
        assert_eq!(segment.read().unwrap(), records(&["1", "2", "3"]));
    }

    #[test]
    fn single_record_has_no_line_break() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("one.json");

        Segment::write(&path, &records(&[r#"{"item":5}"#])).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), r#"{"item":5}"#);
    }

    #[test]
    fn write_creates_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deeper").join("seg.json");

        Segment::write(&path, &records(&["x"])).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension(TEMP_EXTENSION).exists());
    }

    #[test]
    fn empty_write_is_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.json");

        assert!(Segment::write(&path, &[]).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn rewrite_replaces_contents() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seg.json");

        let mut segment = Segment::write(&path, &records(&["1", "2"])).unwrap();
        segment.rewrite(&records(&["2"])).unwrap();

        assert_eq!(segment.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "2");
    }

    #[test]
    fn read_missing_is_not_found() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seg.json");

        let segment = Segment::write(&path, &records(&["1"])).unwrap();
        fs::remove_file(&path).unwrap();

        let err = segment.read().unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn read_binary_garbage_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seg.json");

        let segment = Segment::write(&path, &records(&["1"])).unwrap();
        fs::write(&path, [0xff, 0xfe, 0x00]).unwrap();

        assert!(matches!(segment.read(), Err(StorageError::InvalidUtf8(_))));
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("seg.json");

        let segment = Segment::write(&path, &records(&["1"])).unwrap();
        assert!(segment.delete());
        assert!(!path.exists());
        assert!(segment.delete());
    }
}
