//! Segment store management.

use crate::error::{StorageError, StorageResult};
use crate::segment::{remove_file_best_effort, Segment};
use std::collections::VecDeque;
use std::path::PathBuf;
use tracing::debug;

/// Owns the ordered set of segment files for one named list.
///
/// Segments are kept oldest first and new ones are only ever appended at the
/// tail. File names are derived from the prefix and a batch counter:
///
/// ```text
/// <dir>/<prefix>_batch_<n>.json
/// ```
///
/// The counter starts at 1 for the first segment and is only reset by
/// [`SegmentStore::clear`].
pub struct SegmentStore {
    /// Directory holding the segment files.
    dir: PathBuf,
    /// File name prefix, unique per list.
    prefix: String,
    /// Segments in flush order.
    segments: VecDeque<Segment>,
    /// Number of segment paths handed out so far.
    batch_counter: u64,
}

impl SegmentStore {
    /// Creates an empty store. Nothing touches the disk until the first write.
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
            segments: VecDeque::new(),
            batch_counter: 0,
        }
    }

    /// Returns the current batch counter.
    #[must_use]
    pub fn batch_counter(&self) -> u64 {
        self.batch_counter
    }

    /// Returns the number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Returns `true` if there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns the total number of records across all segments.
    ///
    /// Computed from the recorded counts; no file is read.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.segments.iter().map(Segment::len).sum()
    }

    /// Returns the segment at `index` (0 is the oldest).
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    /// Returns the segment file paths in flush order.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.segments.iter().map(|s| s.path().to_path_buf()).collect()
    }

    /// Returns the path the next segment would be written to, advancing the
    /// batch counter.
    fn next_path(&mut self) -> PathBuf {
        self.batch_counter += 1;
        self.dir
            .join(format!("{}_batch_{}.json", self.prefix, self.batch_counter))
    }

    /// Writes `records` as a new segment and appends it to the store.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written. The segment list is
    /// left unchanged in that case.
    pub fn append(&mut self, records: &[String]) -> StorageResult<Segment> {
        let segment = self.write_detached(records)?;
        self.segments.push_back(segment.clone());
        Ok(segment)
    }

    /// Writes `records` as a new segment without adding it to the store.
    ///
    /// The batch counter still advances, so the path never collides with an
    /// existing segment. Used to build a replacement list while the current
    /// one is being drained; see [`SegmentStore::adopt`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn write_detached(&mut self, records: &[String]) -> StorageResult<Segment> {
        let path = self.next_path();
        let segment = Segment::write(&path, records)?;
        debug!(
            path = %path.display(),
            records = segment.len(),
            bytes = segment.bytes(),
            "wrote segment"
        );
        Ok(segment)
    }

    /// Appends previously detached segments at the tail, in order.
    pub fn adopt(&mut self, segments: impl IntoIterator<Item = Segment>) {
        self.segments.extend(segments);
    }

    /// Removes the first record of the oldest segment and returns it decoded.
    ///
    /// `decode` sees the record before anything on disk changes; when it
    /// fails the segment is left exactly as it was. Otherwise the remainder
    /// is written back to the same file, or the file is deleted and the
    /// segment dropped when nothing remains.
    ///
    /// # Errors
    ///
    /// Propagates read, decode and rewrite failures. A segment file that turns
    /// out to hold no records is dropped and reported as corrupted.
    pub fn pop_front<V, E, F>(&mut self, decode: F) -> Result<Option<V>, E>
    where
        F: FnOnce(&str) -> Result<V, E>,
        E: From<StorageError>,
    {
        let Some(segment) = self.segments.front_mut() else {
            return Ok(None);
        };

        let records = segment.read()?;
        let Some(first) = records.first() else {
            let path = segment.path().to_path_buf();
            self.discard_front(true);
            return Err(StorageError::corrupted(path, "segment holds no records").into());
        };

        let value = decode(first)?;
        if records.len() == 1 {
            self.discard_front(true);
        } else {
            segment.rewrite(&records[1..])?;
        }

        Ok(Some(value))
    }

    /// Removes the oldest segment from the store, deleting its file when
    /// `delete` is set.
    pub fn discard_front(&mut self, delete: bool) -> Option<Segment> {
        let segment = self.segments.pop_front()?;
        if delete {
            segment.delete();
        }
        Some(segment)
    }

    /// Removes the segment at `index` from the store without touching its file.
    pub fn forget(&mut self, index: usize) -> Option<Segment> {
        self.segments.remove(index)
    }

    /// Deletes every segment file and resets the store.
    ///
    /// Deletion is best-effort. Returns the number of files that are gone.
    pub fn clear(&mut self) -> usize {
        let deleted = self
            .segments
            .drain(..)
            .filter(|segment| remove_file_best_effort(segment.path()))
            .count();
        self.batch_counter = 0;
        deleted
    }
}

impl std::fmt::Debug for SegmentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentStore")
            .field("dir", &self.dir)
            .field("prefix", &self.prefix)
            .field("segments", &self.segments.len())
            .field("batch_counter", &self.batch_counter)
            .finish_non_exhaustive()
    }
}
