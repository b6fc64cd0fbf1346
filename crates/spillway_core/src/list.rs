//! The spilling list.

use crate::config::Config;
use crate::error::{CoreError, CoreResult};
use crate::memory;
use crate::stats::SpillStats;
use crate::Item;
use spillway_codec::{decode_record, encode_record};
use spillway_storage::{Segment, SegmentStore};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A list that keeps at most `max_size` items in memory and spills the rest
/// to segment files.
///
/// Items live either in the in-memory buffer (the newest, unflushed tail) or
/// in segments on disk (older runs, in flush order). Whenever the buffer
/// reaches `max_size` it is written out as a new segment.
///
/// # Ordering
///
/// Full traversals ([`SpillList::consume`], [`SpillList::to_vec`] and the
/// transforms) yield items in append order. [`SpillList::shift`] does not:
/// it serves the buffer first and only then the oldest segment.
///
/// # Example
///
/// ```rust
/// use spillway_core::{Config, SpillList};
///
/// let dir = tempfile::tempdir().unwrap();
/// let mut list = SpillList::new(Config::new().write_path(dir.path()).max_size(2));
///
/// list.push_all([1, 2, 3]).unwrap();
/// assert_eq!(list.len(), 3);
/// assert_eq!(list.segment_count(), 1);
///
/// assert_eq!(list.to_vec(false), vec![1, 2, 3]);
/// ```
pub struct SpillList<T> {
    pub(crate) config: Config,
    pub(crate) buffer: VecDeque<T>,
    pub(crate) store: SegmentStore,
    pub(crate) stats: SpillStats,
}

impl<T: Item> SpillList<T> {
    /// Creates an empty list. Nothing is written until the first spill.
    pub fn new(config: Config) -> Self {
        let store = SegmentStore::new(config.write_path.clone(), config.name.clone());
        Self {
            config,
            buffer: VecDeque::new(),
            store,
            stats: SpillStats::new(),
        }
    }

    /// Returns the list name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Returns the segment directory.
    #[must_use]
    pub fn write_path(&self) -> &Path {
        &self.config.write_path
    }

    /// Returns the spill threshold.
    #[must_use]
    pub fn max_size(&self) -> usize {
        self.config.max_size
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the number of items, in memory and on disk.
    ///
    /// Uses the recorded segment counts; no file is read.
    #[must_use]
    pub fn len(&self) -> usize {
        self.buffer.len() + self.store.record_count()
    }

    /// Returns `true` if the list holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the number of items currently held in memory.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }

    /// Returns the number of segments on disk.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.store.len()
    }

    /// Returns the segment file paths, oldest first.
    #[must_use]
    pub fn segment_paths(&self) -> Vec<PathBuf> {
        self.store.paths()
    }

    /// Returns the batch counter used to name segments.
    #[must_use]
    pub fn batch_counter(&self) -> u64 {
        self.store.batch_counter()
    }

    /// Returns the list statistics.
    #[must_use]
    pub fn stats(&self) -> &SpillStats {
        &self.stats
    }

    /// Returns `true` if the buffer is at or above the spill threshold.
    #[must_use]
    pub fn needs_flush(&self) -> bool {
        self.buffer.len() >= self.config.max_size
    }

    /// Appends one item.
    ///
    /// Spills before appending if the buffer is already full, and again after
    /// if the append filled it.
    ///
    /// # Errors
    ///
    /// Returns an error if a spill fails to encode or write.
    pub fn push(&mut self, item: T) -> CoreResult<()> {
        self.flush(false)?;
        self.buffer.push_back(item);
        self.flush(false)?;
        Ok(())
    }

    /// Appends a run of items, keeping their order.
    ///
    /// The whole run is spliced into the buffer between the two capacity
    /// checks, so a large run lands in a single segment. An empty run does
    /// nothing.
    ///
    /// # Errors
    ///
    /// Returns an error if a spill fails to encode or write.
    pub fn push_all<I>(&mut self, items: I) -> CoreResult<()>
    where
        I: IntoIterator<Item = T>,
    {
        let mut items = items.into_iter().peekable();
        if items.peek().is_none() {
            return Ok(());
        }

        self.flush(false)?;
        self.buffer.extend(items);
        self.flush(false)?;
        Ok(())
    }

    /// Writes the buffer out as a new segment.
    ///
    /// Does nothing when the buffer is empty, or when it is below the
    /// threshold and `force` is not set. Returns the path of the written
    /// segment.
    ///
    /// # Errors
    ///
    /// Returns an error if an item cannot be encoded or the segment cannot be
    /// written. The buffer is left intact in that case.
    pub fn flush(&mut self, force: bool) -> CoreResult<Option<PathBuf>> {
        if self.buffer.is_empty() || !(force || self.needs_flush()) {
            return Ok(None);
        }

        let segment = self.write_buffer()?;
        Ok(Some(segment.path().to_path_buf()))
    }

    fn write_buffer(&mut self) -> CoreResult<Segment> {
        let records = encode_all(self.buffer.iter())?;
        let segment = self.store.append(&records)?;

        self.buffer.clear();
        self.stats.record_flush(segment.len(), segment.bytes());
        debug!(
            list = %self.config.name,
            path = %segment.path().display(),
            records = segment.len(),
            "flushed buffer"
        );
        Ok(segment)
    }

    /// Removes and returns one item, buffer first.
    ///
    /// While the buffer holds items its first item is returned. Once it is
    /// empty the first record of the oldest segment is returned and the
    /// segment rewritten without it (or deleted when nothing remains). This
    /// is not FIFO across the whole list: newer buffered items come out
    /// before older ones still on disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the oldest segment cannot be read, rewritten or
    /// decoded. A record that fails to decode stays on disk.
    pub fn shift(&mut self) -> CoreResult<Option<T>> {
        if let Some(item) = self.buffer.pop_front() {
            return Ok(Some(item));
        }

        let item = self
            .store
            .pop_front(|record| decode_record::<T>(record, 0).map_err(CoreError::from))?;
        if item.is_some() {
            self.stats.record_disk_shift();
        }
        Ok(item)
    }

    /// Empties the list and deletes every segment file.
    ///
    /// Deletion is best-effort. The batch counter restarts at zero.
    pub fn clear(&mut self) {
        self.buffer.clear();
        let deleted = self.store.clear();
        self.stats.record_deletes(deleted);
        debug!(list = %self.config.name, deleted, "cleared list");
    }

    /// Calls `f` on every item, in shift order, persisting any changes it
    /// makes.
    ///
    /// Items are taken with [`SpillList::shift`], passed to `f` by mutable
    /// reference and collected into fresh segments of `max_size` items that
    /// replace the old ones; the final partial batch becomes the buffer.
    /// Every item is still present afterwards, but in shift order rather than
    /// append order.
    ///
    /// # Errors
    ///
    /// Returns an error if reading, encoding or writing fails. Items visited
    /// so far are kept (appended after the unvisited ones).
    pub fn for_each<F>(&mut self, mut f: F) -> CoreResult<()>
    where
        F: FnMut(&mut T),
    {
        let mut rebuilt = Vec::new();
        let mut pending = Vec::new();

        let result = self.rebuild_with(&mut f, &mut rebuilt, &mut pending);

        self.store.adopt(rebuilt);
        self.buffer.extend(pending);
        result
    }

    fn rebuild_with<F>(
        &mut self,
        f: &mut F,
        rebuilt: &mut Vec<Segment>,
        pending: &mut Vec<T>,
    ) -> CoreResult<()>
    where
        F: FnMut(&mut T),
    {
        while let Some(mut item) = self.shift()? {
            f(&mut item);
            pending.push(item);

            if pending.len() >= self.config.max_size {
                let records = encode_all(pending.iter())?;
                let segment = self.store.write_detached(&records)?;
                self.stats.record_flush(segment.len(), segment.bytes());
                rebuilt.push(segment);
                pending.clear();
            }
        }
        Ok(())
    }

    /// Force-flushes the buffer if system memory use is above `threshold`.
    ///
    /// See [`memory::check_pressure`]. Returns the written segment path, if
    /// any.
    ///
    /// # Errors
    ///
    /// Returns an error if the flush fails.
    pub fn relieve_pressure(&mut self, threshold: f64) -> CoreResult<Option<PathBuf>> {
        if memory::check_pressure(threshold).should_free {
            return self.flush(true);
        }
        Ok(None)
    }
}

impl<T: Item> Default for SpillList<T> {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl<T> std::fmt::Debug for SpillList<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpillList")
            .field("name", &self.config.name)
            .field("write_path", &self.config.write_path)
            .field("max_size", &self.config.max_size)
            .field("buffered", &self.buffer.len())
            .field("store", &self.store)
            .finish_non_exhaustive()
    }
}

fn encode_all<'a, T: Item + 'a>(items: impl Iterator<Item = &'a T>) -> CoreResult<Vec<String>> {
    Ok(items.map(encode_record).collect::<Result<_, _>>()?)
}
