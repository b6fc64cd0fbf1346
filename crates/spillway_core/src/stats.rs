//! List statistics.
//!
//! Counters describing how much a list has spilled and read back. They are
//! diagnostics only and never influence behaviour.
//!
//! # Usage
//!
//! ```rust,ignore
//! let mut list = SpillList::new(Config::new().max_size(2));
//! list.push_all(0..10)?;
//!
//! let stats = list.stats();
//! println!("Flushes: {}", stats.flushes());
//! println!("Bytes written: {}", stats.bytes_written());
//! ```

/// Counters for one list. All values only ever increase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpillStats {
    /// Segments written by flushes and rebuilds.
    flushes: u64,
    /// Records written to segments.
    records_written: u64,
    /// Segment body bytes written.
    bytes_written: u64,
    /// Segment files deleted after being drained or cleared.
    segments_deleted: u64,
    /// Items returned by `shift` that came from disk.
    disk_shifts: u64,
    /// Traversals stopped early by an unreadable segment.
    traversal_aborts: u64,
}

impl SpillStats {
    /// Creates zeroed statistics.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record_flush(&mut self, records: usize, bytes: u64) {
        self.flushes += 1;
        self.records_written += records as u64;
        self.bytes_written += bytes;
    }

    pub(crate) fn record_deletes(&mut self, count: usize) {
        self.segments_deleted += count as u64;
    }

    pub(crate) fn record_disk_shift(&mut self) {
        self.disk_shifts += 1;
    }

    pub(crate) fn record_traversal_abort(&mut self) {
        self.traversal_aborts += 1;
    }

    /// Number of segments written.
    #[must_use]
    pub fn flushes(&self) -> u64 {
        self.flushes
    }

    /// Number of records written to segments.
    #[must_use]
    pub fn records_written(&self) -> u64 {
        self.records_written
    }

    /// Number of segment body bytes written.
    #[must_use]
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    /// Number of segment files deleted.
    #[must_use]
    pub fn segments_deleted(&self) -> u64 {
        self.segments_deleted
    }

    /// Number of shifted items that were read from disk.
    #[must_use]
    pub fn disk_shifts(&self) -> u64 {
        self.disk_shifts
    }

    /// Number of traversals cut short by a read or decode failure.
    #[must_use]
    pub fn traversal_aborts(&self) -> u64 {
        self.traversal_aborts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_accumulate() {
        let mut stats = SpillStats::new();
        stats.record_flush(3, 30);
        stats.record_flush(2, 12);
        stats.record_deletes(2);
        stats.record_disk_shift();
        stats.record_traversal_abort();

        assert_eq!(stats.flushes(), 2);
        assert_eq!(stats.records_written(), 5);
        assert_eq!(stats.bytes_written(), 42);
        assert_eq!(stats.segments_deleted(), 2);
        assert_eq!(stats.disk_shifts(), 1);
        assert_eq!(stats.traversal_aborts(), 1);
    }
}
