//! Lazy full traversal.
//!
//! A traversal walks every segment in flush order and then the buffer, so
//! items come out in append order. Segments are read one at a time; memory
//! use is bounded by the largest segment, not by the list.
//!
//! A segment is decoded in full before any of its items are yielded, so a
//! traversal only ever hands out whole segments.
//!
//! # Error Handling
//!
//! - A segment file that no longer exists is skipped
//! - Any other read or decode failure is logged and ends the traversal;
//!   nothing from the failing segment is yielded and later segments and the
//!   buffer are not visited
//!
//! Errors are never surfaced to the caller, so a short traversal is
//! ambiguous between "no more items" and "stopped on a bad segment". Check
//! [`crate::SpillStats::traversal_aborts`] to tell them apart.

use crate::list::SpillList;
use crate::Item;
use spillway_codec::decode_segment;
use std::iter::FusedIterator;
use tracing::{debug, warn};

/// Where a traversal currently is.
#[derive(Debug)]
enum Phase {
    Segments,
    Buffer,
    Done,
}

/// Traversal state, stepped against the list it walks.
struct Cursor<T> {
    /// Delete segments and drain the buffer while walking.
    cleanup: bool,
    phase: Phase,
    /// Index of the segment being read. Always 0 when cleaning up, since
    /// finished segments are removed from the front.
    segment: usize,
    /// Decoded items of the current segment not yet yielded.
    items: std::vec::IntoIter<T>,
    /// Whether `items` belongs to a segment that still has to be finished.
    in_segment: bool,
    /// Next buffer position, when not draining.
    buffer_pos: usize,
}

impl<T: Item> Cursor<T> {
    fn start(list: &mut SpillList<T>, cleanup: bool) -> Self {
        if let Err(e) = list.flush(false) {
            warn!(list = %list.config.name, error = %e, "capacity flush before traversal failed");
        }

        Self {
            cleanup,
            phase: Phase::Segments,
            segment: 0,
            items: Vec::new().into_iter(),
            in_segment: false,
            buffer_pos: 0,
        }
    }

    fn step(&mut self, list: &mut SpillList<T>) -> Option<T> {
        loop {
            match self.phase {
                Phase::Segments => {
                    if let Some(item) = self.items.next() {
                        return Some(item);
                    }

                    if self.in_segment {
                        self.finish_segment(list);
                    }
                    self.open_segment(list);
                }
                Phase::Buffer => {
                    let item = if self.cleanup {
                        list.buffer.pop_front()
                    } else {
                        let item = list.buffer.get(self.buffer_pos).cloned();
                        self.buffer_pos += 1;
                        item
                    };

                    if item.is_none() {
                        self.phase = Phase::Done;
                    }
                    return item;
                }
                Phase::Done => return None,
            }
        }
    }

    /// Loads and decodes the next segment, or moves on to the buffer.
    fn open_segment(&mut self, list: &mut SpillList<T>) {
        let read = match list.store.get(self.segment) {
            Some(segment) => segment.read_body(),
            None => {
                self.phase = Phase::Buffer;
                return;
            }
        };

        let body = match read {
            Ok(body) => body,
            Err(e) if e.is_not_found() => {
                if let Some(segment) = list.store.forget(self.segment) {
                    debug!(
                        path = %segment.path().display(),
                        records = segment.len(),
                        "segment vanished, skipping"
                    );
                }
                return;
            }
            Err(e) => {
                self.abort(list, &e);
                return;
            }
        };

        match decode_segment(&body) {
            Ok(items) => {
                self.items = items.into_iter();
                self.in_segment = true;
            }
            Err(e) => self.abort(list, &e),
        }
    }

    fn finish_segment(&mut self, list: &mut SpillList<T>) {
        self.in_segment = false;
        if self.cleanup {
            if let Some(segment) = list.store.discard_front(true) {
                list.stats.record_deletes(1);
                debug!(path = %segment.path().display(), "drained segment");
            }
        } else {
            self.segment += 1;
        }
    }

    fn abort(&mut self, list: &mut SpillList<T>, error: &dyn std::fmt::Display) {
        let path = list.store.get(self.segment).map(|s| s.path().display().to_string());
        warn!(
            list = %list.config.name,
            segment = path.as_deref().unwrap_or("<none>"),
            error = %error,
            "traversal stopped on unreadable segment"
        );
        list.stats.record_traversal_abort();
        self.items = Vec::new().into_iter();
        self.in_segment = false;
        self.phase = Phase::Done;
    }
}

/// Iterator returned by [`SpillList::consume`].
pub struct Consume<'a, T: Item> {
    list: &'a mut SpillList<T>,
    cursor: Cursor<T>,
}

impl<T: Item> Iterator for Consume<'_, T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.cursor.step(self.list)
    }
}

impl<T: Item> FusedIterator for Consume<'_, T> {}

/// Owning iterator returned by `SpillList::into_iter`; drains the list.
pub struct IntoIter<T: Item> {
    list: SpillList<T>,
    cursor: Cursor<T>,
}

impl<T: Item> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        self.cursor.step(&mut self.list)
    }
}

impl<T: Item> FusedIterator for IntoIter<T> {}

impl<T: Item> SpillList<T> {
    /// Walks every item in append order.
    ///
    /// Runs the capacity flush first, then reads each segment in flush order
    /// and finally the buffer. With `cleanup` the walk is destructive: each
    /// segment file is deleted once fully yielded and buffered items are
    /// removed as they are yielded. Without it the list is left as it was and
    /// the walk can be repeated.
    ///
    /// Dropping a destructive iterator part way through keeps the segment it
    /// was reading, so those items are seen again by the next traversal.
    pub fn consume(&mut self, cleanup: bool) -> Consume<'_, T> {
        let cursor = Cursor::start(self, cleanup);
        Consume { list: self, cursor }
    }

    /// Collects a traversal into a vector. See [`SpillList::consume`].
    #[must_use]
    pub fn to_vec(&mut self, consume_original: bool) -> Vec<T> {
        self.consume(consume_original).collect()
    }
}

impl<'a, T: Item> IntoIterator for &'a mut SpillList<T> {
    type Item = T;
    type IntoIter = Consume<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.consume(true)
    }
}

impl<T: Item> IntoIterator for SpillList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let cursor = Cursor::start(&mut self, true);
        IntoIter { list: self, cursor }
    }
}
