//! # Spillway Storage
//!
//! Segment files for Spillway lists.
//!
//! A segment is one immutable-until-drained file holding a contiguous run of
//! encoded records. The store treats records as opaque lines; encoding is the
//! caller's concern (see `spillway_codec`).
//!
//! ## Design Principles
//!
//! - Segments are written atomically (temporary file, sync, rename)
//! - The store tracks record counts so lengths never require a read
//! - Deletes are best-effort; a missing file is already deleted
//!
//! ## Example
//!
//! ```rust
//! use spillway_storage::{SegmentStore, StorageResult};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let mut store = SegmentStore::new(dir.path(), "events");
//! store.append(&["1".to_string(), "2".to_string()]).unwrap();
//!
//! assert_eq!(store.record_count(), 2);
//! let first = store
//!     .pop_front(|record| StorageResult::Ok(record.parse::<u32>().ok()))
//!     .unwrap();
//! assert_eq!(first, Some(Some(1)));
//! assert_eq!(store.record_count(), 1);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod segment;
mod store;

pub use error::{StorageError, StorageResult};
pub use segment::Segment;
pub use store::SegmentStore;
