//! # Spillway Core
//!
//! A bounded in-memory list that spills to disk.
//!
//! [`SpillList`] keeps up to `max_size` items in memory. When the buffer
//! fills it is written out as a segment file and the list keeps growing on
//! disk. The whole list can later be walked, drained or transformed without
//! ever loading more than one segment at a time.
//!
//! This crate provides:
//! - Capacity-triggered spilling and segment lifecycle
//! - Buffer-first removal ([`SpillList::shift`]) and in-place updates
//!   ([`SpillList::for_each`])
//! - Lazy append-order traversal ([`SpillList::consume`])
//! - Streaming `map`, `filter`, `reduce` and `flat` into new lists
//! - An advisory memory-pressure check ([`memory::check_pressure`])
//!
//! ## Example
//!
//! ```rust
//! use spillway_core::{Config, SpillList};
//!
//! let dir = tempfile::tempdir().unwrap();
//! let config = Config::new().name("squares").write_path(dir.path()).max_size(100);
//!
//! let mut list = SpillList::new(config);
//! for i in 0..1_000u64 {
//!     list.push(i).unwrap();
//! }
//! assert_eq!(list.len(), 1_000);
//!
//! let mut squares = list.map(|x| x * x, None).unwrap();
//! assert!(list.is_empty());
//! assert_eq!(squares.to_vec(true)[3], 9);
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod error;
mod list;
pub mod memory;
mod nested;
mod stats;
mod transform;
mod traversal;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use config::{Config, DEFAULT_MAX_SIZE};
pub use error::{CoreError, CoreResult};
pub use list::SpillList;
pub use memory::{check_pressure, MemoryPressure, DEFAULT_PRESSURE_THRESHOLD};
pub use nested::Nested;
pub use stats::SpillStats;
pub use traversal::{Consume, IntoIter};

/// Types that can be stored in a [`SpillList`].
///
/// Items must round-trip through their serialized form and be cloneable so
/// non-destructive traversals can hand out buffered items.
pub trait Item: Serialize + DeserializeOwned + Clone {}

impl<T: Serialize + DeserializeOwned + Clone> Item for T {}
