//! Benchmark utilities.

#![warn(missing_docs)]

use spillway_core::{Config, SpillList};
use spillway_testkit::Row;
use std::path::Path;

/// Generate `count` rows.
pub fn generate_rows(count: u64) -> Vec<Row> {
    (0..count).map(Row::new).collect()
}

/// Create a list in `dir` holding `count` rows with the given threshold.
pub fn filled_list(dir: &Path, count: u64, max_size: usize) -> SpillList<Row> {
    let mut list = SpillList::new(Config::new().name("bench").write_path(dir).max_size(max_size));
    list.push_all(generate_rows(count)).expect("Failed to fill list");
    list
}
