//! Test fixtures and list helpers.
//!
//! Provides lists backed by a temporary directory that is removed when the
//! fixture is dropped, plus helpers for inspecting what is on disk.

use serde::{Deserialize, Serialize};
use spillway_core::{Config, Item, SpillList};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A list with its own temporary segment directory.
pub struct TestList<T: Item> {
    /// The list instance.
    pub list: SpillList<T>,
    /// The temporary directory (kept alive to prevent cleanup).
    dir: TempDir,
}

impl<T: Item> TestList<T> {
    /// Creates a list named `test` with the given spill threshold.
    pub fn new(max_size: usize) -> Self {
        Self::named("test", max_size)
    }

    /// Creates a list with the given name and spill threshold.
    pub fn named(name: &str, max_size: usize) -> Self {
        let dir = TempDir::new().expect("Failed to create temp directory");
        let config = Config::new()
            .name(name)
            .write_path(dir.path())
            .max_size(max_size);

        Self {
            list: SpillList::new(config),
            dir,
        }
    }

    /// Returns the segment directory.
    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    /// Returns the files currently in the segment directory, sorted.
    pub fn files(&self) -> Vec<PathBuf> {
        files_in(self.dir.path())
    }

    /// Creates another list in the same directory.
    pub fn sibling<U: Item>(&self, name: &str, max_size: usize) -> SpillList<U> {
        SpillList::new(
            Config::new()
                .name(name)
                .write_path(self.dir.path())
                .max_size(max_size),
        )
    }
}

impl<T: Item> std::ops::Deref for TestList<T> {
    type Target = SpillList<T>;

    fn deref(&self) -> &Self::Target {
        &self.list
    }
}

impl<T: Item> std::ops::DerefMut for TestList<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.list
    }
}

/// Runs a test with a temporary list.
///
/// # Example
///
/// ```rust,ignore
/// use spillway_testkit::with_temp_list;
///
/// #[test]
/// fn my_test() {
///     with_temp_list::<u32, _>(4, |list| {
///         list.push(1).unwrap();
///     });
/// }
/// ```
pub fn with_temp_list<T, F>(max_size: usize, f: F)
where
    T: Item,
    F: FnOnce(&mut SpillList<T>),
{
    let mut fixture = TestList::new(max_size);
    f(&mut fixture.list);
}

/// Returns the files in `dir`, sorted by name.
pub fn files_in(dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = fs::read_dir(dir)
        .expect("Failed to read directory")
        .map(|entry| entry.expect("Failed to read entry").path())
        .collect();
    files.sort();
    files
}

/// The record shape used across the test suites: `{"item": n}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Row {
    /// The payload.
    pub item: u64,
}

impl Row {
    /// Creates a row.
    pub fn new(item: u64) -> Self {
        Self { item }
    }
}

/// Rows `1..=count`.
pub fn rows(count: u64) -> Vec<Row> {
    (1..=count).map(Row::new).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_cleans_up() {
        let path;
        {
            let mut fixture = TestList::<Row>::new(1);
            fixture.push(Row::new(1)).unwrap();
            path = fixture.dir().to_path_buf();
            assert_eq!(fixture.files().len(), 1);
        }
        assert!(!path.exists());
    }

    #[test]
    fn sibling_shares_directory() {
        let fixture = TestList::<Row>::named("a", 2);
        let sibling: SpillList<u32> = fixture.sibling("b", 3);
        assert_eq!(sibling.write_path(), fixture.dir());
        assert_eq!(sibling.max_size(), 3);
    }

    #[test]
    fn with_temp_list_runs_closure() {
        let mut ran = false;
        with_temp_list::<Row, _>(2, |list| {
            list.push_all(rows(3)).unwrap();
            assert_eq!(list.len(), 3);
            ran = true;
        });
        assert!(ran);
    }
}
