//! Streaming transforms.
//!
//! Each transform drains the source with a destructive traversal and pushes
//! its output into a new list that shares the source's `write_path` and
//! `max_size`. The source is empty afterwards. The result is force-flushed
//! before it is returned, so it holds everything on disk.
//!
//! Result names default to the source name with a suffix:
//!
//! | transform | suffix        |
//! |-----------|---------------|
//! | `map`     | `_mapped`     |
//! | `filter`  | `_filtered`   |
//! | `reduce`  | `_reduced`    |
//! | `flat`    | `_flattened`  |

use crate::error::CoreResult;
use crate::list::SpillList;
use crate::nested::Nested;
use crate::Item;

impl<T: Item> SpillList<T> {
    fn derived<U: Item>(&self, suffix: &str, name: Option<&str>) -> SpillList<U> {
        SpillList::new(self.config.derive(suffix, name))
    }

    /// Applies `f` to every item, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the result list fails to spill. Items already
    /// drained from the source are not restored.
    pub fn map<U, F>(&mut self, mut f: F, name: Option<&str>) -> CoreResult<SpillList<U>>
    where
        U: Item,
        F: FnMut(T) -> U,
    {
        let mut out = self.derived("mapped", name);
        for item in self.consume(true) {
            out.push(f(item))?;
        }
        out.flush(true)?;
        Ok(out)
    }

    /// Keeps the items for which `predicate` returns `true`, in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the result list fails to spill.
    pub fn filter<F>(&mut self, mut predicate: F, name: Option<&str>) -> CoreResult<SpillList<T>>
    where
        F: FnMut(&T) -> bool,
    {
        let mut out = self.derived("filtered", name);
        for item in self.consume(true) {
            if predicate(&item) {
                out.push(item)?;
            }
        }
        out.flush(true)?;
        Ok(out)
    }

    /// Folds every item into `initial`, left to right.
    ///
    /// The result always holds exactly one item: the final accumulator.
    ///
    /// # Errors
    ///
    /// Returns an error if the result list fails to spill.
    pub fn reduce<A, F>(&mut self, f: F, initial: A, name: Option<&str>) -> CoreResult<SpillList<A>>
    where
        A: Item,
        F: FnMut(A, T) -> A,
    {
        let mut out = self.derived("reduced", name);
        let acc = self.consume(true).fold(initial, f);
        out.push(acc)?;
        out.flush(true)?;
        Ok(out)
    }
}

impl<T: Item> SpillList<Nested<T>> {
    /// Flattens each item up to `depth` levels and pushes the pieces
    /// individually. See [`Nested::flatten`].
    ///
    /// # Errors
    ///
    /// Returns an error if the result list fails to spill.
    pub fn flat(&mut self, depth: usize, name: Option<&str>) -> CoreResult<SpillList<Nested<T>>> {
        let mut out = self.derived("flattened", name);
        for item in self.consume(true) {
            for piece in item.flatten(depth) {
                out.push(piece)?;
            }
        }
        out.flush(true)?;
        Ok(out)
    }
}
