//! Property-based test generators using proptest.
//!
//! Provides strategies for push sequences, thresholds and nested values.

use crate::fixtures::Row;
use proptest::prelude::*;
use spillway_core::{CoreResult, Nested, SpillList};

/// One step of a push sequence.
#[derive(Debug, Clone)]
pub enum PushOp {
    /// Push a single row.
    Single(Row),
    /// Push a run of rows in one call.
    Batch(Vec<Row>),
}

/// Strategy for spill thresholds, including the degenerate zero.
pub fn max_size_strategy() -> impl Strategy<Value = usize> {
    0usize..8
}

/// Strategy for a single push step.
pub fn push_op_strategy() -> impl Strategy<Value = PushOp> {
    prop_oneof![
        3 => any::<u64>().prop_map(|n| PushOp::Single(Row::new(n))),
        1 => prop::collection::vec(any::<u64>().prop_map(Row::new), 0..12).prop_map(PushOp::Batch),
    ]
}

/// Strategy for a sequence of push steps.
pub fn push_plan_strategy() -> impl Strategy<Value = Vec<PushOp>> {
    prop::collection::vec(push_op_strategy(), 0..40)
}

/// Applies `plan` to `list`, checking the length after each step.
///
/// Returns the rows in the order they were pushed.
///
/// # Panics
///
/// Panics if the list length ever disagrees with the number of rows pushed.
pub fn apply_plan(list: &mut SpillList<Row>, plan: &[PushOp]) -> CoreResult<Vec<Row>> {
    let mut pushed = Vec::new();
    for op in plan {
        match op {
            PushOp::Single(row) => {
                list.push(*row)?;
                pushed.push(*row);
            }
            PushOp::Batch(rows) => {
                list.push_all(rows.iter().copied())?;
                pushed.extend(rows.iter().copied());
            }
        }
        assert_eq!(list.len(), pushed.len(), "length drifted after {op:?}");
    }
    Ok(pushed)
}

/// Strategy for nested values up to a few levels deep.
pub fn nested_strategy() -> impl Strategy<Value = Nested<i64>> {
    let leaf = any::<i64>().prop_map(Nested::Scalar);
    leaf.prop_recursive(4, 32, 5, |inner| {
        prop::collection::vec(inner, 0..5).prop_map(Nested::Seq)
    })
}

/// Counts the scalars in a nested value.
pub fn scalar_count(value: &Nested<i64>) -> usize {
    match value {
        Nested::Scalar(_) => 1,
        Nested::Seq(items) => items.iter().map(scalar_count).sum(),
    }
}

/// Cases per property. Every case touches the filesystem.
pub const SPILL_CASES: u32 = 32;

/// Proptest settings for properties that spill to disk.
///
/// Shrinking is capped low and failing seeds are not written to a
/// regressions file.
#[must_use]
pub fn spill_config() -> ProptestConfig {
    ProptestConfig {
        cases: SPILL_CASES,
        max_shrink_iters: 64,
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #![proptest_config(spill_config())]

        #[test]
        fn max_size_is_small(size in max_size_strategy()) {
            prop_assert!(size < 8);
        }

        #[test]
        fn full_flatten_keeps_every_scalar(value in nested_strategy()) {
            let expected = scalar_count(&value);
            let flat = value.flatten(usize::MAX);
            let total: usize = flat.iter().map(scalar_count).sum();
            prop_assert_eq!(total, expected);
            prop_assert!(flat.iter().all(|v| !v.is_seq()));
        }
    }
}
