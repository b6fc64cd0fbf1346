//! Maybe-nested sequences for flattening.

use serde::{Deserialize, Serialize};

/// A value that is either a scalar or a sequence of further nested values.
///
/// Serialized untagged: a sequence is a JSON array, a scalar is its own
/// encoding. Scalars that themselves serialize as arrays are read back as
/// sequences, so keep `T` non-sequence-like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Nested<T> {
    /// A sequence of nested values.
    Seq(Vec<Nested<T>>),
    /// A single value.
    Scalar(T),
}

impl<T> Nested<T> {
    /// Creates a sequence from scalars.
    pub fn seq(items: impl IntoIterator<Item = T>) -> Self {
        Self::Seq(items.into_iter().map(Self::Scalar).collect())
    }

    /// Returns `true` for the sequence variant.
    #[must_use]
    pub fn is_seq(&self) -> bool {
        matches!(self, Self::Seq(_))
    }

    /// Returns the scalar, if this is one.
    pub fn into_scalar(self) -> Option<T> {
        match self {
            Self::Scalar(value) => Some(value),
            Self::Seq(_) => None,
        }
    }

    /// Flattens up to `depth` levels of nesting.
    ///
    /// A scalar, or any value at depth 0, comes back unchanged as the only
    /// element. Otherwise the sequence's elements are returned, with nested
    /// sequences spliced in until `depth` levels have been removed.
    ///
    /// ```
    /// use spillway_core::Nested;
    ///
    /// let value = Nested::Seq(vec![
    ///     Nested::Scalar(1),
    ///     Nested::Seq(vec![Nested::Scalar(2), Nested::seq([3, 4])]),
    /// ]);
    ///
    /// assert_eq!(
    ///     value.clone().flatten(1),
    ///     vec![Nested::Scalar(1), Nested::Scalar(2), Nested::seq([3, 4])]
    /// );
    /// assert_eq!(value.flatten(2), Nested::seq([1, 2, 3, 4]).flatten(1));
    /// ```
    #[must_use]
    pub fn flatten(self, depth: usize) -> Vec<Self> {
        match self {
            Self::Seq(items) if depth > 0 => {
                let mut out = Vec::with_capacity(items.len());
                splice(items, depth, &mut out);
                out
            }
            other => vec![other],
        }
    }
}

fn splice<T>(items: Vec<Nested<T>>, depth: usize, out: &mut Vec<Nested<T>>) {
    for item in items {
        match item {
            Nested::Seq(inner) if depth > 1 => splice(inner, depth - 1, out),
            Nested::Seq(inner) => out.extend(inner),
            scalar @ Nested::Scalar(_) => out.push(scalar),
        }
    }
}

impl<T> From<Vec<Nested<T>>> for Nested<T> {
    fn from(items: Vec<Nested<T>>) -> Self {
        Self::Seq(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Nested<i64> {
        // [1, [2, [3, 4]]]
        Nested::Seq(vec![
            Nested::Scalar(1),
            Nested::Seq(vec![Nested::Scalar(2), Nested::seq([3, 4])]),
        ])
    }

    #[test]
    fn depth_zero_passes_through() {
        assert_eq!(sample().flatten(0), vec![sample()]);
    }

    #[test]
    fn scalar_passes_through() {
        assert_eq!(Nested::Scalar(7).flatten(3), vec![Nested::Scalar(7)]);
    }

    #[test]
    fn depth_one() {
        assert_eq!(
            sample().flatten(1),
            vec![Nested::Scalar(1), Nested::Scalar(2), Nested::seq([3, 4])]
        );
    }

    #[test]
    fn depth_two_is_fully_flat() {
        let flat: Vec<i64> = sample()
            .flatten(2)
            .into_iter()
            .filter_map(Nested::into_scalar)
            .collect();
        assert_eq!(flat, vec![1, 2, 3, 4]);
    }

    #[test]
    fn excess_depth_is_harmless() {
        assert_eq!(sample().flatten(10), sample().flatten(2));
    }

    #[test]
    fn empty_sequences_vanish() {
        let value: Nested<i64> = Nested::Seq(vec![Nested::Seq(vec![]), Nested::Scalar(1)]);
        assert_eq!(value.flatten(1), vec![Nested::Scalar(1)]);
    }

    #[test]
    fn untagged_json_shape() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(json, "[1,[2,[3,4]]]");

        let back: Nested<i64> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sample());
    }
}
