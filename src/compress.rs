//! Coordinate compression: real coordinates to dense 1-based ranks.

use crate::num::CheapOrderedFloat;

/// A mapping from real coordinate values to dense ranks `1..=N`.
///
/// `N` is the number of *distinct* input values; equal coordinates share a
/// rank. The ranks are exactly the index domain the Fenwick accumulator is
/// sized for.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct Compressor {
    // Distinct values, ascending.
    sorted: Vec<f64>,
}

impl Compressor {
    /// Build a compressor from a sequence of values, duplicates allowed.
    pub fn new(values: impl IntoIterator<Item = f64>) -> Self {
        let mut sorted: Vec<f64> = values.into_iter().collect();
        sorted.sort_by_key(|&v| CheapOrderedFloat::from(v));
        sorted.dedup();
        Compressor { sorted }
    }

    /// The number of distinct values, `N`.
    pub fn len(&self) -> usize {
        self.sorted.len()
    }

    /// Whether the compressor is empty (no input values).
    pub fn is_empty(&self) -> bool {
        self.sorted.is_empty()
    }

    /// The 1-based rank of a value that was present in the input.
    ///
    /// Returns `None` for values that weren't.
    pub fn rank(&self, v: f64) -> Option<usize> {
        self.sorted
            .binary_search_by(|probe| CheapOrderedFloat::from(*probe).cmp(&v.into()))
            .ok()
            .map(|i| i + 1)
    }

    /// The number of distinct values `<= v`, for arbitrary `v`.
    ///
    /// This is the rank to query when a boundary (like `y1 - 1`) falls
    /// between or below the compressed keys: below the minimum it is 0, at
    /// or above the maximum it is `N`.
    pub fn upper_bound(&self, v: f64) -> usize {
        self.sorted.partition_point(|&u| u <= v)
    }

    /// The value at a 1-based rank.
    ///
    /// # Panics
    ///
    /// Panics if `rank` is 0 or greater than `N`.
    pub fn value(&self, rank: usize) -> f64 {
        self.sorted[rank - 1]
    }

    /// The distinct values, ascending.
    pub fn values(&self) -> &[f64] {
        &self.sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn ranks_are_dense_and_shared() {
        let c = Compressor::new([3.0, 1.0, 3.0, 7.0, 1.0]);
        assert_eq!(c.len(), 3);
        assert_eq!(c.rank(1.0), Some(1));
        assert_eq!(c.rank(3.0), Some(2));
        assert_eq!(c.rank(7.0), Some(3));
        assert_eq!(c.rank(2.0), None);
    }

    #[test]
    fn upper_bound_boundaries() {
        let c = Compressor::new([2.0, 5.0, 9.0]);
        assert_eq!(c.upper_bound(1.0), 0);
        assert_eq!(c.upper_bound(2.0), 1);
        assert_eq!(c.upper_bound(4.5), 1);
        assert_eq!(c.upper_bound(5.0), 2);
        assert_eq!(c.upper_bound(9.0), 3);
        assert_eq!(c.upper_bound(100.0), 3);
    }

    proptest! {
        #[test]
        fn upper_bound_is_monotone(
            mut values in prop::collection::vec(-100i32..100, 1..20),
            probes in prop::collection::vec(-150i32..150, 2..10),
        ) {
            values.sort_unstable();
            let c = Compressor::new(values.iter().map(|&v| v as f64));
            let mut probes: Vec<f64> = probes.into_iter().map(|v| v as f64).collect();
            probes.sort_by_key(|&v| crate::num::CheapOrderedFloat::from(v));
            let bounds: Vec<usize> = probes.iter().map(|&v| c.upper_bound(v)).collect();
            prop_assert!(bounds.windows(2).all(|w| w[0] <= w[1]));
            prop_assert_eq!(c.upper_bound(f64::from(i32::MAX)), c.len());
        }
    }
}
