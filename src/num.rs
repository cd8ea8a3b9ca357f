//! A small wrapper to make `f64` usable as a sort and hash key.

use std::hash::Hash;

/// A wrapper for `f64` that implements `Ord` and `Hash`.
///
/// This just panics when comparing NaNs; it doesn't order them, nor does it
/// guard against them on construction. The input decoder rejects non-finite
/// coordinates, so within this crate NaNs never reach a comparison.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CheapOrderedFloat(f64);

impl CheapOrderedFloat {
    /// Retrieve the inner `f64`.
    pub fn into_inner(self) -> f64 {
        self.0
    }
}

impl From<f64> for CheapOrderedFloat {
    fn from(x: f64) -> Self {
        CheapOrderedFloat(x)
    }
}

impl Eq for CheapOrderedFloat {}

impl Ord for CheapOrderedFloat {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0
            .partial_cmp(&other.0)
            .expect("NaN is not allowed in comparisons")
    }
}

impl PartialOrd for CheapOrderedFloat {
    #[inline(always)]
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for CheapOrderedFloat {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state)
    }
}
