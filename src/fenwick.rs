//! A Fenwick tree (binary indexed tree) instrumented for visualization.

/// A 1-indexed Fenwick tree over a bounded integer key domain.
///
/// On top of the usual point-update / prefix-query operations, the tree
/// remembers which internal indices the *most recent* operation walked
/// through. That set is purely observational, kept so a renderer can
/// highlight the cells an operation touched, and is overwritten, not
/// accumulated, on every operation.
#[derive(Clone, Debug)]
pub struct Fenwick {
    // Slot 0 is unused; the logical domain is 1..=capacity.
    tree: Vec<i64>,
    touched: Vec<usize>,
}

impl Fenwick {
    /// Create a tree over the key domain `1..=capacity`.
    pub fn new(capacity: usize) -> Self {
        Fenwick {
            tree: vec![0; capacity + 1],
            touched: Vec::new(),
        }
    }

    /// The number of keys in the domain.
    pub fn capacity(&self) -> usize {
        self.tree.len() - 1
    }

    /// Add `delta` to the aggregate at `index` and all its ancestors.
    ///
    /// `index` must lie in `[1, capacity]`; callers pre-validate, typically
    /// by obtaining indices from the coordinate compressor.
    pub fn update(&mut self, index: usize, delta: i64) {
        debug_assert!(index >= 1 && index <= self.capacity());
        self.touched.clear();
        let mut i = index;
        while i < self.tree.len() {
            self.touched.push(i);
            self.tree[i] += delta;
            i += lowest_set_bit(i);
        }
    }

    /// The inclusive prefix aggregate over keys `1..=index`.
    ///
    /// `query(0)` is 0 and touches nothing.
    pub fn query(&mut self, index: usize) -> i64 {
        debug_assert!(index <= self.capacity());
        self.touched.clear();
        let mut sum = 0;
        let mut i = index;
        while i > 0 {
            self.touched.push(i);
            sum += self.tree[i];
            i -= lowest_set_bit(i);
        }
        sum
    }

    /// The indices visited by the most recent `update` or `query`.
    pub fn last_touched(&self) -> &[usize] {
        &self.touched
    }

    /// An immutable copy of the current tree contents and touched set.
    ///
    /// Trace states store these copies rather than sharing the live tree, so
    /// past states never change underfoot.
    pub fn snapshot(&self) -> FenwickSnapshot {
        FenwickSnapshot {
            tree: self.tree.clone(),
            touched: self.touched.clone(),
        }
    }
}

fn lowest_set_bit(i: usize) -> usize {
    i & i.wrapping_neg()
}

/// A frozen copy of a [`Fenwick`]'s state, as recorded in a trace state.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct FenwickSnapshot {
    /// The internal tree array; slot 0 is unused.
    pub tree: Vec<i64>,
    /// The indices visited by the operation that produced this snapshot.
    pub touched: Vec<usize>,
}
