//! The four trace generators.
//!
//! Each generator is a pure function from an input point set (plus
//! parameters, for rectangle counting) to a [`Trace`]: the complete ordered
//! sequence of states the algorithm passes through, and the derived final
//! answer. States are self-contained snapshots that own copies of every
//! sequence they report, so navigating backward through a trace never has
//! to reverse a side effect.
//!
//! Generation always replays from empty state; there is no incremental undo
//! anywhere. The cost is linear in trace length per recomputation, which is
//! fine at interactive point counts.

pub mod dominance;
pub mod hull;
pub mod pair_sweep;
pub mod prefix_pairs;
pub mod rect_count;

/// A materialized algorithm trace: every intermediate state, in order, plus
/// the final answer.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Trace<S, A> {
    /// The ordered atomic states.
    pub states: Vec<S>,
    /// The algorithm's final answer, as a non-traced run would compute it.
    pub answer: A,
}

impl<S, A> Trace<S, A> {
    /// The number of states.
    pub fn len(&self) -> usize {
        self.states.len()
    }

    /// Whether the trace has no states (degenerate input).
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
