//! Stepping back and forth through a finished trace.
//!
//! The navigator's index ranges over `[0, length]`: index 0 is "before
//! anything happened" and exposes no state, index `n` exposes the state left
//! behind by the n-th step. Because every trace is materialized up front,
//! each position is exactly what a full replay from the start would produce,
//! so stepping backward is as exact as stepping forward.

use crate::trace::Trace;

/// A cursor over a materialized trace.
#[derive(Clone, Debug)]
pub struct Navigator<S, A> {
    trace: Trace<S, A>,
    index: usize,
}

impl<S, A> Navigator<S, A> {
    /// Wrap a trace, positioned before its first state.
    pub fn new(trace: Trace<S, A>) -> Self {
        Navigator { trace, index: 0 }
    }

    /// Number of states in the underlying trace.
    pub fn len(&self) -> usize {
        self.trace.len()
    }

    /// Whether the underlying trace has no states.
    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// The current position, in `[0, len]`.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The state at the current position, or `None` at position 0.
    pub fn current(&self) -> Option<&S> {
        self.index.checked_sub(1).map(|i| &self.trace.states[i])
    }

    /// Advance one position, clamping at the end.
    pub fn step_forward(&mut self) {
        self.index = (self.index + 1).min(self.len());
    }

    /// Retreat one position, clamping at the start.
    pub fn step_backward(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Jump to an arbitrary position, clamping into `[0, len]`.
    pub fn seek(&mut self, index: usize) {
        self.index = index.min(self.len());
    }

    /// Jump to the end of the trace.
    pub fn run_to_end(&mut self) {
        self.index = self.len();
    }

    /// Jump back to the start.
    pub fn reset(&mut self) {
        self.index = 0;
    }

    /// The trace's final answer. Available at any position.
    pub fn answer(&self) -> &A {
        &self.trace.answer
    }

    /// The underlying trace.
    pub fn trace(&self) -> &Trace<S, A> {
        &self.trace
    }

    /// Consume the navigator, returning the trace.
    pub fn into_trace(self) -> Trace<S, A> {
        self.trace
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> Navigator<u32, &'static str> {
        Navigator::new(Trace {
            states: vec![10, 20, 30],
            answer: "done",
        })
    }

    #[test]
    fn starts_before_the_first_state() {
        let nav = nav();
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.current(), None);
    }

    #[test]
    fn stepping_clamps_at_both_ends() {
        let mut nav = nav();
        nav.step_backward();
        assert_eq!(nav.index(), 0);
        for _ in 0..10 {
            nav.step_forward();
        }
        assert_eq!(nav.index(), 3);
        assert_eq!(nav.current(), Some(&30));
    }

    #[test]
    fn seek_clamps_and_is_idempotent() {
        let mut nav = nav();
        nav.seek(2);
        assert_eq!(nav.current(), Some(&20));
        nav.seek(2);
        assert_eq!(nav.current(), Some(&20));
        nav.seek(100);
        assert_eq!(nav.index(), 3);
    }

    #[test]
    fn run_to_end_matches_repeated_forward_steps() {
        let mut stepped = nav();
        let len = stepped.len();
        for _ in 0..len {
            stepped.step_forward();
        }
        let mut jumped = nav();
        jumped.run_to_end();
        assert_eq!(stepped.index(), jumped.index());
        assert_eq!(stepped.current(), jumped.current());
    }

    #[test]
    fn reset_returns_to_the_start() {
        let mut nav = nav();
        nav.run_to_end();
        nav.reset();
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.current(), None);
        assert_eq!(*nav.answer(), "done");
    }

    #[test]
    fn empty_trace_pins_the_index_at_zero() {
        let mut nav: Navigator<u32, ()> = Navigator::new(Trace {
            states: Vec::new(),
            answer: (),
        });
        nav.step_forward();
        nav.run_to_end();
        assert_eq!(nav.index(), 0);
        assert_eq!(nav.current(), None);
    }
}
