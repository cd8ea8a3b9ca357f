//! Dominance counting: for each point, how many sweep-earlier points lie at
//! or below it.
//!
//! A point *dominates* another if it comes strictly later in the x-sweep and
//! has `y` at or above the other's. Equal-x points are processed queries
//! first, so two points in the same column never count each other, in
//! either direction.

use std::collections::BTreeMap;

use crate::compress::Compressor;
use crate::events::{dominance_events, SweepEvent};
use crate::fenwick::{Fenwick, FenwickSnapshot};
use crate::geom::{Point, PointId};

use super::Trace;

/// What the event that produced a state did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum DominanceAction {
    /// A query resolved, recording this point's dominance count.
    Queried {
        /// The point whose count was recorded.
        point: PointId,
        /// The recorded count.
        count: i64,
    },
    /// A point's `y` rank was inserted into the accumulator.
    Added {
        /// The inserted point.
        point: PointId,
    },
}

/// One atomic state of the dominance-count sweep.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct DominanceState {
    /// What just happened.
    pub action: DominanceAction,
    /// The sweep coordinate of the event.
    pub sweep_x: f64,
    /// The compressed `y` rank the event operated on.
    pub rank: usize,
    /// Frozen accumulator contents, including the touched indices of this
    /// very operation.
    pub fenwick: FenwickSnapshot,
    /// Counts recorded so far, by point.
    pub counts: BTreeMap<PointId, i64>,
}

/// The final dominance count per point.
pub type DominanceAnswer = BTreeMap<PointId, i64>;

/// Trace the dominance-count sweep over a point set.
pub fn trace(points: &[Point]) -> Trace<DominanceState, DominanceAnswer> {
    let ys = Compressor::new(points.iter().map(|p| p.y));
    let events = dominance_events(points, &ys);
    log::debug!(
        "dominance trace: {} points, {} events",
        points.len(),
        events.len()
    );

    let mut fenwick = Fenwick::new(ys.len());
    let mut counts = DominanceAnswer::new();
    let mut states = Vec::with_capacity(events.len());
    for event in &events {
        let (action, sweep_x, rank) = match *event {
            SweepEvent::Query { x, point, rank } => {
                let count = fenwick.query(rank);
                counts.insert(point, count);
                (DominanceAction::Queried { point, count }, x, rank)
            }
            SweepEvent::Add { x, point, rank } => {
                fenwick.update(rank, 1);
                (DominanceAction::Added { point }, x, rank)
            }
        };
        states.push(DominanceState {
            action,
            sweep_x,
            rank,
            fenwick: fenwick.snapshot(),
            counts: counts.clone(),
        });
    }

    Trace {
        states,
        answer: counts,
    }
}

/// The dominance counts, computed directly without recording states.
pub fn dominance_counts(points: &[Point]) -> DominanceAnswer {
    let ys = Compressor::new(points.iter().map(|p| p.y));
    let mut fenwick = Fenwick::new(ys.len());
    let mut counts = DominanceAnswer::new();
    for event in dominance_events(points, &ys) {
        match event {
            SweepEvent::Query { point, rank, .. } => {
                counts.insert(point, fenwick.query(rank));
            }
            SweepEvent::Add { rank, .. } => fenwick.update(rank, 1),
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(i, x, y))
            .collect()
    }

    #[test]
    fn counts_earlier_points_at_or_below() {
        let points = pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0), (3.0, 1.0), (4.0, 2.0)]);
        let counts = dominance_counts(&points);
        let by_id: Vec<i64> = (0..5).map(|i| counts[&PointId(i)]).collect();
        assert_eq!(by_id, vec![0, 1, 2, 1, 3]);
    }

    #[test]
    fn same_column_never_counts_each_other() {
        let points = pts(&[(2.0, 1.0), (2.0, 5.0), (2.0, 3.0)]);
        let counts = dominance_counts(&points);
        assert!(counts.values().all(|&c| c == 0));

        // Order-independent: reversing the input changes nothing.
        let mut reversed: Vec<Point> = points.iter().rev().cloned().collect();
        for (i, p) in reversed.iter_mut().enumerate() {
            p.id = PointId(i);
        }
        assert!(dominance_counts(&reversed).values().all(|&c| c == 0));
    }

    #[test]
    fn trace_answer_matches_direct() {
        let points = pts(&[(1.0, 4.0), (2.0, 1.0), (2.0, 6.0), (5.0, 5.0), (7.0, 2.0)]);
        let traced = trace(&points);
        assert_eq!(traced.answer, dominance_counts(&points));
        assert_eq!(traced.states.len(), 2 * points.len());
        // The last state owns the final counts.
        assert_eq!(traced.states.last().unwrap().counts, traced.answer);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(trace(&[]).is_empty());
        let one = pts(&[(3.0, 3.0)]);
        let t = trace(&one);
        assert_eq!(t.states.len(), 2);
        assert_eq!(t.answer[&PointId(0)], 0);
    }
}
