//! Quadratic sweep for optimal point pairs, traced one comparison at a time.
//!
//! Points are sorted ascending by `x` with ties descending by `y`. For each
//! left anchor the sweep walks every point to its right and keeps a rising
//! `max_y` watermark of accepted candidates: a candidate is accepted when it
//! sits at or below the anchor and strictly above the watermark. Every
//! comparison yields exactly one state, and exhausting the candidates for an
//! anchor yields one rollover state.

use crate::geom::{sort_by_x_then_y_desc, Pair, Point};

use super::Trace;

/// The outcome of a single comparison, or a rollover to the next anchor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PairVerdict {
    /// The candidate paired with the anchor.
    Accept,
    /// The candidate is at or below the watermark, so an earlier accepted
    /// candidate already dominates it.
    RejectY,
    /// The candidate is strictly above the anchor.
    RejectPos,
    /// No candidates remain for this anchor; the sweep moves on.
    Done,
}

/// One comparison (or rollover) of the pair sweep.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PairSweepState {
    /// Index of the anchor in the sorted working array.
    pub anchor_index: usize,
    /// Index of the candidate, or the array length on a rollover.
    pub candidate_index: usize,
    /// The anchor point.
    pub anchor: Point,
    /// The candidate point, absent on a rollover.
    pub candidate: Option<Point>,
    /// What the comparison decided.
    pub verdict: PairVerdict,
    /// The watermark after this step. `None` until the anchor's first accept.
    pub max_y: Option<f64>,
    /// All pairs accepted so far, in acceptance order.
    pub pairs: Vec<Pair>,
}

/// The accepted pairs and the working order they were found in.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PairSweepAnswer {
    /// Accepted pairs in acceptance order.
    pub pairs: Vec<Pair>,
    /// The points in working (sorted) order.
    pub sorted: Vec<Point>,
}

fn classify(anchor: &Point, candidate: &Point, max_y: Option<f64>) -> PairVerdict {
    if candidate.y <= anchor.y && max_y.is_none_or(|m| candidate.y > m) {
        PairVerdict::Accept
    } else if max_y.is_some_and(|m| candidate.y <= m) {
        PairVerdict::RejectY
    } else {
        PairVerdict::RejectPos
    }
}

/// Trace the pair sweep over a point set.
pub fn trace(points: &[Point]) -> Trace<PairSweepState, PairSweepAnswer> {
    let mut sorted = points.to_vec();
    sort_by_x_then_y_desc(&mut sorted);

    let mut states = Vec::new();
    let mut pairs: Vec<Pair> = Vec::new();

    for i in 0..sorted.len() {
        let anchor = sorted[i];
        let mut max_y: Option<f64> = None;
        for j in i + 1..sorted.len() {
            let candidate = sorted[j];
            let verdict = classify(&anchor, &candidate, max_y);
            if verdict == PairVerdict::Accept {
                max_y = Some(candidate.y);
                pairs.push(Pair::classify(anchor, candidate));
            }
            states.push(PairSweepState {
                anchor_index: i,
                candidate_index: j,
                anchor,
                candidate: Some(candidate),
                verdict,
                max_y,
                pairs: pairs.clone(),
            });
        }
        states.push(PairSweepState {
            anchor_index: i,
            candidate_index: sorted.len(),
            anchor,
            candidate: None,
            verdict: PairVerdict::Done,
            max_y,
            pairs: pairs.clone(),
        });
    }

    Trace {
        states,
        answer: PairSweepAnswer { pairs, sorted },
    }
}

/// The accepted pairs, computed directly without recording states.
pub fn sweep_pairs(points: &[Point]) -> Vec<Pair> {
    let mut sorted = points.to_vec();
    sort_by_x_then_y_desc(&mut sorted);
    let mut pairs = Vec::new();
    for i in 0..sorted.len() {
        let anchor = sorted[i];
        let mut max_y: Option<f64> = None;
        for j in i + 1..sorted.len() {
            let candidate = sorted[j];
            if classify(&anchor, &candidate, max_y) == PairVerdict::Accept {
                max_y = Some(candidate.y);
                pairs.push(Pair::classify(anchor, candidate));
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PairKind;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(i, x, y))
            .collect()
    }

    #[test]
    fn one_state_per_comparison_plus_rollovers() {
        let points = pts(&[(0.0, 0.0), (1.0, 2.0), (2.0, 1.0), (3.0, 3.0)]);
        let traced = trace(&points);
        let n = points.len();
        assert_eq!(traced.states.len(), n * (n - 1) / 2 + n);
        let rollovers = traced
            .states
            .iter()
            .filter(|s| s.verdict == PairVerdict::Done)
            .count();
        assert_eq!(rollovers, n);
        // A rollover carries no candidate.
        for s in &traced.states {
            assert_eq!(s.candidate.is_none(), s.verdict == PairVerdict::Done);
        }
    }

    #[test]
    fn watermark_rises_within_an_anchor() {
        // Anchor (0, 5): (1, 1) accepted, (2, 3) accepted above the
        // watermark, (3, 2) rejected below it, (4, 6) above the anchor.
        let points = pts(&[(0.0, 5.0), (1.0, 1.0), (2.0, 3.0), (3.0, 2.0), (4.0, 6.0)]);
        let traced = trace(&points);
        let first_anchor: Vec<PairVerdict> = traced
            .states
            .iter()
            .filter(|s| s.anchor_index == 0 && s.candidate.is_some())
            .map(|s| s.verdict)
            .collect();
        assert_eq!(
            first_anchor,
            vec![
                PairVerdict::Accept,
                PairVerdict::Accept,
                PairVerdict::RejectY,
                PairVerdict::RejectPos,
            ]
        );
    }

    #[test]
    fn watermark_resets_between_anchors() {
        let points = pts(&[(0.0, 5.0), (1.0, 1.0), (2.0, 3.0)]);
        let traced = trace(&points);
        for s in &traced.states {
            if s.verdict == PairVerdict::Done && s.anchor_index + 1 < points.len() {
                let next = traced
                    .states
                    .iter()
                    .find(|t| t.anchor_index == s.anchor_index + 1)
                    .unwrap();
                // First comparison of a new anchor starts from no watermark.
                assert!(next.max_y.is_none() || next.verdict == PairVerdict::Accept);
            }
        }
    }

    #[test]
    fn pairs_are_classified_by_orientation() {
        let points = pts(&[(0.0, 0.0), (2.0, 0.0), (2.0, -1.0)]);
        let pairs = sweep_pairs(&points);
        let kinds: Vec<PairKind> = pairs.iter().map(|p| p.kind).collect();
        assert!(kinds.contains(&PairKind::Horizontal));
        assert!(kinds.contains(&PairKind::Vertical));
    }

    #[test]
    fn trace_answer_matches_direct() {
        let points = pts(&[
            (1.0, 7.0),
            (2.0, 4.0),
            (4.0, 3.0),
            (4.0, 2.0),
            (5.0, 5.0),
            (7.0, 3.0),
            (9.0, 1.0),
        ]);
        let traced = trace(&points);
        assert_eq!(traced.answer.pairs, sweep_pairs(&points));
        assert_eq!(traced.states.last().unwrap().pairs, traced.answer.pairs);
    }

    #[test]
    fn single_point_yields_one_rollover() {
        let points = pts(&[(3.0, 3.0)]);
        let traced = trace(&points);
        assert_eq!(traced.states.len(), 1);
        assert_eq!(traced.states[0].verdict, PairVerdict::Done);
        assert!(traced.answer.pairs.is_empty());
    }
}
