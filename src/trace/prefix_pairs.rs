//! Pair finding by dense 2D prefix counts, traced one box test at a time.
//!
//! A dense inclusive prefix-count grid is built over `0..=max(x, y)` with no
//! compression, so the grid side is the largest coordinate plus one. Points
//! are sorted ascending by `x` with ties descending by `y`, and for each
//! ordered pair the axis-aligned box they span is tested by four-corner
//! inclusion-exclusion: the pair is accepted when exactly the two endpoints
//! lie inside. Any grid index below zero contributes zero.

use crate::geom::{sort_by_x_then_y_desc, Pair, Point};

use super::Trace;

/// The outcome of a single box test, or a rollover to the next anchor.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PrefixVerdict {
    /// The box contains exactly the two endpoints.
    Accept,
    /// Some third point lies inside the box.
    RejectOccupied,
    /// The candidate is strictly above the anchor, so the box test is
    /// skipped.
    RejectPos,
    /// No candidates remain for this anchor.
    Done,
}

/// A dense inclusive 2D prefix-count grid over non-negative coordinates.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrefixGrid {
    side: usize,
    cells: Vec<i64>,
}

impl PrefixGrid {
    /// Build the grid from a point set. Coordinates are floored onto integer
    /// cells; the side is one more than the largest floored coordinate.
    pub fn new(points: &[Point]) -> Self {
        let side = points
            .iter()
            .flat_map(|p| [p.x, p.y])
            .fold(0usize, |side, v| side.max(v.floor() as usize + 1));
        let mut cells = vec![0i64; side * side];
        for p in points {
            if p.x >= 0.0 && p.y >= 0.0 {
                cells[p.x.floor() as usize * side + p.y.floor() as usize] += 1;
            }
        }
        // Row then column pass turns counts into inclusive prefix sums.
        for ix in 0..side {
            for iy in 1..side {
                cells[ix * side + iy] += cells[ix * side + iy - 1];
            }
        }
        for ix in 1..side {
            for iy in 0..side {
                cells[ix * side + iy] += cells[(ix - 1) * side + iy];
            }
        }
        PrefixGrid { side, cells }
    }

    /// Side length of the grid.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Count of points with floored coordinates `<= (ix, iy)`. Negative
    /// indices contribute zero.
    pub fn prefix(&self, ix: i64, iy: i64) -> i64 {
        if ix < 0 || iy < 0 || self.side == 0 {
            return 0;
        }
        let ix = (ix as usize).min(self.side - 1);
        let iy = (iy as usize).min(self.side - 1);
        self.cells[ix * self.side + iy]
    }

    /// Inclusive count of points inside the axis-aligned box spanned by two
    /// points, by four-corner inclusion-exclusion.
    pub fn box_count(&self, a: &Point, b: &Point) -> i64 {
        let x1 = a.x.min(b.x).floor() as i64;
        let x2 = a.x.max(b.x).floor() as i64;
        let y1 = a.y.min(b.y).floor() as i64;
        let y2 = a.y.max(b.y).floor() as i64;
        self.prefix(x2, y2) - self.prefix(x1 - 1, y2) - self.prefix(x2, y1 - 1)
            + self.prefix(x1 - 1, y1 - 1)
    }
}

/// One box test (or rollover) of the prefix-sum pair search.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrefixPairState {
    /// Index of the anchor in the sorted working array.
    pub anchor_index: usize,
    /// Index of the candidate, or the array length on a rollover.
    pub candidate_index: usize,
    /// The anchor point.
    pub anchor: Point,
    /// The candidate point, absent on a rollover.
    pub candidate: Option<Point>,
    /// The box's inclusive point count, when the box test ran.
    pub box_count: Option<i64>,
    /// What the test decided.
    pub verdict: PrefixVerdict,
    /// All pairs accepted so far, in acceptance order.
    pub pairs: Vec<Pair>,
}

/// The accepted pairs plus the working order and grid geometry.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PrefixPairAnswer {
    /// Accepted pairs in acceptance order.
    pub pairs: Vec<Pair>,
    /// The points in working (sorted) order.
    pub sorted: Vec<Point>,
    /// Side length of the dense grid the boxes were tested against.
    pub grid_side: usize,
}

/// Trace the prefix-sum pair search over a point set.
pub fn trace(points: &[Point]) -> Trace<PrefixPairState, PrefixPairAnswer> {
    let mut sorted = points.to_vec();
    sort_by_x_then_y_desc(&mut sorted);
    let grid = PrefixGrid::new(&sorted);

    let mut states = Vec::new();
    let mut pairs: Vec<Pair> = Vec::new();

    for i in 0..sorted.len() {
        let anchor = sorted[i];
        for j in i + 1..sorted.len() {
            let candidate = sorted[j];
            let (verdict, count) = if candidate.x >= anchor.x && candidate.y <= anchor.y {
                let count = grid.box_count(&anchor, &candidate);
                if count == 2 {
                    pairs.push(Pair::classify(anchor, candidate));
                    (PrefixVerdict::Accept, Some(count))
                } else {
                    (PrefixVerdict::RejectOccupied, Some(count))
                }
            } else {
                (PrefixVerdict::RejectPos, None)
            };
            states.push(PrefixPairState {
                anchor_index: i,
                candidate_index: j,
                anchor,
                candidate: Some(candidate),
                box_count: count,
                verdict,
                pairs: pairs.clone(),
            });
        }
        states.push(PrefixPairState {
            anchor_index: i,
            candidate_index: sorted.len(),
            anchor,
            candidate: None,
            box_count: None,
            verdict: PrefixVerdict::Done,
            pairs: pairs.clone(),
        });
    }

    Trace {
        states,
        answer: PrefixPairAnswer {
            pairs,
            sorted,
            grid_side: grid.side(),
        },
    }
}

/// The accepted pairs, computed directly without recording states.
pub fn prefix_pairs(points: &[Point]) -> Vec<Pair> {
    let mut sorted = points.to_vec();
    sort_by_x_then_y_desc(&mut sorted);
    let grid = PrefixGrid::new(&sorted);
    let mut pairs = Vec::new();
    for i in 0..sorted.len() {
        let anchor = sorted[i];
        for j in i + 1..sorted.len() {
            let candidate = sorted[j];
            if candidate.x >= anchor.x
                && candidate.y <= anchor.y
                && grid.box_count(&anchor, &candidate) == 2
            {
                pairs.push(Pair::classify(anchor, candidate));
            }
        }
    }
    pairs
}
