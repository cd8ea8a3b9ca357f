//! Andrew's monotone-chain convex hull, traced one pop/push at a time.
//!
//! Points are deduplicated by exact coordinate and sorted ascending by `x`
//! (ties ascending by `y`). The lower pass scans left to right, the upper
//! pass right to left, both popping while the last two chain points and the
//! candidate fail to make a strict left turn (`cross <= 0` pops), so
//! collinear points never make it into the hull. The final hull is the lower
//! chain plus the upper chain with its first and last points dropped.

use std::collections::HashSet;

use crate::geom::{cross, sort_by_x_then_y, Point};

use super::Trace;

/// Which pass the algorithm is in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Stage {
    /// Building the lower chain, left to right.
    Lower,
    /// Building the upper chain, right to left.
    Upper,
    /// Both chains stitched together.
    Final,
}

/// What a state's step did within its stage.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Action {
    /// A pass began.
    Start,
    /// A candidate point came under consideration.
    Consider,
    /// The chain's last point was removed for breaking convexity.
    Pop,
    /// The candidate was appended to the chain.
    Push,
    /// The hull is complete.
    Complete,
}

/// One atomic state of the hull computation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HullState {
    /// Which pass this state belongs to.
    pub stage: Stage,
    /// What just happened.
    pub action: Action,
    /// The point under consideration, if any.
    pub point: Option<Point>,
    /// The point removed by a pop, if this is a pop state.
    pub popped: Option<Point>,
    /// The lower chain so far (complete during the upper pass).
    pub lower: Vec<Point>,
    /// The upper chain so far.
    pub upper: Vec<Point>,
    /// Index of the considered point in the sorted working array, for
    /// highlighting.
    pub sorted_index: Option<usize>,
}

impl HullState {
    /// A one-sentence description of this step.
    pub fn describe(&self) -> String {
        let fmt = |p: &Point| format!("({}, {})", p.x, p.y);
        match (self.action, self.stage) {
            (Action::Start, Stage::Lower) => {
                "Begin building the lower chain by scanning from left to right.".to_owned()
            }
            (Action::Start, _) => {
                "Switch to the upper scan starting from the rightmost point.".to_owned()
            }
            (Action::Consider, _) => match &self.point {
                Some(p) => format!(
                    "Consider {} and test whether it keeps the chain convex.",
                    fmt(p)
                ),
                None => "Consider the next point.".to_owned(),
            },
            (Action::Pop, _) => match (&self.popped, &self.point) {
                (Some(popped), Some(p)) => format!(
                    "Non-left turn detected, remove {} before adding {}.",
                    fmt(popped),
                    fmt(p)
                ),
                _ => "Remove the last chain point.".to_owned(),
            },
            (Action::Push, Stage::Lower) => match &self.point {
                Some(p) => format!("Append {} to the lower chain.", fmt(p)),
                None => "Append to the lower chain.".to_owned(),
            },
            (Action::Push, _) => match &self.point {
                Some(p) => format!("Append {} to the upper chain.", fmt(p)),
                None => "Append to the upper chain.".to_owned(),
            },
            (Action::Complete, _) => {
                "Combine lower and upper chains to form the convex hull.".to_owned()
            }
        }
    }
}

/// The computed hull and the working data the renderer also wants.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct HullAnswer {
    /// The hull vertices, counter-clockwise, starting from the leftmost
    /// point. Strictly convex: collinear points are excluded.
    pub hull: Vec<Point>,
    /// The deduplicated points in working (sorted) order.
    pub sorted: Vec<Point>,
    /// How many input points were dropped as exact-coordinate duplicates.
    pub duplicates: usize,
}

fn dedup_and_sort(points: &[Point]) -> (Vec<Point>, usize) {
    let mut seen = HashSet::new();
    let mut unique: Vec<Point> = points
        .iter()
        .filter(|p| seen.insert(p.coord_key()))
        .copied()
        .collect();
    let duplicates = points.len() - unique.len();
    sort_by_x_then_y(&mut unique);
    (unique, duplicates)
}

// Pops while the last two chain points and the candidate fail to make a
// strict left turn.
fn pops(chain: &[Point], candidate: &Point) -> bool {
    chain.len() >= 2 && cross(&chain[chain.len() - 2], &chain[chain.len() - 1], candidate) <= 0.0
}

/// Trace the monotone-chain hull computation over a point set.
pub fn trace(points: &[Point]) -> Trace<HullState, HullAnswer> {
    let (sorted, duplicates) = dedup_and_sort(points);

    if sorted.is_empty() {
        return Trace {
            states: Vec::new(),
            answer: HullAnswer {
                duplicates,
                ..HullAnswer::default()
            },
        };
    }
    if sorted.len() == 1 {
        // Short-circuit: the hull of one point is that point.
        let state = HullState {
            stage: Stage::Final,
            action: Action::Complete,
            point: Some(sorted[0]),
            popped: None,
            lower: sorted.clone(),
            upper: sorted.clone(),
            sorted_index: Some(0),
        };
        return Trace {
            states: vec![state],
            answer: HullAnswer {
                hull: sorted.clone(),
                sorted,
                duplicates,
            },
        };
    }

    let mut states = Vec::new();
    states.push(HullState {
        stage: Stage::Lower,
        action: Action::Start,
        point: None,
        popped: None,
        lower: Vec::new(),
        upper: Vec::new(),
        sorted_index: None,
    });

    let mut lower: Vec<Point> = Vec::new();
    for (i, &p) in sorted.iter().enumerate() {
        states.push(HullState {
            stage: Stage::Lower,
            action: Action::Consider,
            point: Some(p),
            popped: None,
            lower: lower.clone(),
            upper: Vec::new(),
            sorted_index: Some(i),
        });
        while pops(&lower, &p) {
            let popped = lower.pop();
            states.push(HullState {
                stage: Stage::Lower,
                action: Action::Pop,
                point: Some(p),
                popped,
                lower: lower.clone(),
                upper: Vec::new(),
                sorted_index: Some(i),
            });
        }
        lower.push(p);
        states.push(HullState {
            stage: Stage::Lower,
            action: Action::Push,
            point: Some(p),
            popped: None,
            lower: lower.clone(),
            upper: Vec::new(),
            sorted_index: Some(i),
        });
    }

    states.push(HullState {
        stage: Stage::Upper,
        action: Action::Start,
        point: None,
        popped: None,
        lower: lower.clone(),
        upper: Vec::new(),
        sorted_index: None,
    });

    let mut upper: Vec<Point> = Vec::new();
    for (i, &p) in sorted.iter().enumerate().rev() {
        states.push(HullState {
            stage: Stage::Upper,
            action: Action::Consider,
            point: Some(p),
            popped: None,
            lower: lower.clone(),
            upper: upper.clone(),
            sorted_index: Some(i),
        });
        while pops(&upper, &p) {
            let popped = upper.pop();
            states.push(HullState {
                stage: Stage::Upper,
                action: Action::Pop,
                point: Some(p),
                popped,
                lower: lower.clone(),
                upper: upper.clone(),
                sorted_index: Some(i),
            });
        }
        upper.push(p);
        states.push(HullState {
            stage: Stage::Upper,
            action: Action::Push,
            point: Some(p),
            popped: None,
            lower: lower.clone(),
            upper: upper.clone(),
            sorted_index: Some(i),
        });
    }

    // The upper chain's endpoints duplicate the lower chain's, so drop them
    // when stitching.
    let mut hull = lower.clone();
    if upper.len() > 2 {
        hull.extend_from_slice(&upper[1..upper.len() - 1]);
    }

    states.push(HullState {
        stage: Stage::Final,
        action: Action::Complete,
        point: None,
        popped: None,
        lower,
        upper,
        sorted_index: None,
    });

    Trace {
        states,
        answer: HullAnswer {
            hull,
            sorted,
            duplicates,
        },
    }
}

/// The strictly convex hull, computed directly without recording states.
pub fn convex_hull(points: &[Point]) -> Vec<Point> {
    let (sorted, _) = dedup_and_sort(points);
    if sorted.len() <= 1 {
        return sorted;
    }
    let mut lower: Vec<Point> = Vec::new();
    for &p in &sorted {
        while pops(&lower, &p) {
            lower.pop();
        }
        lower.push(p);
    }
    let mut upper: Vec<Point> = Vec::new();
    for &p in sorted.iter().rev() {
        while pops(&upper, &p) {
            upper.pop();
        }
        upper.push(p);
    }
    let mut hull = lower;
    if upper.len() > 2 {
        hull.extend_from_slice(&upper[1..upper.len() - 1]);
    }
    hull
}
