//! Projection of trace states into renderer-agnostic overlay shapes.
//!
//! Everything here is expressed in data-space coordinates. Shapes carry only
//! semantic hints (a color intent and dash vs. solid); turning those into
//! pixels, stroke widths and actual colors is the renderer's problem.

use crate::compress::Compressor;
use crate::geom::Point;
use crate::trace::dominance::DominanceState;
use crate::trace::hull::{HullState, Stage};
use crate::trace::pair_sweep::{PairSweepState, PairVerdict};
use crate::trace::prefix_pairs::{PrefixPairState, PrefixVerdict};
use crate::trace::rect_count::{RectAction, RectCountState};

/// Color intent of an overlay shape.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Tint {
    /// The sweep front or the structure being built.
    Sweep,
    /// The element currently under consideration.
    Candidate,
    /// Something accepted into the answer.
    Accept,
    /// Something rejected or removed.
    Reject,
    /// A constraint region or watermark.
    Bound,
}

/// Solid or dashed stroke.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Stroke {
    /// A solid stroke.
    Solid,
    /// A dashed stroke.
    Dashed,
}

/// A line segment in data space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayLine {
    /// One endpoint's x.
    pub x1: f64,
    /// One endpoint's y.
    pub y1: f64,
    /// The other endpoint's x.
    pub x2: f64,
    /// The other endpoint's y.
    pub y2: f64,
    /// Color intent.
    pub tint: Tint,
    /// Stroke style.
    pub stroke: Stroke,
}

/// A translucent axis-aligned rectangle in data space.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayRect {
    /// Left edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Top edge.
    pub y2: f64,
    /// Color intent.
    pub tint: Tint,
}

/// A text label anchored at a data-space position.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct OverlayLabel {
    /// Anchor x.
    pub x: f64,
    /// Anchor y.
    pub y: f64,
    /// The text to render.
    pub text: String,
    /// Color intent.
    pub tint: Tint,
}

/// The shapes projected from one trace state.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Overlays {
    /// Line segments.
    pub lines: Vec<OverlayLine>,
    /// Translucent rectangles.
    pub rects: Vec<OverlayRect>,
    /// Text labels.
    pub labels: Vec<OverlayLabel>,
}

fn bounds(points: &[Point]) -> Option<(f64, f64, f64, f64)> {
    let first = points.first()?;
    let mut b = (first.x, first.y, first.x, first.y);
    for p in &points[1..] {
        b.0 = b.0.min(p.x);
        b.1 = b.1.min(p.y);
        b.2 = b.2.max(p.x);
        b.3 = b.3.max(p.y);
    }
    Some(b)
}

fn vertical_sweep_line(x: f64, points: &[Point], out: &mut Overlays) {
    if let Some((_, min_y, _, max_y)) = bounds(points) {
        out.lines.push(OverlayLine {
            x1: x,
            y1: min_y,
            x2: x,
            y2: max_y,
            tint: Tint::Sweep,
            stroke: Stroke::Solid,
        });
    }
}

fn chain_lines(chain: &[Point], tint: Tint, out: &mut Overlays) {
    for w in chain.windows(2) {
        out.lines.push(OverlayLine {
            x1: w[0].x,
            y1: w[0].y,
            x2: w[1].x,
            y2: w[1].y,
            tint,
            stroke: Stroke::Solid,
        });
    }
}

/// Overlays for a dominance-count state: the sweep front and the `y` value
/// of the accumulator cell the event operated on.
pub fn dominance_overlays(state: &DominanceState, points: &[Point]) -> Overlays {
    let mut out = Overlays::default();
    vertical_sweep_line(state.sweep_x, points, &mut out);
    let ys = Compressor::new(points.iter().map(|p| p.y));
    if state.rank >= 1 && state.rank <= ys.len() {
        let y = ys.value(state.rank);
        out.labels.push(OverlayLabel {
            x: state.sweep_x,
            y,
            text: format!("y = {y}"),
            tint: Tint::Candidate,
        });
    }
    out
}

/// Overlays for a rectangle-count state: the sweep front, the accepted
/// rectangles with their corner diagonals, and the active query's rectangle.
///
/// `rects` is the candidate list from the trace's answer, indexed by
/// [`crate::geom::RectId`].
pub fn rect_count_overlays(
    state: &RectCountState,
    points: &[Point],
    rects: &[crate::geom::Rect],
) -> Overlays {
    let mut out = Overlays::default();
    vertical_sweep_line(state.sweep_x, points, &mut out);
    for accepted in &state.accepted {
        let r = &accepted.rect;
        out.rects.push(OverlayRect {
            x1: r.x1,
            y1: r.y1,
            x2: r.x2,
            y2: r.y2,
            tint: Tint::Accept,
        });
        // Diagonal from the defining top-left corner to the bottom-right.
        out.lines.push(OverlayLine {
            x1: r.x1,
            y1: r.y2,
            x2: r.x2,
            y2: r.y1,
            tint: Tint::Accept,
            stroke: Stroke::Dashed,
        });
    }
    if let RectAction::Queried { rect, sign, .. } = state.action {
        if let Some(r) = rects.get(rect.0) {
            out.rects.push(OverlayRect {
                x1: r.x1,
                y1: r.y1,
                x2: r.x2,
                y2: r.y2,
                tint: Tint::Candidate,
            });
            out.labels.push(OverlayLabel {
                x: state.sweep_x,
                y: r.y2,
                text: format!("{:+}", sign),
                tint: Tint::Candidate,
            });
        }
    }
    out
}

/// Overlays for a hull state: the two chains and the candidate edge.
pub fn hull_overlays(state: &HullState, _points: &[Point]) -> Overlays {
    let mut out = Overlays::default();
    chain_lines(&state.lower, Tint::Sweep, &mut out);
    chain_lines(&state.upper, Tint::Sweep, &mut out);
    if state.stage == Stage::Final {
        // Close the polygon: the chains already share their endpoints.
        if let (Some(a), Some(b)) = (state.upper.last(), state.lower.first()) {
            if a.coord_key() != b.coord_key() {
                out.lines.push(OverlayLine {
                    x1: a.x,
                    y1: a.y,
                    x2: b.x,
                    y2: b.y,
                    tint: Tint::Sweep,
                    stroke: Stroke::Solid,
                });
            }
        }
    }
    if let Some(p) = &state.point {
        let chain = if state.stage == Stage::Lower {
            &state.lower
        } else {
            &state.upper
        };
        if let Some(last) = chain.last() {
            out.lines.push(OverlayLine {
                x1: last.x,
                y1: last.y,
                x2: p.x,
                y2: p.y,
                tint: Tint::Candidate,
                stroke: Stroke::Dashed,
            });
        }
    }
    if let Some(popped) = &state.popped {
        out.labels.push(OverlayLabel {
            x: popped.x,
            y: popped.y,
            text: "popped".to_owned(),
            tint: Tint::Reject,
        });
    }
    out
}

/// Overlays for a pair-sweep state: the candidate comparison as a dashed
/// line, the watermark as a solid line with a label, and the region any
/// future candidate must fall within.
pub fn pair_sweep_overlays(state: &PairSweepState, points: &[Point]) -> Overlays {
    let mut out = Overlays::default();
    let Some((_, min_y, max_x, _)) = bounds(points) else {
        return out;
    };
    let anchor = &state.anchor;
    if let Some(candidate) = &state.candidate {
        let tint = match state.verdict {
            PairVerdict::Accept => Tint::Accept,
            _ => Tint::Reject,
        };
        out.lines.push(OverlayLine {
            x1: anchor.x,
            y1: anchor.y,
            x2: candidate.x,
            y2: candidate.y,
            tint,
            stroke: Stroke::Dashed,
        });
    }
    if let Some(max_y) = state.max_y {
        out.lines.push(OverlayLine {
            x1: anchor.x,
            y1: max_y,
            x2: max_x,
            y2: max_y,
            tint: Tint::Bound,
            stroke: Stroke::Solid,
        });
        out.labels.push(OverlayLabel {
            x: max_x,
            y: max_y,
            text: format!("maxY = {}", max_y),
            tint: Tint::Bound,
        });
    }
    // Future candidates must land right of the anchor, at or below it, and
    // strictly above the watermark.
    let floor = state.max_y.unwrap_or(min_y);
    if anchor.y > floor {
        out.rects.push(OverlayRect {
            x1: anchor.x,
            y1: floor,
            x2: max_x,
            y2: anchor.y,
            tint: Tint::Bound,
        });
    }
    out
}

/// Overlays for a prefix-pair state: the candidate line and the tested box.
pub fn prefix_pairs_overlays(state: &PrefixPairState, _points: &[Point]) -> Overlays {
    let mut out = Overlays::default();
    let anchor = &state.anchor;
    if let Some(candidate) = &state.candidate {
        let tint = match state.verdict {
            PrefixVerdict::Accept => Tint::Accept,
            _ => Tint::Reject,
        };
        out.lines.push(OverlayLine {
            x1: anchor.x,
            y1: anchor.y,
            x2: candidate.x,
            y2: candidate.y,
            tint,
            stroke: Stroke::Dashed,
        });
        if let Some(count) = state.box_count {
            out.rects.push(OverlayRect {
                x1: anchor.x.min(candidate.x),
                y1: anchor.y.min(candidate.y),
                x2: anchor.x.max(candidate.x),
                y2: anchor.y.max(candidate.y),
                tint: Tint::Candidate,
            });
            out.labels.push(OverlayLabel {
                x: anchor.x.max(candidate.x),
                y: anchor.y.max(candidate.y),
                text: format!("{count} in box"),
                tint: Tint::Candidate,
            });
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RectFilters;
    use crate::trace::{dominance, hull, pair_sweep, prefix_pairs, rect_count};

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(i, x, y))
            .collect()
    }

    #[test]
    fn pair_sweep_projects_candidate_watermark_and_region() {
        let points = pts(&[(0.0, 5.0), (1.0, 1.0), (2.0, 3.0)]);
        let traced = pair_sweep::trace(&points);
        // Second comparison of the first anchor: (2, 3) was just accepted,
        // lifting the watermark to y = 3.
        let state = &traced.states[1];
        assert_eq!(state.max_y, Some(3.0));
        let overlays = pair_sweep_overlays(state, &points);
        assert_eq!(overlays.lines.len(), 2);
        assert_eq!(overlays.rects.len(), 1);
        assert_eq!(overlays.labels[0].text, "maxY = 3");
        let region = overlays.rects[0];
        assert_eq!((region.y1, region.y2), (3.0, 5.0));
    }

    #[test]
    fn hull_final_state_projects_a_closed_polygon() {
        let points = pts(&[(0.0, 0.0), (4.0, 0.0), (4.0, 3.0), (0.0, 3.0)]);
        let traced = hull::trace(&points);
        let last = traced.states.last().unwrap();
        let overlays = hull_overlays(last, &points);
        // Lower chain, upper chain, no extra closing edge needed: the
        // chains share endpoints, so edges = lower + upper windows.
        assert_eq!(
            overlays.lines.len(),
            last.lower.len() - 1 + last.upper.len() - 1
        );
    }

    #[test]
    fn dominance_states_label_the_operated_cell() {
        let points = pts(&[(1.0, 1.0), (2.0, 2.0)]);
        let traced = dominance::trace(&points);
        // First state: the query on behalf of (1, 1), rank 1.
        let overlays = dominance_overlays(&traced.states[0], &points);
        assert_eq!(overlays.lines.len(), 1);
        assert_eq!(overlays.labels.len(), 1);
        assert_eq!(overlays.labels[0].text, "y = 1");
        assert_eq!(overlays.labels[0].y, 1.0);
    }

    #[test]
    fn query_states_project_their_rectangle() {
        let points = pts(&[(0.0, 0.0), (2.0, 2.0), (0.0, 2.0), (2.0, 0.0)]);
        let filters = RectFilters {
            min_width: 1.0,
            min_height: 1.0,
            ..RectFilters::default()
        };
        let traced = rect_count::trace(&points, &filters);
        let query = traced
            .states
            .iter()
            .find(|s| matches!(s.action, RectAction::Queried { .. }))
            .unwrap();
        let overlays = rect_count_overlays(query, &points, &traced.answer.rects);
        // Sweep line plus the queried rectangle and its sign label.
        assert_eq!(overlays.lines.len(), 1);
        assert_eq!(overlays.rects.len(), 1);
        assert_eq!(overlays.labels.len(), 1);
    }

    #[test]
    fn rollover_projects_no_candidate_line() {
        let points = pts(&[(0.0, 0.0), (1.0, 1.0)]);
        let traced = prefix_pairs::trace(&points);
        let done = traced
            .states
            .iter()
            .find(|s| s.verdict == PrefixVerdict::Done)
            .unwrap();
        let overlays = prefix_pairs_overlays(done, &points);
        assert!(overlays.lines.is_empty());
        assert!(overlays.rects.is_empty());
    }
}
