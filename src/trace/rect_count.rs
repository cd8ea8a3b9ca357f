//! Offline rectangle counting by inclusion–exclusion.
//!
//! Each candidate rectangle's contained-point count is assembled from four
//! signed prefix queries, `F(x2,y2) − F(x1−1,y2) − F(x2,y1−1) + F(x1−1,y1−1)`,
//! resolved lazily as the sweep passes each corner's `x`. The count is a
//! generic box-count oracle; the actual acceptance predicate additionally
//! requires the rectangle's top-left and bottom-right corners to be present
//! in the point set, which makes this a detector for corner-defined
//! rectangles.
//!
//! Boundary queries that fall below the minimum compressed `y`, or whose `x`
//! precedes the first point, are resolved to 0 without a Fenwick traversal
//! and without their own trace state: they still decrement the rectangle's
//! pending counter, and their effects show up in the next visible state
//! (or the final one).

use std::collections::{BTreeMap, HashSet};

use arrayvec::ArrayVec;

use crate::compress::Compressor;
use crate::events::{generate_rects, rect_events, RectEvent, RectFilters};
use crate::fenwick::{Fenwick, FenwickSnapshot};
use crate::geom::{Point, PointId, Rect, RectId};
use crate::num::CheapOrderedFloat;

use super::Trace;

/// One resolved corner query of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CornerQuery {
    /// The corner's sweep coordinate.
    pub x: f64,
    /// The corner's `y` boundary.
    pub y_boundary: f64,
    /// Inclusion–exclusion sign.
    pub sign: i8,
    /// The prefix count the query returned.
    pub value: i64,
}

/// A rectangle's progress through its four corner queries.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectProgress {
    /// Running signed sum of resolved corners.
    pub sum: i64,
    /// Corner queries still outstanding, 4 down to 0.
    pub pending: u8,
    /// The corners resolved so far, in resolution order.
    pub resolved: ArrayVec<CornerQuery, 4>,
}

/// A rectangle accepted into the answer set, with its contained-point count.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AcceptedRect {
    /// The accepted rectangle.
    pub rect: Rect,
    /// Its inclusive contained-point count.
    pub count: i64,
}

/// What the visible event that produced a state did.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RectAction {
    /// A point was inserted into the accumulator.
    Added {
        /// The inserted point.
        point: PointId,
        /// The compressed rank of its `y`.
        rank: usize,
    },
    /// An in-range corner query resolved against the accumulator.
    Queried {
        /// The rectangle the corner belongs to.
        rect: RectId,
        /// Inclusion–exclusion sign.
        sign: i8,
        /// The rank that was queried (`upper_bound` of the boundary).
        rank: usize,
        /// The returned prefix count.
        value: i64,
    },
}

/// One atomic (visible) state of the rectangle-count sweep.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RectCountState {
    /// What just happened.
    pub action: RectAction,
    /// The sweep coordinate of the event.
    pub sweep_x: f64,
    /// Frozen accumulator contents.
    pub fenwick: FenwickSnapshot,
    /// Every rectangle's progress, including effects of collapsed no-op
    /// queries processed since the previous state.
    pub progress: BTreeMap<RectId, RectProgress>,
    /// Rectangles accepted so far, in resolution order.
    pub accepted: Vec<AcceptedRect>,
}

/// The final answer of the rectangle-count sweep.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectCountAnswer {
    /// Accepted rectangles, in resolution order.
    pub accepted: Vec<AcceptedRect>,
    /// Every candidate rectangle that was generated, indexed by [`RectId`].
    pub rects: Vec<Rect>,
    /// True if candidate generation was cut short by the cap; the answer
    /// then covers the generated prefix only and must be surfaced as
    /// truncated, not hidden.
    pub truncated: bool,
}

struct Resolver {
    filters: RectFilters,
    // Exact coordinates present in the input.
    members: HashSet<(CheapOrderedFloat, CheapOrderedFloat)>,
}

impl Resolver {
    fn new(points: &[Point], filters: &RectFilters) -> Self {
        Resolver {
            filters: *filters,
            members: points.iter().map(|p| p.coord_key()).collect(),
        }
    }

    fn has_point(&self, x: f64, y: f64) -> bool {
        self.members.contains(&(x.into(), y.into()))
    }

    /// Record one resolved corner; if it was the rectangle's last, decide
    /// acceptance.
    fn resolve(
        &self,
        rect: &Rect,
        progress: &mut RectProgress,
        corner: CornerQuery,
        accepted: &mut Vec<AcceptedRect>,
    ) {
        progress.sum += i64::from(corner.sign) * corner.value;
        progress.pending = progress.pending.saturating_sub(1);
        progress.resolved.push(corner);
        if progress.pending == 0 {
            let count = progress.sum;
            let within_min = count >= self.filters.min_points;
            let within_max = self.filters.max_points.is_none_or(|max| count <= max);
            let corners_present =
                self.has_point(rect.x1, rect.y2) && self.has_point(rect.x2, rect.y1);
            if within_min && within_max && corners_present {
                accepted.push(AcceptedRect { rect: *rect, count });
            }
        }
    }
}

/// Trace the rectangle-count sweep over a point set with the given filters.
pub fn trace(points: &[Point], filters: &RectFilters) -> Trace<RectCountState, RectCountAnswer> {
    let rect_set = generate_rects(points, filters);
    let events = rect_events(points, &rect_set.rects);
    let ys = Compressor::new(points.iter().map(|p| p.y));
    let min_point_x = points
        .iter()
        .map(|p| CheapOrderedFloat::from(p.x))
        .min()
        .map_or(f64::INFINITY, CheapOrderedFloat::into_inner);
    log::debug!(
        "rect-count trace: {} points, {} rects{}, {} events",
        points.len(),
        rect_set.rects.len(),
        if rect_set.truncated { " (truncated)" } else { "" },
        events.len()
    );

    let resolver = Resolver::new(points, filters);
    let mut fenwick = Fenwick::new(ys.len());
    let mut progress: BTreeMap<RectId, RectProgress> = rect_set
        .rects
        .iter()
        .map(|r| {
            (
                r.id,
                RectProgress {
                    sum: 0,
                    pending: 4,
                    resolved: ArrayVec::new(),
                },
            )
        })
        .collect();
    let mut accepted = Vec::new();
    let mut states = Vec::new();

    for event in &events {
        match *event {
            RectEvent::Query {
                x,
                y_boundary,
                rect,
                sign,
            } => {
                let rank = ys.upper_bound(y_boundary);
                let r = &rect_set.rects[rect.0];
                let tracker = progress.get_mut(&rect).expect("progress seeded per rect");
                if rank == 0 || x < min_point_x {
                    // A no-op: resolves to 0 with no Fenwick traversal and
                    // no state of its own.
                    let corner = CornerQuery {
                        x,
                        y_boundary,
                        sign,
                        value: 0,
                    };
                    resolver.resolve(r, tracker, corner, &mut accepted);
                    continue;
                }
                let value = fenwick.query(rank);
                let corner = CornerQuery {
                    x,
                    y_boundary,
                    sign,
                    value,
                };
                resolver.resolve(r, tracker, corner, &mut accepted);
                states.push(RectCountState {
                    action: RectAction::Queried {
                        rect,
                        sign,
                        rank,
                        value,
                    },
                    sweep_x: x,
                    fenwick: fenwick.snapshot(),
                    progress: progress.clone(),
                    accepted: accepted.clone(),
                });
            }
            RectEvent::Add { x, y, point } => {
                let rank = ys.upper_bound(y);
                if rank > 0 {
                    fenwick.update(rank, 1);
                }
                states.push(RectCountState {
                    action: RectAction::Added { point, rank },
                    sweep_x: x,
                    fenwick: fenwick.snapshot(),
                    progress: progress.clone(),
                    accepted: accepted.clone(),
                });
            }
        }
    }

    // Trailing no-op queries fold into the last visible state.
    if let Some(last) = states.last_mut() {
        last.progress = progress;
        last.accepted = accepted.clone();
    }

    Trace {
        states,
        answer: RectCountAnswer {
            accepted,
            rects: rect_set.rects,
            truncated: rect_set.truncated,
        },
    }
}

/// The accepted rectangles, computed by brute-force box counting.
///
/// Enumerates the same candidate rectangles and counts contained points by
/// scanning the whole point set per rectangle. Containment uses the same
/// boundaries as the sweep's `x1 - 1` / `y1 - 1` corner queries: the open
/// band `(x1 - 1, x2]` by `(y1 - 1, y2]`, which coincides with geometric
/// containment on integer coordinates. Results are in generation order, not
/// resolution order.
pub fn count_rects_brute_force(points: &[Point], filters: &RectFilters) -> RectCountAnswer {
    let rect_set = generate_rects(points, filters);
    let resolver = Resolver::new(points, filters);
    let mut accepted = Vec::new();
    for rect in &rect_set.rects {
        let count = points
            .iter()
            .filter(|p| {
                p.x > rect.x1 - 1.0 && p.x <= rect.x2 && p.y > rect.y1 - 1.0 && p.y <= rect.y2
            })
            .count() as i64;
        let within_min = count >= filters.min_points;
        let within_max = filters.max_points.is_none_or(|max| count <= max);
        if within_min
            && within_max
            && resolver.has_point(rect.x1, rect.y2)
            && resolver.has_point(rect.x2, rect.y1)
        {
            accepted.push(AcceptedRect { rect: *rect, count });
        }
    }
    RectCountAnswer {
        accepted,
        rects: rect_set.rects,
        truncated: rect_set.truncated,
    }
}
