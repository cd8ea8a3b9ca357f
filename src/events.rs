//! Deterministic, totally ordered event sequences for the sweep tracers.
//!
//! Both Fenwick-backed tracers are offline algorithms: they first lay out
//! every primitive `add`/`query` event in sweep order and then replay them.
//! The tie-breaking rules at equal `x` are load-bearing and differ between
//! the two:
//!
//! - dominance counting processes *queries before adds*, so that points in
//!   the same column never dominate each other;
//! - rectangle counting processes *adds before queries*, so that a boundary
//!   query at `x` counts points with coordinate `<= x` inclusive.

use crate::compress::Compressor;
use crate::geom::{Point, PointId, Rect, RectId};
use crate::num::CheapOrderedFloat;

/// A primitive event for the dominance-count sweep.
///
/// The sweep coordinate `x` is carried for ordering and display; once events
/// are built, the algorithm itself only consumes the compressed rank.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum SweepEvent {
    /// Ask how many already-added points have `y` at or below this point's.
    Query {
        /// Sweep coordinate.
        x: f64,
        /// The point this query is on behalf of.
        point: PointId,
        /// Compressed rank of the point's `y`.
        rank: usize,
    },
    /// Insert a point's `y` rank into the accumulator.
    Add {
        /// Sweep coordinate.
        x: f64,
        /// The point being inserted.
        point: PointId,
        /// Compressed rank of the point's `y`.
        rank: usize,
    },
}

impl SweepEvent {
    /// The sweep coordinate this event happens at.
    pub fn x(&self) -> f64 {
        match self {
            SweepEvent::Query { x, .. } | SweepEvent::Add { x, .. } => *x,
        }
    }
}

/// Build the dominance-count event sequence.
///
/// Points are grouped by exact `x`; groups are visited in ascending `x`, and
/// within a group (ordered by ascending `y` for stable display) all queries
/// are emitted before all adds.
pub fn dominance_events(points: &[Point], ys: &Compressor) -> Vec<SweepEvent> {
    let mut sorted = points.to_vec();
    crate::geom::sort_by_x_then_y(&mut sorted);

    let rank = |p: &Point| {
        ys.rank(p.y)
            .expect("y compressor was built from these points")
    };

    let mut events = Vec::with_capacity(2 * sorted.len());
    let mut group = 0;
    while group < sorted.len() {
        let x = sorted[group].x;
        let mut end = group;
        while end < sorted.len() && sorted[end].x == x {
            end += 1;
        }
        for p in &sorted[group..end] {
            events.push(SweepEvent::Query {
                x,
                point: p.id,
                rank: rank(p),
            });
        }
        for p in &sorted[group..end] {
            events.push(SweepEvent::Add {
                x,
                point: p.id,
                rank: rank(p),
            });
        }
        group = end;
    }
    events
}

/// Width/height/area/point-count filters for rectangle generation, plus the
/// hard cap on how many rectangles to generate.
///
/// Minimums default to 0 and maximums to unbounded, so the default filter
/// accepts everything (including degenerate zero-width rectangles). The cap
/// is a resource bound, not a correctness parameter: rectangle count grows
/// roughly cubically in the number of distinct coordinates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct RectFilters {
    /// Minimum geometric width.
    pub min_width: f64,
    /// Maximum geometric width, if bounded.
    pub max_width: Option<f64>,
    /// Minimum geometric height.
    pub min_height: f64,
    /// Maximum geometric height, if bounded.
    pub max_height: Option<f64>,
    /// Minimum geometric area.
    pub min_area: f64,
    /// Maximum geometric area, if bounded.
    pub max_area: Option<f64>,
    /// Minimum number of points the rectangle must contain (inclusive of
    /// its boundary).
    pub min_points: i64,
    /// Maximum number of contained points, if bounded.
    pub max_points: Option<i64>,
    /// Hard cap on generated rectangle count.
    pub max_rects: usize,
}

/// The default rectangle cap.
pub const DEFAULT_RECT_CAP: usize = 200;

impl Default for RectFilters {
    fn default() -> Self {
        RectFilters {
            min_width: 0.0,
            max_width: None,
            min_height: 0.0,
            max_height: None,
            min_area: 0.0,
            max_area: None,
            min_points: 0,
            max_points: None,
            max_rects: DEFAULT_RECT_CAP,
        }
    }
}

/// The generated candidate rectangles, and whether the cap cut generation
/// short.
#[derive(Clone, Debug, Default, serde::Serialize, serde::Deserialize)]
pub struct RectSet {
    /// Candidate rectangles, in generation order.
    pub rects: Vec<Rect>,
    /// True if the cap was hit and later candidates were never generated.
    ///
    /// Truncation is a resource-bound policy, not an error; the partial set
    /// is still fully traceable, but the caller must surface it as
    /// "results truncated".
    pub truncated: bool,
}

/// Generate candidate rectangles from the cross product of the distinct `x`
/// and `y` values present in the point set.
///
/// The width/height/area filters apply here; the point-count filter can only
/// be evaluated once the sweep resolves each rectangle's contained count.
pub fn generate_rects(points: &[Point], filters: &RectFilters) -> RectSet {
    let xs = Compressor::new(points.iter().map(|p| p.x));
    let ys = Compressor::new(points.iter().map(|p| p.y));

    let mut rects = Vec::new();
    for (i, &x1) in xs.values().iter().enumerate() {
        for &x2 in &xs.values()[i..] {
            let w = x2 - x1;
            if w < filters.min_width {
                continue;
            }
            if filters.max_width.is_some_and(|max| w > max) {
                continue;
            }
            for (a, &y1) in ys.values().iter().enumerate() {
                for &y2 in &ys.values()[a..] {
                    let h = y2 - y1;
                    if h < filters.min_height {
                        continue;
                    }
                    if filters.max_height.is_some_and(|max| h > max) {
                        continue;
                    }
                    let area = w * h;
                    if area < filters.min_area {
                        continue;
                    }
                    if filters.max_area.is_some_and(|max| area > max) {
                        continue;
                    }
                    rects.push(Rect {
                        id: RectId(rects.len()),
                        x1,
                        y1,
                        x2,
                        y2,
                    });
                    if rects.len() >= filters.max_rects {
                        log::warn!(
                            "rectangle generation truncated at cap {}",
                            filters.max_rects
                        );
                        return RectSet {
                            rects,
                            truncated: true,
                        };
                    }
                }
            }
        }
    }
    RectSet {
        rects,
        truncated: false,
    }
}

/// A primitive event for the rectangle-count sweep.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum RectEvent {
    /// Insert a point into the accumulator.
    Add {
        /// Sweep coordinate.
        x: f64,
        /// The point's `y` coordinate (compressed at replay time).
        y: f64,
        /// The point being inserted.
        point: PointId,
    },
    /// One of a rectangle's four signed boundary queries.
    Query {
        /// Sweep coordinate: `x2` or `x1 - 1`.
        x: f64,
        /// Query boundary: `y2` or `y1 - 1`; may fall between or below the
        /// compressed keys.
        y_boundary: f64,
        /// The rectangle this query belongs to.
        rect: RectId,
        /// Inclusion–exclusion sign.
        sign: i8,
    },
}

impl RectEvent {
    /// The sweep coordinate this event happens at.
    pub fn x(&self) -> f64 {
        match self {
            RectEvent::Add { x, .. } | RectEvent::Query { x, .. } => *x,
        }
    }

    fn sort_class(&self) -> u8 {
        match self {
            RectEvent::Add { .. } => 0,
            RectEvent::Query { .. } => 1,
        }
    }
}

/// Build the rectangle-count event sequence.
///
/// One `add` per point and four signed corner queries per rectangle,
/// globally ordered by ascending `x` with adds before queries at equal `x`.
/// The sort is stable, so adds stay in point order and queries in rectangle
/// order within a tie.
pub fn rect_events(points: &[Point], rects: &[Rect]) -> Vec<RectEvent> {
    let mut events = Vec::with_capacity(points.len() + 4 * rects.len());
    for p in points {
        events.push(RectEvent::Add {
            x: p.x,
            y: p.y,
            point: p.id,
        });
    }
    for r in rects {
        let corners = [
            (r.x2, r.y2, 1),
            (r.x1 - 1.0, r.y2, -1),
            (r.x2, r.y1 - 1.0, -1),
            (r.x1 - 1.0, r.y1 - 1.0, 1),
        ];
        for (x, y_boundary, sign) in corners {
            events.push(RectEvent::Query {
                x,
                y_boundary,
                rect: r.id,
                sign,
            });
        }
    }
    events.sort_by_key(|e| (CheapOrderedFloat::from(e.x()), e.sort_class()));
    events
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords
            .iter()
            .enumerate()
            .map(|(i, &(x, y))| Point::new(i, x, y))
            .collect()
    }

    #[test]
    fn same_column_queries_come_first() {
        let points = pts(&[(3.0, 1.0), (3.0, 5.0), (1.0, 2.0)]);
        let ys = Compressor::new(points.iter().map(|p| p.y));
        let events = dominance_events(&points, &ys);
        // x = 1 column first, then the x = 3 column with both queries
        // before both adds.
        assert_eq!(events.len(), 6);
        assert_matches!(events[0], SweepEvent::Query { point: PointId(2), .. });
        assert_matches!(events[1], SweepEvent::Add { point: PointId(2), .. });
        assert_matches!(events[2], SweepEvent::Query { .. });
        assert_matches!(events[3], SweepEvent::Query { .. });
        assert_matches!(events[4], SweepEvent::Add { .. });
        assert_matches!(events[5], SweepEvent::Add { .. });
    }

    #[test]
    fn rect_adds_precede_queries_at_equal_x() {
        let points = pts(&[(2.0, 1.0), (2.0, 3.0)]);
        let rects = vec![Rect {
            id: RectId(0),
            x1: 2.0,
            y1: 1.0,
            x2: 2.0,
            y2: 3.0,
        }];
        let events = rect_events(&points, &rects);
        // Two queries land at x1 - 1 = 1, before anything else; then both
        // adds at x = 2, then the two queries at x = 2.
        assert_eq!(events.len(), 6);
        assert_matches!(events[0], RectEvent::Query { .. });
        assert_matches!(events[1], RectEvent::Query { .. });
        assert_matches!(events[2], RectEvent::Add { .. });
        assert_matches!(events[3], RectEvent::Add { .. });
        assert_matches!(events[4], RectEvent::Query { .. });
        assert_matches!(events[5], RectEvent::Query { .. });
    }

    #[test]
    fn generation_respects_filters_and_cap() {
        let points = pts(&[(1.0, 1.0), (2.0, 2.0), (3.0, 3.0)]);
        let all = generate_rects(&points, &RectFilters::default());
        // 3 distinct xs and ys: 6 x-intervals times 6 y-intervals.
        assert_eq!(all.rects.len(), 36);
        assert!(!all.truncated);

        let wide = generate_rects(
            &points,
            &RectFilters {
                min_width: 2.0,
                ..RectFilters::default()
            },
        );
        assert!(wide.rects.iter().all(|r| r.width() >= 2.0));
        assert_eq!(wide.rects.len(), 6);

        let capped = generate_rects(
            &points,
            &RectFilters {
                max_rects: 10,
                ..RectFilters::default()
            },
        );
        assert_eq!(capped.rects.len(), 10);
        assert!(capped.truncated);
    }
}
