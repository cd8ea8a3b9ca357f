//! Geometric primitives: identified points, point pairs, and rectangles.

use crate::num::CheapOrderedFloat;

/// An index identifying a point in its original input order.
///
/// Points keep their identity across sorting and recomputation within one
/// input, so trace states can refer to points stably.
#[derive(
    Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PointId(pub usize);

impl std::fmt::Debug for PointId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "p_{}", self.0)
    }
}

/// A two-dimensional point with a stable identity.
///
/// Points are immutable once constructed; a new point set means a fresh
/// recomputation, never in-place mutation.
#[derive(Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    /// The point's identity, assigned in input order.
    pub id: PointId,
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl std::fmt::Debug for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}({:?}, {:?})", self.id, self.x, self.y)
    }
}

impl Point {
    /// Create a new point.
    pub fn new(id: usize, x: f64, y: f64) -> Self {
        debug_assert!(x.is_finite());
        debug_assert!(y.is_finite());
        Point {
            id: PointId(id),
            x,
            y,
        }
    }

    /// The coordinate pair as an exact hash/ordering key.
    pub(crate) fn coord_key(&self) -> (CheapOrderedFloat, CheapOrderedFloat) {
        (self.x.into(), self.y.into())
    }
}

/// The cross product of `(a - o)` and `(b - o)`.
///
/// Positive means `o -> a -> b` is a counter-clockwise (left) turn, negative
/// a clockwise turn, zero collinear.
pub fn cross(o: &Point, a: &Point, b: &Point) -> f64 {
    (a.x - o.x) * (b.y - o.y) - (a.y - o.y) * (b.x - o.x)
}

/// Sort points ascending by `x`, ties ascending by `y`.
///
/// This is the working order for dominance counting and the convex hull.
pub fn sort_by_x_then_y(points: &mut [Point]) {
    points.sort_by_key(|p| {
        (
            CheapOrderedFloat::from(p.x),
            CheapOrderedFloat::from(p.y),
        )
    });
}

/// Sort points ascending by `x`, ties *descending* by `y`.
///
/// This is the working order for the two pair tracers: at a shared `x`, the
/// higher point is scanned first so it can pair downward within its column.
pub fn sort_by_x_then_y_desc(points: &mut [Point]) {
    points.sort_by(|p, q| {
        CheapOrderedFloat::from(p.x)
            .cmp(&q.x.into())
            .then_with(|| CheapOrderedFloat::from(q.y).cmp(&p.y.into()))
    });
}

/// How a pair of points is oriented relative to the axes.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, serde::Serialize, serde::Deserialize)]
pub enum PairKind {
    /// The two points share a `y` coordinate.
    Horizontal,
    /// The two points share an `x` coordinate.
    Vertical,
    /// Neither coordinate is shared.
    Other,
}

/// An accepted pair of points, identified by its endpoints.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pair {
    /// The first (upper-left) endpoint.
    pub a: Point,
    /// The second (lower-right) endpoint.
    pub b: Point,
    /// Axis orientation of the pair.
    pub kind: PairKind,
}

impl Pair {
    /// Build a pair, classifying its orientation from the endpoints.
    pub fn classify(a: Point, b: Point) -> Self {
        let kind = if a.x == b.x {
            PairKind::Vertical
        } else if a.y == b.y {
            PairKind::Horizontal
        } else {
            PairKind::Other
        };
        Pair { a, b, kind }
    }

    /// The pair's identity: the ordered ids of its endpoints.
    pub fn id(&self) -> (PointId, PointId) {
        (self.a.id, self.b.id)
    }
}

/// An index identifying a generated rectangle.
#[derive(
    Clone, Copy, PartialOrd, Ord, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct RectId(pub usize);

impl std::fmt::Debug for RectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "r_{}", self.0)
    }
}

/// An axis-aligned rectangle with `x1 <= x2` and `y1 <= y2`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Rect {
    /// The rectangle's identity, assigned in generation order.
    pub id: RectId,
    /// Left edge.
    pub x1: f64,
    /// Bottom edge.
    pub y1: f64,
    /// Right edge.
    pub x2: f64,
    /// Top edge.
    pub y2: f64,
}

impl Rect {
    /// Geometric width (`x2 - x1`; zero-width rectangles are legal).
    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    /// Geometric height (`y2 - y1`).
    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }

    /// Geometric area.
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}
