//! The input decoder: free-form text to a validated point list.
//!
//! The trace engine never sees raw text; everything downstream works on
//! already-validated [`Point`]s. The expected encoding is a JSON array of
//! `[x, y]` pairs, like `[[1,1],[2,2],[3,1]]`.

use crate::geom::Point;

/// The point text was malformed.
///
/// Element-level variants carry the index of the offending element so the
/// error can be surfaced next to the input verbatim.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecodeError {
    /// The text wasn't valid JSON at all.
    Syntax(String),
    /// The top-level JSON value wasn't an array.
    NotAnArray,
    /// An element wasn't a two-element `[x, y]` array.
    NotAPair(usize),
    /// A coordinate wasn't a number, or wasn't finite.
    BadCoordinate(usize),
}

impl std::fmt::Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodeError::Syntax(msg) => write!(f, "invalid JSON: {msg}"),
            DecodeError::NotAnArray => {
                write!(f, "points must be an array like [[1,1],[2,2]]")
            }
            DecodeError::NotAPair(i) => write!(f, "point {i} is not an [x,y] pair"),
            DecodeError::BadCoordinate(i) => {
                write!(f, "point {i} must contain finite numbers")
            }
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decode a JSON array of `[x, y]` pairs into points.
///
/// Point ids are assigned in input order. Duplicate coordinates are allowed;
/// it's up to each algorithm how to treat them.
pub fn decode_points(text: &str) -> Result<Vec<Point>, DecodeError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| DecodeError::Syntax(e.to_string()))?;
    let items = value.as_array().ok_or(DecodeError::NotAnArray)?;

    let mut points = Vec::with_capacity(items.len());
    for (i, item) in items.iter().enumerate() {
        let pair = item.as_array().ok_or(DecodeError::NotAPair(i))?;
        if pair.len() != 2 {
            return Err(DecodeError::NotAPair(i));
        }
        let x = pair[0].as_f64().ok_or(DecodeError::BadCoordinate(i))?;
        let y = pair[1].as_f64().ok_or(DecodeError::BadCoordinate(i))?;
        if !x.is_finite() || !y.is_finite() {
            return Err(DecodeError::BadCoordinate(i));
        }
        points.push(Point::new(i, x, y));
    }
    Ok(points)
}
