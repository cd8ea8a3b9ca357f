#![deny(missing_docs)]
#![doc = include_str!("../README.md")]

pub mod compress;
pub mod decode;
pub mod events;
pub mod fenwick;
#[cfg(feature = "generators")]
pub mod generators;
pub mod geom;
pub mod navigate;
pub mod num;
pub mod overlay;
pub mod trace;

pub use compress::Compressor;
pub use decode::{decode_points, DecodeError};
pub use events::{RectFilters, DEFAULT_RECT_CAP};
pub use fenwick::{Fenwick, FenwickSnapshot};
pub use geom::{Pair, PairKind, Point, PointId, Rect, RectId};
pub use navigate::Navigator;
pub use overlay::Overlays;
pub use trace::Trace;
