//! Deterministic point-set generators for benchmarks and stress tests.
//!
//! Everything here is reproducible from its arguments alone; the scatter
//! generator uses a fixed linear congruential sequence rather than a real
//! RNG so benchmark inputs never drift between runs.

use crate::geom::Point;

/// An `w` by `h` integer lattice.
pub fn grid(w: usize, h: usize) -> Vec<Point> {
    let mut points = Vec::with_capacity(w * h);
    for ix in 0..w {
        for iy in 0..h {
            points.push(Point::new(points.len(), ix as f64, iy as f64));
        }
    }
    points
}

/// A descending staircase: `n` points where each sits right of and below its
/// predecessor. Every adjacent step forms an empty box.
pub fn staircase(n: usize) -> Vec<Point> {
    (0..n)
        .map(|i| Point::new(i, 2.0 * i as f64, 2.0 * (n - i) as f64))
        .collect()
}

/// `n` points on a circle of the given radius, snapped to the integer grid
/// and offset to stay non-negative.
pub fn ring(n: usize, radius: f64) -> Vec<Point> {
    (0..n)
        .map(|i| {
            let angle = std::f64::consts::TAU * i as f64 / n as f64;
            let x = (radius + radius * angle.cos()).round();
            let y = (radius + radius * angle.sin()).round();
            Point::new(i, x, y)
        })
        .collect()
}

/// `n` pseudo-random points with coordinates in `0..side`, reproducible for
/// a given seed.
pub fn scatter(n: usize, side: u64, seed: u64) -> Vec<Point> {
    // Constants from Knuth's MMIX generator.
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (state >> 33) % side.max(1)
    };
    (0..n)
        .map(|i| {
            let x = next() as f64;
            let y = next() as f64;
            Point::new(i, x, y)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_covers_the_lattice() {
        let points = grid(3, 2);
        assert_eq!(points.len(), 6);
        assert!(points.iter().all(|p| p.x < 3.0 && p.y < 2.0));
    }

    #[test]
    fn staircase_descends() {
        let points = staircase(5);
        for w in points.windows(2) {
            assert!(w[1].x > w[0].x);
            assert!(w[1].y < w[0].y);
        }
    }

    #[test]
    fn ring_stays_non_negative() {
        let points = ring(16, 10.0);
        assert!(points.iter().all(|p| p.x >= 0.0 && p.y >= 0.0));
    }

    #[test]
    fn scatter_is_reproducible() {
        assert_eq!(scatter(20, 64, 7), scatter(20, 64, 7));
        assert_ne!(scatter(20, 64, 7), scatter(20, 64, 8));
    }
}
