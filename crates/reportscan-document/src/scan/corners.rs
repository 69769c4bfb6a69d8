// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner ordering for user-adjusted or externally supplied quadrilaterals.

use reportscan_core::{NormalizedPoint, Quadrilateral};
use tracing::debug;

/// Clamp four points into the unit square and order them TL, TR, BR, BL.
///
/// The smallest `x + y` is top-left and the largest is bottom-right; of the
/// remaining two, the one further right is top-right. Ties go to the earlier
/// point. Any input that is not exactly four points yields
/// [`Quadrilateral::FALLBACK`].
///
/// The heuristic holds for moderate rotation and skew. Past roughly 45 degrees
/// of rotation combined with strong perspective it can mislabel corners.
pub fn normalize_corner_order(points: &[NormalizedPoint]) -> Quadrilateral {
    let Ok(raw) = <[NormalizedPoint; 4]>::try_from(points) else {
        debug!(count = points.len(), "Expected four corners; using fallback");
        return Quadrilateral::FALLBACK;
    };
    let pts = raw.map(NormalizedPoint::clamped);
    let sum = |i: usize| pts[i].x + pts[i].y;

    let mut tl = 0;
    for i in 1..4 {
        if sum(i) < sum(tl) {
            tl = i;
        }
    }

    let mut br = if tl == 0 { 1 } else { 0 };
    for i in 0..4 {
        if i != tl && sum(i) > sum(br) {
            br = i;
        }
    }

    let mut rest = (0..4).filter(|&i| i != tl && i != br);
    // Exactly two indices remain.
    let (a, b) = match (rest.next(), rest.next()) {
        (Some(a), Some(b)) => (a, b),
        _ => return Quadrilateral::FALLBACK,
    };
    let (tr, bl) = if pts[b].x > pts[a].x { (b, a) } else { (a, b) };

    Quadrilateral::from_ordered([pts[tl], pts[tr], pts[br], pts[bl]])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64) -> NormalizedPoint {
        NormalizedPoint::new(x, y)
    }

    #[test]
    fn shuffled_rectangle_is_ordered() {
        let quad = normalize_corner_order(&[p(0.9, 0.85), p(0.1, 0.8), p(0.15, 0.1), p(0.88, 0.12)]);
        assert_eq!(
            quad.points(),
            &[p(0.15, 0.1), p(0.88, 0.12), p(0.9, 0.85), p(0.1, 0.8)]
        );
    }

    #[test]
    fn canonical_input_is_unchanged() {
        let canonical = [p(0.2, 0.1), p(0.8, 0.15), p(0.85, 0.9), p(0.1, 0.85)];
        let once = normalize_corner_order(&canonical);
        assert_eq!(once.points(), &canonical);

        let twice = normalize_corner_order(once.points());
        assert_eq!(twice, once);
    }

    #[test]
    fn fallback_is_a_fixed_point() {
        let quad = normalize_corner_order(Quadrilateral::FALLBACK.points());
        assert_eq!(quad, Quadrilateral::FALLBACK);
    }

    #[test]
    fn out_of_range_points_are_clamped_first() {
        let quad = normalize_corner_order(&[p(-0.5, -0.5), p(1.4, -0.2), p(1.6, 1.3), p(-0.2, 1.8)]);
        let tl = quad.top_left();
        let br = quad.bottom_right();
        assert!(tl.x + tl.y <= 0.05);
        assert!(br.x + br.y >= 1.95);
        assert_eq!(quad.top_right(), p(1.0, 0.0));
        assert_eq!(quad.bottom_left(), p(0.0, 1.0));
        for pt in quad.points() {
            assert!((0.0..=1.0).contains(&pt.x) && (0.0..=1.0).contains(&pt.y));
        }
    }

    #[test]
    fn wrong_counts_return_fallback() {
        assert_eq!(normalize_corner_order(&[]), Quadrilateral::FALLBACK);
        assert_eq!(normalize_corner_order(&[p(0.5, 0.5)]), Quadrilateral::FALLBACK);
        let three = [p(0.1, 0.1), p(0.9, 0.1), p(0.9, 0.9)];
        assert_eq!(normalize_corner_order(&three), Quadrilateral::FALLBACK);
        let five = [p(0.1, 0.1), p(0.9, 0.1), p(0.9, 0.9), p(0.1, 0.9), p(0.5, 0.5)];
        assert_eq!(normalize_corner_order(&five), Quadrilateral::FALLBACK);
    }

    #[test]
    fn rotated_quad_is_ordered() {
        // Page rotated ~20 degrees clockwise.
        let quad = normalize_corner_order(&[p(0.75, 0.95), p(0.35, 0.05), p(0.95, 0.3), p(0.1, 0.7)]);
        assert_eq!(quad.top_left(), p(0.35, 0.05));
        assert_eq!(quad.top_right(), p(0.95, 0.3));
        assert_eq!(quad.bottom_right(), p(0.75, 0.95));
        assert_eq!(quad.bottom_left(), p(0.1, 0.7));
    }

    #[test]
    fn coincident_points_still_use_four_indices() {
        let same = [p(0.5, 0.5); 4];
        let quad = normalize_corner_order(&same);
        assert_eq!(quad.points(), &same);
    }

    #[test]
    fn nan_coordinates_are_clamped_to_zero() {
        let quad = normalize_corner_order(&[p(f64::NAN, 0.2), p(0.9, 0.1), p(0.9, 0.9), p(0.1, 0.9)]);
        assert_eq!(quad.top_left(), p(0.0, 0.2));
    }
}
