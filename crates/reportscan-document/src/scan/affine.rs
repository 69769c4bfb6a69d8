// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Affine transforms solved from three point correspondences.

/// Below this absolute determinant a triangle is treated as collinear.
pub const DEGENERATE_EPSILON: f64 = 1e-6;

/// True when `p`, `q` and `r` lie on one line (or the cross product is not finite).
pub fn is_collinear(p: (f64, f64), q: (f64, f64), r: (f64, f64)) -> bool {
    let cross = (q.0 - p.0) * (r.1 - p.1) - (q.1 - p.1) * (r.0 - p.0);
    !cross.is_finite() || cross.abs() < DEGENERATE_EPSILON
}

/// Maps `(x, y)` to `(a*x + c*y + e, b*x + d*y + f)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AffineTransform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineTransform {
    /// Solve the transform taking `src[i]` to `dst[i]` for `i` in `0..3`.
    ///
    /// Uses Cramer's rule on the source triangle's edge vectors. Returns `None`
    /// when the source triangle is degenerate or a coefficient is not finite.
    pub fn from_triangles(src: [(f64, f64); 3], dst: [(f64, f64); 3]) -> Option<Self> {
        let (x0, y0) = src[0];
        let (dx1, dy1) = (src[1].0 - x0, src[1].1 - y0);
        let (dx2, dy2) = (src[2].0 - x0, src[2].1 - y0);

        let det = dx1 * dy2 - dx2 * dy1;
        if !det.is_finite() || det.abs() < DEGENERATE_EPSILON {
            return None;
        }

        let (u0, v0) = dst[0];
        let (du1, dv1) = (dst[1].0 - u0, dst[1].1 - v0);
        let (du2, dv2) = (dst[2].0 - u0, dst[2].1 - v0);

        let a = (du1 * dy2 - du2 * dy1) / det;
        let c = (dx1 * du2 - dx2 * du1) / det;
        let b = (dv1 * dy2 - dv2 * dy1) / det;
        let d = (dx1 * dv2 - dx2 * dv1) / det;

        Self {
            a,
            b,
            c,
            d,
            e: u0 - a * x0 - c * y0,
            f: v0 - b * x0 - d * y0,
        }
        .finite()
    }

    /// The transform undoing this one, if its linear part is invertible.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.d - self.b * self.c;
        if !det.is_finite() || det.abs() < DEGENERATE_EPSILON {
            return None;
        }

        let a = self.d / det;
        let b = -self.b / det;
        let c = -self.c / det;
        let d = self.a / det;

        Self {
            a,
            b,
            c,
            d,
            e: -(a * self.e + c * self.f),
            f: -(b * self.e + d * self.f),
        }
        .finite()
    }

    #[inline]
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.c * y + self.e,
            self.b * x + self.d * y + self.f,
        )
    }

    fn finite(self) -> Option<Self> {
        [self.a, self.b, self.c, self.d, self.e, self.f]
            .iter()
            .all(|v| v.is_finite())
            .then_some(self)
    }
}
