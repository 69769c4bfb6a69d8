// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Perspective rectification — flattens a selected quadrilateral into an
// upright rectangle by warping its two halves with independent affine
// transforms.

use image::{ImageBuffer, Rgba};
use imageproc::geometric_transformations::{Interpolation, warp_into_with};
use reportscan_core::{PixelBuffer, Quadrilateral, RectifiedImage, Sampling};
use tracing::{debug, instrument, warn};

use super::affine::{AffineTransform, is_collinear};

/// Tolerance for the inclusive point-in-triangle test.
const EDGE_EPSILON: f64 = 1e-9;

/// Pre-image for destination pixels outside both triangles; imageproc writes
/// the default pixel there.
const OUTSIDE: (f32, f32) = (-2.0, -2.0);

/// RGBA with `f32` channels in `0.0..=255.0`.
type SourceImage = ImageBuffer<Rgba<f32>, Vec<f32>>;

/// One half of the warp: a destination triangle and the transform that maps
/// destination pixels back into the source image.
struct TriangleWarp {
    dst: [(f64, f64); 3],
    to_source: AffineTransform,
}

impl TriangleWarp {
    /// Solve the forward (source to destination) transform and invert it.
    fn solve(src: [(f64, f64); 3], dst: [(f64, f64); 3]) -> Option<Self> {
        let forward = AffineTransform::from_triangles(src, dst)?;
        let to_source = forward.inverse()?;
        Some(Self { dst, to_source })
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        let [p0, p1, p2] = self.dst;
        let e0 = edge(p0, p1, (x, y));
        let e1 = edge(p1, p2, (x, y));
        let e2 = edge(p2, p0, (x, y));
        let has_neg = e0 < -EDGE_EPSILON || e1 < -EDGE_EPSILON || e2 < -EDGE_EPSILON;
        let has_pos = e0 > EDGE_EPSILON || e1 > EDGE_EPSILON || e2 > EDGE_EPSILON;
        !(has_neg && has_pos)
    }
}

/// Signed area test: which side of `a -> b` the point `p` lies on.
#[inline]
fn edge(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    (a.0 - b.0).hypot(a.1 - b.1)
}

/// Any three of the four corners on one line.
fn has_collinear_triple([p0, p1, p2, p3]: [(f64, f64); 4]) -> bool {
    is_collinear(p0, p1, p2)
        || is_collinear(p0, p1, p3)
        || is_collinear(p0, p2, p3)
        || is_collinear(p1, p2, p3)
}

fn interpolation(sampling: Sampling) -> Interpolation {
    match sampling {
        Sampling::Nearest => Interpolation::Nearest,
        Sampling::Bilinear => Interpolation::Bilinear,
    }
}

/// Rectify with bilinear sampling.
///
/// Returns `None` when the source buffer is unusable or the quadrilateral is
/// degenerate (any three corners collinear). No partial image is produced.
pub fn rectify(buffer: &PixelBuffer, corners: &Quadrilateral) -> Option<RectifiedImage> {
    rectify_with(buffer, corners, Sampling::Bilinear)
}

/// Rectify with an explicit sampling mode.
///
/// `corners` must be in canonical TL, TR, BR, BL order. The output size is the
/// average of opposite edge lengths, so mild perspective is compensated rather
/// than taken from any single edge.
#[instrument(skip_all, fields(width = buffer.width, height = buffer.height, sampling = ?sampling))]
pub fn rectify_with(
    buffer: &PixelBuffer,
    corners: &Quadrilateral,
    sampling: Sampling,
) -> Option<RectifiedImage> {
    if !buffer.is_well_formed() {
        warn!(len = buffer.data.len(), "Pixel buffer unusable; cannot rectify");
        return None;
    }

    let pixels = corners.to_pixels(buffer.width, buffer.height);
    if has_collinear_triple(pixels) {
        warn!(?corners, "Three corners are collinear; nothing to rectify");
        return None;
    }

    let [p0, p1, p2, p3] = pixels;
    let out_w = crop_extent(distance(p0, p1), distance(p3, p2));
    let out_h = crop_extent(distance(p0, p3), distance(p1, p2));
    let (w, h) = (out_w as f64, out_h as f64);
    let (d0, d1, d2, d3) = ((0.0, 0.0), (w, 0.0), (w, h), (0.0, h));

    let halves = TriangleWarp::solve([p0, p1, p2], [d0, d1, d2])
        .zip(TriangleWarp::solve([p0, p2, p3], [d0, d2, d3]));
    let Some((upper, lower)) = halves else {
        warn!(?corners, "Degenerate quadrilateral; nothing to rectify");
        return None;
    };

    debug!(out_w, out_h, "Rectifying quadrilateral");

    let source = padded_source(buffer);
    let (max_x, max_y) = (buffer.width as f64 - 1.0, buffer.height as f64 - 1.0);

    // imageproc hands us integer output coordinates and samples with integer
    // source coordinates on pixel centres; the triangles live in continuous
    // space where pixel `i` spans `[i, i + 1)`.
    let pre_image = |x: f32, y: f32| -> (f32, f32) {
        let (cx, cy) = (f64::from(x) + 0.5, f64::from(y) + 0.5);
        let warp = if upper.contains(cx, cy) {
            &upper
        } else if lower.contains(cx, cy) {
            &lower
        } else {
            return OUTSIDE;
        };
        let (sx, sy) = warp.to_source.apply(cx, cy);
        (
            ((sx - 0.5).clamp(0.0, max_x) + 1.0) as f32,
            ((sy - 0.5).clamp(0.0, max_y) + 1.0) as f32,
        )
    };

    let mut output = SourceImage::new(out_w, out_h);
    warp_into_with(
        &source,
        pre_image,
        interpolation(sampling),
        Rgba([0.0; 4]),
        &mut output,
    );

    let data = output
        .into_raw()
        .into_iter()
        .map(|v| v.round().clamp(0.0, 255.0) as u8)
        .collect();

    Some(RectifiedImage {
        width: out_w,
        height: out_h,
        data,
    })
}

/// Copy of the source with a one-pixel replicated border, so reads up to half
/// a pixel outside the image still have four bilinear neighbours.
fn padded_source(buffer: &PixelBuffer) -> SourceImage {
    let (w, h) = (buffer.width, buffer.height);
    ImageBuffer::from_fn(w + 2, h + 2, |x, y| {
        let sx = x.saturating_sub(1).min(w - 1);
        let sy = y.saturating_sub(1).min(h - 1);
        Rgba(buffer.rgba(sx, sy).map(f32::from))
    })
}

/// Round the mean of two edge lengths, never below one pixel.
fn crop_extent(a: f64, b: f64) -> u32 {
    let mean = ((a + b) / 2.0).round();
    if mean.is_finite() && mean >= 1.0 {
        mean.min(u32::MAX as f64) as u32
    } else {
        1
    }
}
