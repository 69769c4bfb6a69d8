// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the reportscan-document crate.
// Covers corner detection and rectification on a capped-size synthetic
// report photo, the realistic hot path for the capture screen.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

use reportscan_core::{NormalizedPoint, PixelBuffer, Quadrilateral, Sampling};
use reportscan_document::{detect_document_corners, rectify_with};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// 900x675 page (the 900px capture cap at 4:3) with ruled "text lines".
fn synthetic_report() -> PixelBuffer {
    let (width, height) = (900u32, 675u32);
    let mut img = RgbaImage::from_pixel(width, height, Rgba([238, 236, 230, 255]));
    for line in 0..20 {
        let y = 90 + line * 24;
        draw_filled_rect_mut(
            &mut img,
            Rect::at(120, y).of_size(640, 8),
            Rgba([30, 30, 40, 255]),
        );
    }
    PixelBuffer::new(width, height, img.into_raw())
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

fn bench_detect_corners(c: &mut Criterion) {
    let buffer = synthetic_report();
    c.bench_function("detect_document_corners (900x675)", |b| {
        b.iter(|| black_box(detect_document_corners(black_box(&buffer))));
    });
}

fn bench_rectify(c: &mut Criterion) {
    let buffer = synthetic_report();
    let skewed = Quadrilateral::from_ordered([
        NormalizedPoint::new(0.12, 0.10),
        NormalizedPoint::new(0.86, 0.14),
        NormalizedPoint::new(0.90, 0.88),
        NormalizedPoint::new(0.10, 0.84),
    ]);

    let mut group = c.benchmark_group("rectify (900x675, skewed quad)");
    for sampling in [Sampling::Nearest, Sampling::Bilinear] {
        group.bench_function(format!("{sampling:?}"), |b| {
            b.iter(|| black_box(rectify_with(black_box(&buffer), &skewed, sampling)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_detect_corners, bench_rectify);
criterion_main!(benches);
