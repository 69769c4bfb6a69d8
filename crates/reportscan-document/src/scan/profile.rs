// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Dark-pixel ratio profiles: for every row and column, the fraction of pixels
// at or below an adaptive ink threshold.

use reportscan_core::DetectionConfig;

use super::luma::LumaStats;

/// Row and column dark-pixel ratios for one image.
#[derive(Debug, Clone)]
pub struct DarkProfile {
    /// Threshold the ratios were computed against.
    pub threshold: f64,
    /// `rows[y]` = dark pixels in row `y` / width.
    pub rows: Vec<f64>,
    /// `cols[x]` = dark pixels in column `x` / height.
    pub cols: Vec<f64>,
    pub max_row: f64,
    pub max_col: f64,
}

/// Adaptive ink threshold: `mean - k * stddev`, clamped to the configured bounds.
pub fn dark_threshold(mean: f64, stddev: f64, config: &DetectionConfig) -> f64 {
    (mean - config.threshold_stddev_factor * stddev)
        .clamp(config.threshold_min, config.threshold_max)
}

/// Build the row/column dark-pixel profiles.
///
/// `stats.luma` must hold `width * height` values.
pub fn profile_dark_pixels(
    stats: &LumaStats,
    width: u32,
    height: u32,
    config: &DetectionConfig,
) -> DarkProfile {
    let (w, h) = (width as usize, height as usize);
    let threshold = dark_threshold(stats.mean, stats.stddev, config);
    if w == 0 || h == 0 {
        return DarkProfile {
            threshold,
            rows: vec![0.0; h],
            cols: vec![0.0; w],
            max_row: 0.0,
            max_col: 0.0,
        };
    }

    let mut row_counts = vec![0u32; h];
    let mut col_counts = vec![0u32; w];

    for (y, row) in stats.luma.chunks_exact(w).take(h).enumerate() {
        for (x, &value) in row.iter().enumerate() {
            if value <= threshold {
                row_counts[y] += 1;
                col_counts[x] += 1;
            }
        }
    }

    let rows: Vec<f64> = row_counts.iter().map(|&c| c as f64 / w as f64).collect();
    let cols: Vec<f64> = col_counts.iter().map(|&c| c as f64 / h as f64).collect();
    let max_row = rows.iter().copied().fold(0.0, f64::max);
    let max_col = cols.iter().copied().fold(0.0, f64::max);

    DarkProfile {
        threshold,
        rows,
        cols,
        max_row,
        max_col,
    }
}
