// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Bounding box detection — locates the ink-bearing region of a photographed
// report from its dark-pixel profiles and emits it as a normalized quad.

use reportscan_core::{DetectionConfig, NormalizedPoint, PixelBuffer, Quadrilateral};
use tracing::{debug, instrument, warn};

use super::luma::extract_luma;
use super::profile::{DarkProfile, profile_dark_pixels};

/// Inclusive pixel-space box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelBox {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl PixelBox {
    /// Corners as normalized points in TL, TR, BR, BL order.
    pub fn to_quadrilateral(self, width: u32, height: u32) -> Quadrilateral {
        let (w, h) = (width as f64, height as f64);
        let (l, t, r, b) = (
            self.left as f64 / w,
            self.top as f64 / h,
            self.right as f64 / w,
            self.bottom as f64 / h,
        );
        Quadrilateral::from_ordered([
            NormalizedPoint::new(l, t),
            NormalizedPoint::new(r, t),
            NormalizedPoint::new(r, b),
            NormalizedPoint::new(l, b),
        ])
    }
}

/// Detect the document quadrilateral using the default tunables.
///
/// Never fails: blank, flat, or malformed input yields
/// [`Quadrilateral::FALLBACK`].
pub fn detect_document_corners(buffer: &PixelBuffer) -> Quadrilateral {
    detect_document_corners_with(buffer, &DetectionConfig::default())
}

/// Detect the document quadrilateral with explicit tunables.
#[instrument(skip_all, fields(width = buffer.width, height = buffer.height))]
pub fn detect_document_corners_with(buffer: &PixelBuffer, config: &DetectionConfig) -> Quadrilateral {
    let Some(stats) = extract_luma(buffer) else {
        warn!(len = buffer.data.len(), "Pixel buffer unusable; using fallback corners");
        return Quadrilateral::FALLBACK;
    };

    if stats.stddev < config.min_contrast_stddev {
        debug!(stddev = stats.stddev, "Image is flat; using fallback corners");
        return Quadrilateral::FALLBACK;
    }

    let profile = profile_dark_pixels(&stats, buffer.width, buffer.height, config);
    debug!(
        mean = stats.mean,
        stddev = stats.stddev,
        threshold = profile.threshold,
        max_row = profile.max_row,
        max_col = profile.max_col,
        "Dark-pixel profile computed"
    );

    match locate_bounding_box(&profile, buffer.width, buffer.height, config) {
        Some(bbox) => {
            debug!(?bbox, "Document bounds located");
            bbox.to_quadrilateral(buffer.width, buffer.height)
        }
        None => {
            debug!("No ink region found; using fallback corners");
            Quadrilateral::FALLBACK
        }
    }
}

/// Find the padded box spanning every row and column with enough ink.
///
/// Returns `None` when no row or column clears the signal threshold, or the
/// bounds collapse to a single row or column.
pub fn locate_bounding_box(
    profile: &DarkProfile,
    width: u32,
    height: u32,
    config: &DetectionConfig,
) -> Option<PixelBox> {
    if width == 0 || height == 0 {
        return None;
    }

    let min_row = config
        .min_ratio_floor
        .max(config.peak_ratio_factor * profile.max_row);
    let min_col = config
        .min_ratio_floor
        .max(config.peak_ratio_factor * profile.max_col);

    let (top, bottom) = signal_span(&profile.rows, min_row)?;
    let (left, right) = signal_span(&profile.cols, min_col)?;
    if bottom <= top || right <= left {
        return None;
    }

    let pad_x = (config.padding_fraction * (right - left) as f64).round() as usize;
    let pad_y = (config.padding_fraction * (bottom - top) as f64).round() as usize;

    Some(PixelBox {
        left: left.saturating_sub(pad_x) as u32,
        top: top.saturating_sub(pad_y) as u32,
        right: (right + pad_x).min(width as usize - 1) as u32,
        bottom: (bottom + pad_y).min(height as usize - 1) as u32,
    })
}

/// First and last index whose ratio reaches `min_ratio`.
fn signal_span(ratios: &[f64], min_ratio: f64) -> Option<(usize, usize)> {
    let first = ratios.iter().position(|&r| r >= min_ratio)?;
    let last = ratios.iter().rposition(|&r| r >= min_ratio)?;
    Some((first, last))
}
