// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for report capture: pixel buffers, normalized points,
// quadrilaterals and rectified output.

use serde::{Deserialize, Serialize};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

/// A raw RGBA image, row-major, 4 interleaved channels per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Self {
        Self {
            width,
            height,
            data,
        }
    }

    /// Allocate a buffer filled with a single RGBA colour.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let count = width as usize * height as usize;
        let data = rgba.iter().copied().cycle().take(count * CHANNELS).collect();
        Self::new(width, height, data)
    }

    /// Number of bytes the declared dimensions require, or `None` on overflow.
    pub fn required_len(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(CHANNELS)
    }

    /// True when both dimensions are non-zero and `data` covers them.
    pub fn is_well_formed(&self) -> bool {
        self.width > 0
            && self.height > 0
            && self
                .required_len()
                .is_some_and(|needed| self.data.len() >= needed)
    }

    /// RGBA value at `(x, y)`. Caller guarantees the buffer is well formed and
    /// the coordinate is in range.
    #[inline]
    pub fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = (y as usize * self.width as usize + x as usize) * CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }
}

/// A point expressed as a fraction of image width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedPoint {
    pub x: f64,
    pub y: f64,
}

impl NormalizedPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both coordinates into `[0, 1]`. NaN collapses to `0.0`.
    pub fn clamped(self) -> Self {
        Self {
            x: clamp_unit(self.x),
            y: clamp_unit(self.y),
        }
    }

    /// Convert to pixel coordinates in an image of the given size.
    pub fn to_pixels(self, width: u32, height: u32) -> (f64, f64) {
        (self.x * width as f64, self.y * height as f64)
    }
}

fn clamp_unit(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Four corners in canonical order: top-left, top-right, bottom-right,
/// bottom-left.
///
/// Arbitrary user input should go through the corner normalizer rather than
/// [`Quadrilateral::from_ordered`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quadrilateral([NormalizedPoint; 4]);

impl Quadrilateral {
    /// Returned whenever detection has nothing better to offer.
    pub const FALLBACK: Self = Self([
        NormalizedPoint::new(0.08, 0.08),
        NormalizedPoint::new(0.92, 0.08),
        NormalizedPoint::new(0.92, 0.92),
        NormalizedPoint::new(0.08, 0.92),
    ]);

    /// Wrap points that are already in TL, TR, BR, BL order.
    pub const fn from_ordered(points: [NormalizedPoint; 4]) -> Self {
        Self(points)
    }

    pub fn points(&self) -> &[NormalizedPoint; 4] {
        &self.0
    }

    pub fn top_left(&self) -> NormalizedPoint {
        self.0[0]
    }

    pub fn top_right(&self) -> NormalizedPoint {
        self.0[1]
    }

    pub fn bottom_right(&self) -> NormalizedPoint {
        self.0[2]
    }

    pub fn bottom_left(&self) -> NormalizedPoint {
        self.0[3]
    }

    /// De-normalize every corner into pixel space.
    pub fn to_pixels(&self, width: u32, height: u32) -> [(f64, f64); 4] {
        self.0.map(|p| p.to_pixels(width, height))
    }
}

impl Default for Quadrilateral {
    fn default() -> Self {
        Self::FALLBACK
    }
}

/// Output of the perspective rectifier (RGBA, row-major).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RectifiedImage {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}
