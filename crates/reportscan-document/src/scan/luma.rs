// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Luma extraction and global intensity statistics.

use reportscan_core::{CHANNELS, PixelBuffer};

/// Rec. 601 luma weights for R, G, B. Alpha is ignored.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// Per-pixel grayscale intensity plus its population mean and standard deviation.
#[derive(Debug, Clone)]
pub struct LumaStats {
    /// Row-major luma, one value per pixel, in `0.0..=255.0`.
    pub luma: Vec<f64>,
    pub mean: f64,
    pub stddev: f64,
}

/// Convert an RGBA buffer to luma and compute its statistics.
///
/// Returns `None` when the buffer has a zero dimension or fewer bytes than its
/// dimensions require.
pub fn extract_luma(buffer: &PixelBuffer) -> Option<LumaStats> {
    if !buffer.is_well_formed() {
        return None;
    }

    let count = buffer.width as usize * buffer.height as usize;
    let luma: Vec<f64> = buffer.data[..count * CHANNELS]
        .chunks_exact(CHANNELS)
        .map(|px| {
            LUMA_WEIGHTS[0] * px[0] as f64
                + LUMA_WEIGHTS[1] * px[1] as f64
                + LUMA_WEIGHTS[2] * px[2] as f64
        })
        .collect();

    let n = count as f64;
    let mean = luma.iter().sum::<f64>() / n;
    let variance = luma.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;

    Some(LumaStats {
        luma,
        mean,
        stddev: variance.sqrt(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn weights_apply_per_channel() {
        let buf = PixelBuffer::new(
            3,
            1,
            vec![255, 0, 0, 255, 0, 255, 0, 0, 0, 0, 255, 17],
        );
        let stats = extract_luma(&buf).unwrap();
        assert!((stats.luma[0] - 76.245).abs() < 1e-9);
        assert!((stats.luma[1] - 149.685).abs() < 1e-9);
        assert!((stats.luma[2] - 29.07).abs() < 1e-9);
    }

    #[test]
    fn population_statistics() {
        // Two black pixels, two white pixels: mean 127.5, stddev 127.5.
        let mut data = Vec::new();
        for v in [0u8, 0, 255, 255] {
            data.extend_from_slice(&[v, v, v, 255]);
        }
        let stats = extract_luma(&PixelBuffer::new(2, 2, data)).unwrap();
        assert!((stats.mean - 127.5).abs() < 1e-6);
        assert!((stats.stddev - 127.5).abs() < 1e-6);
    }

    #[test]
    fn uniform_image_has_zero_stddev() {
        let stats = extract_luma(&PixelBuffer::filled(8, 5, [90, 90, 90, 255])).unwrap();
        assert!((stats.mean - 90.0).abs() < 1e-9);
        assert!(stats.stddev.abs() < 1e-9);
        assert_eq!(stats.luma.len(), 40);
    }

    #[test]
    fn insufficient_input_is_none() {
        assert!(extract_luma(&PixelBuffer::new(0, 0, Vec::new())).is_none());
        assert!(extract_luma(&PixelBuffer::new(4, 4, vec![0; 63])).is_none());
    }

    #[test]
    fn trailing_bytes_are_ignored() {
        let mut buf = PixelBuffer::filled(2, 2, [10, 10, 10, 255]);
        buf.data.extend_from_slice(&[255; 8]);
        let stats = extract_luma(&buf).unwrap();
        assert_eq!(stats.luma.len(), 4);
        assert!((stats.mean - 10.0).abs() < 1e-9);
    }
}
