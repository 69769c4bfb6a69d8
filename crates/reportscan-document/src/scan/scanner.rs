// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document scanner — the data-URL facade the capture screen talks to.
// Decoding and encoding go through `ImageProcessor`; detection and
// rectification are the pure functions in this module's siblings.

use reportscan_core::error::{ReportscanError, Result};
use reportscan_core::{CaptureConfig, NormalizedPoint, PixelBuffer, Quadrilateral, RectifiedImage};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::bounds::detect_document_corners_with;
use super::corners::normalize_corner_order;
use super::rectify::rectify_with;
use crate::image::processor::ImageProcessor;

/// Result of a one-shot detect-and-flatten pass.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutcome {
    /// Corners found on the downscaled photo (normalized, canonical order).
    pub corners: Quadrilateral,
    /// Rectified report as a PNG data URL.
    pub image: String,
}

/// Detects report corners and rectifies selections for the capture flow.
///
/// Holds the capture configuration: the decode size cap, the detector
/// tunables, and the rectifier's sampling mode.
#[derive(Debug, Clone, Default)]
pub struct DocumentScanner {
    config: CaptureConfig,
}

impl DocumentScanner {
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    // -- Raw buffers ----------------------------------------------------------

    /// Detect corners on an already-decoded buffer.
    pub fn detect_corners(&self, buffer: &PixelBuffer) -> Quadrilateral {
        detect_document_corners_with(buffer, &self.config.detection)
    }

    /// Order arbitrary corners and rectify. `None` means the selection is
    /// degenerate.
    pub fn rectify_buffer(
        &self,
        buffer: &PixelBuffer,
        corners: &[NormalizedPoint],
    ) -> Option<RectifiedImage> {
        let quad = normalize_corner_order(corners);
        rectify_with(buffer, &quad, self.config.sampling)
    }

    // -- Data URLs ------------------------------------------------------------

    /// Decode a photo, downscale it to the configured cap, and detect corners.
    #[instrument(skip_all, fields(url_len = url.len()))]
    pub fn detect_from_data_url(&self, url: &str) -> Result<Quadrilateral> {
        let buffer = ImageProcessor::from_data_url(url)?
            .downscale_to_max_edge(self.config.max_edge)
            .to_pixel_buffer();
        let corners = self.detect_corners(&buffer);
        let fallback = corners == Quadrilateral::FALLBACK;
        info!(
            width = buffer.width,
            height = buffer.height,
            fallback,
            "Document corners detected"
        );
        Ok(corners)
    }

    /// Rectify the selected region of a photo and return it as a PNG data URL.
    ///
    /// The photo is decoded at full resolution; the corners are normalized
    /// first, so they may come straight from a drag-to-adjust UI.
    #[instrument(skip_all, fields(url_len = url.len()))]
    pub fn rectify_data_url(&self, url: &str, corners: &[NormalizedPoint]) -> Result<String> {
        let buffer = ImageProcessor::from_data_url(url)?.to_pixel_buffer();
        let rectified = self
            .rectify_buffer(&buffer, corners)
            .ok_or(ReportscanError::DegenerateGeometry)?;
        debug!(
            width = rectified.width,
            height = rectified.height,
            "Selection rectified"
        );
        ImageProcessor::from_rectified(rectified)?.to_png_data_url()
    }

    /// Detect on the downscaled photo, then rectify the full-resolution one.
    #[instrument(skip_all, fields(url_len = url.len()))]
    pub fn scan_data_url(&self, url: &str) -> Result<ScanOutcome> {
        let full = ImageProcessor::from_data_url(url)?;
        let detect_buffer = full.downscaled(self.config.max_edge).to_pixel_buffer();
        let corners = self.detect_corners(&detect_buffer);

        let source = full.to_pixel_buffer();
        let Some(rectified) = rectify_with(&source, &corners, self.config.sampling) else {
            warn!(?corners, "Detected corners could not be rectified");
            return Err(ReportscanError::DegenerateGeometry);
        };
        info!(
            width = rectified.width,
            height = rectified.height,
            "Report scanned"
        );

        Ok(ScanOutcome {
            corners,
            image: ImageProcessor::from_rectified(rectified)?.to_png_data_url()?,
        })
    }
}
