// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// reportscan-document — Report capture for the reportscan engine.
//
// Finds the text-bearing region of a photographed paper report, orders
// user-adjusted corners, and flattens the selected quadrilateral into an
// upright image for OCR. The image module adapts encoded photos (data URLs,
// JPEG, PNG) to and from raw pixel buffers.

pub mod image;
pub mod scan;

// Re-export the entry points so callers can use `reportscan_document::rectify` etc.
pub use self::image::processor::ImageProcessor;
pub use scan::bounds::{detect_document_corners, detect_document_corners_with};
pub use scan::corners::normalize_corner_order;
pub use scan::rectify::{rectify, rectify_with};
pub use scan::scanner::{DocumentScanner, ScanOutcome};
