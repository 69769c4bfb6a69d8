// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for reportscan.
//
// Low-signal and malformed input never reach this type: detection and corner
// ordering resolve them to the fallback quadrilateral. Only the codec and
// scanner layers return `ReportscanError`.

use thiserror::Error;

/// Top-level error type for all reportscan operations.
#[derive(Debug, Error)]
pub enum ReportscanError {
    // -- Codec errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("malformed data URL: {0}")]
    DataUrl(String),

    #[error("pixel buffer too small: {width}x{height} RGBA needs more than {len} bytes")]
    InvalidBuffer { width: u32, height: u32, len: usize },

    // -- Geometry --
    #[error("selected region is degenerate (three or more corners are collinear)")]
    DegenerateGeometry,

    // -- Configuration / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ReportscanError>;
