// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding photos into pixel buffers, size capping, and PNG /
// data-URL encoding of rectified output.

pub mod data_url;
pub mod processor;

pub use processor::ImageProcessor;
