// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — luma statistics, dark-pixel profiling, bounding box
// detection, corner ordering, and piecewise-affine rectification.

pub mod affine;
pub mod bounds;
pub mod corners;
pub mod luma;
pub mod profile;
pub mod rectify;
pub mod scanner;

pub use scanner::DocumentScanner;
