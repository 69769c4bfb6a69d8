// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for clinic and pharmacy staff capturing reports.
//
// Every technical error is mapped to plain English with a clear suggestion.
// Capture operations are deterministic, so nothing here is marked for
// automatic retry: the user either adjusts the input or gives up.

use crate::error::ReportscanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// User must do something (reselect corners, retake the photo).
    ActionRequired,
    /// Cannot be fixed from the capture screen: wrong file, broken install.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Severity level (drives icon/colour in UI).
    pub severity: Severity,
}

/// Convert a `ReportscanError` into a `HumanError` suitable for the capture screen.
pub fn humanize_error(err: &ReportscanError) -> HumanError {
    match err {
        ReportscanError::DegenerateGeometry => HumanError {
            message: "We couldn't straighten that selection.".into(),
            suggestion: "Drag the corner handles so they sit on the four corners of the report, then try again.".into(),
            severity: Severity::ActionRequired,
        },

        ReportscanError::ImageError(detail) => HumanError {
            message: "We couldn't read that photo.".into(),
            suggestion: format!("Please take the photo again, or choose a JPEG or PNG image. ({detail})"),
            severity: Severity::ActionRequired,
        },

        ReportscanError::DataUrl(_) => HumanError {
            message: "The photo didn't arrive in one piece.".into(),
            suggestion: "Please take the photo again.".into(),
            severity: Severity::ActionRequired,
        },

        ReportscanError::InvalidBuffer { .. } => HumanError {
            message: "The photo is empty or incomplete.".into(),
            suggestion: "Please take the photo again.".into(),
            severity: Severity::ActionRequired,
        },

        ReportscanError::Io(detail) => HumanError {
            message: "Capture settings could not be read.".into(),
            suggestion: format!("Ask your administrator to check the capture settings file. ({detail})"),
            severity: Severity::Permanent,
        },

        ReportscanError::Serialization(detail) => HumanError {
            message: "Capture settings are damaged.".into(),
            suggestion: format!("Ask your administrator to fix the capture settings file. ({detail})"),
            severity: Severity::Permanent,
        },
    }
}
