// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use batchboard_core::SceneError;

/// Errors reported by chart construction and updates.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChartError {
    /// A dimension was NaN, infinite, or negative.
    #[error("invalid chart dimension `{field}`: {value}")]
    InvalidDimension {
        /// Name of the offending field (`width`, `margin.left`, ...).
        field: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Margins leave no room for the plot area.
    #[error("plot area collapsed to {width}x{height}")]
    EmptyPlotArea {
        /// Plot width after margins.
        width: f64,
        /// Plot height after margins.
        height: f64,
    },
    /// The palette cannot keep adjacent bands apart.
    #[error("palette needs at least 3 colors, got {0}")]
    PaletteTooSmall(usize),
    /// A palette entry could not be parsed.
    #[error("invalid palette color `{0}`")]
    InvalidColor(String),
    /// The scene rejected a structural change.
    #[error(transparent)]
    Scene(#[from] SceneError),
}
