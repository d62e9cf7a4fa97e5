// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layout errors.

/// Errors raised while building a cluster layout.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum LayoutError {
    /// The layout bounds are non-finite or empty.
    #[error("invalid layout bounds {width}x{height}")]
    InvalidBounds {
        /// Bounds width.
        width: f64,
        /// Bounds height.
        height: f64,
    },
    /// A configuration value is out of range.
    #[error("invalid layout configuration: {0}")]
    InvalidConfig(&'static str),
}
