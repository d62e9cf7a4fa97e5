// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Errors returned while decoding or querying the dataset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DataError {
    /// The input is not valid JSON for the expected shape.
    #[error("malformed dataset: {0}")]
    Json(String),
    /// A string is not a `[W|S|F][YY]` batch code.
    #[error("invalid batch code {0:?}")]
    InvalidBatchCode(String),
    /// A year range violates its bounds or minimum span.
    #[error("invalid year range {start}..={end}")]
    InvalidYearRange {
        /// First year.
        start: i32,
        /// Last year.
        end: i32,
    },
}

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
