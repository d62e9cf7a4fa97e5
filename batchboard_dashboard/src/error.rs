// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use batchboard_charts::ChartError;
use batchboard_data::DataError;
use batchboard_layout::LayoutError;

/// Errors surfaced by the dashboard shell.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum DashboardError {
    /// Bundled data could not be decoded, or a year range was rejected.
    #[error(transparent)]
    Data(#[from] DataError),
    /// A chart could not be built.
    #[error(transparent)]
    Chart(#[from] ChartError),
    /// The partner layout could not be built.
    #[error(transparent)]
    Layout(#[from] LayoutError),
    /// The configuration file is malformed.
    #[error("invalid dashboard configuration: {0}")]
    Config(String),
    /// No chart has the given id.
    #[error("unknown chart {0:?}")]
    UnknownChart(String),
}

impl From<serde_json::Error> for DashboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::Config(err.to_string())
    }
}
