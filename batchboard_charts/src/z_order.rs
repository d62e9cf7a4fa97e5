// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-order conventions for chart-generated marks and groups.
//!
//! Renderers paint groups by `(z_index, GroupId)` and marks within a group by
//! `(z_index, MarkId)`. Values are coarse so related marks can be slotted in between.

/// Gridline group, painted behind the areas.
pub const LAYER_GRID: i32 = -10;
/// Area (series) group.
pub const LAYER_SERIES: i32 = 0;
/// Axis group (domain lines, labels, titles).
pub const LAYER_AXES: i32 = 10;
/// Legend group.
pub const LAYER_LEGEND: i32 = 20;

/// Gridlines drawn behind series.
pub const GRID_LINES: i32 = -50;
/// Filled series marks. Stacked bands add their stack position.
pub const SERIES_FILL: i32 = 0;

/// Axis domain line and tick marks.
pub const AXIS_RULES: i32 = 30;
/// Axis tick labels.
pub const AXIS_LABELS: i32 = 40;
/// Axis title labels.
pub const AXIS_TITLES: i32 = 50;

/// Legend swatches.
pub const LEGEND_SWATCHES: i32 = 60;
/// Legend labels.
pub const LEGEND_LABELS: i32 = 70;
