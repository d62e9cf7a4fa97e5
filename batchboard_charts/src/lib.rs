// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked-area category charts for accelerator batch statistics.
//!
//! This crate sits between `batchboard_data` (records) and `batchboard_core` (scene):
//! - **Scales** and **stacking** turn batch records into screen geometry.
//! - **Guides** (axes, gridlines, legend) are generated as stable-identity marks.
//! - [`StackedAreaChart`] owns a set of scene groups and animates between the stacked view
//!   and a single focused category, driven by explicit timestamps.
//!
//! Time is never read from a clock here; callers pass `now` to every animated operation.

mod axis;
mod config;
mod curve;
mod dimensions;
mod error;
mod geometry;
mod legend;
mod palette;
mod scale;
mod selection;
mod stack;
mod stacked_area_chart;
mod stacked_area_mark;
#[cfg(test)]
mod stacked_tests;
mod tooltip;
mod transition;
mod tween;
mod z_order;

pub use axis::{
    AxisStyle, Axes, GridStyle, StrokeStyle, percent_label, visible_batches, y_title,
};
pub use config::ChartConfig;
pub use curve::{area_path, catmull_rom_to};
pub use dimensions::{Dimensions, Margin};
pub use error::ChartError;
pub use geometry::{ChartGeometry, STACKED_MAX, y_domain};
pub use legend::{Legend, LegendConfig, LegendItem, LegendScroll};
pub use palette::{ORANGE, PARTNERS, assign_colors, parse_palette};
pub use scale::{ScaleBand, ScaleLinear};
pub use selection::{CategoryObserver, ChartViewState, SelectionMachine};
pub use stack::{StackLayout, StackSeries};
pub use stacked_area_chart::{ChartGroups, FrameOutput, StackedAreaChart};
pub use stacked_area_mark::StackedAreaMarkSpec;
pub use tooltip::{POINTER_OFFSET, Tooltip, TooltipRegistry};
pub use transition::{Ease, Transition};
pub use tween::PathTween;
pub use z_order::*;
