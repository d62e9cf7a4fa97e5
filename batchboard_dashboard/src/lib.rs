// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The batchboard page shell.
//!
//! A [`Dashboard`] ties the pieces together:
//! - one year range, re-aggregated into batch records whenever it changes,
//! - one [`StackedAreaChart`](batchboard_charts::StackedAreaChart) per configured panel
//!   (industries and tags by default), each with its own scene and selection state,
//! - the partner [`ClusterLayout`](batchboard_layout::ClusterLayout), rebuilt for every
//!   range after the previous simulations are stopped,
//! - [`Debouncer`]s for scroll and resize bursts.
//!
//! Every scene is mirrored into an [`SvgScene`] from its diffs, so the current state can be
//! written out at any time.

mod config;
mod dashboard;
mod debounce;
mod error;
mod svg;

pub use config::{DashboardConfig, PanelConfig};
pub use dashboard::{Dashboard, DashboardState, FrameReport, PARTNER_TOOLTIP};
pub use debounce::Debouncer;
pub use error::DashboardError;
pub use svg::SvgScene;
