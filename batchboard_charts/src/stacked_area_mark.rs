// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stacked area band marks.

use batchboard_core::{Mark, MarkId};
use kurbo::BezPath;
use peniko::Color;

use crate::z_order;

/// One filled band of a stacked area chart.
///
/// The mark id derives from the band key, so a category keeps its identity across data
/// updates, reorderings, and transitions.
#[derive(Clone, Debug)]
pub struct StackedAreaMarkSpec {
    /// Stable-id base shared by all bands of a chart.
    pub id_base: u64,
    /// Category key, also reported by hit testing.
    pub key: String,
    /// Closed outline of the band.
    pub path: BezPath,
    /// Fill color.
    pub fill: Color,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rendering order hint.
    pub z_index: i32,
}

impl StackedAreaMarkSpec {
    /// Creates an opaque band.
    pub fn new(id_base: u64, key: impl Into<String>, path: BezPath, fill: Color) -> Self {
        Self {
            id_base,
            key: key.into(),
            path,
            fill,
            opacity: 1.0,
            z_index: z_order::SERIES_FILL,
        }
    }

    /// Returns the mark id used for `key`.
    pub fn id_for(id_base: u64, key: &str) -> MarkId {
        MarkId::for_key(id_base, key)
    }

    /// Sets the opacity.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets the z-index used for render ordering.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Generates the band mark.
    pub fn mark(&self) -> Mark {
        Mark::path(Self::id_for(self.id_base, &self.key), self.path.clone())
            .with_fill(self.fill)
            .with_opacity(self.opacity)
            .with_key(self.key.clone())
            .with_z_index(self.z_index)
    }
}
