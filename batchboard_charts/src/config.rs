// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart configuration.

use core::time::Duration;

use peniko::Color;

use crate::{ChartError, Ease, LegendConfig, Margin, palette};

/// Options for one [`StackedAreaChart`](crate::StackedAreaChart).
#[derive(Clone, Debug, PartialEq)]
pub struct ChartConfig {
    /// Band colors; entry 0 is reserved for `Other`.
    pub palette: Vec<Color>,
    /// Duration of focus and unfocus transitions.
    pub transition: Duration,
    /// Easing of transitions.
    pub ease: Ease,
    /// Default margins for [`ChartConfig::dimensions`].
    pub margin: Margin,
    /// Band-scale padding (inner and outer).
    pub band_padding: f64,
    /// Catmull-Rom parameterization (`0.5` = centripetal).
    pub curve_alpha: f64,
    /// Batch count above which every other batch label is dropped.
    pub tick_thin_threshold: usize,
    /// Requested number of value ticks.
    pub y_tick_count: usize,
    /// Class of the shared tooltip.
    pub tooltip_class: String,
    /// Legend options.
    pub legend: LegendConfig,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            palette: palette::ORANGE.to_vec(),
            transition: Duration::from_millis(600),
            ease: Ease::CubicInOut,
            margin: Margin::default(),
            band_padding: 0.1,
            curve_alpha: 0.5,
            tick_thin_threshold: 30,
            y_tick_count: 10,
            tooltip_class: "area-tooltip".to_owned(),
            legend: LegendConfig::default(),
        }
    }
}

impl ChartConfig {
    /// Sets the palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the transition duration.
    pub fn with_transition(mut self, transition: Duration) -> Self {
        self.transition = transition;
        self
    }

    /// Sets the easing curve.
    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    /// Sets the default margins.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Sets the tooltip class.
    pub fn with_tooltip_class(mut self, class: impl Into<String>) -> Self {
        self.tooltip_class = class.into();
        self
    }

    /// Sets the legend options.
    pub fn with_legend(mut self, legend: LegendConfig) -> Self {
        self.legend = legend;
        self
    }

    /// Returns dimensions of the given outer size with this config's margins.
    pub fn dimensions(&self, width: f64, height: f64) -> crate::Dimensions {
        crate::Dimensions::new(width, height).with_margin(self.margin)
    }

    /// Checks options that cannot be fixed up later.
    pub fn validate(&self) -> Result<(), ChartError> {
        if self.palette.len() < 3 {
            return Err(ChartError::PaletteTooSmall(self.palette.len()));
        }
        Ok(())
    }
}
