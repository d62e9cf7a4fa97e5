// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dashboard configuration, loadable from JSON.

use core::time::Duration;

use batchboard_charts::{ChartConfig, Dimensions, parse_palette};
use batchboard_data::{DataType, YearRange};
use batchboard_layout::LayoutConfig;
use kurbo::{Rect, Size};
use serde::Deserialize;

use crate::DashboardError;

/// One category chart on the page.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    /// Chart id; also used to route events.
    pub id: String,
    /// Heading shown above the chart.
    pub title: String,
    /// Category family shown first.
    #[serde(default)]
    pub data_type: DataType,
}

impl PanelConfig {
    /// Creates a panel.
    pub fn new(id: impl Into<String>, title: impl Into<String>, data_type: DataType) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            data_type,
        }
    }
}

/// Options of a [`Dashboard`](crate::Dashboard).
///
/// Every field has a default, so `{}` is a valid configuration file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Lowest selectable year.
    pub min_year: i32,
    /// Highest selectable year.
    pub max_year: i32,
    /// Initial first year.
    pub start_year: i32,
    /// Initial last year.
    pub end_year: i32,
    /// Outer width of each category chart.
    pub chart_width: f64,
    /// Outer height of each category chart.
    pub chart_height: f64,
    /// Page viewport size, used to clamp tooltips.
    pub viewport_width: f64,
    /// Page viewport height.
    pub viewport_height: f64,
    /// Width of the partner layout.
    pub partner_width: f64,
    /// Height of the partner layout.
    pub partner_height: f64,
    /// Inset of the partner grid inside its box.
    pub partner_margin: f64,
    /// Category band colors as CSS strings; the built-in palette when absent.
    pub category_palette: Option<Vec<String>>,
    /// Partner colors as CSS strings; the built-in palette when absent.
    pub partner_palette: Option<Vec<String>>,
    /// Focus/unfocus transition length in milliseconds.
    pub transition_ms: u64,
    /// Quiet period of the scroll and resize debouncers in milliseconds.
    pub debounce_ms: u64,
    /// Category charts, top to bottom.
    pub charts: Vec<PanelConfig>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            min_year: YearRange::MIN_YEAR,
            max_year: YearRange::MAX_YEAR,
            start_year: YearRange::MIN_YEAR,
            end_year: YearRange::MAX_YEAR,
            chart_width: 500.0,
            chart_height: 400.0,
            viewport_width: 1280.0,
            viewport_height: 800.0,
            partner_width: 1200.0,
            partner_height: 600.0,
            partner_margin: 40.0,
            category_palette: None,
            partner_palette: None,
            transition_ms: 600,
            debounce_ms: 100,
            charts: vec![
                PanelConfig::new(
                    "industries",
                    "Industry Distribution Over Time",
                    DataType::Industries,
                ),
                PanelConfig::new("tags", "Tags Distribution Over Time", DataType::Tags),
            ],
        }
    }
}

impl DashboardConfig {
    /// Decodes a configuration from JSON text.
    pub fn from_json(json: &str) -> Result<Self, DashboardError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Sets the chart size.
    pub fn with_chart_size(mut self, width: f64, height: f64) -> Self {
        self.chart_width = width;
        self.chart_height = height;
        self
    }

    /// Sets the transition length.
    pub fn with_transition_ms(mut self, transition_ms: u64) -> Self {
        self.transition_ms = transition_ms;
        self
    }

    /// Returns the initial year range.
    pub fn year_range(&self) -> Result<YearRange, DashboardError> {
        Ok(YearRange::with_bounds(
            self.start_year,
            self.end_year,
            self.min_year,
            self.max_year,
        )?)
    }

    /// Builds the options shared by every category chart.
    pub fn chart_config(&self) -> Result<ChartConfig, DashboardError> {
        let mut config =
            ChartConfig::default().with_transition(Duration::from_millis(self.transition_ms));
        if let Some(colors) = &self.category_palette {
            config = config.with_palette(parse_palette(colors)?);
        }
        Ok(config)
    }

    /// Builds the partner layout options.
    pub fn layout_config(&self) -> Result<LayoutConfig, DashboardError> {
        let mut config = LayoutConfig::default();
        if let Some(colors) = &self.partner_palette {
            config = config.with_palette(parse_palette(colors)?);
        }
        config.validate()?;
        Ok(config)
    }

    /// Returns the category chart dimensions.
    pub fn chart_dimensions(&self) -> Dimensions {
        Dimensions::new(self.chart_width, self.chart_height)
    }

    /// Returns the page viewport.
    pub fn viewport(&self) -> Rect {
        Rect::from_origin_size((0.0, 0.0), Size::new(self.viewport_width, self.viewport_height))
    }

    /// Returns the area the partner cells are laid out in.
    pub fn partner_bounds(&self) -> Rect {
        Rect::new(0.0, 0.0, self.partner_width, self.partner_height).inset(-self.partner_margin)
    }

    /// Returns the debounce quiet period.
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
