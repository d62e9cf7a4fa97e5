// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart dimensions and their validation.

use kurbo::Rect;

use crate::ChartError;

/// Space reserved around the plot area for axes and titles.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Margin {
    /// Top margin.
    pub top: f64,
    /// Right margin.
    pub right: f64,
    /// Bottom margin (batch labels and the x title).
    pub bottom: f64,
    /// Left margin (percent labels and the y title).
    pub left: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            top: 20.0,
            right: 0.0,
            bottom: 60.0,
            left: 60.0,
        }
    }
}

/// Outer size of one chart plus its margins.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Dimensions {
    /// Outer width.
    pub width: f64,
    /// Outer height.
    pub height: f64,
    /// Margins inside the outer box.
    pub margin: Margin,
}

impl Dimensions {
    /// Creates dimensions with the default margins.
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            margin: Margin::default(),
        }
    }

    /// Sets the margins.
    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    /// Checks that every field is finite and non-negative and that the plot area is not empty.
    pub fn validate(&self) -> Result<(), ChartError> {
        let fields = [
            ("width", self.width),
            ("height", self.height),
            ("margin.top", self.margin.top),
            ("margin.right", self.margin.right),
            ("margin.bottom", self.margin.bottom),
            ("margin.left", self.margin.left),
        ];
        for (field, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ChartError::InvalidDimension { field, value });
            }
        }
        let plot = self.unchecked_plot_rect();
        if plot.width() <= 0.0 || plot.height() <= 0.0 {
            return Err(ChartError::EmptyPlotArea {
                width: self.width - self.margin.left - self.margin.right,
                height: self.height - self.margin.top - self.margin.bottom,
            });
        }
        Ok(())
    }

    /// Returns the plot area in scene coordinates.
    pub fn plot_rect(&self) -> Result<Rect, ChartError> {
        self.validate()?;
        Ok(self.unchecked_plot_rect())
    }

    /// Returns the outer box in scene coordinates.
    pub fn outer_rect(&self) -> Rect {
        Rect::new(0.0, 0.0, self.width, self.height)
    }

    fn unchecked_plot_rect(&self) -> Rect {
        Rect::new(
            self.margin.left,
            self.margin.top,
            (self.width - self.margin.right).max(self.margin.left),
            (self.height - self.margin.bottom).max(self.margin.top),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_rect_deducts_margins() {
        let plot = Dimensions::new(800.0, 400.0).plot_rect().unwrap();
        assert_eq!(plot, Rect::new(60.0, 20.0, 800.0, 340.0));
    }

    #[test]
    fn non_numeric_or_negative_fields_are_rejected() {
        assert!(matches!(
            Dimensions::new(f64::NAN, 400.0).validate(),
            Err(ChartError::InvalidDimension { field: "width", .. })
        ));
        let mut dims = Dimensions::new(800.0, 400.0);
        dims.margin.left = -1.0;
        assert!(matches!(
            dims.validate(),
            Err(ChartError::InvalidDimension {
                field: "margin.left",
                ..
            })
        ));
        assert!(matches!(
            Dimensions::new(50.0, 400.0).validate(),
            Err(ChartError::EmptyPlotArea { .. })
        ));
    }
}
