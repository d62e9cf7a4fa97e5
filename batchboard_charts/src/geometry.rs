// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Positional and value scales for one chart frame.

use batchboard_data::{BatchRecord, DataType};
use kurbo::{Point, Rect};

use crate::{ChartError, Dimensions, ScaleBand, ScaleLinear};

/// Upper bound of the value axis in stacked mode.
pub const STACKED_MAX: f64 = 100.0;

/// Returns the value-axis domain for a view.
///
/// Stacked views use `[0, 100]`. A focused view uses `[0, ceil(1.1 * max)]` over the
/// category's share of companies per batch, with a floor of 1 so an all-zero category
/// still gets a usable axis.
pub fn y_domain(records: &[BatchRecord], data_type: DataType, focused: Option<&str>) -> (f64, f64) {
    let Some(category) = focused else {
        return (0.0, STACKED_MAX);
    };
    let max = records
        .iter()
        .map(|r| r.company_share(data_type, category))
        .fold(0.0, f64::max);
    // Snap before `ceil` so 10 * 1.1 = 11.000000000000002 stays 11.
    let padded = ((max * 1.1) * 1e9).round() / 1e9;
    (0.0, padded.ceil().max(1.0))
}

/// Scales derived from the records, dimensions, and view of one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct ChartGeometry {
    /// Plot area in scene coordinates.
    pub plot: Rect,
    /// Batch positions, in record order.
    pub x: ScaleBand,
    /// Percentages to vertical pixels (0 at the plot bottom).
    pub y: ScaleLinear,
    /// Batch names, in record order.
    pub names: Vec<String>,
}

impl ChartGeometry {
    /// Builds the scales. Fails only on invalid dimensions; empty `records` yield a
    /// degenerate band scale that callers skip drawing with.
    pub fn build(
        records: &[BatchRecord],
        dims: &Dimensions,
        data_type: DataType,
        focused: Option<&str>,
        band_padding: f64,
    ) -> Result<Self, ChartError> {
        let plot = dims.plot_rect()?;
        let x = ScaleBand::new((plot.x0, plot.x1), records.len())
            .with_padding(band_padding, band_padding);
        let y = ScaleLinear::new(y_domain(records, data_type, focused), (plot.y1, plot.y0));
        Ok(Self {
            plot,
            x,
            y,
            names: records.iter().map(|r| r.name().to_owned()).collect(),
        })
    }

    /// Returns `true` if there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Maps per-batch `(y0, y1)` values to the top and bottom outlines of an area.
    ///
    /// Points sit at band centers. A single batch spans its whole band so the area keeps a
    /// visible width.
    pub fn outline(&self, values: &[(f64, f64)]) -> (Vec<Point>, Vec<Point>) {
        if let [(y0, y1)] = values {
            let x0 = self.x.x(0);
            let x1 = x0 + self.x.band_width();
            let (top, bottom) = (self.y.map(*y1), self.y.map(*y0));
            return (
                vec![Point::new(x0, top), Point::new(x1, top)],
                vec![Point::new(x0, bottom), Point::new(x1, bottom)],
            );
        }
        values
            .iter()
            .enumerate()
            .map(|(i, (y0, y1))| {
                let x = self.x.center(i);
                (Point::new(x, self.y.map(*y1)), Point::new(x, self.y.map(*y0)))
            })
            .unzip()
    }
}
