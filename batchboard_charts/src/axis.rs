// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis and gridline mark generation for the category charts.
//!
//! The horizontal axis is a band axis over batch names; the vertical axis is a linear
//! percent axis with horizontal gridlines behind the plot.

use batchboard_core::{Mark, MarkId, TextAnchor, TextBaseline};
use batchboard_data::DataType;
use kurbo::{BezPath, Point};
use peniko::color::palette::css;
use peniko::{Brush, Color};

use crate::{ChartGeometry, Dimensions, z_order};

/// A paint + width pair for stroked paths (domain lines, ticks, gridlines).
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeStyle {
    /// Stroke paint.
    pub brush: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
}

impl StrokeStyle {
    /// Convenience for a solid stroke.
    pub fn solid(brush: impl Into<Brush>, stroke_width: f64) -> Self {
        Self {
            brush: brush.into(),
            stroke_width,
        }
    }
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self::solid(css::BLACK, 1.0)
    }
}

/// Axis styling defaults.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisStyle {
    /// Style for the axis domain line and tick marks.
    pub rule: StrokeStyle,
    /// Fill paint for tick labels.
    pub label_fill: Brush,
    /// Font size for tick labels.
    pub label_font_size: f64,
    /// Fill paint for axis titles.
    pub title_fill: Brush,
    /// Font size for axis titles.
    pub title_font_size: f64,
}

impl Default for AxisStyle {
    fn default() -> Self {
        let rule = StrokeStyle::default();
        Self {
            rule: rule.clone(),
            label_fill: rule.brush.clone(),
            label_font_size: 10.0,
            title_fill: rule.brush,
            title_font_size: 12.0,
        }
    }
}

/// Gridline styling.
#[derive(Clone, Debug, PartialEq)]
pub struct GridStyle {
    /// Stroke style for gridlines.
    pub stroke: StrokeStyle,
}

impl Default for GridStyle {
    fn default() -> Self {
        Self {
            stroke: StrokeStyle {
                brush: Brush::Solid(css::BLACK.with_alpha(40.0 / 255.0)),
                stroke_width: 1.0,
            },
        }
    }
}

/// Title of the value axis.
pub fn y_title(data_type: DataType, focused: Option<&str>) -> String {
    match focused {
        Some(category) => format!("% of Companies in {category}"),
        None => format!("Distribution Among {}", data_type.label()),
    }
}

/// Formats a percent tick (`"20%"`, `"2.5%"`).
pub fn percent_label(v: f64) -> String {
    if v.fract() == 0.0 {
        format!("{v:.0}%")
    } else {
        format!("{v}%")
    }
}

/// Returns the batch indices that get a tick and label.
///
/// Above `threshold` batches every other batch is dropped.
pub fn visible_batches(count: usize, threshold: usize) -> Vec<usize> {
    if count > threshold {
        (0..count).step_by(2).collect()
    } else {
        (0..count).collect()
    }
}

/// Axes for one category chart.
#[derive(Clone, Debug)]
pub struct Axes {
    /// Stable-id base; marks derive their ids from it and a role key.
    pub id_base: u64,
    /// Rules, labels, and titles.
    pub style: AxisStyle,
    /// Horizontal gridlines.
    pub grid: GridStyle,
    /// Requested number of value ticks.
    pub tick_count: usize,
    /// Batch count above which every other batch label is dropped.
    pub thin_threshold: usize,
    /// Rotation of batch labels, in degrees.
    pub label_angle: f64,
    /// Length of tick marks.
    pub tick_size: f64,
}

impl Axes {
    /// Creates axes with default styling.
    pub fn new(id_base: u64) -> Self {
        Self {
            id_base,
            style: AxisStyle::default(),
            grid: GridStyle::default(),
            tick_count: 10,
            thin_threshold: 30,
            label_angle: -45.0,
            tick_size: 6.0,
        }
    }

    /// Sets the axis style.
    pub fn with_style(mut self, style: AxisStyle) -> Self {
        self.style = style;
        self
    }

    /// Sets the gridline style.
    pub fn with_grid(mut self, grid: GridStyle) -> Self {
        self.grid = grid;
        self
    }

    /// Sets the requested value tick count.
    pub fn with_tick_count(mut self, tick_count: usize) -> Self {
        self.tick_count = tick_count;
        self
    }

    /// Sets the label thinning threshold.
    pub fn with_thin_threshold(mut self, thin_threshold: usize) -> Self {
        self.thin_threshold = thin_threshold;
        self
    }

    fn id(&self, role: &str) -> MarkId {
        MarkId::for_key(self.id_base, role)
    }

    /// Horizontal gridlines at every value tick.
    pub fn grid_marks(&self, geo: &ChartGeometry) -> Vec<Mark> {
        geo.y
            .ticks(self.tick_count)
            .into_iter()
            .map(|v| {
                let y = geo.y.map(v);
                self.rule(
                    &format!("grid:{v}"),
                    Point::new(geo.plot.x0, y),
                    Point::new(geo.plot.x1, y),
                    &self.grid.stroke,
                    z_order::GRID_LINES,
                )
            })
            .collect()
    }

    /// Domain lines, ticks, labels, and titles of both axes.
    pub fn marks(&self, geo: &ChartGeometry, dims: &Dimensions, y_title: &str) -> Vec<Mark> {
        let plot = geo.plot;
        let mut out = Vec::new();

        // Bottom band axis.
        out.push(self.rule(
            "x-domain",
            Point::new(plot.x0, plot.y1),
            Point::new(plot.x1, plot.y1),
            &self.style.rule,
            z_order::AXIS_RULES,
        ));
        for i in visible_batches(geo.names.len(), self.thin_threshold) {
            let name = &geo.names[i];
            let x = geo.x.center(i);
            out.push(self.rule(
                &format!("x-tick:{name}"),
                Point::new(x, plot.y1),
                Point::new(x, plot.y1 + self.tick_size),
                &self.style.rule,
                z_order::AXIS_RULES,
            ));
            out.push(
                Mark::text(
                    self.id(&format!("x-label:{name}")),
                    (x, plot.y1 + self.tick_size + 3.0),
                    name.clone(),
                )
                .with_font_size(self.style.label_font_size)
                .with_anchor(TextAnchor::End, TextBaseline::Middle)
                .with_angle(self.label_angle)
                .with_fill(self.style.label_fill.clone())
                .with_z_index(z_order::AXIS_LABELS),
            );
        }
        out.push(
            Mark::text(
                self.id("x-title"),
                ((plot.x0 + plot.x1) * 0.5, dims.height - 5.0),
                "Batch",
            )
            .with_font_size(self.style.title_font_size)
            .with_anchor(TextAnchor::Middle, TextBaseline::Alphabetic)
            .with_fill(self.style.title_fill.clone())
            .with_z_index(z_order::AXIS_TITLES),
        );

        // Left percent axis.
        out.push(self.rule(
            "y-domain",
            Point::new(plot.x0, plot.y0),
            Point::new(plot.x0, plot.y1),
            &self.style.rule,
            z_order::AXIS_RULES,
        ));
        for v in geo.y.ticks(self.tick_count) {
            let y = geo.y.map(v);
            out.push(self.rule(
                &format!("y-tick:{v}"),
                Point::new(plot.x0 - self.tick_size, y),
                Point::new(plot.x0, y),
                &self.style.rule,
                z_order::AXIS_RULES,
            ));
            out.push(
                Mark::text(
                    self.id(&format!("y-label:{v}")),
                    (plot.x0 - self.tick_size - 3.0, y),
                    percent_label(v),
                )
                .with_font_size(self.style.label_font_size)
                .with_anchor(TextAnchor::End, TextBaseline::Middle)
                .with_fill(self.style.label_fill.clone())
                .with_z_index(z_order::AXIS_LABELS),
            );
        }
        out.push(
            Mark::text(
                self.id("y-title"),
                (
                    plot.x0 - dims.margin.left + self.style.title_font_size,
                    (plot.y0 + plot.y1) * 0.5,
                ),
                y_title,
            )
            .with_font_size(self.style.title_font_size)
            .with_anchor(TextAnchor::Middle, TextBaseline::Middle)
            .with_angle(-90.0)
            .with_fill(self.style.title_fill.clone())
            .with_z_index(z_order::AXIS_TITLES),
        );
        out
    }

    fn rule(&self, role: &str, a: Point, b: Point, stroke: &StrokeStyle, z_index: i32) -> Mark {
        let mut path = BezPath::new();
        path.move_to(a);
        path.line_to(b);
        Mark::path(self.id(role), path)
            .with_fill(Color::TRANSPARENT)
            .with_stroke(stroke.brush.clone(), stroke.stroke_width)
            .with_z_index(z_index)
    }
}

#[cfg(test)]
mod tests {
    use batchboard_core::MarkPayload;
    use batchboard_data::{BatchRecord, BatchStats};

    use super::*;

    fn geometry(batches: usize) -> (ChartGeometry, Dimensions) {
        let records: Vec<BatchRecord> = (0..batches)
            .map(|i| {
                let code = format!("W{:02}", i % 100).parse().unwrap();
                BatchRecord::from_stats(code, &BatchStats::default())
            })
            .collect();
        let dims = Dimensions::new(900.0, 400.0);
        let geo = ChartGeometry::build(&records, &dims, DataType::Industries, None, 0.1).unwrap();
        (geo, dims)
    }

    fn texts(marks: &[Mark]) -> Vec<String> {
        marks
            .iter()
            .filter_map(|m| match &m.payload {
                MarkPayload::Text(t) => Some(t.text.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn titles_follow_the_view() {
        assert_eq!(y_title(DataType::Tags, None), "Distribution Among Tags");
        assert_eq!(
            y_title(DataType::Industries, Some("FinTech")),
            "% of Companies in FinTech"
        );
        assert_eq!(percent_label(20.0), "20%");
        assert_eq!(percent_label(2.5), "2.5%");
    }

    #[test]
    fn percent_axis_labels_run_zero_to_hundred() {
        let (geo, dims) = geometry(4);
        let labels = texts(&Axes::new(7).marks(&geo, &dims, "t"));
        assert!(labels.contains(&"0%".to_owned()));
        assert!(labels.contains(&"100%".to_owned()));
        assert!(labels.contains(&"Batch".to_owned()));
        assert_eq!(Axes::new(7).grid_marks(&geo).len(), 11, "0, 10, ..., 100");
    }

    #[test]
    fn dense_batch_axes_drop_every_other_label() {
        assert_eq!(visible_batches(4, 30), [0, 1, 2, 3]);
        assert_eq!(visible_batches(31, 30).len(), 16);

        let (geo, dims) = geometry(40);
        let labels = texts(&Axes::new(7).marks(&geo, &dims, "t"));
        assert!(labels.contains(&"W00".to_owned()));
        assert!(!labels.contains(&"W01".to_owned()), "odd batches are thinned");
    }
}
