// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend mark generation and legend scrolling.
//!
//! The legend is a vertical list of color swatches with labels, one row per category, in
//! a fixed-height viewport. Rows are clickable (they carry the category as mark key) and
//! dim when another category is focused.

use batchboard_core::{Mark, MarkId, TextAnchor, TextBaseline};
use kurbo::{Point, Rect};
use peniko::Color;
use peniko::color::palette::css;

use crate::z_order;

/// Legend sizing and scrolling parameters.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendConfig {
    /// Height of one row.
    pub item_height: f64,
    /// Height of the visible viewport.
    pub viewport_height: f64,
    /// Legend width.
    pub width: f64,
    /// Horizontal gap between the chart's outer box and the legend.
    pub gap: f64,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Label font size.
    pub font_size: f64,
    /// Multiplier applied to wheel deltas.
    pub scroll_factor: f64,
    /// Opacity of rows that are not focused while another row is.
    pub dimmed_opacity: f64,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            item_height: 31.0,
            viewport_height: 500.0,
            width: 220.0,
            gap: 20.0,
            swatch_size: 18.0,
            font_size: 14.0,
            scroll_factor: 2.0,
            dimmed_opacity: 0.2,
        }
    }
}

impl LegendConfig {
    /// Sets the row height.
    pub fn with_item_height(mut self, item_height: f64) -> Self {
        self.item_height = item_height;
        self
    }

    /// Sets the viewport height.
    pub fn with_viewport_height(mut self, viewport_height: f64) -> Self {
        self.viewport_height = viewport_height;
        self
    }

    /// Sets the wheel multiplier.
    pub fn with_scroll_factor(mut self, scroll_factor: f64) -> Self {
        self.scroll_factor = scroll_factor;
        self
    }
}

/// A legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendItem {
    /// Category key shown as the label.
    pub label: String,
    /// Swatch color.
    pub fill: Color,
}

impl LegendItem {
    /// Convenience constructor.
    pub fn new(label: impl Into<String>, fill: Color) -> Self {
        Self {
            label: label.into(),
            fill,
        }
    }
}

/// Scroll position of a legend viewport.
///
/// Wheel events only record a pending delta; [`LegendScroll::on_animation_frame`] applies
/// it. A wheel event arriving before the frame replaces the pending one, so at most one
/// scroll step (the latest) is applied per frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LegendScroll {
    offset: f64,
    max: f64,
    pending: Option<f64>,
}

impl LegendScroll {
    /// Returns the scroll offset in `[0, max_scroll]`.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Returns the largest valid offset.
    pub fn max_scroll(&self) -> f64 {
        self.max
    }

    /// Returns `true` if a frame callback is pending.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Updates the scrollable extent and re-clamps the offset.
    pub fn set_extent(&mut self, content_height: f64, viewport_height: f64) {
        self.max = (content_height - viewport_height).max(0.0);
        self.offset = self.offset.clamp(0.0, self.max);
    }

    /// Records a wheel event, replacing any delta not yet applied.
    pub fn wheel(&mut self, delta: f64) {
        if delta.is_finite() {
            self.pending = Some(delta);
        }
    }

    /// Applies the pending delta. Returns `true` if the offset changed.
    pub fn on_animation_frame(&mut self) -> bool {
        let Some(delta) = self.pending.take() else {
            return false;
        };
        let next = (self.offset + delta).clamp(0.0, self.max);
        let changed = next != self.offset;
        self.offset = next;
        changed
    }

    /// Drops the pending delta.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

/// A scrollable, focus-aware legend.
#[derive(Clone, Debug)]
pub struct Legend {
    /// Stable-id base.
    pub id_base: u64,
    /// Sizing and scrolling parameters.
    pub config: LegendConfig,
    origin: Point,
    items: Vec<LegendItem>,
    focused: Option<String>,
    scroll: LegendScroll,
}

impl Legend {
    /// Creates an empty legend at `origin`.
    pub fn new(id_base: u64, config: LegendConfig, origin: Point) -> Self {
        Self {
            id_base,
            config,
            origin,
            items: Vec::new(),
            focused: None,
            scroll: LegendScroll::default(),
        }
    }

    /// Moves the legend.
    pub fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    /// Replaces the rows and the focused category.
    pub fn set_items(&mut self, items: Vec<LegendItem>, focused: Option<String>) {
        self.items = items;
        self.focused = focused;
        let content = self.config.item_height * self.items.len() as f64;
        self.scroll.set_extent(content, self.config.viewport_height);
    }

    /// Returns the rows.
    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    /// Returns the scroll state.
    pub fn scroll(&self) -> &LegendScroll {
        &self.scroll
    }

    /// Records a wheel event (scaled by the scroll factor).
    pub fn wheel(&mut self, delta: f64) {
        self.scroll.wheel(delta * self.config.scroll_factor);
    }

    /// Applies a pending wheel event. Returns `true` if the legend moved.
    pub fn on_animation_frame(&mut self) -> bool {
        self.scroll.on_animation_frame()
    }

    /// Cancels a pending wheel event.
    pub fn cancel_scroll(&mut self) {
        self.scroll.cancel();
    }

    /// Returns the visible viewport (used as the legend group clip).
    pub fn viewport(&self) -> Rect {
        Rect::from_origin_size(
            self.origin,
            (self.config.width, self.config.viewport_height),
        )
    }

    /// Returns the id of the clickable row for `label`.
    pub fn row_id(&self, label: &str) -> MarkId {
        MarkId::for_key(self.id_base, &format!("row:{label}"))
    }

    /// Returns the id of the color swatch for `label`.
    pub fn swatch_id(&self, label: &str) -> MarkId {
        MarkId::for_key(self.id_base, &format!("swatch:{label}"))
    }

    /// Generates a row hit area, a swatch, and a label per item.
    pub fn marks(&self) -> Vec<Mark> {
        let cfg = &self.config;
        let mut out = Vec::with_capacity(self.items.len() * 3);
        for (i, item) in self.items.iter().enumerate() {
            let y = self.origin.y + i as f64 * cfg.item_height - self.scroll.offset;
            let dimmed = self
                .focused
                .as_deref()
                .is_some_and(|f| f != item.label);
            let opacity = if dimmed { cfg.dimmed_opacity } else { 1.0 };
            let label_fill = if dimmed { css::GRAY } else { css::BLACK };

            let row = Rect::new(self.origin.x, y, self.origin.x + cfg.width, y + cfg.item_height);
            out.push(
                Mark::rect(self.row_id(&item.label), row)
                    .with_fill(Color::TRANSPARENT)
                    .with_key(item.label.clone())
                    .with_z_index(z_order::LEGEND_SWATCHES - 1),
            );

            let swatch_y = y + (cfg.item_height - cfg.swatch_size) * 0.5;
            out.push(
                Mark::rect(
                    self.swatch_id(&item.label),
                    Rect::new(
                        self.origin.x,
                        swatch_y,
                        self.origin.x + cfg.swatch_size,
                        swatch_y + cfg.swatch_size,
                    ),
                )
                .with_fill(item.fill)
                .with_opacity(opacity)
                .with_key(item.label.clone())
                .with_z_index(z_order::LEGEND_SWATCHES),
            );

            out.push(
                Mark::text(
                    MarkId::for_key(self.id_base, &format!("label:{}", item.label)),
                    (
                        self.origin.x + cfg.swatch_size + 8.0,
                        y + cfg.item_height * 0.5,
                    ),
                    item.label.clone(),
                )
                .with_font_size(cfg.font_size)
                .with_anchor(TextAnchor::Start, TextBaseline::Middle)
                .with_fill(label_fill)
                .with_z_index(z_order::LEGEND_LABELS),
            );
        }
        out
    }
}
