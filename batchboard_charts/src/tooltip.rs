// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared tooltips.

use std::collections::BTreeMap;

use kurbo::{Point, Rect, Size};

/// Offset from the pointer to the tooltip's top-left corner.
pub const POINTER_OFFSET: (f64, f64) = (10.0, -10.0);

/// One tooltip's state.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Text lines.
    pub lines: Vec<String>,
    /// Top-left corner in viewport coordinates.
    pub origin: Point,
    /// Estimated box size.
    pub size: Size,
    /// Whether the tooltip is shown.
    pub visible: bool,
}

/// One tooltip per class name, shared by every chart that uses the class.
///
/// Showing a tooltip for a class that already exists reuses it, so at most one tooltip of a
/// class is ever visible.
#[derive(Clone, Debug, Default)]
pub struct TooltipRegistry {
    tooltips: BTreeMap<String, Tooltip>,
    font_size: f64,
    padding: f64,
}

impl TooltipRegistry {
    /// Creates an empty registry with 12px text and 8px padding.
    pub fn new() -> Self {
        Self {
            tooltips: BTreeMap::new(),
            font_size: 12.0,
            padding: 8.0,
        }
    }

    /// Shows the tooltip of `class` near `pointer`, kept inside `viewport`.
    ///
    /// `text` may contain several lines separated by `\n`.
    pub fn show(&mut self, class: &str, text: &str, pointer: Point, viewport: Rect) -> &Tooltip {
        let lines: Vec<String> = text.split('\n').map(str::to_owned).collect();
        let size = self.estimate_size(&lines);
        let origin = place(pointer, size, viewport);
        let tooltip = self
            .tooltips
            .entry(class.to_owned())
            .or_insert_with(|| Tooltip {
                lines: Vec::new(),
                origin,
                size,
                visible: false,
            });
        tooltip.lines = lines;
        tooltip.origin = origin;
        tooltip.size = size;
        tooltip.visible = true;
        tooltip
    }

    /// Hides the tooltip of `class`, if it exists.
    pub fn hide(&mut self, class: &str) {
        if let Some(t) = self.tooltips.get_mut(class) {
            t.visible = false;
        }
    }

    /// Returns the tooltip of `class`, if it was ever shown.
    pub fn get(&self, class: &str) -> Option<&Tooltip> {
        self.tooltips.get(class)
    }

    /// Returns the number of tooltip elements.
    pub fn len(&self) -> usize {
        self.tooltips.len()
    }

    /// Returns `true` if no tooltip was ever created.
    pub fn is_empty(&self) -> bool {
        self.tooltips.is_empty()
    }

    fn estimate_size(&self, lines: &[String]) -> Size {
        // Very rough heuristic: ~0.6em average glyph width, 1.2em line height.
        let font_size = if self.font_size > 0.0 { self.font_size } else { 12.0 };
        let widest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        Size::new(
            0.6 * font_size * widest as f64 + 2.0 * self.padding,
            1.2 * font_size * lines.len() as f64 + 2.0 * self.padding,
        )
    }
}

fn place(pointer: Point, size: Size, viewport: Rect) -> Point {
    let x = pointer.x + POINTER_OFFSET.0;
    let y = pointer.y + POINTER_OFFSET.1;
    let max_x = (viewport.x1 - size.width).max(viewport.x0);
    let max_y = (viewport.y1 - size.height).max(viewport.y0);
    Point::new(x.clamp(viewport.x0, max_x), y.clamp(viewport.y0, max_y))
}
