// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cell grid and spiral seeding.

use core::f64::consts::TAU;

use kurbo::{Rect, Size, Vec2};

/// A near-square grid with one cell per partner: `cols = ceil(sqrt(n))`,
/// `rows = ceil(n / cols)`, cells filled row by row.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellGrid {
    bounds: Rect,
    cols: usize,
    rows: usize,
}

impl CellGrid {
    /// Lays out `count` cells over `bounds`.
    pub fn new(bounds: Rect, count: usize) -> Self {
        let mut cols = 0;
        while cols * cols < count {
            cols += 1;
        }
        let rows = if cols == 0 { 0 } else { count.div_ceil(cols) };
        Self { bounds, cols, rows }
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the size of one cell.
    pub fn cell_size(&self) -> Size {
        if self.cols == 0 {
            return Size::ZERO;
        }
        Size::new(
            self.bounds.width() / self.cols as f64,
            self.bounds.height() / self.rows as f64,
        )
    }

    /// Returns the rectangle of cell `index`.
    pub fn cell(&self, index: usize) -> Rect {
        if self.cols == 0 {
            return Rect::from_origin_size(self.bounds.origin(), Size::ZERO);
        }
        let size = self.cell_size();
        let col = (index % self.cols) as f64;
        let row = (index / self.cols) as f64;
        Rect::from_origin_size(
            (
                self.bounds.x0 + col * size.width,
                self.bounds.y0 + row * size.height,
            ),
            size,
        )
    }

    /// Spiral spacing used for seeding: 40% of the shorter cell side.
    pub fn spacing(&self) -> f64 {
        let size = self.cell_size();
        size.width.min(size.height) * 0.4
    }
}

/// Initial offset of node `index` out of `count` from its cell center.
///
/// Nodes are spread around a circle by index; the radius grows with `sqrt(index + 1)` and is
/// capped at `0.4 * spacing`.
pub fn spiral_offset(index: usize, count: usize, spacing: f64) -> Vec2 {
    if count == 0 {
        return Vec2::ZERO;
    }
    let n = count as f64;
    let j = index as f64;
    let angle = j / n * TAU;
    let radius = (spacing * 0.4).min((j + 1.0).sqrt() / n.sqrt() * spacing * 0.8);
    Vec2::from_angle(angle) * radius
}
