// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed palettes and the adjacent-distinct color assignment for stacked bands.

use batchboard_data::OTHER;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

use crate::ChartError;

/// The warm palette used by the category charts.
pub const ORANGE: [Color; 9] = [
    Color::from_rgb8(0xDC, 0x51, 0x0F),
    Color::from_rgb8(0xF5, 0xCF, 0xBD),
    Color::from_rgb8(0xEC, 0x90, 0x65),
    Color::from_rgb8(0xE9, 0x9C, 0x77),
    Color::from_rgb8(0xFC, 0x84, 0x4B),
    Color::from_rgb8(0xF6, 0x75, 0x37),
    Color::from_rgb8(0xDC, 0x51, 0x0E),
    Color::from_rgb8(0xFF, 0x5B, 0x0E),
    Color::from_rgb8(0xFB, 0xAF, 0x8B),
];

/// The wider palette used to tell partners apart in the bubble layout.
pub const PARTNERS: [Color; 15] = [
    Color::from_rgb8(0xFC, 0x84, 0x4B),
    Color::from_rgb8(0xDC, 0x51, 0x0F),
    Color::from_rgb8(0xF5, 0xCF, 0xBD),
    Color::from_rgb8(0xEC, 0x90, 0x65),
    Color::from_rgb8(0xE9, 0x9C, 0x77),
    Color::from_rgb8(0xF6, 0x75, 0x37),
    Color::from_rgb8(0xDC, 0x51, 0x0E),
    Color::from_rgb8(0xFF, 0x5B, 0x0E),
    Color::from_rgb8(0xFB, 0xAF, 0x8B),
    Color::from_rgb8(0x00, 0x00, 0x00),
    Color::from_rgb8(0x4A, 0x4A, 0x4A),
    Color::from_rgb8(0x2D, 0x2D, 0x2D),
    Color::from_rgb8(0x1B, 0x36, 0x5D),
    Color::from_rgb8(0x0A, 0x27, 0x44),
    Color::from_rgb8(0x0F, 0x3A, 0x66),
];

/// Parses CSS color strings (`#DC510F`, `rgb(...)`, named colors) into a palette.
pub fn parse_palette<S: AsRef<str>>(colors: &[S]) -> Result<Vec<Color>, ChartError> {
    colors
        .iter()
        .map(|s| {
            parse_color(s.as_ref())
                .map(|c| c.to_alpha_color::<Srgb>())
                .map_err(|_| ChartError::InvalidColor(s.as_ref().to_owned()))
        })
        .collect()
}

fn same(a: Color, b: Color) -> bool {
    a.to_rgba8() == b.to_rgba8()
}

/// Assigns one palette color per key of a stack order.
///
/// [`OTHER`] always receives `palette[0]`. Every other key takes the first palette entry
/// that is unused and differs from both stack neighbors; when no such entry remains the
/// key falls back to its position modulo the palette length, advanced past any neighbor
/// conflict. With at least three colors no two adjacent keys ever share a color.
pub fn assign_colors(order: &[String], palette: &[Color]) -> Result<Vec<Color>, ChartError> {
    if palette.len() < 3 {
        return Err(ChartError::PaletteTooSmall(palette.len()));
    }
    let other = palette[0];
    let mut used = vec![false; palette.len()];
    used[0] = true;

    let mut out: Vec<Color> = Vec::with_capacity(order.len());
    for (pos, key) in order.iter().enumerate() {
        if key == OTHER {
            out.push(other);
            continue;
        }
        let prev = out.last().copied();
        let next_is_other = order.get(pos + 1).is_some_and(|k| k == OTHER);
        let conflicts =
            |c: Color| prev.is_some_and(|p| same(p, c)) || (next_is_other && same(other, c));

        let free = (0..palette.len()).find(|&i| !used[i] && !conflicts(palette[i]));
        let index = free.unwrap_or_else(|| {
            let start = pos % palette.len();
            (0..palette.len())
                .map(|step| (start + step) % palette.len())
                .find(|&i| !conflicts(palette[i]))
                .unwrap_or(start)
        });
        used[index] = true;
        out.push(palette[index]);
    }
    Ok(out)
}
