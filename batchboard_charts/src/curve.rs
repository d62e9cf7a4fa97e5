// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Catmull-Rom area outlines.
//!
//! Curves use the parameterized Catmull-Rom spline (Yuksel et al.), converted segment by
//! segment to cubic Béziers. `alpha = 0.5` is the centripetal variant, which never forms
//! cusps or self-intersections within a segment.

use kurbo::{BezPath, Point, Vec2};

const EPSILON: f64 = 1e-12;

/// Appends a Catmull-Rom curve through `points` to `path`.
///
/// `path` must already be positioned at `points[0]`. End segments reuse the endpoint as
/// the missing neighbor, which makes them leave and arrive along the chord.
pub fn catmull_rom_to(path: &mut BezPath, points: &[Point], alpha: f64) {
    let n = points.len();
    for i in 0..n.saturating_sub(1) {
        let p0 = points[i.saturating_sub(1)];
        let p1 = points[i];
        let p2 = points[i + 1];
        let p3 = points[(i + 2).min(n - 1)];

        let d01 = (p1 - p0).hypot();
        let d12 = (p2 - p1).hypot();
        let d23 = (p3 - p2).hypot();
        let (l01_a, l01_2a) = (d01.powf(alpha), d01.powf(2.0 * alpha));
        let (l12_a, l12_2a) = (d12.powf(alpha), d12.powf(2.0 * alpha));
        let (l23_a, l23_2a) = (d23.powf(alpha), d23.powf(2.0 * alpha));

        let c1 = if l01_a > EPSILON {
            let a = 2.0 * l01_2a + 3.0 * l01_a * l12_a + l12_2a;
            let m = 3.0 * l01_a * (l01_a + l12_a);
            scaled_sum(p1.to_vec2() * a - p0.to_vec2() * l12_2a + p2.to_vec2() * l01_2a, m)
        } else {
            p1
        };
        let c2 = if l23_a > EPSILON {
            let b = 2.0 * l23_2a + 3.0 * l23_a * l12_a + l12_2a;
            let m = 3.0 * l23_a * (l23_a + l12_a);
            scaled_sum(p2.to_vec2() * b + p1.to_vec2() * l23_2a - p3.to_vec2() * l12_2a, m)
        } else {
            p2
        };
        path.curve_to(c1, c2, p2);
    }
}

fn scaled_sum(v: Vec2, m: f64) -> Point {
    (v / m).to_point()
}

/// Builds a closed area between a top and a bottom outline (both ordered left to right).
///
/// The path runs along `top` left to right, drops to the last bottom point, runs along
/// `bottom` right to left, and closes. Both outlines are smoothed with the same `alpha`.
/// Empty input yields an empty path.
pub fn area_path(top: &[Point], bottom: &[Point], alpha: f64) -> BezPath {
    let mut path = BezPath::new();
    let (Some(&first), Some(&last_bottom)) = (top.first(), bottom.last()) else {
        return path;
    };
    path.move_to(first);
    catmull_rom_to(&mut path, top, alpha);
    path.line_to(last_bottom);
    let reversed: Vec<Point> = bottom.iter().rev().copied().collect();
    catmull_rom_to(&mut path, &reversed, alpha);
    path.close_path();
    path
}
