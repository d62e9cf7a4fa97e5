// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Path morphing between two outlines with different segment structure.

use kurbo::{BezPath, CubicBez, ParamCurve, PathEl, PathSeg};

/// Interpolates between two paths.
///
/// Both paths are converted to cubic segments; the one with fewer segments has its longest
/// segments split in half until the counts match. Control points are then interpolated
/// pairwise. Only the first subpath of each input is used.
#[derive(Clone, Debug, PartialEq)]
pub struct PathTween {
    from: Vec<CubicBez>,
    to: Vec<CubicBez>,
    target: BezPath,
    closed: bool,
}

impl PathTween {
    /// Prepares a tween from `from` to `to`.
    ///
    /// An empty `from` makes the tween jump straight to `to`.
    pub fn new(from: &BezPath, to: &BezPath) -> Self {
        let (mut a, _) = cubics(from);
        let (mut b, closed) = cubics(to);
        if a.is_empty() {
            a.clone_from(&b);
        }
        if b.is_empty() {
            b.clone_from(&a);
        }
        while a.len() < b.len() {
            split_longest(&mut a);
        }
        while b.len() < a.len() {
            split_longest(&mut b);
        }
        Self {
            from: a,
            to: b,
            target: to.clone(),
            closed,
        }
    }

    /// Returns the final path.
    pub fn target(&self) -> &BezPath {
        &self.target
    }

    /// Returns the interpolated path at `t` (`0` = start, `1` = target).
    pub fn at(&self, t: f64) -> BezPath {
        if t >= 1.0 {
            return self.target.clone();
        }
        let t = t.max(0.0);
        let mut path = BezPath::new();
        for (i, (a, b)) in self.from.iter().zip(&self.to).enumerate() {
            if i == 0 {
                path.move_to(a.p0.lerp(b.p0, t));
            }
            path.curve_to(a.p1.lerp(b.p1, t), a.p2.lerp(b.p2, t), a.p3.lerp(b.p3, t));
        }
        if self.closed && !self.from.is_empty() {
            path.close_path();
        }
        path
    }
}

fn cubics(path: &BezPath) -> (Vec<CubicBez>, bool) {
    let els = path.elements();
    let len = els
        .iter()
        .skip(1)
        .position(|el| matches!(el, PathEl::MoveTo(_)))
        .map_or(els.len(), |p| p + 1);
    let first = BezPath::from_vec(els[..len].to_vec());
    let closed = first.elements().iter().any(|el| matches!(el, PathEl::ClosePath));
    let segs = first
        .segments()
        .map(|seg| match seg {
            PathSeg::Line(l) => CubicBez::new(
                l.p0,
                l.p0.lerp(l.p1, 1.0 / 3.0),
                l.p0.lerp(l.p1, 2.0 / 3.0),
                l.p1,
            ),
            PathSeg::Quad(q) => q.raise(),
            PathSeg::Cubic(c) => c,
        })
        .collect();
    (segs, closed)
}

fn split_longest(segs: &mut Vec<CubicBez>) {
    let Some((index, _)) = segs
        .iter()
        .enumerate()
        .map(|(i, c)| (i, c.p0.distance(c.p3)))
        .max_by(|a, b| a.1.total_cmp(&b.1))
    else {
        return;
    };
    let (left, right) = segs[index].subdivide();
    segs[index] = left;
    segs.insert(index + 1, right);
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Shape};

    use super::*;

    fn square(x: f64, size: f64) -> BezPath {
        Rect::new(x, 0.0, x + size, size).to_path(0.1)
    }

    fn triangle() -> BezPath {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 0.0));
        p.line_to((5.0, 10.0));
        p.close_path();
        p
    }

    #[test]
    fn endpoints_match_inputs() {
        let tween = PathTween::new(&square(0.0, 10.0), &triangle());
        let start = tween.at(0.0);
        assert!((start.area() - square(0.0, 10.0).area()).abs() < 1e-9, "t=0 is the source");
        assert_eq!(tween.at(1.0), triangle());
        assert_eq!(tween.target(), &triangle());
    }

    #[test]
    fn segment_counts_are_equalized() {
        let tween = PathTween::new(&triangle(), &square(0.0, 10.0));
        let mid = tween.at(0.5);
        let curves = mid
            .elements()
            .iter()
            .filter(|el| matches!(el, PathEl::CurveTo(..)))
            .count();
        assert_eq!(curves, 4, "square has four sides");
        assert!(matches!(mid.elements().last(), Some(PathEl::ClosePath)));
    }

    #[test]
    fn midpoint_is_halfway() {
        let tween = PathTween::new(&square(0.0, 10.0), &square(20.0, 10.0));
        let mid = tween.at(0.5);
        let bb = mid.bounding_box();
        assert!((bb.x0 - 10.0).abs() < 1e-9 && (bb.x1 - 20.0).abs() < 1e-9, "{bb:?}");
        assert!(mid.contains(Point::new(15.0, 5.0)));
    }

    #[test]
    fn empty_source_jumps_to_target() {
        let tween = PathTween::new(&BezPath::new(), &triangle());
        assert!((tween.at(0.0).area() - triangle().area()).abs() < 1e-9);
    }
}
