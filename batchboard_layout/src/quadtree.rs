// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A point quadtree over node indices.

use kurbo::{Point, Rect};
use smallvec::SmallVec;

const LEAF_CAPACITY: usize = 8;
const MAX_DEPTH: u8 = 16;

#[derive(Clone, Debug)]
struct QuadNode {
    bounds: Rect,
    depth: u8,
    items: SmallVec<[(usize, Point); LEAF_CAPACITY]>,
    children: Option<[usize; 4]>,
}

impl QuadNode {
    fn leaf(bounds: Rect, depth: u8) -> Self {
        Self {
            bounds,
            depth,
            items: SmallVec::new(),
            children: None,
        }
    }
}

/// Bucketed point quadtree storing `(index, point)` pairs.
///
/// Leaves split once they hold more than eight points, down to a fixed depth; coincident
/// points beyond that depth share a leaf.
#[derive(Clone, Debug)]
pub struct Quadtree {
    nodes: Vec<QuadNode>,
    len: usize,
}

impl Quadtree {
    /// Creates an empty tree covering `bounds` (inclusive on every side).
    pub fn new(bounds: Rect) -> Self {
        Self {
            nodes: vec![QuadNode::leaf(bounds.abs(), 0)],
            len: 0,
        }
    }

    /// Builds a tree covering every finite point. Non-finite points are skipped.
    pub fn from_points(points: impl IntoIterator<Item = (usize, Point)>) -> Self {
        let points: Vec<(usize, Point)> = points
            .into_iter()
            .filter(|(_, p)| p.is_finite())
            .collect();
        let mut bounds: Option<Rect> = None;
        for (_, p) in &points {
            bounds = Some(bounds.map_or(Rect::from_points(*p, *p), |b| b.union_pt(*p)));
        }
        let bounds = bounds.unwrap_or(Rect::ZERO);
        let side = bounds.width().max(bounds.height()).max(1.0);
        let mut tree = Self::new(Rect::from_origin_size(bounds.origin(), (side, side)));
        for (index, p) in points {
            tree.insert(index, p);
        }
        tree
    }

    /// Returns the covered area.
    pub fn bounds(&self) -> Rect {
        self.nodes[0].bounds
    }

    /// Returns the number of stored points.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no point is stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Inserts a point. Returns `false` (and stores nothing) if it lies outside the bounds.
    pub fn insert(&mut self, index: usize, point: Point) -> bool {
        if !contains(self.bounds(), point) {
            return false;
        }
        let mut at = 0;
        while let Some(children) = self.nodes[at].children {
            at = children[quadrant(self.nodes[at].bounds, point)];
        }
        self.nodes[at].items.push((index, point));
        self.len += 1;
        self.split_if_full(at);
        true
    }

    /// Returns the indices of all points inside `area` (inclusive).
    pub fn query(&self, area: Rect) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![0_usize];
        while let Some(at) = stack.pop() {
            let node = &self.nodes[at];
            if !overlaps(node.bounds, area) {
                continue;
            }
            match node.children {
                Some(children) => stack.extend(children),
                None => out.extend(
                    node.items
                        .iter()
                        .filter(|(_, p)| contains(area, *p))
                        .map(|(i, _)| *i),
                ),
            }
        }
        out
    }

    fn split_if_full(&mut self, at: usize) {
        let node = &self.nodes[at];
        if node.items.len() <= LEAF_CAPACITY || node.depth >= MAX_DEPTH {
            return;
        }
        let bounds = node.bounds;
        let depth = node.depth + 1;
        let mid = bounds.center();
        let first = self.nodes.len();
        for rect in [
            Rect::new(bounds.x0, bounds.y0, mid.x, mid.y),
            Rect::new(mid.x, bounds.y0, bounds.x1, mid.y),
            Rect::new(bounds.x0, mid.y, mid.x, bounds.y1),
            Rect::new(mid.x, mid.y, bounds.x1, bounds.y1),
        ] {
            self.nodes.push(QuadNode::leaf(rect, depth));
        }
        let children = [first, first + 1, first + 2, first + 3];
        let items = core::mem::take(&mut self.nodes[at].items);
        self.nodes[at].children = Some(children);
        for (index, point) in items {
            self.nodes[children[quadrant(bounds, point)]]
                .items
                .push((index, point));
        }
        for child in children {
            self.split_if_full(child);
        }
    }
}

fn quadrant(bounds: Rect, p: Point) -> usize {
    let mid = bounds.center();
    usize::from(p.x >= mid.x) + 2 * usize::from(p.y >= mid.y)
}

fn contains(r: Rect, p: Point) -> bool {
    p.x >= r.x0 && p.x <= r.x1 && p.y >= r.y0 && p.y <= r.y1
}

fn overlaps(a: Rect, b: Rect) -> bool {
    a.x0 <= b.x1 && b.x0 <= a.x1 && a.y0 <= b.y1 && b.y0 <= a.y1
}
