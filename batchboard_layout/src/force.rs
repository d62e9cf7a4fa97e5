// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forces composed by a [`Simulation`](crate::Simulation).

use core::fmt::Debug;

use kurbo::{Rect, Vec2};

use crate::{CompanyNode, LayoutConfig, Quadtree};

/// One step of the force pipeline.
pub trait Force: Debug {
    /// Adjusts velocities or positions of `nodes` for the current `alpha`.
    fn apply(&mut self, nodes: &mut [CompanyNode], alpha: f64);

    /// Runs after positions are integrated. Hard constraints go here.
    fn settle(&mut self, _nodes: &mut [CompanyNode]) {}
}

/// Pulls every node towards the center of its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClusterForce {
    /// Pull per unit of alpha.
    pub strength: f64,
}

impl ClusterForce {
    /// Creates the force.
    pub fn new(strength: f64) -> Self {
        Self { strength }
    }
}

impl Force for ClusterForce {
    fn apply(&mut self, nodes: &mut [CompanyNode], alpha: f64) {
        let k = alpha * self.strength;
        for node in nodes {
            let target = node.cell.center();
            node.velocity += (target - node.position) * k;
        }
    }
}

/// Pushes overlapping nodes apart, looking up neighbors through a [`Quadtree`].
///
/// Two nodes overlap when their centers are closer than the sum of their radii plus
/// `padding`. A simulation only holds the nodes of one cell; the wider gap between cells
/// comes from [`BoundForce`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CollideForce {
    /// Extra separation between two nodes.
    pub padding: f64,
    /// Fraction of an overlap resolved per application.
    pub strength: f64,
}

impl CollideForce {
    /// Creates the force from the layout parameters.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            padding: config.same_cluster_padding,
            strength: config.collide_strength,
        }
    }
}

impl Force for CollideForce {
    fn apply(&mut self, nodes: &mut [CompanyNode], _alpha: f64) {
        let tree = Quadtree::from_points(nodes.iter().map(|n| n.position).enumerate());
        let max_radius = nodes.iter().map(|n| n.radius).fold(0.0, f64::max);

        for i in 0..nodes.len() {
            let reach = nodes[i].radius + max_radius + self.padding;
            let area = Rect::from_center_size(nodes[i].position, (2.0 * reach, 2.0 * reach));
            for j in tree.query(area) {
                if j == i {
                    continue;
                }
                let (a, b) = (&nodes[i], &nodes[j]);
                let min_distance = a.radius + b.radius + self.padding;
                let mut delta = a.position - b.position;
                let mut distance = delta.hypot();
                if distance >= min_distance {
                    continue;
                }
                if distance == 0.0 {
                    delta = jiggle(i, j);
                    distance = delta.hypot();
                }
                let shift = delta * ((distance - min_distance) / distance * self.strength);
                nodes[i].position -= shift;
                nodes[j].position += shift;
            }
        }
    }
}

// Deterministic tiny offset that separates coincident nodes, antisymmetric in `(i, j)`.
fn jiggle(i: usize, j: usize) -> Vec2 {
    let sign = if i < j { 1.0 } else { -1.0 };
    Vec2::new(sign * 1e-6, sign * 1e-6)
}

/// Keeps every node, its radius and `margin` inside its cell.
///
/// Cells tile the layout, so with `margin` at half the cross-cluster padding, nodes of two
/// different cells never come closer than their radii plus that padding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BoundForce {
    /// Gap kept between a node and its cell edge.
    pub margin: f64,
}

impl BoundForce {
    /// Creates the force with an explicit edge gap.
    pub fn new(margin: f64) -> Self {
        Self { margin }
    }

    /// Creates the force from the layout parameters.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self::new(config.cross_cluster_padding * 0.5)
    }

    fn clamp(&self, nodes: &mut [CompanyNode]) {
        for node in nodes {
            let inset = node.radius + self.margin;
            let cell = node.cell;
            // `max` after `min` so a cell smaller than the bubble pins it to the near edge.
            node.position.x = node.position.x.min(cell.x1 - inset).max(cell.x0 + inset);
            node.position.y = node.position.y.min(cell.y1 - inset).max(cell.y0 + inset);
        }
    }
}

impl Force for BoundForce {
    fn apply(&mut self, nodes: &mut [CompanyNode], _alpha: f64) {
        self.clamp(nodes);
    }

    fn settle(&mut self, nodes: &mut [CompanyNode]) {
        self.clamp(nodes);
    }
}
