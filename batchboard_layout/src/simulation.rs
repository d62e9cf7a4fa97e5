// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Alpha-cooled force simulation over company nodes.

use crate::{BoundForce, ClusterForce, CollideForce, CompanyNode, Force, LayoutConfig};

/// A force simulation over one set of nodes.
///
/// Each [`tick`](Self::tick) moves alpha towards its target by `alpha_decay`, applies every
/// force in insertion order, then integrates positions with velocity decay. Pinned nodes
/// stay at their pin. The simulation has ended once alpha falls below `alpha_min`.
#[derive(Debug)]
pub struct Simulation {
    nodes: Vec<CompanyNode>,
    forces: Vec<Box<dyn Force>>,
    alpha: f64,
    alpha_min: f64,
    alpha_decay: f64,
    alpha_target: f64,
    velocity_decay: f64,
    ticks: usize,
}

impl Simulation {
    /// Creates a simulation without forces.
    pub fn new(nodes: Vec<CompanyNode>, config: &LayoutConfig) -> Self {
        Self {
            nodes,
            forces: Vec::new(),
            alpha: config.alpha,
            alpha_min: config.alpha_min,
            alpha_decay: config.alpha_decay,
            alpha_target: 0.0,
            velocity_decay: config.velocity_decay,
            ticks: 0,
        }
    }

    /// Creates a simulation with the cluster, collision, and bound forces, in that order.
    pub fn clustered(nodes: Vec<CompanyNode>, config: &LayoutConfig) -> Self {
        Self::new(nodes, config)
            .with_force(ClusterForce::new(config.cluster_strength))
            .with_force(CollideForce::from_config(config))
            .with_force(BoundForce::from_config(config))
    }

    /// Appends a force to the pipeline.
    pub fn with_force(mut self, force: impl Force + 'static) -> Self {
        self.forces.push(Box::new(force));
        self
    }

    /// Returns the nodes.
    pub fn nodes(&self) -> &[CompanyNode] {
        &self.nodes
    }

    /// Returns the nodes for editing (pins, drag positions).
    pub fn nodes_mut(&mut self) -> &mut [CompanyNode] {
        &mut self.nodes
    }

    /// Returns the current alpha.
    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Returns the number of ticks run so far.
    pub fn ticks(&self) -> usize {
        self.ticks
    }

    /// Sets the value alpha decays towards.
    pub fn set_alpha_target(&mut self, target: f64) {
        self.alpha_target = target;
    }

    /// Returns `true` once alpha has cooled below `alpha_min`.
    pub fn ended(&self) -> bool {
        self.alpha < self.alpha_min
    }

    /// Advances the simulation by one tick.
    pub fn tick(&mut self) {
        self.alpha += (self.alpha_target - self.alpha) * self.alpha_decay;
        for force in &mut self.forces {
            force.apply(&mut self.nodes, self.alpha);
        }
        let keep = 1.0 - self.velocity_decay;
        for node in &mut self.nodes {
            match node.pin {
                Some(pin) => {
                    node.position = pin;
                    node.velocity = kurbo::Vec2::ZERO;
                }
                None => {
                    node.velocity *= keep;
                    node.position += node.velocity;
                }
            }
        }
        for force in &mut self.forces {
            force.settle(&mut self.nodes);
        }
        self.ticks += 1;
    }

    /// Ticks until the simulation ends or `max_ticks` have run. Returns the ticks run.
    pub fn run(&mut self, max_ticks: usize) -> usize {
        let mut n = 0;
        while n < max_ticks && !self.ended() {
            self.tick();
            n += 1;
        }
        n
    }
}
