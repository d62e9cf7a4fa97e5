// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Force-directed cluster layout for partner companies.
//!
//! Partners are laid out on a near-square grid, one cell each. Company bubbles (radius from
//! team size) are seeded on a spiral around their cell center and relaxed by a small force
//! pipeline:
//! - [`ClusterForce`] pulls towards the cell center,
//! - [`CollideForce`] separates overlapping bubbles using a [`Quadtree`],
//! - [`BoundForce`] keeps bubbles inside their cell, clear of the neighboring cells.
//!
//! [`ClusterLayout`] owns one [`Simulation`] per cell and schedules them cooperatively:
//! at most `concurrency` cells tick at once, each bounded by a wall-clock budget read from
//! a [`Clock`].

mod clock;
mod cluster_layout;
mod config;
mod error;
mod force;
mod grid;
mod node;
mod quadtree;
mod simulation;

pub use clock::{Clock, ManualClock, SystemClock};
pub use cluster_layout::{CellStatus, ClusterLayout, NodeRef};
pub use config::LayoutConfig;
pub use error::LayoutError;
pub use force::{BoundForce, ClusterForce, CollideForce, Force};
pub use grid::{CellGrid, spiral_offset};
pub use node::CompanyNode;
pub use quadtree::Quadtree;
pub use simulation::Simulation;
