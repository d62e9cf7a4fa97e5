// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Partner bubbles arranged as a grid of independently simulated clusters.

use std::collections::VecDeque;

use batchboard_charts::LegendItem;
use batchboard_core::{Mark, MarkId};
use batchboard_data::Partner;
use kurbo::{Circle, Point, Rect, Shape};
use peniko::Color;
use smallvec::SmallVec;

use crate::{CellGrid, Clock, CompanyNode, LayoutConfig, LayoutError, Simulation, spiral_offset};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// Identifies one node: its cell and its index inside the cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeRef {
    /// Cell (partner) index.
    pub cell: usize,
    /// Node index within the cell.
    pub index: usize,
}

/// Scheduling state of one cell simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CellStatus {
    /// Waiting for a free slot.
    Pending,
    /// Ticking since the given clock time.
    Running(core::time::Duration),
    /// Converged, out of budget, or stopped.
    Done,
}

#[derive(Debug)]
struct Cell {
    partner: String,
    rect: Rect,
    color: Color,
    sim: Simulation,
    status: CellStatus,
}

/// Company bubbles grouped by partner, one grid cell per partner.
///
/// Every cell runs its own [`Simulation`]. [`step`](Self::step) advances at most
/// `concurrency` cells at a time; a cell leaves the running set when its simulation ends
/// or when it has run for `cell_budget`, whichever comes first.
#[derive(Debug)]
pub struct ClusterLayout {
    config: LayoutConfig,
    bounds: Rect,
    id_base: u64,
    cells: Vec<Cell>,
    queue: VecDeque<usize>,
    active: SmallVec<[usize; 2]>,
    stopped: bool,
}

impl ClusterLayout {
    /// Seeds one cell per partner (in the given order) and queues every cell simulation.
    pub fn build(
        partners: &[Partner],
        bounds: Rect,
        config: LayoutConfig,
    ) -> Result<Self, LayoutError> {
        if !(bounds.is_finite() && bounds.width() > 0.0 && bounds.height() > 0.0) {
            return Err(LayoutError::InvalidBounds {
                width: bounds.width(),
                height: bounds.height(),
            });
        }
        config.validate()?;

        let grid = CellGrid::new(bounds, partners.len());
        let spacing = grid.spacing();
        let cells: Vec<Cell> = partners
            .iter()
            .enumerate()
            .map(|(cluster, partner)| {
                let rect = grid.cell(cluster);
                let center = rect.center();
                let count = partner.companies.len();
                let nodes = partner
                    .companies
                    .iter()
                    .enumerate()
                    .map(|(j, company)| {
                        CompanyNode::new(
                            company.company_name.clone(),
                            partner.name.clone(),
                            cluster,
                            company.team_size,
                            f64::from(company.team_size).sqrt() * config.radius_scale,
                            center + spiral_offset(j, count, spacing),
                            rect,
                        )
                    })
                    .collect();
                Cell {
                    partner: partner.name.clone(),
                    rect,
                    color: config.palette[cluster % config.palette.len()],
                    sim: Simulation::clustered(nodes, &config),
                    status: CellStatus::Pending,
                }
            })
            .collect();

        tracing::info!(
            partners = cells.len(),
            companies = cells.iter().map(|c| c.sim.nodes().len()).sum::<usize>(),
            cols = grid.cols(),
            rows = grid.rows(),
            "cluster layout built"
        );
        Ok(Self {
            id_base: MarkId::for_key(0, "partner-bubbles").0,
            queue: (0..cells.len()).collect(),
            config,
            bounds,
            cells,
            active: SmallVec::new(),
            stopped: false,
        })
    }

    /// Returns the layout bounds.
    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Returns the number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Returns the rectangle of a cell.
    pub fn cell_rect(&self, cell: usize) -> Option<Rect> {
        self.cells.get(cell).map(|c| c.rect)
    }

    /// Returns the scheduling state of a cell.
    pub fn cell_status(&self, cell: usize) -> Option<CellStatus> {
        self.cells.get(cell).map(|c| c.status)
    }

    /// Returns the cells currently ticking.
    pub fn running_cells(&self) -> &[usize] {
        &self.active
    }

    /// Returns `true` while any cell is running or queued.
    pub fn is_running(&self) -> bool {
        !self.stopped && (!self.active.is_empty() || !self.queue.is_empty())
    }

    /// Returns a node.
    pub fn node(&self, node: NodeRef) -> Option<&CompanyNode> {
        self.cells.get(node.cell)?.sim.nodes().get(node.index)
    }

    /// Iterates over every node.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeRef, &CompanyNode)> + '_ {
        self.cells.iter().enumerate().flat_map(|(cell, c)| {
            c.sim
                .nodes()
                .iter()
                .enumerate()
                .map(move |(index, n)| (NodeRef { cell, index }, n))
        })
    }

    /// Fills free slots from the queue and ticks every running cell once.
    ///
    /// Returns `true` while work remains.
    pub fn step(&mut self, clock: &dyn Clock) -> bool {
        if self.stopped {
            return false;
        }
        let now = clock.now();
        while self.active.len() < self.config.concurrency {
            let Some(cell) = self.queue.pop_front() else {
                break;
            };
            self.cells[cell].status = CellStatus::Running(now);
            self.active.push(cell);
        }

        let budget = self.config.cell_budget;
        for &index in &self.active {
            let cell = &mut self.cells[index];
            let CellStatus::Running(started) = cell.status else {
                continue;
            };
            if now.saturating_sub(started) >= budget {
                cell.status = CellStatus::Done;
                tracing::debug!(
                    partner = %cell.partner,
                    ticks = cell.sim.ticks(),
                    "cell simulation hit its time budget"
                );
                continue;
            }
            cell.sim.tick();
            if cell.sim.ended() {
                cell.status = CellStatus::Done;
                tracing::debug!(
                    partner = %cell.partner,
                    ticks = cell.sim.ticks(),
                    "cell simulation converged"
                );
            }
        }
        let cells = &self.cells;
        self.active
            .retain(|index| cells[*index].status != CellStatus::Done);
        self.is_running()
    }

    /// Steps until every cell is done.
    ///
    /// With a clock that never advances, a cell held warm by a drag never finishes.
    pub fn run(&mut self, clock: &dyn Clock) {
        while self.step(clock) {}
    }

    /// Stops every simulation. Later steps do nothing.
    pub fn stop(&mut self) {
        if self.stopped {
            return;
        }
        self.stopped = true;
        self.queue.clear();
        self.active.clear();
        for cell in &mut self.cells {
            cell.status = CellStatus::Done;
        }
        tracing::debug!(cells = self.cells.len(), "cluster layout stopped");
    }

    /// Returns the topmost node under `pt`.
    pub fn node_at(&self, pt: Point) -> Option<NodeRef> {
        self.nodes()
            .filter(|(_, n)| n.contains(pt))
            .last()
            .map(|(r, _)| r)
    }

    /// Pins a node where it is and warms up its cell. Returns `false` if nothing happened.
    pub fn drag_start(&mut self, node: NodeRef, clock: &dyn Clock) -> bool {
        if self.stopped {
            return false;
        }
        let target = self.config.drag_alpha_target;
        let Some(n) = self.node_mut(node) else {
            return false;
        };
        n.pin = Some(n.position);
        self.cells[node.cell].sim.set_alpha_target(target);
        self.wake(node.cell, clock);
        true
    }

    /// Moves a dragged node.
    pub fn drag_move(&mut self, node: NodeRef, pt: Point) {
        if let Some(n) = self.node_mut(node) {
            n.pin = Some(pt);
            n.position = pt;
        }
    }

    /// Releases a dragged node back into the simulation, which then cools down again.
    pub fn drag_end(&mut self, node: NodeRef) {
        if let Some(n) = self.node_mut(node) {
            n.pin = None;
            self.cells[node.cell].sim.set_alpha_target(0.0);
        }
    }

    /// Tooltip text for a node.
    pub fn tooltip_text(&self, node: NodeRef) -> Option<String> {
        self.node(node).map(CompanyNode::tooltip_text)
    }

    /// Partners shown in the layout with their colors, in cell order.
    pub fn active_partners(&self) -> Vec<LegendItem> {
        self.cells
            .iter()
            .map(|c| LegendItem::new(c.partner.clone(), c.color))
            .collect()
    }

    /// One circle mark per node, filled with its partner color.
    pub fn marks(&self) -> Vec<Mark> {
        let opacity = self.config.bubble_opacity;
        self.nodes()
            .map(|(r, n)| {
                let circle = Circle::new(n.position, n.radius);
                Mark::path(self.node_id(r), circle.path_elements(CIRCLE_TOLERANCE).collect())
                    .with_fill(self.cells[r.cell].color)
                    .with_opacity(opacity)
                    .with_key(n.company.clone())
            })
            .collect()
    }

    /// Returns the mark id of a node.
    pub fn node_id(&self, node: NodeRef) -> MarkId {
        let partner = self
            .cells
            .get(node.cell)
            .map_or("", |c| c.partner.as_str());
        MarkId::for_key(self.id_base, &format!("{partner}#{}", node.index))
    }

    fn node_mut(&mut self, node: NodeRef) -> Option<&mut CompanyNode> {
        self.cells
            .get_mut(node.cell)?
            .sim
            .nodes_mut()
            .get_mut(node.index)
    }

    fn wake(&mut self, cell: usize, clock: &dyn Clock) {
        match self.cells[cell].status {
            CellStatus::Running(_) => {
                self.cells[cell].status = CellStatus::Running(clock.now());
            }
            CellStatus::Done => {
                self.cells[cell].status = CellStatus::Pending;
                self.queue.push_front(cell);
            }
            CellStatus::Pending => {}
        }
    }
}
