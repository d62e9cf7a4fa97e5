// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use batchboard_charts::PARTNERS;
use peniko::Color;

use crate::LayoutError;

/// Physics and scheduling parameters of a [`ClusterLayout`](crate::ClusterLayout).
#[derive(Clone, Debug, PartialEq)]
pub struct LayoutConfig {
    /// Starting alpha of every cell simulation.
    pub alpha: f64,
    /// Fraction of the distance to `alpha_target` covered per tick.
    pub alpha_decay: f64,
    /// A simulation ends once alpha drops below this.
    pub alpha_min: f64,
    /// Fraction of velocity lost per tick.
    pub velocity_decay: f64,
    /// Alpha target held while a node is dragged.
    pub drag_alpha_target: f64,
    /// Pull towards the cell center, scaled by alpha.
    pub cluster_strength: f64,
    /// Extra separation between nodes of the same cell.
    pub same_cluster_padding: f64,
    /// Extra separation between nodes of different cells; each node keeps half of it
    /// from its cell edge.
    pub cross_cluster_padding: f64,
    /// Fraction of an overlap resolved per tick.
    pub collide_strength: f64,
    /// `radius = sqrt(team_size) * radius_scale`.
    pub radius_scale: f64,
    /// Wall-clock budget of one cell simulation.
    pub cell_budget: Duration,
    /// Number of cell simulations running at once.
    pub concurrency: usize,
    /// Bubble opacity.
    pub bubble_opacity: f64,
    /// Partner colors, cycled by partner index.
    pub palette: Vec<Color>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            alpha: 0.5,
            alpha_decay: 0.2,
            alpha_min: 0.001,
            velocity_decay: 0.6,
            drag_alpha_target: 0.3,
            cluster_strength: 0.2,
            same_cluster_padding: 2.0,
            cross_cluster_padding: 4.0,
            collide_strength: 0.3,
            radius_scale: 0.5,
            cell_budget: Duration::from_secs(5),
            concurrency: 2,
            bubble_opacity: 0.7,
            palette: PARTNERS.to_vec(),
        }
    }
}

impl LayoutConfig {
    /// Sets the per-cell wall-clock budget.
    pub fn with_cell_budget(mut self, budget: Duration) -> Self {
        self.cell_budget = budget;
        self
    }

    /// Sets how many cells simulate at once.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency;
        self
    }

    /// Sets the partner palette.
    pub fn with_palette(mut self, palette: Vec<Color>) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the radius scale.
    pub fn with_radius_scale(mut self, radius_scale: f64) -> Self {
        self.radius_scale = radius_scale;
        self
    }

    /// Checks value ranges.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.concurrency == 0 {
            return Err(LayoutError::InvalidConfig("concurrency must be at least 1"));
        }
        if self.palette.is_empty() {
            return Err(LayoutError::InvalidConfig("palette is empty"));
        }
        if !(f64::MIN_POSITIVE..=1.0).contains(&self.alpha_decay) {
            return Err(LayoutError::InvalidConfig("alpha_decay must be in (0, 1]"));
        }
        if !(0.0..=1.0).contains(&self.velocity_decay) {
            return Err(LayoutError::InvalidConfig("velocity_decay must be in [0, 1]"));
        }
        let padding = [self.same_cluster_padding, self.cross_cluster_padding];
        if !padding.iter().all(|p| p.is_finite() && *p >= 0.0) {
            return Err(LayoutError::InvalidConfig("paddings must be finite and non-negative"));
        }
        if !(self.alpha_min.is_finite() && self.alpha_min > 0.0)
            || !(self.radius_scale.is_finite() && self.radius_scale >= 0.0)
        {
            return Err(LayoutError::InvalidConfig(
                "alpha_min must be positive and radius_scale finite",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert_eq!(LayoutConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_zero_concurrency_and_empty_palettes() {
        let zero = LayoutConfig::default().with_concurrency(0);
        assert!(matches!(zero.validate(), Err(LayoutError::InvalidConfig(_))));
        let empty = LayoutConfig::default().with_palette(Vec::new());
        assert!(matches!(empty.validate(), Err(LayoutError::InvalidConfig(_))));
    }
}
