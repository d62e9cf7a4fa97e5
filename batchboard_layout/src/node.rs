// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Vec2};

/// One company bubble in the cluster layout.
#[derive(Clone, Debug, PartialEq)]
pub struct CompanyNode {
    /// Company name.
    pub company: String,
    /// Partner the company belongs to.
    pub partner: String,
    /// Index of the partner's cell.
    pub cluster: usize,
    /// Team size as reported in the partner file.
    pub team_size: u32,
    /// Bubble radius.
    pub radius: f64,
    /// Current center.
    pub position: Point,
    /// Current velocity.
    pub velocity: Vec2,
    /// Fixed position while dragged.
    pub pin: Option<Point>,
    /// Bounds of the partner's cell.
    pub cell: Rect,
}

impl CompanyNode {
    /// Creates a resting node at `position`.
    pub fn new(
        company: impl Into<String>,
        partner: impl Into<String>,
        cluster: usize,
        team_size: u32,
        radius: f64,
        position: Point,
        cell: Rect,
    ) -> Self {
        Self {
            company: company.into(),
            partner: partner.into(),
            cluster,
            team_size,
            radius,
            position,
            velocity: Vec2::ZERO,
            pin: None,
            cell,
        }
    }

    /// Returns `true` if `pt` lies inside the bubble.
    pub fn contains(&self, pt: Point) -> bool {
        self.position.distance_squared(pt) <= self.radius * self.radius
    }

    /// Tooltip text: name, team size, and partner on separate lines.
    pub fn tooltip_text(&self) -> String {
        format!(
            "{}\nTeam size: {}\nPartner: {}",
            self.company, self.team_size, self.partner
        )
    }
}
