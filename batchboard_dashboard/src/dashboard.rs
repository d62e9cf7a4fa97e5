// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The page shell: category charts and the partner layout behind one year range.

use core::time::Duration;

use batchboard_charts::{
    ChartError, ChartViewState, Dimensions, SelectionMachine, StackedAreaChart, TooltipRegistry,
};
use batchboard_core::{Group, GroupId, MarkDiff, Scene};
use batchboard_data::{BatchRecord, DataType, Dataset, PartnerDataset, YearRange};
use batchboard_layout::{ClusterLayout, LayoutConfig, ManualClock, NodeRef};
use kurbo::{Point, Rect};

use crate::{DashboardConfig, DashboardError, Debouncer, SvgScene};

/// Tooltip class of the partner bubbles.
pub const PARTNER_TOOLTIP: &str = "partner-tooltip";

const BUBBLES: GroupId = GroupId(1);

/// Whether the dashboard has anything to show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DashboardState {
    /// The charts show the selected range.
    Ready,
    /// No batch survived aggregation; the page shows its placeholder instead.
    Empty {
        /// Human-readable cause.
        reason: String,
    },
}

/// What one [`Dashboard::frame`] call did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Charts whose transition finished on this frame.
    pub finished: Vec<String>,
    /// Charts that failed on this frame.
    pub failed: Vec<String>,
    /// Mark diffs produced across every scene.
    pub diffs: usize,
    /// Whether the partner layout still has work queued.
    pub layout_running: bool,
}

#[derive(Debug)]
struct CategoryPanel {
    title: String,
    chart: StackedAreaChart,
    selection: SelectionMachine,
    scene: Scene,
    svg: SvgScene,
    error: Option<ChartError>,
}

impl CategoryPanel {
    fn id(&self) -> &str {
        self.chart.chart_id()
    }

    fn render(&mut self, dims: &Dimensions, records: &[BatchRecord], now: Duration) -> usize {
        self.error = None;
        let result = self
            .chart
            .update(&mut self.scene, dims, records, self.selection.state(), now);
        let diffs = self.absorb(result);
        // `previous` only lives as long as a running transition.
        if !self.chart.is_animating() {
            self.selection.settle();
        }
        diffs
    }

    fn absorb(&mut self, result: Result<Vec<MarkDiff>, ChartError>) -> usize {
        match result {
            Ok(diffs) => {
                self.mirror(&diffs);
                diffs.len()
            }
            Err(err) => {
                tracing::error!(chart = %self.id(), %err, "chart failed");
                self.error = Some(err);
                0
            }
        }
    }

    fn mirror(&mut self, diffs: &[MarkDiff]) {
        self.svg.sync_groups(&self.scene);
        self.svg.apply_diffs(diffs);
    }
}

#[derive(Debug)]
struct PartnerPanel {
    layout: Option<ClusterLayout>,
    scene: Scene,
    svg: SvgScene,
    drag: Option<NodeRef>,
}

impl PartnerPanel {
    fn new(frame: Rect) -> Result<Self, DashboardError> {
        let mut scene = Scene::new();
        scene
            .insert_group(BUBBLES, Group::new("partner-bubbles").with_clip(frame))
            .map_err(ChartError::from)?;
        let mut svg = SvgScene::new();
        svg.set_view_box(frame);
        svg.sync_groups(&scene);
        Ok(Self {
            layout: None,
            scene,
            svg,
            drag: None,
        })
    }

    fn render(&mut self) -> usize {
        let marks = self
            .layout
            .as_ref()
            .map(ClusterLayout::marks)
            .unwrap_or_default();
        match self.scene.tick_group(BUBBLES, marks) {
            Ok(diffs) => {
                self.svg.apply_diffs(&diffs);
                diffs.len()
            }
            Err(err) => {
                tracing::error!(%err, "partner bubbles failed to render");
                0
            }
        }
    }
}

/// The whole page: a year range feeding every category chart and the partner layout.
///
/// Each chart owns its scene and selection state. A chart that fails (for example because
/// of unusable dimensions) is logged and keeps its last good marks; the others carry on.
#[derive(Debug)]
pub struct Dashboard {
    config: DashboardConfig,
    dataset: Dataset,
    partner_data: PartnerDataset,
    layout_config: LayoutConfig,
    range: YearRange,
    records: Vec<BatchRecord>,
    state: DashboardState,
    dims: Dimensions,
    viewport: Rect,
    panels: Vec<CategoryPanel>,
    tooltips: TooltipRegistry,
    partners: PartnerPanel,
    resize: Debouncer<Dimensions>,
    scroll: Debouncer<(f64, f64)>,
    slider_visible: bool,
}

impl Dashboard {
    /// Builds every chart and the partner layout for the configured initial range.
    pub fn new(
        config: DashboardConfig,
        dataset: Dataset,
        partner_data: PartnerDataset,
    ) -> Result<Self, DashboardError> {
        let range = config.year_range()?;
        let chart_config = config.chart_config()?;
        let layout_config = config.layout_config()?;

        let mut panels: Vec<CategoryPanel> = Vec::with_capacity(config.charts.len());
        for panel in &config.charts {
            if panels.iter().any(|p| p.id() == panel.id) {
                return Err(DashboardError::Config(format!(
                    "duplicate chart id {:?}",
                    panel.id
                )));
            }
            panels.push(CategoryPanel {
                title: panel.title.clone(),
                chart: StackedAreaChart::new(panel.id.clone(), chart_config.clone())?,
                selection: SelectionMachine::new(panel.data_type),
                scene: Scene::new(),
                svg: SvgScene::new(),
                error: None,
            });
        }

        let mut dashboard = Self {
            dims: config.chart_dimensions(),
            viewport: config.viewport(),
            resize: Debouncer::new(config.debounce()),
            scroll: Debouncer::new(config.debounce()),
            partners: PartnerPanel::new(Rect::new(
                0.0,
                0.0,
                config.partner_width,
                config.partner_height,
            ))?,
            config,
            dataset,
            partner_data,
            layout_config,
            range,
            records: Vec::new(),
            state: DashboardState::Ready,
            panels,
            tooltips: TooltipRegistry::new(),
            slider_visible: false,
        };
        dashboard.reload(Duration::ZERO);
        Ok(dashboard)
    }

    /// Decodes the bundled data files and builds the dashboard.
    pub fn from_json(
        config: DashboardConfig,
        stats_json: &str,
        partners_json: &str,
    ) -> Result<Self, DashboardError> {
        Self::new(
            config,
            Dataset::from_json(stats_json)?,
            PartnerDataset::from_json(partners_json)?,
        )
    }

    /// Returns the configuration.
    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Returns whether there is data to show.
    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    /// Returns the selected year range.
    pub fn range(&self) -> YearRange {
        self.range
    }

    /// Returns the records of the selected range.
    pub fn records(&self) -> &[BatchRecord] {
        &self.records
    }

    /// Returns the current chart dimensions.
    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    /// Returns whether the year slider should be shown.
    pub fn slider_visible(&self) -> bool {
        self.slider_visible
    }

    /// Returns the chart ids, top to bottom.
    pub fn chart_ids(&self) -> Vec<&str> {
        self.panels.iter().map(CategoryPanel::id).collect()
    }

    /// Returns a chart.
    pub fn chart(&self, id: &str) -> Option<&StackedAreaChart> {
        self.panel(id).map(|p| &p.chart)
    }

    /// Returns the heading of a chart.
    pub fn chart_title(&self, id: &str) -> Option<&str> {
        self.panel(id).map(|p| p.title.as_str())
    }

    /// Returns the scene of a chart.
    pub fn chart_scene(&self, id: &str) -> Option<&Scene> {
        self.panel(id).map(|p| &p.scene)
    }

    /// Returns the view state of a chart.
    pub fn view_state(&self, id: &str) -> Option<&ChartViewState> {
        self.panel(id).map(|p| p.selection.state())
    }

    /// Returns the last failure of a chart, if its latest render failed.
    pub fn chart_error(&self, id: &str) -> Option<&ChartError> {
        self.panel(id).and_then(|p| p.error.as_ref())
    }

    /// Returns the partner layout, if one could be built.
    pub fn layout(&self) -> Option<&ClusterLayout> {
        self.partners.layout.as_ref()
    }

    /// Returns the partner scene.
    pub fn partner_scene(&self) -> &Scene {
        &self.partners.scene
    }

    /// Returns the shared tooltips.
    pub fn tooltips(&self) -> &TooltipRegistry {
        &self.tooltips
    }

    /// Returns `true` while any chart transition runs.
    pub fn is_animating(&self) -> bool {
        self.panels.iter().any(|p| p.chart.is_animating())
    }

    /// Replaces the year range, then re-aggregates and rebuilds every view.
    pub fn set_year_range(
        &mut self,
        start: i32,
        end: i32,
        now: Duration,
    ) -> Result<(), DashboardError> {
        self.range =
            YearRange::with_bounds(start, end, self.config.min_year, self.config.max_year)?;
        self.reload(now);
        Ok(())
    }

    /// Drags the first year of the range; the year is clamped.
    pub fn drag_start_year(&mut self, year: i32, now: Duration) {
        let before = self.range;
        self.range.drag_start(year);
        if self.range != before {
            self.reload(now);
        }
    }

    /// Drags the last year of the range; the year is clamped.
    pub fn drag_end_year(&mut self, year: i32, now: Duration) {
        let before = self.range;
        self.range.drag_end(year);
        if self.range != before {
            self.reload(now);
        }
    }

    /// Switches a chart between industries and tags, dropping its selection.
    pub fn toggle_data_type(
        &mut self,
        chart: &str,
        now: Duration,
    ) -> Result<DataType, DashboardError> {
        let i = self.panel_index(chart)?;
        let panel = &mut self.panels[i];
        let next = panel.selection.state().data_type.toggled();
        panel.selection.set_data_type(next);
        panel.chart.pointer_leave(&mut self.tooltips);
        panel.render(&self.dims, &self.records, now);
        Ok(next)
    }

    /// Routes a click on a chart. Returns the category whose selection was toggled.
    pub fn click(
        &mut self,
        chart: &str,
        pointer: Point,
        now: Duration,
    ) -> Result<Option<String>, DashboardError> {
        let i = self.panel_index(chart)?;
        let panel = &mut self.panels[i];
        let Some(category) = panel
            .chart
            .click(&panel.scene, pointer, &mut panel.selection)
        else {
            return Ok(None);
        };
        panel.render(&self.dims, &self.records, now);
        Ok(Some(category))
    }

    /// Toggles the selection of `category` as if it had been clicked.
    ///
    /// Returns `false` for [`OTHER`](batchboard_data::OTHER), which is never selectable.
    pub fn select(
        &mut self,
        chart: &str,
        category: &str,
        now: Duration,
    ) -> Result<bool, DashboardError> {
        let i = self.panel_index(chart)?;
        let panel = &mut self.panels[i];
        if !panel.selection.select(category) {
            return Ok(false);
        }
        panel.render(&self.dims, &self.records, now);
        Ok(true)
    }

    /// Routes pointer movement over a chart. Returns the hovered category.
    pub fn pointer_move(
        &mut self,
        chart: &str,
        pointer: Point,
    ) -> Result<Option<String>, DashboardError> {
        let i = self.panel_index(chart)?;
        let panel = &self.panels[i];
        Ok(panel
            .chart
            .pointer_move(&panel.scene, pointer, self.viewport, &mut self.tooltips))
    }

    /// The pointer left a chart.
    pub fn pointer_leave(&mut self, chart: &str) -> Result<(), DashboardError> {
        let i = self.panel_index(chart)?;
        self.panels[i].chart.pointer_leave(&mut self.tooltips);
        Ok(())
    }

    /// Routes a wheel event to a chart legend. It is applied on the next frame.
    pub fn wheel(&mut self, chart: &str, delta: f64) -> Result<(), DashboardError> {
        let i = self.panel_index(chart)?;
        self.panels[i].chart.wheel(delta);
        Ok(())
    }

    /// Shows the partner tooltip for the bubble under `pointer`, or hides it.
    pub fn partner_pointer_move(&mut self, pointer: Point) -> Option<String> {
        let text = self
            .partners
            .layout
            .as_ref()
            .and_then(|layout| layout.node_at(pointer).and_then(|n| layout.tooltip_text(n)));
        match &text {
            Some(text) => {
                let frame = self.partners.layout.as_ref().map_or(self.viewport, |l| {
                    l.bounds().inflate(self.config.partner_margin, self.config.partner_margin)
                });
                self.tooltips.show(PARTNER_TOOLTIP, text, pointer, frame);
            }
            None => self.tooltips.hide(PARTNER_TOOLTIP),
        }
        text
    }

    /// Starts dragging the bubble under `pointer`. Returns `false` if there is none.
    pub fn partner_drag_start(&mut self, pointer: Point, now: Duration) -> bool {
        let Some(layout) = self.partners.layout.as_mut() else {
            return false;
        };
        let Some(node) = layout.node_at(pointer) else {
            return false;
        };
        if !layout.drag_start(node, &ManualClock::new(now)) {
            return false;
        }
        self.partners.drag = Some(node);
        true
    }

    /// Moves the dragged bubble.
    pub fn partner_drag_move(&mut self, pointer: Point) {
        let Some(node) = self.partners.drag else {
            return;
        };
        if let Some(layout) = self.partners.layout.as_mut() {
            layout.drag_move(node, pointer);
            self.partners.render();
        }
    }

    /// Releases the dragged bubble.
    pub fn partner_drag_end(&mut self) {
        let Some(node) = self.partners.drag.take() else {
            return;
        };
        if let Some(layout) = self.partners.layout.as_mut() {
            layout.drag_end(node);
        }
    }

    /// Records a resize; the charts are re-rendered once resizing has been quiet.
    pub fn resize(&mut self, width: f64, height: f64, now: Duration) {
        let dims = Dimensions::new(width, height).with_margin(self.dims.margin);
        self.resize.trigger(dims, now);
    }

    /// Records the viewport-relative extent of the first chart after a scroll.
    ///
    /// Once scrolling has been quiet, the year slider is shown while that chart overlaps
    /// the viewport.
    pub fn scroll(&mut self, chart_top: f64, chart_bottom: f64, now: Duration) {
        self.scroll.trigger((chart_top, chart_bottom), now);
    }

    /// Advances debouncers, chart transitions, legend scrolling and the partner layout.
    ///
    /// Chart failures are logged and reported per chart; they never stop other charts.
    pub fn frame(&mut self, now: Duration) -> FrameReport {
        let mut report = FrameReport::default();

        if let Some(dims) = self.resize.poll(now) {
            self.dims = dims;
            tracing::debug!(width = dims.width, height = dims.height, "charts resized");
            for panel in &mut self.panels {
                report.diffs += panel.render(&self.dims, &self.records, now);
            }
        }
        if let Some((top, bottom)) = self.scroll.poll(now) {
            self.slider_visible = top <= self.viewport.height() && bottom >= 0.0;
        }

        for panel in &mut self.panels {
            match panel.chart.frame(&mut panel.scene, now) {
                Ok(out) => {
                    panel.mirror(&out.diffs);
                    report.diffs += out.diffs.len();
                    if out.finished {
                        panel.selection.settle();
                        report.diffs += panel.render(&self.dims, &self.records, now);
                        report.finished.push(panel.id().to_owned());
                    }
                }
                Err(err) => {
                    panel.absorb(Err(err));
                }
            }
            let scrolled = panel.chart.animation_frame(&mut panel.scene);
            report.diffs += panel.absorb(scrolled);
            if panel.error.is_some() {
                report.failed.push(panel.id().to_owned());
            }
        }

        let clock = ManualClock::new(now);
        let stepped = match self.partners.layout.as_mut() {
            Some(layout) if layout.is_running() => {
                layout.step(&clock);
                true
            }
            _ => false,
        };
        if stepped {
            report.diffs += self.partners.render();
        }
        report.layout_running = self
            .partners
            .layout
            .as_ref()
            .is_some_and(ClusterLayout::is_running);
        report
    }

    /// Tears every view down: charts leave their scenes, simulations stop, pending
    /// debounced events and tooltips are dropped.
    pub fn unmount(&mut self) {
        for panel in &mut self.panels {
            let diffs = panel.chart.unmount(&mut panel.scene);
            panel.selection.settle();
            panel.mirror(&diffs);
            panel.chart.pointer_leave(&mut self.tooltips);
        }
        if let Some(layout) = self.partners.layout.as_mut() {
            layout.stop();
        }
        self.partners.drag = None;
        self.tooltips.hide(PARTNER_TOOLTIP);
        self.resize.cancel();
        self.scroll.cancel();
        tracing::debug!(charts = self.panels.len(), "dashboard unmounted");
    }

    /// Serializes a chart as SVG.
    pub fn chart_svg(&self, chart: &str) -> Result<String, DashboardError> {
        let i = self.panel_index(chart)?;
        Ok(self.panels[i].svg.to_svg_string())
    }

    /// Serializes the partner bubbles as SVG.
    pub fn partner_svg(&self) -> String {
        self.partners.svg.to_svg_string()
    }

    fn reload(&mut self, now: Duration) {
        let (start, end) = (self.range.start(), self.range.end());
        self.records = match self.range.dates() {
            Some((first, last)) => self.dataset.aggregate(first, last),
            None => {
                tracing::error!(start, end, "year range has no calendar dates");
                Vec::new()
            }
        };
        self.state = if self.records.is_empty() {
            tracing::warn!(start, end, "no batches in the selected range");
            DashboardState::Empty {
                reason: format!("no batches between {start} and {end}"),
            }
        } else {
            DashboardState::Ready
        };
        tracing::info!(start, end, batches = self.records.len(), "year range applied");

        for panel in &mut self.panels {
            panel.render(&self.dims, &self.records, now);
        }
        self.rebuild_layout();
    }

    fn rebuild_layout(&mut self) {
        if let Some(old) = self.partners.layout.as_mut() {
            old.stop();
        }
        self.partners.drag = None;
        self.tooltips.hide(PARTNER_TOOLTIP);

        let partners = self.partner_data.partners_in_range(&self.range);
        self.partners.layout = match ClusterLayout::build(
            &partners,
            self.config.partner_bounds(),
            self.layout_config.clone(),
        ) {
            Ok(layout) => Some(layout),
            Err(err) => {
                tracing::error!(%err, "partner layout could not be built");
                None
            }
        };
        self.partners.render();
    }

    fn panel(&self, id: &str) -> Option<&CategoryPanel> {
        self.panels.iter().find(|p| p.id() == id)
    }

    fn panel_index(&self, id: &str) -> Result<usize, DashboardError> {
        self.panels
            .iter()
            .position(|p| p.id() == id)
            .ok_or_else(|| DashboardError::UnknownChart(id.to_owned()))
    }
}
