// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The stacked-area category chart.
//!
//! A chart owns five scene groups (root, grid, areas, axes, legend). `update` describes the
//! target view; bands then either snap to it or morph towards it over the configured
//! duration, advanced by `frame(now)`:
//!
//! - **Focus** (`selected` set): every other band, including a previously focused one, fades
//!   out; the selected band morphs from the displayed outline of `previous` (or of itself)
//!   to its own full-height area.
//! - **Unfocus** (`selected` cleared, `previous` set): the `previous` band morphs from the
//!   focused outline back into the stack; the other bands appear in place at once.
//! - **Immediate** (neither set): all bands snap to the new stack.
//!
//! Calling `update` again with an unchanged target leaves a running transition alone.

use core::time::Duration;

use batchboard_core::{Group, GroupId, Mark, MarkDiff, MarkId, Scene};
use batchboard_data::{BatchRecord, CategorySet, OTHER};
use hashbrown::HashMap;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;

use crate::{
    Axes, CategoryObserver, ChartConfig, ChartError, ChartGeometry, ChartViewState, Dimensions,
    Legend, LegendItem, PathTween, StackLayout, StackedAreaMarkSpec, TooltipRegistry, Transition,
    area_path, assign_colors, y_title, z_order,
};

/// Scene groups owned by one chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChartGroups {
    /// Marker group; its presence means the chart is initialized.
    pub root: GroupId,
    /// Horizontal gridlines.
    pub grid: GroupId,
    /// Area bands, clipped to the plot.
    pub areas: GroupId,
    /// Axis rules, labels, and titles.
    pub axes: GroupId,
    /// Legend rows, clipped to the legend viewport.
    pub legend: GroupId,
}

impl ChartGroups {
    /// Derives the group ids for a chart id.
    pub fn for_chart(chart_id: &str) -> Self {
        let base = MarkId::for_key(0, chart_id).0 & !0xF;
        Self {
            root: GroupId(base),
            grid: GroupId(base + 1),
            areas: GroupId(base + 2),
            axes: GroupId(base + 3),
            legend: GroupId(base + 4),
        }
    }

    /// Returns every group id, root first.
    pub fn all(&self) -> [GroupId; 5] {
        [self.root, self.grid, self.areas, self.axes, self.legend]
    }
}

/// Result of advancing a chart by one animation frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameOutput {
    /// Scene changes produced by the frame.
    pub diffs: Vec<MarkDiff>,
    /// `true` on the frame that completes a transition.
    pub finished: bool,
}

#[derive(Clone, Debug)]
enum Motion {
    Still,
    Morph(PathTween),
    FadeOut { from_opacity: f64 },
}

#[derive(Clone, Debug)]
struct Band {
    key: String,
    color: Color,
    z_index: i32,
    // Final outline, or the frozen outline of a band that is fading out.
    path: BezPath,
    motion: Motion,
}

impl Band {
    fn is_leaving(&self) -> bool {
        matches!(self.motion, Motion::FadeOut { .. })
    }

    fn path_at(&self, t: f64) -> BezPath {
        match &self.motion {
            Motion::Morph(tween) => tween.at(t),
            _ => self.path.clone(),
        }
    }

    fn opacity_at(&self, t: f64) -> f64 {
        match self.motion {
            Motion::FadeOut { from_opacity } => from_opacity * (1.0 - t),
            _ => 1.0,
        }
    }

    fn morph_from(mut self, from: &BezPath) -> Self {
        self.motion = Motion::Morph(PathTween::new(from, &self.path));
        self
    }

    fn fading(&self, t: f64) -> Self {
        Self {
            key: self.key.clone(),
            color: self.color,
            z_index: self.z_index,
            path: self.path_at(t),
            motion: Motion::FadeOut {
                from_opacity: self.opacity_at(t),
            },
        }
    }

    fn same_target(&self, other: &Self) -> bool {
        self.key == other.key
            && self.path == other.path
            && self.color.to_rgba8() == other.color.to_rgba8()
    }
}

enum Shape {
    Immediate,
    Focus { source: String },
    Unfocus { previous: String },
}

fn z_for(index: usize) -> i32 {
    z_order::SERIES_FILL.saturating_add(i32::try_from(index).unwrap_or(i32::MAX))
}

/// A stacked-area chart with category focus transitions.
#[derive(Debug)]
pub struct StackedAreaChart {
    chart_id: String,
    config: ChartConfig,
    groups: ChartGroups,
    area_base: u64,
    axes: Axes,
    legend: Legend,
    bands: Vec<Band>,
    transition: Option<Transition>,
    clickable: HashMap<MarkId, String>,
}

impl StackedAreaChart {
    /// Creates a chart. Fails if the palette cannot keep adjacent bands apart.
    pub fn new(chart_id: impl Into<String>, config: ChartConfig) -> Result<Self, ChartError> {
        config.validate()?;
        let chart_id = chart_id.into();
        let groups = ChartGroups::for_chart(&chart_id);
        let base = groups.root.0;
        let axes = Axes::new(MarkId::for_key(base, "axes").0)
            .with_tick_count(config.y_tick_count)
            .with_thin_threshold(config.tick_thin_threshold);
        let legend = Legend::new(
            MarkId::for_key(base, "legend").0,
            config.legend.clone(),
            Point::ZERO,
        );
        Ok(Self {
            chart_id,
            area_base: MarkId::for_key(base, "areas").0,
            config,
            groups,
            axes,
            legend,
            bands: Vec::new(),
            transition: None,
            clickable: HashMap::new(),
        })
    }

    /// Returns the chart id.
    pub fn chart_id(&self) -> &str {
        &self.chart_id
    }

    /// Returns the chart's scene groups.
    pub fn groups(&self) -> ChartGroups {
        self.groups
    }

    /// Returns the configuration.
    pub fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Returns the legend.
    pub fn legend(&self) -> &Legend {
        &self.legend
    }

    /// Returns `true` if the chart's structure exists in `scene`.
    pub fn is_initialized(&self, scene: &Scene) -> bool {
        scene.has_group(self.groups.root)
    }

    /// Returns `true` while a transition is running.
    pub fn is_animating(&self) -> bool {
        self.transition.is_some()
    }

    /// Returns the keys of the displayed bands, bottom first, including fading ones.
    pub fn band_keys(&self) -> Vec<&str> {
        self.bands.iter().map(|b| b.key.as_str()).collect()
    }

    /// Returns the mark id of the band for `key`.
    pub fn band_id(&self, key: &str) -> MarkId {
        StackedAreaMarkSpec::id_for(self.area_base, key)
    }

    /// Creates the chart's scene structure. Does nothing if it already exists.
    pub fn initialize(&mut self, scene: &mut Scene, dims: &Dimensions) -> Result<(), ChartError> {
        let plot = self.checked_plot(dims)?;
        if self.is_initialized(scene) {
            return Ok(());
        }
        self.legend.set_origin(self.legend_origin(dims));
        let g = self.groups;
        scene.insert_group(g.root, Group::new(format!("chart-root {}", self.chart_id)))?;
        scene.insert_group(
            g.grid,
            Group::new("grid").with_z_index(z_order::LAYER_GRID),
        )?;
        scene.insert_group(
            g.areas,
            Group::new("area-layer")
                .with_clip(plot)
                .with_z_index(z_order::LAYER_SERIES),
        )?;
        scene.insert_group(g.axes, Group::new("axes").with_z_index(z_order::LAYER_AXES))?;
        scene.insert_group(
            g.legend,
            Group::new("legend")
                .with_clip(self.legend.viewport())
                .with_z_index(z_order::LAYER_LEGEND),
        )?;
        tracing::debug!(chart = %self.chart_id, "chart initialized");
        Ok(())
    }

    /// Renders `records` in `view`, starting a transition at `now` if the view calls for one.
    ///
    /// Initializes the chart first if needed. Empty `records` clear the chart. Invalid
    /// dimensions are logged and returned as an error without touching the scene.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        dims: &Dimensions,
        records: &[BatchRecord],
        view: &ChartViewState,
        now: Duration,
    ) -> Result<Vec<MarkDiff>, ChartError> {
        let plot = self.checked_plot(dims)?;
        if !self.is_initialized(scene) {
            self.initialize(scene, dims)?;
        }
        self.legend.set_origin(self.legend_origin(dims));
        scene.set_clip(self.groups.areas, Some(plot))?;
        scene.set_clip(self.groups.legend, Some(self.legend.viewport()))?;

        let data_type = view.data_type;
        let focused = view.selected.as_deref();
        let padding = self.config.band_padding;
        let geo = ChartGeometry::build(records, dims, data_type, focused, padding)?;
        tracing::debug!(
            chart = %self.chart_id,
            batches = records.len(),
            ?data_type,
            selected = ?view.selected,
            previous = ?view.previous,
            "chart update"
        );

        if geo.is_empty() {
            self.bands.clear();
            self.transition = None;
            self.legend.set_items(Vec::new(), None);
            let mut diffs = self.render_guides(scene, None)?;
            diffs.extend(self.render_bands(scene, now)?);
            return Ok(diffs);
        }

        let alpha = self.config.curve_alpha;
        let categories = CategorySet::from_records(records, data_type);
        let stacked = StackLayout::stacked(records, &categories, data_type);
        let order = stacked.keys();
        let colors = assign_colors(&order, &self.config.palette)?;
        let fallback = self.config.palette[0];
        let color_of = |key: &str| {
            order
                .iter()
                .position(|k| k == key)
                .map_or(fallback, |i| colors[i])
        };

        let layout = match focused {
            Some(category) => StackLayout::focused(records, data_type, category),
            None => stacked,
        };
        let targets: Vec<Band> = layout
            .series()
            .iter()
            .enumerate()
            .map(|(i, series)| {
                let (top, bottom) = geo.outline(&series.values);
                Band {
                    key: series.key.clone(),
                    color: color_of(&series.key),
                    z_index: z_for(i),
                    path: area_path(&top, &bottom, alpha),
                    motion: Motion::Still,
                }
            })
            .collect();
        let legend_items = categories
            .keys()
            .iter()
            .map(|k| LegendItem::new(k.clone(), color_of(k)))
            .collect();
        let baseline = {
            let (top, bottom) = geo.outline(&vec![(0.0, 0.0); records.len()]);
            area_path(&top, &bottom, alpha)
        };

        self.legend.set_items(legend_items, view.selected.clone());
        self.retarget(targets, view, &baseline, now);

        let title = y_title(data_type, focused);
        let mut diffs = self.render_guides(scene, Some((&geo, dims, &title)))?;
        diffs.extend(self.render_bands(scene, now)?);
        Ok(diffs)
    }

    /// Advances the running transition to `now`.
    pub fn frame(&mut self, scene: &mut Scene, now: Duration) -> Result<FrameOutput, ChartError> {
        let Some(transition) = self.transition else {
            return Ok(FrameOutput::default());
        };
        let finished = transition.is_finished(now);
        if finished {
            self.finish();
            tracing::debug!(chart = %self.chart_id, "transition finished");
        }
        Ok(FrameOutput {
            diffs: self.render_bands(scene, now)?,
            finished,
        })
    }

    /// Jumps a running transition to its end state.
    pub fn cancel(&mut self, scene: &mut Scene) -> Result<Vec<MarkDiff>, ChartError> {
        if self.transition.is_none() {
            return Ok(Vec::new());
        }
        self.finish();
        self.render_bands(scene, Duration::ZERO)
    }

    /// Removes the chart from `scene`, dropping transitions and pending legend scrolls.
    pub fn unmount(&mut self, scene: &mut Scene) -> Vec<MarkDiff> {
        self.transition = None;
        self.legend.cancel_scroll();
        self.bands.clear();
        self.clickable.clear();
        let mut diffs = Vec::new();
        for group in self.groups.all() {
            if let Ok(exits) = scene.remove_group(group) {
                diffs.extend(exits);
            }
        }
        tracing::debug!(chart = %self.chart_id, "chart unmounted");
        diffs
    }

    /// Shows the shared tooltip for the band under `pointer`, or hides it.
    ///
    /// Returns the hovered category.
    pub fn pointer_move(
        &self,
        scene: &Scene,
        pointer: Point,
        viewport: Rect,
        tooltips: &mut TooltipRegistry,
    ) -> Option<String> {
        let class = &self.config.tooltip_class;
        let key = scene
            .hit_test(pointer)
            .and_then(|mark| mark.key.as_deref().filter(|k| mark.id == self.band_id(k)))
            .map(str::to_owned);
        match &key {
            Some(key) => {
                tooltips.show(class, key, pointer, viewport);
            }
            None => tooltips.hide(class),
        }
        key
    }

    /// Hides the shared tooltip.
    pub fn pointer_leave(&self, tooltips: &mut TooltipRegistry) {
        tooltips.hide(&self.config.tooltip_class);
    }

    /// Routes a click on a band or legend row to `observer`.
    ///
    /// Clicks on `Other` and on empty space are ignored. Returns the selected category.
    pub fn click(
        &self,
        scene: &Scene,
        pointer: Point,
        observer: &mut dyn CategoryObserver,
    ) -> Option<String> {
        let key = scene
            .hit_test(pointer)
            .and_then(|mark| self.clickable.get(&mark.id))?;
        if key == OTHER {
            return None;
        }
        observer.category_selected(key);
        Some(key.clone())
    }

    /// Records a legend wheel event; it is applied on the next animation frame.
    pub fn wheel(&mut self, delta: f64) {
        self.legend.wheel(delta);
    }

    /// Applies a pending legend scroll.
    pub fn animation_frame(&mut self, scene: &mut Scene) -> Result<Vec<MarkDiff>, ChartError> {
        if !self.legend.on_animation_frame() {
            return Ok(Vec::new());
        }
        Ok(scene.tick_group(self.groups.legend, self.legend.marks())?)
    }

    fn checked_plot(&self, dims: &Dimensions) -> Result<Rect, ChartError> {
        dims.plot_rect().inspect_err(|err| {
            tracing::error!(chart = %self.chart_id, %err, "invalid chart dimensions");
        })
    }

    fn legend_origin(&self, dims: &Dimensions) -> Point {
        Point::new(dims.width + self.config.legend.gap, dims.margin.top)
    }

    fn progress(&self, now: Duration) -> f64 {
        self.transition.map_or(1.0, |tr| tr.progress(now))
    }

    fn displayed_path(&self, key: &str, t: f64) -> Option<BezPath> {
        self.bands
            .iter()
            .find(|b| b.key == key && !b.is_leaving())
            .map(|b| b.path_at(t))
    }

    fn retarget(
        &mut self,
        targets: Vec<Band>,
        view: &ChartViewState,
        baseline: &BezPath,
        now: Duration,
    ) {
        let current: Vec<&Band> = self.bands.iter().filter(|b| !b.is_leaving()).collect();
        let unchanged = current.len() == targets.len()
            && current.iter().zip(&targets).all(|(a, b)| a.same_target(b));
        if unchanged {
            return;
        }

        let t = self.progress(now);
        let shape = match (&view.selected, &view.previous) {
            (Some(selected), previous) => Shape::Focus {
                source: previous.clone().unwrap_or_else(|| selected.clone()),
            },
            (None, Some(previous)) => Shape::Unfocus {
                previous: previous.clone(),
            },
            (None, None) => Shape::Immediate,
        };

        match shape {
            Shape::Immediate => {
                self.bands = targets;
            }
            Shape::Focus { source } => {
                let mut targets = targets.into_iter();
                let Some(mut target) = targets.next() else {
                    self.bands.clear();
                    self.transition = None;
                    return;
                };
                let from = self
                    .displayed_path(&source, t)
                    .or_else(|| self.displayed_path(&target.key, t))
                    .unwrap_or_else(|| baseline.clone());
                let mut next: Vec<Band> = self
                    .bands
                    .iter()
                    .filter(|b| b.key != target.key)
                    .map(|b| b.fading(t))
                    .filter(|b| b.opacity_at(0.0) > 0.0)
                    .collect();
                target.z_index = next.iter().map(|b| b.z_index).max().map_or(0, |z| z + 1);
                next.push(target.morph_from(&from));
                self.bands = next;
            }
            Shape::Unfocus { previous } => {
                let from = self
                    .displayed_path(&previous, t)
                    .or_else(|| {
                        self.bands
                            .iter()
                            .find(|b| !b.is_leaving())
                            .map(|b| b.path_at(t))
                    })
                    .unwrap_or_else(|| baseline.clone());
                self.bands = targets
                    .into_iter()
                    .map(|b| if b.key == previous { b.morph_from(&from) } else { b })
                    .collect();
            }
        }

        let animates = self.bands.iter().any(|b| !matches!(b.motion, Motion::Still));
        self.transition = animates
            .then(|| Transition::new(now, self.config.transition, self.config.ease));
    }

    fn finish(&mut self) {
        self.bands.retain(|b| !b.is_leaving());
        for band in &mut self.bands {
            band.motion = Motion::Still;
        }
        self.transition = None;
    }

    fn render_bands(
        &mut self,
        scene: &mut Scene,
        now: Duration,
    ) -> Result<Vec<MarkDiff>, ChartError> {
        let t = self.progress(now);
        let marks: Vec<Mark> = self
            .bands
            .iter()
            .map(|b| {
                StackedAreaMarkSpec::new(self.area_base, b.key.clone(), b.path_at(t), b.color)
                    .with_opacity(b.opacity_at(t))
                    .with_z_index(b.z_index)
                    .mark()
            })
            .collect();
        self.refresh_clickable();
        Ok(scene.tick_group(self.groups.areas, marks)?)
    }

    fn render_guides(
        &mut self,
        scene: &mut Scene,
        guides: Option<(&ChartGeometry, &Dimensions, &str)>,
    ) -> Result<Vec<MarkDiff>, ChartError> {
        let (grid, axes) = match guides {
            Some((geo, dims, title)) => {
                (self.axes.grid_marks(geo), self.axes.marks(geo, dims, title))
            }
            None => (Vec::new(), Vec::new()),
        };
        let mut diffs = scene.tick_group(self.groups.grid, grid)?;
        diffs.extend(scene.tick_group(self.groups.axes, axes)?);
        diffs.extend(scene.tick_group(self.groups.legend, self.legend.marks())?);
        Ok(diffs)
    }

    fn refresh_clickable(&mut self) {
        self.clickable.clear();
        for band in self.bands.iter().filter(|b| !b.is_leaving()) {
            self.clickable
                .insert(StackedAreaMarkSpec::id_for(self.area_base, &band.key), band.key.clone());
        }
        for item in self.legend.items() {
            self.clickable
                .insert(self.legend.row_id(&item.label), item.label.clone());
            self.clickable
                .insert(self.legend.swatch_id(&item.label), item.label.clone());
        }
    }
}
