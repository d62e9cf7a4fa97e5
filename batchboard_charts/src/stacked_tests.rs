// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use batchboard_core::{MarkDiff, MarkPayload, Scene};
use batchboard_data::{BatchRecord, BatchStats, DataType, OTHER};
use kurbo::{BezPath, Point, Rect, Shape};
use proptest::prelude::*;

use crate::{
    CategoryObserver, ChartConfig, ChartError, ChartGeometry, ChartViewState, Dimensions,
    SelectionMachine, StackedAreaChart, TooltipRegistry,
};

fn record(code: &str, industries: &[(&str, u32)], total: u32) -> BatchRecord {
    let stats = BatchStats {
        total,
        industry_count: total,
        industries: industries
            .iter()
            .map(|(k, v)| ((*k).to_owned(), *v))
            .collect(),
        ..BatchStats::default()
    };
    BatchRecord::from_stats(code.parse().unwrap(), &stats)
}

// Stacked order by total share: B2B (140), FinTech (60), AI (10), then Other.
fn records() -> Vec<BatchRecord> {
    vec![
        record("W20", &[("FinTech", 4), ("B2B", 3)], 10),
        record("S20", &[("FinTech", 2), ("B2B", 5), ("AI", 1)], 10),
        record("W21", &[("B2B", 6)], 10),
    ]
}

fn dims() -> Dimensions {
    ChartConfig::default().dimensions(800.0, 400.0)
}

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

#[derive(Default)]
struct Recorder(Vec<String>);

impl CategoryObserver for Recorder {
    fn category_selected(&mut self, category: &str) {
        self.0.push(category.to_owned());
    }
}

fn chart() -> StackedAreaChart {
    StackedAreaChart::new("industries", ChartConfig::default()).unwrap()
}

fn stacked_chart(scene: &mut Scene) -> StackedAreaChart {
    let mut chart = chart();
    chart
        .update(
            scene,
            &dims(),
            &records(),
            &ChartViewState::stacked(DataType::Industries),
            Duration::ZERO,
        )
        .unwrap();
    chart
}

/// A point in the middle of the stacked interval `[lo, hi]` of the second batch.
fn stacked_point(lo: f64, hi: f64) -> Point {
    let geo =
        ChartGeometry::build(&records(), &dims(), DataType::Industries, None, 0.1).unwrap();
    Point::new(geo.x.center(1), geo.y.map((lo + hi) * 0.5))
}

fn band_opacity(scene: &Scene, chart: &StackedAreaChart, key: &str) -> f64 {
    scene.mark(chart.band_id(key)).unwrap().payload.opacity()
}

fn band_path(scene: &Scene, chart: &StackedAreaChart, key: &str) -> BezPath {
    match &scene.mark(chart.band_id(key)).unwrap().payload {
        MarkPayload::Path(p) => p.path.clone(),
        other => panic!("band {key} is not a path: {other:?}"),
    }
}

#[test]
fn initialize_creates_the_structure_once() {
    let mut scene = Scene::new();
    let mut chart = chart();
    chart.initialize(&mut scene, &dims()).unwrap();
    chart.initialize(&mut scene, &dims()).unwrap();
    assert_eq!(scene.groups().len(), 5, "one root plus four layers");
    assert!(chart.is_initialized(&scene), "root group exists");

    let area_group = scene.group(chart.groups().areas).unwrap();
    assert_eq!(area_group.clip, Some(dims().plot_rect().unwrap()), "areas clipped to plot");
}

#[test]
fn stacked_update_draws_one_band_per_category() {
    let mut scene = Scene::new();
    let chart = stacked_chart(&mut scene);
    assert_eq!(chart.band_keys(), ["B2B", "FinTech", "AI", OTHER]);
    assert_eq!(scene.marks_in(chart.groups().areas).len(), 4, "four area marks");
    assert!(!chart.is_animating(), "no previous selection, no transition");

    let labels: Vec<&str> = chart
        .legend()
        .items()
        .iter()
        .map(|i| i.label.as_str())
        .collect();
    assert_eq!(labels, ["AI", "B2B", "FinTech", OTHER], "legend follows category order");
}

#[test]
fn repeated_update_with_the_same_view_is_a_no_op() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    let diffs = chart
        .update(
            &mut scene,
            &dims(),
            &records(),
            &ChartViewState::stacked(DataType::Industries),
            ms(50),
        )
        .unwrap();
    assert!(diffs.is_empty(), "unchanged marks produce no diffs: {diffs:?}");
}

#[test]
fn focusing_fades_other_bands_and_morphs_the_selection() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    let mut selection = SelectionMachine::new(DataType::Industries);
    assert!(selection.select("FinTech"), "stacked to focused");

    chart
        .update(&mut scene, &dims(), &records(), selection.state(), ms(1000))
        .unwrap();
    assert!(chart.is_animating(), "focus starts a transition");
    assert_eq!(chart.band_keys().len(), 4, "leaving bands stay until the end");

    let mid = chart.frame(&mut scene, ms(1300)).unwrap();
    assert!(!mid.finished, "halfway through");
    let b2b = band_opacity(&scene, &chart, "B2B");
    assert!(b2b > 0.0 && b2b < 1.0, "B2B is fading, got {b2b}");
    assert_eq!(band_opacity(&scene, &chart, "FinTech"), 1.0, "selection stays opaque");

    let end = chart.frame(&mut scene, ms(1600)).unwrap();
    assert!(end.finished, "600 ms transition is complete");
    assert!(
        end.diffs
            .iter()
            .any(|d| matches!(d, MarkDiff::Exit { id, .. } if *id == chart.band_id("B2B"))),
        "faded bands exit"
    );
    assert_eq!(chart.band_keys(), ["FinTech"]);
    assert_eq!(scene.marks_in(chart.groups().areas).len(), 1, "only the focused band");

    selection.settle();
    chart
        .update(&mut scene, &dims(), &records(), selection.state(), ms(1700))
        .unwrap();
    assert!(!chart.is_animating(), "settled view does not restart the transition");
}

#[test]
fn unfocusing_morphs_the_previous_band_back_into_the_stack() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    let mut selection = SelectionMachine::new(DataType::Industries);
    selection.select("FinTech");
    chart
        .update(&mut scene, &dims(), &records(), selection.state(), Duration::ZERO)
        .unwrap();
    chart.cancel(&mut scene).unwrap();
    selection.settle();

    selection.select("FinTech");
    assert_eq!(selection.state().previous.as_deref(), Some("FinTech"));
    chart
        .update(&mut scene, &dims(), &records(), selection.state(), ms(100))
        .unwrap();
    assert!(chart.is_animating(), "unfocus animates the previous band");
    assert_eq!(chart.band_keys(), ["B2B", "FinTech", "AI", OTHER]);
    assert_eq!(band_opacity(&scene, &chart, "B2B"), 1.0, "other bands appear at once");

    let done = chart.frame(&mut scene, ms(700)).unwrap();
    assert!(done.finished, "transition completes after its duration");
    selection.settle();
    assert_eq!(selection.state(), &ChartViewState::stacked(DataType::Industries));
}

#[test]
fn refocusing_morphs_from_the_previous_focus_and_fades_it_out() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    let mut selection = SelectionMachine::new(DataType::Industries);
    selection.select("AI");
    chart
        .update(&mut scene, &dims(), &records(), selection.state(), Duration::ZERO)
        .unwrap();
    assert!(chart.frame(&mut scene, ms(600)).unwrap().finished);
    selection.settle();
    chart
        .update(&mut scene, &dims(), &records(), selection.state(), ms(650))
        .unwrap();
    let ai_outline = band_path(&scene, &chart, "AI");

    assert!(selection.select("B2B"), "focused to focused");
    assert_eq!(selection.state().previous.as_deref(), Some("AI"));
    chart
        .update(&mut scene, &dims(), &records(), selection.state(), ms(1000))
        .unwrap();
    assert!(chart.is_animating());
    assert_eq!(chart.band_keys(), ["AI", "B2B"], "AI fades while B2B morphs");

    let start = band_path(&scene, &chart, "B2B");
    assert!(
        (start.area() - ai_outline.area()).abs() < 1e-6,
        "B2B starts from the AI outline"
    );
    let (a, b) = (start.bounding_box(), ai_outline.bounding_box());
    assert!((a.y0 - b.y0).abs() < 1e-6 && (a.y1 - b.y1).abs() < 1e-6, "{a:?} vs {b:?}");
    assert_eq!(band_opacity(&scene, &chart, "AI"), 1.0, "fade starts opaque");

    chart.frame(&mut scene, ms(1300)).unwrap();
    let ai = band_opacity(&scene, &chart, "AI");
    assert!(ai > 0.0 && ai < 1.0, "AI is fading, got {ai}");

    let end = chart.frame(&mut scene, ms(1600)).unwrap();
    assert!(end.finished);
    assert!(
        end.diffs
            .iter()
            .any(|d| matches!(d, MarkDiff::Exit { id, .. } if *id == chart.band_id("AI"))),
        "AI leaves the area layer"
    );
    assert_eq!(chart.band_keys(), ["B2B"]);
    assert_eq!(scene.marks_in(chart.groups().areas).len(), 1, "one band remains");
}

#[test]
fn stacked_updates_with_new_records_snap_without_a_transition() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    let fewer = records()[1..].to_vec();
    let stacked = ChartViewState::stacked(DataType::Industries);

    let diffs = chart
        .update(&mut scene, &dims(), &fewer, &stacked, ms(100))
        .unwrap();
    assert!(!diffs.is_empty(), "bands changed");
    assert!(!chart.is_animating(), "stacked to stacked is immediate");

    let mut fresh_scene = Scene::new();
    let mut fresh = self::chart();
    fresh
        .update(&mut fresh_scene, &dims(), &fewer, &stacked, Duration::ZERO)
        .unwrap();
    assert_eq!(chart.band_keys(), fresh.band_keys());
    for key in fresh.band_keys() {
        assert_eq!(
            band_path(&scene, &chart, key),
            band_path(&fresh_scene, &fresh, key),
            "{key} is drawn at its final outline"
        );
    }
    assert!(
        chart.frame(&mut scene, ms(200)).unwrap().diffs.is_empty(),
        "nothing left to animate"
    );
}

#[test]
fn cancel_jumps_to_the_end_state() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    let mut selection = SelectionMachine::new(DataType::Industries);
    selection.select("B2B");
    chart
        .update(&mut scene, &dims(), &records(), selection.state(), Duration::ZERO)
        .unwrap();
    chart.cancel(&mut scene).unwrap();
    assert!(!chart.is_animating(), "cancel stops the transition");
    assert_eq!(chart.band_keys(), ["B2B"]);
    assert!(
        chart.frame(&mut scene, ms(10)).unwrap().diffs.is_empty(),
        "nothing left to animate"
    );
}

#[test]
fn clicks_select_bands_and_legend_rows_but_never_other() {
    let mut scene = Scene::new();
    let chart = stacked_chart(&mut scene);
    let mut observer = Recorder::default();

    // Second batch: B2B 0-50, FinTech 50-70, AI 70-80, Other 80-100.
    assert_eq!(
        chart.click(&scene, stacked_point(80.0, 100.0), &mut observer),
        None,
        "Other is not selectable"
    );
    assert_eq!(
        chart.click(&scene, stacked_point(0.0, 50.0), &mut observer),
        Some("B2B".to_owned())
    );

    let legend = chart.legend().viewport();
    let first_row = Point::new(legend.x0 + 100.0, legend.y0 + 15.0);
    assert_eq!(
        chart.click(&scene, first_row, &mut observer),
        Some("AI".to_owned()),
        "legend rows are clickable"
    );
    let swatch = Point::new(legend.x0 + 9.0, legend.y0 + 31.0 + 15.0);
    assert_eq!(chart.click(&scene, swatch, &mut observer), Some("B2B".to_owned()));

    assert_eq!(observer.0, ["B2B", "AI", "B2B"]);
    assert_eq!(chart.click(&scene, Point::new(-50.0, -50.0), &mut observer), None);
}

#[test]
fn hovering_a_band_shows_its_tooltip() {
    let mut scene = Scene::new();
    let chart = stacked_chart(&mut scene);
    let mut tooltips = TooltipRegistry::new();
    let viewport = Rect::new(0.0, 0.0, 1200.0, 600.0);

    let hovered = chart.pointer_move(&scene, stacked_point(50.0, 70.0), viewport, &mut tooltips);
    assert_eq!(hovered.as_deref(), Some("FinTech"));
    let tooltip = tooltips.get("area-tooltip").unwrap();
    assert!(tooltip.visible, "tooltip shown");
    assert_eq!(tooltip.lines, ["FinTech"]);

    let outside = chart.pointer_move(&scene, Point::new(5.0, 5.0), viewport, &mut tooltips);
    assert_eq!(outside, None);
    assert!(!tooltips.get("area-tooltip").unwrap().visible, "tooltip hidden");
}

#[test]
fn empty_records_render_nothing() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    chart
        .update(
            &mut scene,
            &dims(),
            &[],
            &ChartViewState::stacked(DataType::Industries),
            ms(10),
        )
        .unwrap();
    assert_eq!(scene.mark_count(), 0, "every mark exits");
    assert!(chart.band_keys().is_empty());
    assert!(chart.is_initialized(&scene), "structure stays");
}

#[test]
fn invalid_dimensions_are_reported_without_touching_the_scene() {
    let mut scene = Scene::new();
    let mut chart = chart();
    let err = chart
        .update(
            &mut scene,
            &Dimensions::new(f64::NAN, 400.0),
            &records(),
            &ChartViewState::stacked(DataType::Industries),
            Duration::ZERO,
        )
        .unwrap_err();
    assert!(matches!(err, ChartError::InvalidDimension { .. }), "got {err:?}");
    assert!(scene.groups().is_empty(), "nothing was created");

    let err = chart
        .update(
            &mut scene,
            &Dimensions::new(40.0, 400.0),
            &records(),
            &ChartViewState::stacked(DataType::Industries),
            Duration::ZERO,
        )
        .unwrap_err();
    assert!(matches!(err, ChartError::EmptyPlotArea { .. }), "got {err:?}");
}

#[test]
fn unmount_removes_every_group() {
    let mut scene = Scene::new();
    let mut chart = stacked_chart(&mut scene);
    chart.wheel(40.0);
    let exits = chart.unmount(&mut scene);
    assert!(!exits.is_empty(), "marks exit on unmount");
    assert!(scene.groups().is_empty(), "no groups left");
    assert_eq!(scene.mark_count(), 0);
    assert!(!chart.legend().scroll().has_pending(), "pending scroll cancelled");
}

#[test]
fn legend_scroll_applies_on_the_animation_frame() {
    let mut scene = Scene::new();
    let mut chart = chart();
    let many: Vec<BatchRecord> = (0..3)
        .map(|i| {
            let cats: Vec<(String, u32)> = (0..30).map(|c| (format!("cat{c:02}"), 1)).collect();
            let cats: Vec<(&str, u32)> = cats.iter().map(|(k, v)| (k.as_str(), *v)).collect();
            record(&format!("W2{i}"), &cats, 40)
        })
        .collect();
    chart
        .update(
            &mut scene,
            &dims(),
            &many,
            &ChartViewState::stacked(DataType::Industries),
            Duration::ZERO,
        )
        .unwrap();

    chart.wheel(10.0);
    chart.wheel(25.0);
    let diffs = chart.animation_frame(&mut scene).unwrap();
    assert!(!diffs.is_empty(), "legend rows moved");
    assert_eq!(chart.legend().scroll().offset(), 50.0, "latest delta times factor 2");
    assert!(
        chart.animation_frame(&mut scene).unwrap().is_empty(),
        "no pending wheel event"
    );
}

proptest! {
    #[test]
    fn clicking_other_never_reaches_the_observer(y in 80.5_f64..99.5) {
        let mut scene = Scene::new();
        let chart = stacked_chart(&mut scene);
        let mut selection = SelectionMachine::new(DataType::Industries);
        let before = selection.state().clone();
        let clicked = chart.click(&scene, stacked_point(y, y), &mut selection);
        prop_assert_eq!(clicked, None);
        prop_assert_eq!(selection.state(), &before);
    }
}
