// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end behavior of the page shell.

use core::time::Duration;

use batchboard_charts::ChartError;
use batchboard_dashboard::{
    Dashboard, DashboardConfig, DashboardError, DashboardState, PARTNER_TOOLTIP,
};
use batchboard_data::{DataType, OTHER};
use kurbo::Point;
use proptest::prelude::*;

const STATS: &str = r#"{
    "batches": ["W20", "S20", "IK12", "W21"],
    "stats": { "byBatch": {
        "W20": { "total": 10, "industry_count": 10, "tag_count": 10,
                 "industries": { "FinTech": 4, "B2B": 3 },
                 "tags": { "AI": 5 },
                 "locations": { "USA": 8, "CAN": 2 } },
        "S20": { "total": 10, "industry_count": 10, "tag_count": 10,
                 "industries": { "FinTech": 2, "B2B": 5, "AI": 1 },
                 "tags": { "AI": 6, "SaaS": 2 } },
        "W21": { "total": 10, "industry_count": 10, "tag_count": 10,
                 "industries": { "B2B": 6 },
                 "tags": { "SaaS": 4 } },
        "IK12": { "total": 3 }
    } }
}"#;

const PARTNERS: &str = r#"{
    "Ada": { "bybatch": {
        "W20": [ { "company_name": "Acme", "team_size": 4 },
                 { "company_name": "Nimbus", "team_size": 9 } ]
    } },
    "Ben": { "bybatch": {
        "W12": [ { "company_name": "Quartz", "team_size": 16 } ]
    } }
}"#;

fn ms(v: u64) -> Duration {
    Duration::from_millis(v)
}

fn dashboard() -> Dashboard {
    Dashboard::from_json(DashboardConfig::default(), STATS, PARTNERS).unwrap()
}

fn settle_layout(dashboard: &mut Dashboard, mut now: Duration) -> Duration {
    for _ in 0..10_000 {
        now += ms(16);
        if !dashboard.frame(now).layout_running {
            break;
        }
    }
    now
}

#[test]
fn builds_both_charts_for_the_default_range() {
    let dashboard = dashboard();
    assert_eq!(dashboard.state(), &DashboardState::Ready);
    assert_eq!(dashboard.records().len(), 3, "IK12 is never aggregated");
    assert_eq!(dashboard.chart_ids(), ["industries", "tags"]);
    assert_eq!(
        dashboard.chart_title("tags"),
        Some("Tags Distribution Over Time")
    );

    let industries = dashboard.chart("industries").unwrap();
    assert_eq!(industries.band_keys(), ["B2B", "FinTech", "AI", OTHER]);
    assert_eq!(
        dashboard.view_state("tags").unwrap().data_type,
        DataType::Tags
    );

    let svg = dashboard.chart_svg("industries").unwrap();
    assert!(svg.contains("<path"), "bands are written");
    assert!(svg.contains("clip-path="), "plot clip is written");

    assert_eq!(dashboard.layout().unwrap().cell_count(), 2);
}

#[test]
fn a_range_without_batches_enters_the_empty_state() {
    let mut dashboard = dashboard();
    dashboard.set_year_range(2005, 2006, ms(0)).unwrap();
    assert!(matches!(dashboard.state(), DashboardState::Empty { .. }));
    assert_eq!(dashboard.chart_scene("industries").unwrap().mark_count(), 0);
    assert_eq!(dashboard.layout().unwrap().cell_count(), 0);

    dashboard.set_year_range(2019, 2021, ms(10)).unwrap();
    assert_eq!(dashboard.state(), &DashboardState::Ready);
    assert_eq!(dashboard.layout().unwrap().cell_count(), 1, "only Ada in range");
}

#[test]
fn rejects_an_invalid_range_and_unknown_charts() {
    let mut dashboard = dashboard();
    assert!(matches!(
        dashboard.set_year_range(2010, 2010, ms(0)),
        Err(DashboardError::Data(_))
    ));
    assert_eq!(dashboard.range().start(), 2005, "range unchanged");
    assert!(matches!(
        dashboard.click("map", Point::ZERO, ms(0)),
        Err(DashboardError::UnknownChart(id)) if id == "map"
    ));
}

#[test]
fn select_settle_deselect_round_trip() {
    let mut dashboard = dashboard();
    assert!(dashboard.select("industries", "FinTech", ms(0)).unwrap());
    assert!(dashboard.is_animating());

    let mid = dashboard.frame(ms(300));
    assert!(mid.finished.is_empty(), "halfway through");
    let end = dashboard.frame(ms(600));
    assert_eq!(end.finished, ["industries"]);
    assert!(!dashboard.is_animating());
    let view = dashboard.view_state("industries").unwrap();
    assert_eq!(view.selected.as_deref(), Some("FinTech"));
    assert_eq!(view.previous, None, "settled after the transition");
    assert_eq!(dashboard.chart("industries").unwrap().band_keys(), ["FinTech"]);
    assert_eq!(
        dashboard.view_state("tags").unwrap().selected,
        None,
        "charts keep separate selections"
    );

    assert!(dashboard.select("industries", "FinTech", ms(700)).unwrap());
    let back = dashboard.frame(ms(1300));
    assert_eq!(back.finished, ["industries"]);
    assert_eq!(dashboard.view_state("industries").unwrap().selected, None);
    assert_eq!(dashboard.chart("industries").unwrap().band_keys().len(), 4);
}

#[test]
fn other_is_never_selectable() {
    let mut dashboard = dashboard();
    assert!(!dashboard.select("industries", OTHER, ms(0)).unwrap());
    assert!(!dashboard.is_animating());
}

#[test]
fn toggling_the_data_type_drops_the_selection() {
    let mut dashboard = dashboard();
    dashboard.select("industries", "B2B", ms(0)).unwrap();
    dashboard.frame(ms(600));

    let next = dashboard.toggle_data_type("industries", ms(700)).unwrap();
    assert_eq!(next, DataType::Tags);
    assert!(!dashboard.is_animating(), "a data type switch redraws at once");
    let view = dashboard.view_state("industries").unwrap();
    assert_eq!(view.data_type, DataType::Tags);
    assert_eq!(view.selected, None);
    let keys = dashboard.chart("industries").unwrap().band_keys();
    assert!(keys.contains(&"SaaS"), "tag bands shown: {keys:?}");
    assert_eq!(keys.last(), Some(&OTHER));

    dashboard.set_year_range(2021, 2022, ms(800)).unwrap();
    assert!(!dashboard.is_animating(), "a new range redraws at once");
    assert_eq!(
        dashboard.chart("industries").unwrap().band_keys(),
        ["SaaS", OTHER],
        "only W21 is left"
    );
}

#[test]
fn deselecting_without_data_leaves_no_pending_transition() {
    let mut dashboard = dashboard();
    dashboard.set_year_range(2005, 2006, ms(0)).unwrap();
    assert!(dashboard.select("industries", "B2B", ms(10)).unwrap());
    assert!(dashboard.select("industries", "B2B", ms(20)).unwrap());
    assert!(!dashboard.is_animating(), "nothing to animate without batches");

    let view = dashboard.view_state("industries").unwrap();
    assert_eq!(view.selected, None);
    assert_eq!(view.previous, None, "settled at once");
    dashboard.frame(ms(2000));
    assert_eq!(dashboard.view_state("industries").unwrap().previous, None);
}

#[test]
fn a_failing_resize_is_reported_per_chart_and_recovers() {
    let mut dashboard = dashboard();
    let before = dashboard.chart_scene("industries").unwrap().mark_count();

    dashboard.resize(f64::NAN, 400.0, ms(0));
    assert!(dashboard.frame(ms(50)).failed.is_empty(), "still debouncing");
    let report = dashboard.frame(ms(100));
    assert_eq!(report.failed, ["industries", "tags"]);
    assert!(matches!(
        dashboard.chart_error("tags"),
        Some(ChartError::InvalidDimension { .. })
    ));
    assert_eq!(
        dashboard.chart_scene("industries").unwrap().mark_count(),
        before,
        "last good marks are kept"
    );

    dashboard.resize(800.0, 400.0, ms(200));
    let report = dashboard.frame(ms(300));
    assert!(report.failed.is_empty(), "{report:?}");
    assert_eq!(dashboard.chart_error("industries"), None);
    assert_eq!(dashboard.dimensions().width, 800.0);
}

#[test]
fn scrolling_toggles_the_slider_after_a_quiet_period() {
    let mut dashboard = dashboard();
    assert!(!dashboard.slider_visible());
    dashboard.scroll(900.0, 1300.0, ms(0));
    dashboard.scroll(100.0, 500.0, ms(40));
    dashboard.frame(ms(139));
    assert!(!dashboard.slider_visible(), "deadline is 140ms");
    dashboard.frame(ms(140));
    assert!(dashboard.slider_visible(), "chart overlaps the viewport");

    dashboard.scroll(-600.0, -10.0, ms(200));
    dashboard.frame(ms(300));
    assert!(!dashboard.slider_visible(), "chart scrolled past");
}

#[test]
fn partner_bubbles_show_tooltips_and_can_be_dragged() {
    let mut dashboard = dashboard();
    let now = settle_layout(&mut dashboard, ms(0));
    assert!(!dashboard.layout().unwrap().is_running());
    assert_eq!(dashboard.partner_scene().mark_count(), 3, "one bubble per company");

    let at = dashboard.layout().unwrap().nodes().next().unwrap().1.position;
    let text = dashboard.partner_pointer_move(at).unwrap();
    assert!(text.contains("Team size: "), "{text}");
    assert!(dashboard.tooltips().get(PARTNER_TOOLTIP).unwrap().visible);

    assert!(dashboard.partner_drag_start(at, now));
    let target = Point::new(at.x + 2.0, at.y + 2.0);
    dashboard.partner_drag_move(target);
    assert!(dashboard.layout().unwrap().node_at(target).is_some());
    dashboard.partner_drag_end();
    settle_layout(&mut dashboard, now);
    assert!(!dashboard.layout().unwrap().is_running(), "cools down after release");

    assert_eq!(dashboard.partner_pointer_move(Point::new(-5.0, -5.0)), None);
    assert!(!dashboard.tooltips().get(PARTNER_TOOLTIP).unwrap().visible);
    assert!(dashboard.partner_svg().contains("<path"));
}

#[test]
fn unmount_clears_every_view() {
    let mut dashboard = dashboard();
    dashboard.select("tags", "AI", ms(0)).unwrap();
    dashboard.scroll(0.0, 100.0, ms(0));
    dashboard.unmount();

    assert!(!dashboard.is_animating());
    assert_eq!(dashboard.chart_scene("tags").unwrap().mark_count(), 0);
    assert!(!dashboard.chart_svg("tags").unwrap().contains("<path"));
    assert!(!dashboard.layout().unwrap().is_running());
    dashboard.frame(ms(500));
    assert!(!dashboard.slider_visible(), "pending scroll was dropped");
}

proptest! {
    #[test]
    fn dragging_endpoints_keeps_a_valid_range(
        drags in proptest::collection::vec((any::<bool>(), 1990_i32..2040), 1..12),
    ) {
        let mut dashboard = dashboard();
        for (i, (start, year)) in drags.into_iter().enumerate() {
            let now = ms(i as u64 * 10);
            if start {
                dashboard.drag_start_year(year, now);
            } else {
                dashboard.drag_end_year(year, now);
            }
            let range = dashboard.range();
            prop_assert!(range.start() < range.end());
            prop_assert!(range.start() >= 2005 && range.end() <= 2025);
            prop_assert_eq!(
                dashboard.records().is_empty(),
                matches!(dashboard.state(), DashboardState::Empty { .. })
            );
        }
    }
}
