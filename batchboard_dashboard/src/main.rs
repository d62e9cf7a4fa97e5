// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renders the bundled sample data through a select, settle and deselect sequence and
//! writes the snapshots to an HTML report.

use core::time::Duration;
use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::Context as _;
use batchboard_dashboard::{Dashboard, DashboardConfig, DashboardState};
use batchboard_data::OTHER;
use tracing_subscriber::EnvFilter;

const STATS: &str = include_str!("../../demos/data/stats.json");
const PARTNERS: &str = include_str!("../../demos/data/partners.json");

const FRAME: Duration = Duration::from_millis(16);
const MAX_FRAMES: usize = 100_000;

#[derive(Debug)]
struct Section {
    title: String,
    svg: String,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let out = std::env::args_os()
        .nth(1)
        .map_or_else(|| PathBuf::from("batchboard.html"), PathBuf::from);

    let mut dashboard = Dashboard::from_json(DashboardConfig::default(), STATS, PARTNERS)
        .context("building the dashboard from the bundled data")?;
    if let DashboardState::Empty { reason } = dashboard.state() {
        anyhow::bail!("bundled data has nothing to show: {reason}");
    }

    let mut sections = Vec::new();
    let mut now = settle(&mut dashboard, Duration::ZERO);
    for id in ["industries", "tags"] {
        snapshot(&dashboard, id, "stacked", &mut sections)?;
    }

    let chart = "industries";
    let category = dashboard
        .chart(chart)
        .and_then(|c| {
            c.legend()
                .items()
                .iter()
                .find(|item| item.label != OTHER)
                .map(|item| item.label.clone())
        })
        .context("the industries chart has no categories")?;

    dashboard.select(chart, &category, now)?;
    now = settle(&mut dashboard, now);
    snapshot(&dashboard, chart, &format!("focused on {category}"), &mut sections)?;

    dashboard.select(chart, &category, now)?;
    now = settle(&mut dashboard, now);
    snapshot(&dashboard, chart, "back to stacked", &mut sections)?;

    let data_type = dashboard.toggle_data_type("tags", now)?;
    settle(&mut dashboard, now);
    snapshot(
        &dashboard,
        "tags",
        &format!("switched to {}", data_type.label()),
        &mut sections,
    )?;

    sections.push(Section {
        title: format!(
            "Partners, {}-{}",
            dashboard.range().start(),
            dashboard.range().end()
        ),
        svg: dashboard.partner_svg(),
    });

    std::fs::write(&out, render_report("batchboard", &sections))
        .with_context(|| format!("writing {}", out.display()))?;
    tracing::info!(path = %out.display(), sections = sections.len(), "report written");
    Ok(())
}

// Runs frames until no transition or simulation is left. Returns the final time.
fn settle(dashboard: &mut Dashboard, mut now: Duration) -> Duration {
    for _ in 0..MAX_FRAMES {
        now += FRAME;
        let report = dashboard.frame(now);
        if !report.layout_running && !dashboard.is_animating() {
            break;
        }
    }
    now
}

fn snapshot(
    dashboard: &Dashboard,
    chart: &str,
    label: &str,
    sections: &mut Vec<Section>,
) -> anyhow::Result<()> {
    let title = dashboard.chart_title(chart).unwrap_or(chart);
    sections.push(Section {
        title: format!("{title} ({label})"),
        svg: dashboard.chart_svg(chart)?,
    });
    Ok(())
}

fn render_report(title: &str, sections: &[Section]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "<!doctype html>\n<html><head><meta charset=\"utf-8\"><title>{}</title></head><body>",
        escape_html(title)
    );
    let _ = writeln!(out, "<h1>{}</h1>", escape_html(title));
    for section in sections {
        let _ = writeln!(
            out,
            "<section>\n<h2>{}</h2>\n{}</section>",
            escape_html(&section.title),
            section.svg
        );
    }
    out.push_str("</body></html>\n");
    out
}

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}
