// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG output for scenes driven by [`MarkDiff`]s.

use std::collections::HashMap;
use std::fmt::Write as _;

use batchboard_core::{
    Group, GroupId, MarkDiff, MarkId, MarkPayload, Scene, TextAnchor, TextBaseline,
};
use kurbo::Rect;
use peniko::Brush;

#[derive(Clone, Debug)]
struct SvgMark {
    group: GroupId,
    z_index: i32,
    payload: MarkPayload,
}

/// A backend that mirrors a [`Scene`] from its diffs and writes it out as SVG.
///
/// Groups become `<g>` elements in `(z_index, id)` order; a group clip becomes a
/// `<clipPath>`. Marks of unknown groups are written after every group.
#[derive(Debug, Default)]
pub struct SvgScene {
    marks: HashMap<MarkId, SvgMark>,
    groups: Vec<(GroupId, Group)>,
    view_box: Option<Rect>,
}

impl SvgScene {
    /// Creates an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the view box instead of deriving it from the marks.
    pub fn set_view_box(&mut self, view_box: Rect) {
        self.view_box = Some(view_box);
    }

    /// Copies group order, classes and clips from `scene`.
    pub fn sync_groups(&mut self, scene: &Scene) {
        self.groups = scene
            .groups()
            .into_iter()
            .map(|(id, group)| (id, group.clone()))
            .collect();
    }

    /// Applies diffs in order.
    pub fn apply_diffs(&mut self, diffs: &[MarkDiff]) {
        for diff in diffs {
            match diff {
                MarkDiff::Enter {
                    id,
                    group,
                    z_index,
                    new,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        SvgMark {
                            group: *group,
                            z_index: *z_index,
                            payload: (**new).clone(),
                        },
                    );
                }
                MarkDiff::Update {
                    id,
                    group,
                    new_z_index,
                    new,
                    ..
                } => {
                    self.marks.insert(
                        *id,
                        SvgMark {
                            group: *group,
                            z_index: *new_z_index,
                            payload: (**new).clone(),
                        },
                    );
                }
                MarkDiff::Exit { id, .. } => {
                    self.marks.remove(id);
                }
            }
        }
    }

    /// Returns the number of mirrored marks.
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Serializes the mirrored scene.
    pub fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .or_else(|| self.content_bounds())
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));
        let mut out = String::new();

        let _ = writeln!(
            out,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );

        let clipped: Vec<(usize, Rect)> = self
            .groups
            .iter()
            .enumerate()
            .filter_map(|(i, (_, g))| g.clip.map(|clip| (i, clip)))
            .collect();
        if !clipped.is_empty() {
            out.push_str("<defs>\n");
            for (i, clip) in &clipped {
                let _ = writeln!(
                    out,
                    r#"<clipPath id="clip-{i}"><rect x="{}" y="{}" width="{}" height="{}"/></clipPath>"#,
                    clip.x0,
                    clip.y0,
                    clip.width(),
                    clip.height()
                );
            }
            out.push_str("</defs>\n");
        }

        for (i, (id, group)) in self.groups.iter().enumerate() {
            let _ = write!(out, r#"<g class="{}""#, escape_xml(&group.class));
            if group.clip.is_some() {
                let _ = write!(out, r#" clip-path="url(#clip-{i})""#);
            }
            out.push_str(">\n");
            for mark in self.sorted_marks(|g| g == *id) {
                write_mark(&mut out, &mark.payload);
            }
            out.push_str("</g>\n");
        }

        let known: Vec<GroupId> = self.groups.iter().map(|(id, _)| *id).collect();
        for mark in self.sorted_marks(|g| !known.contains(&g)) {
            write_mark(&mut out, &mark.payload);
        }

        out.push_str("</svg>\n");
        out
    }

    fn sorted_marks(&self, keep: impl Fn(GroupId) -> bool) -> Vec<&SvgMark> {
        let mut marks: Vec<(&MarkId, &SvgMark)> =
            self.marks.iter().filter(|(_, m)| keep(m.group)).collect();
        marks.sort_by_key(|(id, m)| (m.z_index, **id));
        marks.into_iter().map(|(_, m)| m).collect()
    }

    fn content_bounds(&self) -> Option<Rect> {
        let mut rect: Option<Rect> = None;
        for mark in self.marks.values() {
            let b = match &mark.payload {
                MarkPayload::Text(t) => Some(estimate_text_bounds(
                    t.pos.x,
                    t.pos.y,
                    t.font_size,
                    t.anchor,
                    t.baseline,
                    &t.text,
                )),
                payload => payload.bounds(),
            };
            let Some(b) = b else {
                continue;
            };
            rect = Some(rect.map_or(b, |r| r.union(b)));
        }
        rect.map(|r| r.inflate(10.0, 10.0))
    }
}

fn write_mark(out: &mut String, payload: &MarkPayload) {
    match payload {
        MarkPayload::Rect(r) => {
            let _ = write!(
                out,
                r#"<rect x="{}" y="{}" width="{}" height="{}""#,
                r.rect.x0,
                r.rect.y0,
                r.rect.width(),
                r.rect.height(),
            );
            write_paint_attr(out, "fill", &r.fill);
            write_opacity(out, r.opacity);
            out.push_str("/>\n");
        }
        MarkPayload::Text(t) => {
            let baseline = match t.baseline {
                TextBaseline::Middle => "middle",
                TextBaseline::Alphabetic => "alphabetic",
                TextBaseline::Hanging => "hanging",
            };
            let _ = write!(
                out,
                r#"<text x="{}" y="{}" font-size="{}" dominant-baseline="{}""#,
                t.pos.x, t.pos.y, t.font_size, baseline
            );
            if t.angle != 0.0 {
                let _ = write!(
                    out,
                    r#" transform="rotate({} {} {})""#,
                    t.angle, t.pos.x, t.pos.y
                );
            }
            out.push_str(match t.anchor {
                TextAnchor::Start => r#" text-anchor="start""#,
                TextAnchor::Middle => r#" text-anchor="middle""#,
                TextAnchor::End => r#" text-anchor="end""#,
            });
            write_paint_attr(out, "fill", &t.fill);
            write_opacity(out, t.opacity);
            out.push('>');
            out.push_str(&escape_xml(&t.text));
            out.push_str("</text>\n");
        }
        MarkPayload::Path(p) => {
            let _ = write!(out, r#"<path d="{}""#, p.path.to_svg());
            write_paint_attr(out, "fill", &p.fill);
            if p.stroke_width > 0.0 {
                write_paint_attr(out, "stroke", &p.stroke);
                let _ = write!(out, r#" stroke-width="{}""#, p.stroke_width);
            }
            write_opacity(out, p.opacity);
            out.push_str("/>\n");
        }
    }
}

// Rough extent for view box computation: ~0.6em per glyph, one em tall.
fn estimate_text_bounds(
    x: f64,
    y: f64,
    font_size: f64,
    anchor: TextAnchor,
    baseline: TextBaseline,
    text: &str,
) -> Rect {
    let width = 0.6 * font_size * text.chars().count() as f64;
    let half_height = 0.5 * font_size;
    let y_midline = match baseline {
        TextBaseline::Middle => y,
        TextBaseline::Alphabetic => y - 0.3 * font_size,
        TextBaseline::Hanging => y + 0.3 * font_size,
    };
    let (x0, x1) = match anchor {
        TextAnchor::Start => (x, x + width),
        TextAnchor::Middle => (x - width / 2.0, x + width / 2.0),
        TextAnchor::End => (x - width, x),
    };
    Rect::new(x0, y_midline - half_height, x1, y_midline + half_height)
}

fn svg_paint(brush: &Brush) -> (String, Option<f64>) {
    match brush {
        Brush::Solid(color) => {
            let rgba = color.to_rgba8();
            let fill = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
            let fill_opacity = (rgba.a != 255).then(|| f64::from(rgba.a) / 255.0);
            (fill, fill_opacity)
        }
        _ => ("none".to_owned(), None),
    }
}

fn write_paint_attr(out: &mut String, name: &str, brush: &Brush) {
    let (value, opacity) = svg_paint(brush);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn write_opacity(out: &mut String, opacity: f64) {
    if opacity < 1.0 {
        let _ = write!(out, r#" opacity="{}""#, opacity.max(0.0));
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use batchboard_core::Mark;
    use kurbo::Point;
    use peniko::Color;

    use super::*;

    #[test]
    fn groups_clip_and_opacity_are_written() {
        let mut scene = Scene::new();
        let layer = GroupId(7);
        scene
            .insert_group(layer, Group::new("areas").with_clip(Rect::new(0.0, 0.0, 50.0, 40.0)))
            .unwrap();
        let diffs = scene
            .tick_group(
                layer,
                [
                    Mark::rect(MarkId(1), Rect::new(0.0, 0.0, 10.0, 10.0))
                        .with_fill(Color::from_rgb8(0xDC, 0x51, 0x0F))
                        .with_opacity(0.5),
                    Mark::text(MarkId(2), Point::new(5.0, 5.0), "A & B"),
                ],
            )
            .unwrap();

        let mut svg = SvgScene::new();
        svg.sync_groups(&scene);
        svg.apply_diffs(&diffs);
        assert_eq!(svg.mark_count(), 2);

        let out = svg.to_svg_string();
        assert!(out.contains(r#"<clipPath id="clip-0"><rect x="0" y="0" width="50" height="40"/>"#));
        assert!(out.contains(r#"<g class="areas" clip-path="url(#clip-0)">"#));
        assert!(out.contains(r##"fill="#dc510f" opacity="0.5""##));
        assert!(out.contains("A &amp; B"));
    }

    #[test]
    fn exits_remove_marks() {
        let mut scene = Scene::new();
        let layer = GroupId(1);
        scene.insert_group(layer, Group::new("bubbles")).unwrap();
        let mut svg = SvgScene::new();
        svg.apply_diffs(
            &scene
                .tick_group(layer, [Mark::rect(MarkId(3), Rect::new(0.0, 0.0, 1.0, 1.0))])
                .unwrap(),
        );
        svg.apply_diffs(&scene.tick_group(layer, Vec::<Mark>::new()).unwrap());
        assert_eq!(svg.mark_count(), 0);
        assert!(!svg.to_svg_string().contains("<rect"));
    }
}
