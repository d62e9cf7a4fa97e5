// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Mark payloads and the [`Mark`] builder.

use kurbo::{BezPath, Point, Rect, Shape};
use peniko::{Brush, Color};

use crate::MarkId;

/// Horizontal text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextAnchor {
    /// `x` is the start of the run.
    #[default]
    Start,
    /// `x` is the center of the run.
    Middle,
    /// `x` is the end of the run.
    End,
}

/// Vertical text anchoring.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TextBaseline {
    /// `y` is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// `y` is the vertical middle of the run.
    Middle,
    /// `y` is the top of the run.
    Hanging,
}

/// The kind of a mark, without its payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Arbitrary filled and/or stroked path.
    Path,
    /// Unshaped text run.
    Text,
}

/// A filled rectangle.
#[derive(Clone, Debug, PartialEq)]
pub struct RectMark {
    /// Rectangle in scene coordinates.
    pub rect: Rect,
    /// Fill paint.
    pub fill: Brush,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// A filled and/or stroked path.
#[derive(Clone, Debug, PartialEq)]
pub struct PathMark {
    /// Geometry in scene coordinates.
    pub path: BezPath,
    /// Fill paint.
    pub fill: Brush,
    /// Stroke paint (ignored when `stroke_width` is zero).
    pub stroke: Brush,
    /// Stroke width in scene coordinates.
    pub stroke_width: f64,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// An unshaped text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextMark {
    /// Anchor position.
    pub pos: Point,
    /// Text content.
    pub text: String,
    /// Font size in scene units.
    pub font_size: f64,
    /// Horizontal anchoring.
    pub anchor: TextAnchor,
    /// Vertical anchoring.
    pub baseline: TextBaseline,
    /// Rotation in degrees around `pos`.
    pub angle: f64,
    /// Fill paint.
    pub fill: Brush,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
}

/// Mark payloads.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkPayload {
    /// See [`RectMark`].
    Rect(RectMark),
    /// See [`PathMark`].
    Path(PathMark),
    /// See [`TextMark`].
    Text(TextMark),
}

impl MarkPayload {
    /// Returns the kind of this payload.
    pub fn kind(&self) -> MarkKind {
        match self {
            Self::Rect(_) => MarkKind::Rect,
            Self::Path(_) => MarkKind::Path,
            Self::Text(_) => MarkKind::Text,
        }
    }

    /// Returns the geometric bounds, if the payload has any without text shaping.
    pub fn bounds(&self) -> Option<Rect> {
        match self {
            Self::Rect(r) => Some(r.rect),
            Self::Path(p) => {
                if p.path.elements().is_empty() {
                    None
                } else {
                    Some(p.path.bounding_box())
                }
            }
            Self::Text(_) => None,
        }
    }

    /// Returns the opacity.
    pub fn opacity(&self) -> f64 {
        match self {
            Self::Rect(r) => r.opacity,
            Self::Path(p) => p.opacity,
            Self::Text(t) => t.opacity,
        }
    }

    /// Returns `true` if `pt` falls inside the painted area.
    ///
    /// Text is never hit; fully transparent marks are never hit.
    pub fn contains(&self, pt: Point) -> bool {
        if self.opacity() <= 0.0 {
            return false;
        }
        match self {
            Self::Rect(r) => r.rect.contains(pt),
            Self::Path(p) => !p.path.elements().is_empty() && p.path.contains(pt),
            Self::Text(_) => false,
        }
    }
}

/// A stable-identity visual item.
#[derive(Clone, Debug, PartialEq)]
pub struct Mark {
    /// Stable identity.
    pub id: MarkId,
    /// Render ordering; renderers sort by `(z_index, id)`.
    pub z_index: i32,
    /// Optional datum key reported by hit testing (for example a category name).
    pub key: Option<String>,
    /// Visual payload.
    pub payload: MarkPayload,
}

impl Mark {
    /// Creates a black rectangle mark.
    pub fn rect(id: MarkId, rect: Rect) -> Self {
        Self::new(
            id,
            MarkPayload::Rect(RectMark {
                rect,
                fill: Brush::Solid(Color::BLACK),
                opacity: 1.0,
            }),
        )
    }

    /// Creates a black-filled, unstroked path mark.
    pub fn path(id: MarkId, path: BezPath) -> Self {
        Self::new(
            id,
            MarkPayload::Path(PathMark {
                path,
                fill: Brush::Solid(Color::BLACK),
                stroke: Brush::Solid(Color::TRANSPARENT),
                stroke_width: 0.0,
                opacity: 1.0,
            }),
        )
    }

    /// Creates a black text mark with a 10-unit font size.
    pub fn text(id: MarkId, pos: impl Into<Point>, text: impl Into<String>) -> Self {
        Self::new(
            id,
            MarkPayload::Text(TextMark {
                pos: pos.into(),
                text: text.into(),
                font_size: 10.0,
                anchor: TextAnchor::Start,
                baseline: TextBaseline::Alphabetic,
                angle: 0.0,
                fill: Brush::Solid(Color::BLACK),
                opacity: 1.0,
            }),
        )
    }

    fn new(id: MarkId, payload: MarkPayload) -> Self {
        Self {
            id,
            z_index: 0,
            key: None,
            payload,
        }
    }

    /// Returns the kind of this mark.
    pub fn kind(&self) -> MarkKind {
        self.payload.kind()
    }

    /// Sets the z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Sets the datum key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Sets the fill paint.
    pub fn with_fill(mut self, fill: impl Into<Brush>) -> Self {
        let fill = fill.into();
        match &mut self.payload {
            MarkPayload::Rect(r) => r.fill = fill,
            MarkPayload::Path(p) => p.fill = fill,
            MarkPayload::Text(t) => t.fill = fill,
        }
        self
    }

    /// Sets the stroke of a path mark. Other kinds ignore it.
    pub fn with_stroke(mut self, stroke: impl Into<Brush>, stroke_width: f64) -> Self {
        if let MarkPayload::Path(p) = &mut self.payload {
            p.stroke = stroke.into();
            p.stroke_width = stroke_width;
        }
        self
    }

    /// Sets the opacity, clamped to `[0, 1]`.
    pub fn with_opacity(mut self, opacity: f64) -> Self {
        let opacity = if opacity.is_finite() {
            opacity.clamp(0.0, 1.0)
        } else {
            1.0
        };
        match &mut self.payload {
            MarkPayload::Rect(r) => r.opacity = opacity,
            MarkPayload::Path(p) => p.opacity = opacity,
            MarkPayload::Text(t) => t.opacity = opacity,
        }
        self
    }

    /// Sets the font size of a text mark. Other kinds ignore it.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.font_size = font_size;
        }
        self
    }

    /// Sets the anchoring of a text mark. Other kinds ignore it.
    pub fn with_anchor(mut self, anchor: TextAnchor, baseline: TextBaseline) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.anchor = anchor;
            t.baseline = baseline;
        }
        self
    }

    /// Sets the rotation (degrees) of a text mark. Other kinds ignore it.
    pub fn with_angle(mut self, angle: f64) -> Self {
        if let MarkPayload::Text(t) = &mut self.payload {
            t.angle = angle;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transparent_marks_are_not_hit() {
        let m = Mark::rect(MarkId(1), Rect::new(0.0, 0.0, 10.0, 10.0)).with_opacity(0.0);
        assert!(!m.payload.contains(Point::new(5.0, 5.0)), "opacity 0 must not hit");
        let m = m.with_opacity(0.5);
        assert!(m.payload.contains(Point::new(5.0, 5.0)), "opacity 0.5 must hit");
    }

    #[test]
    fn closed_path_contains_interior_point() {
        let mut p = BezPath::new();
        p.move_to((0.0, 0.0));
        p.line_to((10.0, 0.0));
        p.line_to((10.0, 10.0));
        p.line_to((0.0, 10.0));
        p.close_path();
        let m = Mark::path(MarkId(2), p);
        assert!(m.payload.contains(Point::new(3.0, 3.0)), "interior point");
        assert!(!m.payload.contains(Point::new(13.0, 3.0)), "exterior point");
    }
}
