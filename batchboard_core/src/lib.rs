// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal retained scene for batchboard charts.
//!
//! A [`Scene`] holds stable-identity [`Mark`]s organized into [`Group`]s. Each group is a
//! subtree owned by exactly one chart instance (with an optional clip region). Callers
//! describe the complete content of a group every frame with [`Scene::tick_group`] and
//! receive [`MarkDiff`]s (`Enter` / `Update` / `Exit`) that a backend (SVG, GPU, DOM) applies.
//!
//! Text shaping is out of scope; text marks store unshaped strings.

mod id;
mod mark;
mod scene;

pub use id::{GroupId, MarkId};
pub use mark::{Mark, MarkKind, MarkPayload, PathMark, RectMark, TextAnchor, TextBaseline, TextMark};
pub use scene::{Group, MarkDiff, Scene, SceneError};
