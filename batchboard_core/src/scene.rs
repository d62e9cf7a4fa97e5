// Copyright 2025 the Batchboard Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The retained scene and its diff protocol.

use hashbrown::HashMap;
use kurbo::{Point, Rect};

use crate::{GroupId, Mark, MarkId, MarkKind, MarkPayload};

/// Errors returned by [`Scene`] structure operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SceneError {
    /// A group with this id already exists.
    #[error("group {0:?} already exists")]
    DuplicateGroup(GroupId),
    /// The group does not exist.
    #[error("group {0:?} does not exist")]
    MissingGroup(GroupId),
}

/// A scene subtree: one layer of one chart.
#[derive(Clone, Debug, PartialEq)]
pub struct Group {
    /// Class name, used by backends for styling and debugging.
    pub class: String,
    /// Optional clip region; marks are neither painted nor hit outside it.
    pub clip: Option<Rect>,
    /// Group ordering; renderers paint groups by `(z_index, id)`.
    pub z_index: i32,
}

impl Group {
    /// Creates an unclipped group.
    pub fn new(class: impl Into<String>) -> Self {
        Self {
            class: class.into(),
            clip: None,
            z_index: 0,
        }
    }

    /// Sets the clip region.
    pub fn with_clip(mut self, clip: Rect) -> Self {
        self.clip = Some(clip);
        self
    }

    /// Sets the group z-index.
    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }
}

/// A change to apply to a backend.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkDiff {
    /// A mark appeared.
    Enter {
        /// Mark id.
        id: MarkId,
        /// Owning group.
        group: GroupId,
        /// Mark kind.
        kind: MarkKind,
        /// Render order.
        z_index: i32,
        /// Geometric bounds, if any.
        bounds: Option<Rect>,
        /// New payload.
        new: Box<MarkPayload>,
    },
    /// A mark changed.
    Update {
        /// Mark id.
        id: MarkId,
        /// Owning group.
        group: GroupId,
        /// Mark kind (after the update).
        kind: MarkKind,
        /// Render order after the update.
        new_z_index: i32,
        /// Bounds before the update.
        old_bounds: Option<Rect>,
        /// Bounds after the update.
        new_bounds: Option<Rect>,
        /// New payload.
        new: Box<MarkPayload>,
    },
    /// A mark was removed.
    Exit {
        /// Mark id.
        id: MarkId,
        /// Owning group.
        group: GroupId,
        /// Mark kind.
        kind: MarkKind,
        /// Bounds at removal.
        bounds: Option<Rect>,
    },
}

impl MarkDiff {
    /// Returns the id of the affected mark.
    pub fn id(&self) -> MarkId {
        match self {
            Self::Enter { id, .. } | Self::Update { id, .. } | Self::Exit { id, .. } => *id,
        }
    }
}

#[derive(Clone, Debug)]
struct Slot {
    group: GroupId,
    mark: Mark,
}

/// A retained set of groups and marks.
#[derive(Debug, Default)]
pub struct Scene {
    groups: HashMap<GroupId, Group>,
    marks: HashMap<MarkId, Slot>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a new group. Fails if the id is taken.
    pub fn insert_group(&mut self, id: GroupId, group: Group) -> Result<(), SceneError> {
        if self.groups.contains_key(&id) {
            return Err(SceneError::DuplicateGroup(id));
        }
        self.groups.insert(id, group);
        Ok(())
    }

    /// Returns `true` if the group exists.
    pub fn has_group(&self, id: GroupId) -> bool {
        self.groups.contains_key(&id)
    }

    /// Returns a group by id.
    pub fn group(&self, id: GroupId) -> Option<&Group> {
        self.groups.get(&id)
    }

    /// Replaces the clip region of a group.
    pub fn set_clip(&mut self, id: GroupId, clip: Option<Rect>) -> Result<(), SceneError> {
        let group = self.groups.get_mut(&id).ok_or(SceneError::MissingGroup(id))?;
        group.clip = clip;
        Ok(())
    }

    /// Returns all groups sorted by `(z_index, id)`.
    pub fn groups(&self) -> Vec<(GroupId, &Group)> {
        let mut out: Vec<_> = self.groups.iter().map(|(id, g)| (*id, g)).collect();
        out.sort_by_key(|(id, g)| (g.z_index, *id));
        out
    }

    /// Removes a group and all of its marks, returning `Exit` diffs for them.
    pub fn remove_group(&mut self, id: GroupId) -> Result<Vec<MarkDiff>, SceneError> {
        if self.groups.remove(&id).is_none() {
            return Err(SceneError::MissingGroup(id));
        }
        let mut gone: Vec<MarkId> = self
            .marks
            .iter()
            .filter(|(_, slot)| slot.group == id)
            .map(|(mark_id, _)| *mark_id)
            .collect();
        gone.sort();
        Ok(gone
            .into_iter()
            .filter_map(|mark_id| self.marks.remove(&mark_id))
            .map(|slot| exit_diff(&slot))
            .collect())
    }

    /// Replaces the complete content of a group.
    ///
    /// Marks of the group that are absent from `marks` exit; new ids enter; ids whose
    /// payload, key, or z-index changed update. Unchanged marks produce no diff. Diffs are
    /// ordered by mark id (exits first).
    pub fn tick_group(
        &mut self,
        group: GroupId,
        marks: impl IntoIterator<Item = Mark>,
    ) -> Result<Vec<MarkDiff>, SceneError> {
        if !self.groups.contains_key(&group) {
            return Err(SceneError::MissingGroup(group));
        }

        let mut incoming: Vec<Mark> = marks.into_iter().collect();
        incoming.sort_by_key(|m| m.id);
        incoming.dedup_by_key(|m| m.id);

        let mut stale: Vec<MarkId> = self
            .marks
            .iter()
            .filter(|(id, slot)| {
                slot.group == group && incoming.binary_search_by_key(*id, |m| m.id).is_err()
            })
            .map(|(id, _)| *id)
            .collect();
        stale.sort();

        let mut diffs = Vec::new();
        for id in stale {
            if let Some(slot) = self.marks.remove(&id) {
                diffs.push(exit_diff(&slot));
            }
        }

        for mark in incoming {
            let id = mark.id;
            match self.marks.get_mut(&id) {
                Some(slot) => {
                    if slot.group == group && slot.mark == mark {
                        continue;
                    }
                    let old_bounds = slot.mark.payload.bounds();
                    diffs.push(MarkDiff::Update {
                        id,
                        group,
                        kind: mark.kind(),
                        new_z_index: mark.z_index,
                        old_bounds,
                        new_bounds: mark.payload.bounds(),
                        new: Box::new(mark.payload.clone()),
                    });
                    slot.group = group;
                    slot.mark = mark;
                }
                None => {
                    diffs.push(MarkDiff::Enter {
                        id,
                        group,
                        kind: mark.kind(),
                        z_index: mark.z_index,
                        bounds: mark.payload.bounds(),
                        new: Box::new(mark.payload.clone()),
                    });
                    self.marks.insert(id, Slot { group, mark });
                }
            }
        }

        Ok(diffs)
    }

    /// Returns a mark by id.
    pub fn mark(&self, id: MarkId) -> Option<&Mark> {
        self.marks.get(&id).map(|slot| &slot.mark)
    }

    /// Returns the marks of a group sorted by `(z_index, id)`.
    pub fn marks_in(&self, group: GroupId) -> Vec<&Mark> {
        let mut out: Vec<&Mark> = self
            .marks
            .values()
            .filter(|slot| slot.group == group)
            .map(|slot| &slot.mark)
            .collect();
        out.sort_by_key(|m| (m.z_index, m.id));
        out
    }

    /// Returns the number of marks in the scene.
    pub fn mark_count(&self) -> usize {
        self.marks.len()
    }

    /// Returns the topmost mark containing `pt`, honoring group clips and paint order.
    pub fn hit_test(&self, pt: Point) -> Option<&Mark> {
        let mut best: Option<(i32, i32, MarkId, &Mark)> = None;
        for slot in self.marks.values() {
            let Some(group) = self.groups.get(&slot.group) else {
                continue;
            };
            if group.clip.is_some_and(|clip| !clip.contains(pt)) {
                continue;
            }
            if !slot.mark.payload.contains(pt) {
                continue;
            }
            let rank = (group.z_index, slot.mark.z_index, slot.mark.id);
            if best.is_none_or(|(gz, z, id, _)| rank > (gz, z, id)) {
                best = Some((rank.0, rank.1, rank.2, &slot.mark));
            }
        }
        best.map(|(_, _, _, mark)| mark)
    }
}

fn exit_diff(slot: &Slot) -> MarkDiff {
    MarkDiff::Exit {
        id: slot.mark.id,
        group: slot.group,
        kind: slot.mark.kind(),
        bounds: slot.mark.payload.bounds(),
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Rect;

    use super::*;

    fn unit_rect(id: u64, x: f64) -> Mark {
        Mark::rect(MarkId(id), Rect::new(x, 0.0, x + 10.0, 10.0))
    }

    #[test]
    fn tick_group_emits_enter_update_exit() {
        let g = GroupId(1);
        let mut scene = Scene::new();
        scene.insert_group(g, Group::new("areas")).unwrap();

        let diffs = scene.tick_group(g, [unit_rect(1, 0.0), unit_rect(2, 20.0)]).unwrap();
        assert_eq!(diffs.len(), 2);
        assert!(diffs.iter().all(|d| matches!(d, MarkDiff::Enter { .. })));

        // Identical content is a no-op.
        let diffs = scene.tick_group(g, [unit_rect(1, 0.0), unit_rect(2, 20.0)]).unwrap();
        assert!(diffs.is_empty(), "unchanged marks must not diff");

        let diffs = scene.tick_group(g, [unit_rect(2, 30.0), unit_rect(3, 0.0)]).unwrap();
        assert!(matches!(diffs[0], MarkDiff::Exit { id: MarkId(1), .. }));
        assert!(matches!(diffs[1], MarkDiff::Update { id: MarkId(2), .. }));
        assert!(matches!(diffs[2], MarkDiff::Enter { id: MarkId(3), .. }));
    }

    #[test]
    fn groups_are_independent_and_unique() {
        let mut scene = Scene::new();
        scene.insert_group(GroupId(1), Group::new("a")).unwrap();
        scene.insert_group(GroupId(2), Group::new("b")).unwrap();
        assert_eq!(
            scene.insert_group(GroupId(1), Group::new("a")),
            Err(SceneError::DuplicateGroup(GroupId(1)))
        );

        scene.tick_group(GroupId(1), [unit_rect(1, 0.0)]).unwrap();
        scene.tick_group(GroupId(2), [unit_rect(2, 0.0)]).unwrap();
        // Replacing group 2 leaves group 1 alone.
        let diffs = scene.tick_group(GroupId(2), []).unwrap();
        assert_eq!(diffs.len(), 1);
        assert!(scene.mark(MarkId(1)).is_some());

        let diffs = scene.remove_group(GroupId(1)).unwrap();
        assert_eq!(diffs.len(), 1);
        assert_eq!(scene.mark_count(), 0);
    }

    #[test]
    fn hit_test_prefers_topmost_and_respects_clip() {
        let mut scene = Scene::new();
        scene
            .insert_group(
                GroupId(1),
                Group::new("clipped").with_clip(Rect::new(0.0, 0.0, 5.0, 5.0)),
            )
            .unwrap();
        scene.insert_group(GroupId(2), Group::new("free")).unwrap();
        scene
            .tick_group(
                GroupId(1),
                [unit_rect(1, 0.0).with_key("low"), unit_rect(2, 0.0).with_key("high").with_z_index(5)],
            )
            .unwrap();

        let hit = scene.hit_test(Point::new(2.0, 2.0)).unwrap();
        assert_eq!(hit.key.as_deref(), Some("high"));
        // Outside the clip region nothing in group 1 is hit.
        assert!(scene.hit_test(Point::new(8.0, 2.0)).is_none());

        scene.tick_group(GroupId(2), [unit_rect(3, 0.0).with_key("free")]).unwrap();
        assert_eq!(
            scene.hit_test(Point::new(8.0, 2.0)).and_then(|m| m.key.as_deref()),
            Some("free")
        );
    }
}
