//! The undoable part of editor state: the group registry and mask collection.

use std::collections::BTreeMap;

use super::group::{Group, GroupId};
use super::mask::{Mask, MaskId};

/// Groups keyed by id plus the ordered mask collection.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationSet {
    /// Group registry
    pub groups: BTreeMap<GroupId, Group>,
    /// Masks in draw order
    pub masks: Vec<Mask>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.groups.get(id)
    }

    pub fn mask(&self, id: &MaskId) -> Option<&Mask> {
        self.masks.iter().find(|m| &m.id == id)
    }

    pub fn mask_mut(&mut self, id: &MaskId) -> Option<&mut Mask> {
        self.masks.iter_mut().find(|m| &m.id == id)
    }

    pub fn contains_mask(&self, id: &MaskId) -> bool {
        self.mask(id).is_some()
    }

    /// Remove a mask by id, returning its former index and value.
    pub fn remove_mask(&mut self, id: &MaskId) -> Option<(usize, Mask)> {
        let index = self.masks.iter().position(|m| &m.id == id)?;
        Some((index, self.masks.remove(index)))
    }

    /// Re-insert a mask at a former index (clamped to the current length).
    pub fn insert_mask(&mut self, index: usize, mask: Mask) {
        let index = index.min(self.masks.len());
        self.masks.insert(index, mask);
    }

    /// Set the group reference of a mask; unknown ids are ignored.
    pub fn set_mask_group(&mut self, id: &MaskId, group_id: Option<GroupId>) {
        if let Some(mask) = self.mask_mut(id) {
            mask.group_id = group_id;
        }
    }

    /// Resolve a mask's group, treating dangling references as unassigned.
    pub fn group_of(&self, mask: &Mask) -> Option<&Group> {
        mask.group_id.as_ref().and_then(|id| self.groups.get(id))
    }
}
