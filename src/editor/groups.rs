//! Group registry operations.

use super::{AnnotationEditor, EditorMode};
use crate::constants::{DEFAULT_GROUP_NAME, QUICK_GROUP_COLOR};
use crate::error::ValidationError;
use crate::model::{Group, GroupDraft, GroupId, Mask};
use crate::undo::Command;

impl AnnotationEditor {
    /// Create a group from user input.
    ///
    /// Name and code are trimmed and must both be non-empty. On success the
    /// group becomes active and the editor switches to group mode.
    pub fn create_group(&mut self, draft: GroupDraft) -> Result<GroupId, ValidationError> {
        draft.validate()?;
        let id = self.allocate_group_id();
        let group = draft.into_group(id.clone())?;
        log::info!("✅ Created group '{}' ({})", group.name, id);
        self.insert_new_group(group);
        Ok(id)
    }

    /// Quick-create a placeholder group ("New Group", no code, default color).
    ///
    /// Always succeeds; rename it afterwards with [`Self::update_group`].
    pub fn create_default_group(&mut self) -> GroupId {
        let id = self.allocate_group_id();
        let group = Group::new(id.clone(), DEFAULT_GROUP_NAME, QUICK_GROUP_COLOR);
        log::info!("✅ Created placeholder group {}", id);
        self.insert_new_group(group);
        id
    }

    fn insert_new_group(&mut self, group: Group) {
        let id = group.id.clone();
        self.data.groups.insert(id.clone(), group.clone());
        self.active_group = Some(id);
        self.set_mode(EditorMode::Group);
        self.record(Command::AddGroup { group });
    }

    /// Replace an existing group's fields.
    ///
    /// Name and code are trimmed and the name must stay non-empty. Returns
    /// `Ok(false)` without recording anything when no group has that id.
    pub fn update_group(&mut self, mut group: Group) -> Result<bool, ValidationError> {
        group.normalize()?;
        let Some(old) = self.data.groups.get(&group.id).cloned() else {
            log::debug!("Ignoring update of unknown group {}", group.id);
            return Ok(false);
        };
        log::info!("✏️ Updated group '{}' ({})", group.name, group.id);
        self.data.groups.insert(group.id.clone(), group.clone());
        self.record(Command::UpdateGroup { old, new: group });
        Ok(true)
    }

    /// Delete a group and unassign (not delete) every mask that used it.
    ///
    /// Recorded as a single undo step. Unknown ids are ignored.
    pub fn delete_group(&mut self, id: &GroupId) -> bool {
        let Some(group) = self.data.groups.remove(id) else {
            log::debug!("Ignoring deletion of unknown group {}", id);
            return false;
        };

        let mut unassigned = Vec::new();
        for mask in self.data.masks.iter_mut().filter(|m| m.belongs_to(id)) {
            mask.group_id = None;
            unassigned.push(mask.id.clone());
        }

        if self.active_group.as_ref() == Some(id) {
            self.active_group = None;
        }

        log::info!(
            "🗑️ Deleted group '{}', unassigned {} masks",
            group.name,
            unassigned.len()
        );
        self.record(Command::RemoveGroup { group, unassigned });
        true
    }

    /// Groups whose name or code contains `query`, case-insensitively.
    ///
    /// An empty query matches every group. Results are sorted by name.
    pub fn groups_matching(&self, query: &str) -> Vec<&Group> {
        let query = query.trim().to_lowercase();
        let mut groups: Vec<&Group> = self
            .data
            .groups
            .values()
            .filter(|g| query.is_empty() || g.matches_lowercase(&query))
            .collect();
        groups.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        groups
    }

    /// Masks referencing the given group.
    pub fn masks_in_group(&self, id: &GroupId) -> Vec<&Mask> {
        self.data.masks.iter().filter(|m| m.belongs_to(id)).collect()
    }

    /// Masks with no group or with a reference to a group that no longer exists.
    pub fn unassigned_masks(&self) -> Vec<&Mask> {
        self.data
            .masks
            .iter()
            .filter(|m| self.data.group_of(m).is_none())
            .collect()
    }
}
