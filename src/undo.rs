//! Undo/Redo system for group and mask edits.
//!
//! Each undoable edit is recorded as a Command holding just enough data to
//! reverse it, rather than a copy of the whole annotation set. The history is
//! linear: recording a command after an undo discards the redo branch.

use crate::model::{AnnotationSet, Group, GroupId, Mask, MaskId};

// ============================================================================
// Command Types
// ============================================================================

/// A command that can be undone and redone.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// A group was created
    AddGroup {
        /// The group that was added
        group: Group,
    },
    /// A group's name, code, color or type changed
    UpdateGroup {
        /// The group before the edit
        old: Group,
        /// The group after the edit
        new: Group,
    },
    /// A group was deleted and its masks unassigned
    RemoveGroup {
        /// The group that was removed (stored for undo)
        group: Group,
        /// Masks that referenced the group at deletion time
        unassigned: Vec<MaskId>,
    },
    /// Masks were moved into a group
    ReassignMasks {
        /// Target group
        group_id: GroupId,
        /// Each affected mask with its previous group reference
        previous: Vec<(MaskId, Option<GroupId>)>,
    },
    /// Masks were deleted
    RemoveMasks {
        /// Removed masks with their index at removal time, ascending
        removed: Vec<(usize, Mask)>,
    },
    /// A drawn mask was committed
    AddMask {
        /// The mask that was appended
        mask: Mask,
    },
}

impl Command {
    /// Get a human-readable description of this command
    pub fn description(&self) -> String {
        match self {
            Command::AddGroup { group } => format!("Create group '{}'", group.name),
            Command::UpdateGroup { new, .. } => format!("Edit group '{}'", new.name),
            Command::RemoveGroup { group, .. } => format!("Delete group '{}'", group.name),
            Command::ReassignMasks { previous, .. } => match previous.len() {
                1 => "Change group of 1 mask".to_string(),
                n => format!("Change group of {} masks", n),
            },
            Command::RemoveMasks { removed } => match removed.len() {
                1 => "Delete 1 mask".to_string(),
                n => format!("Delete {} masks", n),
            },
            Command::AddMask { .. } => "Add drawn mask".to_string(),
        }
    }
}

// ============================================================================
// Undo Stack
// ============================================================================

/// Configuration for the undo stack
#[derive(Debug, Clone)]
pub struct UndoConfig {
    /// Maximum number of commands to keep in history
    pub max_history: usize,
}

impl Default for UndoConfig {
    fn default() -> Self {
        Self {
            max_history: crate::constants::DEFAULT_HISTORY_LIMIT,
        }
    }
}

/// The undo/redo history stack.
///
/// Maintains two stacks:
/// - `undo_stack`: Commands that can be undone (most recent at the end)
/// - `redo_stack`: Commands that can be redone (most recent at the end)
///
/// Viewed as a list of states, the history has `undo_count + redo_count + 1`
/// entries and the current state sits at index `undo_count`.
#[derive(Debug, Clone, Default)]
pub struct UndoStack {
    /// Stack of commands that can be undone
    undo_stack: Vec<Command>,
    /// Stack of commands that can be redone
    redo_stack: Vec<Command>,
    /// Configuration
    config: UndoConfig,
}

impl UndoStack {
    /// Create a new empty undo stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom configuration
    pub fn with_config(config: UndoConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// Change the history limit, dropping the oldest commands if needed.
    pub fn set_max_history(&mut self, max_history: usize) {
        self.config.max_history = max_history;
        self.trim();
    }

    /// Push a command to the undo stack.
    /// This clears the redo stack (can't redo after a new action).
    pub fn push(&mut self, command: Command) {
        log::debug!("📝 Undo: pushed '{}'", command.description());
        self.undo_stack.push(command);
        self.redo_stack.clear();
        self.trim();
    }

    fn trim(&mut self) {
        if self.undo_stack.len() > self.config.max_history {
            let excess = self.undo_stack.len() - self.config.max_history;
            self.undo_stack.drain(..excess);
        }
    }

    /// Check if undo is available
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Check if redo is available
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Pop a command from the undo stack for undoing.
    /// The command is moved to the redo stack.
    pub fn pop_undo(&mut self) -> Option<&Command> {
        let cmd = self.undo_stack.pop()?;
        log::debug!("⏪ Undo: '{}'", cmd.description());
        self.redo_stack.push(cmd);
        self.redo_stack.last()
    }

    /// Pop a command from the redo stack for redoing.
    /// The command is moved back to the undo stack.
    pub fn pop_redo(&mut self) -> Option<&Command> {
        let cmd = self.redo_stack.pop()?;
        log::debug!("⏩ Redo: '{}'", cmd.description());
        self.undo_stack.push(cmd);
        self.undo_stack.last()
    }

    /// Get the description of the command that would be undone
    pub fn undo_description(&self) -> Option<String> {
        self.undo_stack.last().map(Command::description)
    }

    /// Get the description of the command that would be redone
    pub fn redo_description(&self) -> Option<String> {
        self.redo_stack.last().map(Command::description)
    }

    /// Clear all history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        log::debug!("🗑️ Undo history cleared");
    }

    /// Get the number of commands in undo history
    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    /// Get the number of commands in redo history
    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Number of states reachable through undo/redo, current one included.
    pub fn state_count(&self) -> usize {
        self.undo_stack.len() + self.redo_stack.len() + 1
    }

    /// Index of the current state within `0..len()`.
    pub fn position(&self) -> usize {
        self.undo_stack.len()
    }
}

// ============================================================================
// Undo/Redo Execution
// ============================================================================

/// Undo the most recent command against the annotation set.
/// Returns true if something was undone.
pub fn undo_command(stack: &mut UndoStack, data: &mut AnnotationSet) -> bool {
    let Some(cmd) = stack.pop_undo() else {
        return false;
    };

    apply_undo(cmd, data);
    true
}

/// Redo the most recently undone command.
/// Returns true if something was redone.
pub fn redo_command(stack: &mut UndoStack, data: &mut AnnotationSet) -> bool {
    let Some(cmd) = stack.pop_redo() else {
        return false;
    };

    apply_redo(cmd, data);
    true
}

/// Reverse the effect of a command
fn apply_undo(cmd: &Command, data: &mut AnnotationSet) {
    match cmd {
        Command::AddGroup { group } => {
            data.groups.remove(&group.id);
        }
        Command::UpdateGroup { old, .. } => {
            data.groups.insert(old.id.clone(), old.clone());
        }
        Command::RemoveGroup { group, unassigned } => {
            data.groups.insert(group.id.clone(), group.clone());
            for mask_id in unassigned {
                data.set_mask_group(mask_id, Some(group.id.clone()));
            }
        }
        Command::ReassignMasks { previous, .. } => {
            for (mask_id, old_group) in previous {
                data.set_mask_group(mask_id, old_group.clone());
            }
        }
        Command::RemoveMasks { removed } => {
            // Ascending order rebuilds the original positions
            for (index, mask) in removed {
                data.insert_mask(*index, mask.clone());
            }
        }
        Command::AddMask { mask } => {
            data.remove_mask(&mask.id);
        }
    }
}

/// Re-apply the effect of a command
fn apply_redo(cmd: &Command, data: &mut AnnotationSet) {
    match cmd {
        Command::AddGroup { group } => {
            data.groups.insert(group.id.clone(), group.clone());
        }
        Command::UpdateGroup { new, .. } => {
            data.groups.insert(new.id.clone(), new.clone());
        }
        Command::RemoveGroup { group, unassigned } => {
            data.groups.remove(&group.id);
            for mask_id in unassigned {
                data.set_mask_group(mask_id, None);
            }
        }
        Command::ReassignMasks { group_id, previous } => {
            for (mask_id, _) in previous {
                data.set_mask_group(mask_id, Some(group_id.clone()));
            }
        }
        Command::RemoveMasks { removed } => {
            for (_, mask) in removed {
                data.remove_mask(&mask.id);
            }
        }
        Command::AddMask { mask } => {
            data.masks.push(mask.clone());
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Polygon;

    fn group(id: &str) -> Group {
        Group::new(GroupId::new(id), id, [10, 20, 30])
    }

    fn mask(id: &str) -> Mask {
        Mask::new(
            MaskId::new(id),
            vec![Polygon::from_coords(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0)])],
        )
    }

    #[test]
    fn test_undo_stack_basic() {
        let mut stack = UndoStack::new();
        assert!(!stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!((stack.state_count(), stack.position()), (1, 0));

        stack.push(Command::AddGroup { group: group("g1") });
        assert!(stack.can_undo());
        assert!(!stack.can_redo());
        assert_eq!((stack.state_count(), stack.position()), (2, 1));

        assert!(stack.pop_undo().is_some());
        assert!(!stack.can_undo());
        assert!(stack.can_redo());
        assert_eq!((stack.state_count(), stack.position()), (2, 0));

        assert!(stack.pop_redo().is_some());
        assert!(stack.can_undo());
        assert!(!stack.can_redo());
    }

    #[test]
    fn test_push_clears_redo() {
        let mut stack = UndoStack::new();

        stack.push(Command::AddGroup { group: group("g1") });
        stack.pop_undo();
        assert!(stack.can_redo());

        stack.push(Command::AddGroup { group: group("g2") });
        assert!(!stack.can_redo());
        assert_eq!(stack.state_count(), 2);
    }

    #[test]
    fn test_max_history() {
        let mut stack = UndoStack::with_config(UndoConfig { max_history: 3 });

        for i in 0..5 {
            stack.push(Command::AddGroup {
                group: group(&format!("g{i}")),
            });
        }

        assert_eq!(stack.undo_count(), 3);
        assert_eq!(
            stack.undo_description().as_deref(),
            Some("Create group 'g4'")
        );

        stack.set_max_history(1);
        assert_eq!(stack.undo_count(), 1);
    }

    #[test]
    fn test_remove_masks_restores_order() {
        let mut data = AnnotationSet::new();
        data.masks = vec![mask("a"), mask("b"), mask("c"), mask("d")];
        let original = data.clone();

        // Remove back to front so recorded indices match the original list
        let d = data.remove_mask(&MaskId::new("d")).expect("d present");
        let b = data.remove_mask(&MaskId::new("b")).expect("b present");
        assert_eq!((b.0, d.0), (1, 3));
        let removed = vec![b, d];
        let mut stack = UndoStack::new();
        stack.push(Command::RemoveMasks { removed });

        assert!(undo_command(&mut stack, &mut data));
        assert_eq!(data, original);

        assert!(redo_command(&mut stack, &mut data));
        let ids: Vec<&str> = data.masks.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["a", "c"]);
    }

    #[test]
    fn test_remove_group_round_trip() {
        let mut data = AnnotationSet::new();
        data.groups.insert(GroupId::new("g1"), group("g1"));
        data.masks = vec![mask("a").with_group(GroupId::new("g1")), mask("b")];
        let original = data.clone();

        let removed = data.groups.remove(&GroupId::new("g1")).expect("g1 present");
        data.set_mask_group(&MaskId::new("a"), None);
        let mut stack = UndoStack::new();
        stack.push(Command::RemoveGroup {
            group: removed,
            unassigned: vec![MaskId::new("a")],
        });

        assert!(undo_command(&mut stack, &mut data));
        assert_eq!(data, original);
        assert!(redo_command(&mut stack, &mut data));
        assert!(data.groups.is_empty());
        assert_eq!(data.masks[0].group_id, None);
    }

    #[test]
    fn test_undo_on_empty_stack_is_noop() {
        let mut stack = UndoStack::new();
        let mut data = AnnotationSet::new();
        assert!(!undo_command(&mut stack, &mut data));
        assert!(!redo_command(&mut stack, &mut data));
    }

    #[test]
    fn test_command_descriptions() {
        let reassign = Command::ReassignMasks {
            group_id: GroupId::new("g1"),
            previous: vec![(MaskId::new("a"), None), (MaskId::new("b"), None)],
        };
        assert_eq!(reassign.description(), "Change group of 2 masks");

        let remove = Command::RemoveMasks {
            removed: vec![(0, mask("a"))],
        };
        assert_eq!(remove.description(), "Delete 1 mask");

        assert_eq!(
            Command::AddMask { mask: mask("a") }.description(),
            "Add drawn mask"
        );
    }
}
