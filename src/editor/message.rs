//! Editor messages in the Elm architecture style.
//!
//! Every operation of [`AnnotationEditor`] is reachable as an
//! [`EditorMessage`], so a UI layer can drive the editor through a single
//! `(state, message) -> outcome` reducer.

use super::input::{ContextMenuChoice, Modifiers, Overlay};
use super::{AnnotationEditor, EditorMode};
use crate::document::EditorDocument;
use crate::error::ValidationError;
use crate::keybindings::{KeyCode, Shortcut};
use crate::model::{BoundingBox, Group, GroupDraft, GroupId, MaskId, Point, Polygon};

/// Messages that can be sent to update editor state.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorMessage {
    // Groups
    /// Create a group from dialog input
    CreateGroup(GroupDraft),
    /// Quick-create a placeholder group
    CreateDefaultGroup,
    UpdateGroup(Group),
    DeleteGroup(GroupId),
    /// Focus a group from the group list
    SelectGroup(GroupId),
    ClearActiveGroup,

    // Masks
    AssignMasks {
        mask_ids: Vec<MaskId>,
        group_id: GroupId,
    },
    AssignSelection(GroupId),
    DeleteMasks(Vec<MaskId>),
    DeleteSelection,

    // Drawing
    AddVertex(Point),
    ClosePolygon,
    /// Close the open outline and stage everything drawn
    CompleteDrawing,
    FinishDrawing(Vec<Polygon>),
    CommitPendingMask(GroupId),
    /// Drop drawing, drag box and popups
    Cancel,

    // Selection
    ToggleSelection {
        id: MaskId,
        additive: bool,
    },
    ClearSelection,
    SelectWithinBox(BoundingBox),
    DragSelectStarted(Point),
    DragSelectMoved(Point),
    DragSelectEnded,

    // Mode
    SetMode(EditorMode),
    SetReassignMode(bool),
    ToggleReassignMode,

    // History
    Undo,
    Redo,

    // Render surface events
    MaskClicked {
        id: MaskId,
        modifiers: Modifiers,
        cursor: Point,
    },
    BackgroundClicked,
    DragSelectCompleted(BoundingBox),
    ContextMenuRequested(Point),
    ContextMenuChosen(ContextMenuChoice),
    /// Open the picker to file the staged drawing
    DrawingPickerRequested(Point),
    GroupPicked(GroupId),
    ViewportResized {
        width: f32,
        height: f32,
    },

    // Keyboard
    KeyPressed {
        key: KeyCode,
        modifiers: Modifiers,
    },
    Shortcut(Shortcut),
}

/// What a message did.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing observable changed
    Unchanged,
    Updated,
    GroupCreated(GroupId),
    MaskCreated(MaskId),
    OverlayOpened(Overlay),
    /// The caller should write this document somewhere
    PersistRequested(EditorDocument),
}

impl Outcome {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Updated
        } else {
            Outcome::Unchanged
        }
    }
}

impl AnnotationEditor {
    /// Apply one message.
    ///
    /// Only group creation and update can fail, and they leave the state
    /// untouched when they do.
    pub fn dispatch(&mut self, msg: EditorMessage) -> Result<Outcome, ValidationError> {
        let outcome = match msg {
            EditorMessage::CreateGroup(draft) => Outcome::GroupCreated(self.create_group(draft)?),
            EditorMessage::CreateDefaultGroup => {
                Outcome::GroupCreated(self.create_default_group())
            }
            EditorMessage::UpdateGroup(group) => Outcome::from_changed(self.update_group(group)?),
            EditorMessage::DeleteGroup(id) => Outcome::from_changed(self.delete_group(&id)),
            EditorMessage::SelectGroup(id) => Outcome::from_changed(self.select_group(&id)),
            EditorMessage::ClearActiveGroup => {
                let changed = self.active_group.is_some();
                self.clear_active_group();
                Outcome::from_changed(changed)
            }

            EditorMessage::AssignMasks { mask_ids, group_id } => {
                Outcome::from_changed(self.assign_masks_to_group(&mask_ids, &group_id) > 0)
            }
            EditorMessage::AssignSelection(group_id) => {
                Outcome::from_changed(self.assign_selection_to_group(&group_id) > 0)
            }
            EditorMessage::DeleteMasks(mask_ids) => {
                Outcome::from_changed(self.delete_masks(&mask_ids) > 0)
            }
            EditorMessage::DeleteSelection => Outcome::from_changed(self.delete_selection() > 0),

            EditorMessage::AddVertex(point) => {
                self.add_vertex(point);
                Outcome::Updated
            }
            EditorMessage::ClosePolygon => Outcome::from_changed(self.close_polygon()),
            EditorMessage::CompleteDrawing => Outcome::from_changed(self.complete_drawing()),
            EditorMessage::FinishDrawing(polygons) => {
                Outcome::from_changed(self.finish_drawing(polygons))
            }
            EditorMessage::CommitPendingMask(group_id) => self
                .commit_pending_mask(&group_id)
                .map_or(Outcome::Unchanged, Outcome::MaskCreated),
            EditorMessage::Cancel => Outcome::from_changed(self.cancel()),

            EditorMessage::ToggleSelection { id, additive } => {
                Outcome::from_changed(self.toggle_selection(&id, additive))
            }
            EditorMessage::ClearSelection => {
                let changed = !self.selection.is_empty();
                self.clear_selection();
                Outcome::from_changed(changed)
            }
            EditorMessage::SelectWithinBox(area) => {
                self.select_within_box(area);
                Outcome::Updated
            }
            EditorMessage::DragSelectStarted(point) => {
                self.begin_drag_select(point);
                Outcome::Updated
            }
            EditorMessage::DragSelectMoved(point) => {
                self.update_drag_select(point);
                Outcome::from_changed(self.drag_select.is_some())
            }
            EditorMessage::DragSelectEnded => {
                Outcome::from_changed(self.complete_drag_select().is_some())
            }

            EditorMessage::SetMode(mode) => {
                self.set_mode(mode);
                Outcome::Updated
            }
            EditorMessage::SetReassignMode(enabled) => {
                let before = self.reassign_mode;
                Outcome::from_changed(self.set_reassign_mode(enabled) != before)
            }
            EditorMessage::ToggleReassignMode => {
                let before = self.reassign_mode;
                Outcome::from_changed(self.toggle_reassign_mode() != before)
            }

            EditorMessage::Undo => Outcome::from_changed(self.undo()),
            EditorMessage::Redo => Outcome::from_changed(self.redo()),

            EditorMessage::MaskClicked {
                id,
                modifiers,
                cursor,
            } => {
                let before = self.overlay;
                if !self.handle_mask_click(&id, modifiers, cursor) {
                    Outcome::Unchanged
                } else {
                    self.opened_overlay(before)
                }
            }
            EditorMessage::BackgroundClicked => {
                Outcome::from_changed(self.handle_background_click())
            }
            EditorMessage::DragSelectCompleted(area) => {
                self.handle_drag_select_complete(area);
                Outcome::Updated
            }
            EditorMessage::ContextMenuRequested(cursor) => self
                .open_context_menu(cursor)
                .map_or(Outcome::Unchanged, Outcome::OverlayOpened),
            EditorMessage::ContextMenuChosen(choice) => {
                let before = self.overlay;
                if !self.choose_context_action(choice) {
                    Outcome::Unchanged
                } else {
                    self.opened_overlay(before)
                }
            }
            EditorMessage::DrawingPickerRequested(cursor) => self
                .open_drawing_picker(cursor)
                .map_or(Outcome::Unchanged, Outcome::OverlayOpened),
            EditorMessage::GroupPicked(group_id) => {
                Outcome::from_changed(self.pick_group(&group_id))
            }
            EditorMessage::ViewportResized { width, height } => {
                self.set_viewport(width, height);
                Outcome::Unchanged
            }

            EditorMessage::KeyPressed { key, modifiers } => {
                match self.shortcut_for_key(key, modifiers) {
                    Some(shortcut) => self.handle_shortcut(shortcut),
                    None => Outcome::Unchanged,
                }
            }
            EditorMessage::Shortcut(shortcut) => self.handle_shortcut(shortcut),
        };
        Ok(outcome)
    }

    /// Run a keyboard shortcut.
    pub fn handle_shortcut(&mut self, shortcut: Shortcut) -> Outcome {
        log::debug!("⌨️ Shortcut: {}", shortcut.name());
        match shortcut {
            Shortcut::Undo => Outcome::from_changed(self.undo()),
            Shortcut::Redo => Outcome::from_changed(self.redo()),
            Shortcut::DeleteSelection => Outcome::from_changed(self.delete_selection() > 0),
            Shortcut::Save => Outcome::PersistRequested(self.to_document()),
            Shortcut::Cancel => Outcome::from_changed(self.cancel()),
            Shortcut::ClosePolygon => {
                if !self.drawing.vertices().is_empty() {
                    Outcome::from_changed(self.close_polygon())
                } else {
                    Outcome::from_changed(self.complete_drawing())
                }
            }
        }
    }

    fn opened_overlay(&self, before: Option<Overlay>) -> Outcome {
        match self.overlay {
            Some(overlay) if before != Some(overlay) => Outcome::OverlayOpened(overlay),
            _ => Outcome::Updated,
        }
    }
}
