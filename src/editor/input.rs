//! Pointer and keyboard events from the render surface.
//!
//! Click handling depends on the editor mode: in the all-masks view a click
//! navigates into group mode, in group mode it selects and focuses, and in
//! reassign mode modifier clicks build up a multi-selection that is moved
//! through the group picker.

use super::{AnnotationEditor, EditorMode};
use crate::constants::{POPOVER_HEIGHT, POPOVER_OFFSET, POPOVER_VIEWPORT_MARGIN, POPOVER_WIDTH};
use crate::keybindings::{KeyCode, Shortcut};
use crate::model::{BoundingBox, GroupId, MaskId, Point};

pub use crate::keybindings::Modifiers;

/// What choosing a group in the picker does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerPurpose {
    /// Move the selected masks into the chosen group
    Reassign,
    /// Turn the staged outlines into a mask of the chosen group
    FileDrawing,
}

/// Transient popup shown over the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Overlay {
    /// Group list used to reassign the selection or file a drawn mask
    GroupPicker {
        purpose: PickerPurpose,
        /// Cursor position that opened the picker
        anchor: Point,
        /// Top-left corner after viewport placement
        position: Point,
    },
    /// Right-click menu for the selection
    ContextMenu { position: Point },
}

/// Entries of the selection context menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextMenuChoice {
    /// Open the group picker where the menu was
    ChangeGroup,
    DeleteSelected,
}

/// Place the group picker next to `anchor`, flipping sides to stay inside
/// `viewport` (width, height).
pub fn place_popover(anchor: Point, viewport: Option<(f32, f32)>) -> Point {
    let mut x = anchor.x + POPOVER_OFFSET;
    let mut y = anchor.y + POPOVER_OFFSET;

    let Some((width, height)) = viewport else {
        return Point::new(x, y);
    };

    if x + POPOVER_WIDTH > width - POPOVER_VIEWPORT_MARGIN {
        x = anchor.x - POPOVER_OFFSET - POPOVER_WIDTH;
    }
    if y + POPOVER_HEIGHT > height - POPOVER_VIEWPORT_MARGIN {
        y = anchor.y - POPOVER_OFFSET - POPOVER_HEIGHT;
    }

    Point::new(
        x.max(POPOVER_VIEWPORT_MARGIN),
        y.max(POPOVER_VIEWPORT_MARGIN),
    )
}

impl AnnotationEditor {
    /// Record the render surface size used for popup placement.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.viewport = Some((width, height));
    }

    /// Handle a click on a mask.
    ///
    /// Returns false for unknown masks, which are ignored.
    pub fn handle_mask_click(&mut self, id: &MaskId, modifiers: Modifiers, cursor: Point) -> bool {
        let Some(mask) = self.data.mask(id) else {
            log::debug!("Ignoring click on unknown mask {}", id);
            return false;
        };
        let live_group = self.data.group_of(mask).map(|g| g.id.clone());

        match (self.mode, self.reassign_mode) {
            (EditorMode::All, _) => {
                self.set_mode(EditorMode::Group);
                self.active_group = live_group;
                self.toggle_selection(id, false);
            }
            (EditorMode::Group, false) => {
                self.toggle_selection(id, false);
                self.active_group = live_group;
            }
            (EditorMode::Group, true) => {
                if modifiers.command() {
                    self.add_to_selection(id);
                    self.open_group_picker(cursor);
                } else if modifiers.shift {
                    self.toggle_selection(id, true);
                } else {
                    self.toggle_selection(id, false);
                }
            }
        }
        true
    }

    /// Handle a click on empty canvas.
    ///
    /// Closes any popup. In reassign mode the selection is cleared too.
    pub fn handle_background_click(&mut self) -> bool {
        let mut changed = self.overlay.take().is_some();
        if self.reassign_mode && !self.selection.is_empty() {
            self.clear_selection();
            changed = true;
        }
        changed
    }

    /// Handle the end of a drag-select gesture drawn by the render surface.
    pub fn handle_drag_select_complete(&mut self, area: BoundingBox) -> usize {
        self.drag_select = None;
        self.select_within_box(area)
    }

    /// Open the group picker at `cursor` to reassign the selection.
    pub fn open_group_picker(&mut self, cursor: Point) -> Overlay {
        self.show_picker(PickerPurpose::Reassign, cursor)
    }

    /// Open the group picker at `cursor` to file the staged outlines.
    ///
    /// Nothing opens while no drawing is staged.
    pub fn open_drawing_picker(&mut self, cursor: Point) -> Option<Overlay> {
        self.pending_polygons.as_ref()?;
        Some(self.show_picker(PickerPurpose::FileDrawing, cursor))
    }

    fn show_picker(&mut self, purpose: PickerPurpose, cursor: Point) -> Overlay {
        let overlay = Overlay::GroupPicker {
            purpose,
            anchor: cursor,
            position: place_popover(cursor, self.viewport),
        };
        log::debug!(
            "📋 Group picker ({:?}) opened at ({:.0}, {:.0})",
            purpose,
            cursor.x,
            cursor.y
        );
        self.overlay = Some(overlay);
        overlay
    }

    /// Open the context menu for the current selection.
    ///
    /// Nothing opens while the selection is empty.
    pub fn open_context_menu(&mut self, cursor: Point) -> Option<Overlay> {
        if self.selection.is_empty() {
            return None;
        }
        let overlay = Overlay::ContextMenu { position: cursor };
        self.overlay = Some(overlay);
        Some(overlay)
    }

    /// Act on a context menu entry. Requires the context menu to be open.
    pub fn choose_context_action(&mut self, choice: ContextMenuChoice) -> bool {
        let Some(Overlay::ContextMenu { position }) = self.overlay else {
            return false;
        };
        match choice {
            ContextMenuChoice::ChangeGroup => {
                self.open_group_picker(position);
                true
            }
            ContextMenuChoice::DeleteSelected => {
                self.overlay = None;
                self.delete_selection() > 0
            }
        }
    }

    /// Choose a group in the open picker.
    ///
    /// What happens depends on why the picker was opened; the picker closes
    /// either way. Without an open picker this does nothing.
    pub fn pick_group(&mut self, group_id: &GroupId) -> bool {
        let Some(Overlay::GroupPicker { purpose, .. }) = self.overlay else {
            log::debug!("Ignoring group pick without an open picker");
            return false;
        };
        self.overlay = None;
        match purpose {
            PickerPurpose::Reassign => self.assign_selection_to_group(group_id) > 0,
            PickerPurpose::FileDrawing => self.commit_pending_mask(group_id).is_some(),
        }
    }

    /// Translate a key press through the configured bindings.
    pub fn shortcut_for_key(&self, key: KeyCode, modifiers: Modifiers) -> Option<Shortcut> {
        self.keybindings.shortcut_for(key, modifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popover_default_side() {
        let pos = place_popover(Point::new(100.0, 100.0), Some((1000.0, 800.0)));
        assert_eq!(pos, Point::new(110.0, 110.0));
    }

    #[test]
    fn test_popover_flips_near_edges() {
        let pos = place_popover(Point::new(900.0, 700.0), Some((1000.0, 800.0)));
        assert_eq!(pos, Point::new(900.0 - 10.0 - 248.0, 700.0 - 10.0 - 340.0));
    }

    #[test]
    fn test_popover_clamped_to_margin() {
        let pos = place_popover(Point::new(50.0, 50.0), Some((200.0, 200.0)));
        assert_eq!(pos, Point::new(8.0, 8.0));
    }

    #[test]
    fn test_popover_without_viewport() {
        let pos = place_popover(Point::new(5.0, 5.0), None);
        assert_eq!(pos, Point::new(15.0, 15.0));
    }
}
