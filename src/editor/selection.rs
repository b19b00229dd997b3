//! Mask selection. Selection is never part of undo history.

use super::AnnotationEditor;
use crate::model::{BoundingBox, MaskId, Point};

impl AnnotationEditor {
    /// Select a mask.
    ///
    /// Non-additive selection replaces the selection with just this mask;
    /// additive selection toggles its membership. Unknown ids are ignored.
    pub fn toggle_selection(&mut self, id: &MaskId, additive: bool) -> bool {
        if !self.data.contains_mask(id) {
            log::debug!("Ignoring selection of unknown mask {}", id);
            return false;
        }

        if !additive {
            self.selection.clear();
            self.selection.insert(id.clone());
        } else if !self.selection.remove(id) {
            self.selection.insert(id.clone());
        }
        log::debug!("🔍 Selection: {} masks", self.selection.len());
        true
    }

    /// Add a mask to the selection if it is not already selected.
    pub fn add_to_selection(&mut self, id: &MaskId) -> bool {
        if !self.data.contains_mask(id) {
            return false;
        }
        self.selection.insert(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            log::debug!("🔍 Selection cleared");
        }
        self.selection.clear();
    }

    /// Replace the selection with every mask lying entirely inside `area`.
    ///
    /// A mask is tested by the bounding box of all its points; a mask that
    /// only partly overlaps the area is not selected. Returns the number of
    /// selected masks.
    pub fn select_within_box(&mut self, area: BoundingBox) -> usize {
        self.selection = self
            .data
            .masks
            .iter()
            .filter(|mask| {
                mask.bounding_box()
                    .is_some_and(|bbox| area.contains_box(&bbox))
            })
            .map(|mask| mask.id.clone())
            .collect();
        log::debug!("🔲 Box selected {} masks", self.selection.len());
        self.selection.len()
    }

    /// Start a drag-select box at `point`.
    pub fn begin_drag_select(&mut self, point: Point) {
        self.drag_select = Some((point, point));
    }

    /// Move the free corner of the drag-select box.
    pub fn update_drag_select(&mut self, point: Point) {
        if let Some((_, end)) = self.drag_select.as_mut() {
            *end = point;
        }
    }

    /// Finish the drag and select what the box contains.
    ///
    /// Returns None when no drag was in progress.
    pub fn complete_drag_select(&mut self) -> Option<usize> {
        let (start, end) = self.drag_select.take()?;
        Some(self.select_within_box(BoundingBox::from_corners(start, end)))
    }
}
