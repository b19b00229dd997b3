//! Mask operations: bulk reassignment, deletion and two-phase drawing.

use std::collections::BTreeSet;

use super::AnnotationEditor;
use crate::constants::MIN_POLYGON_VERTICES;
use crate::model::{GroupId, Mask, MaskId, MaskSource, Point, Polygon};
use crate::undo::Command;

/// Outline being clicked out on the canvas, plus outlines already closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawingState {
    /// Vertices of the open outline
    vertices: Vec<Point>,
    /// Outlines closed so far for the mask being drawn
    closed: Vec<Polygon>,
}

impl DrawingState {
    /// Check if anything has been drawn.
    pub fn is_drawing(&self) -> bool {
        !self.vertices.is_empty() || !self.closed.is_empty()
    }

    /// Vertices of the open outline, for previews.
    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    /// Outlines already closed.
    pub fn closed(&self) -> &[Polygon] {
        &self.closed
    }

    fn push(&mut self, point: Point) {
        self.vertices.push(point);
    }

    /// Close the open outline if it has enough vertices.
    fn close(&mut self) -> bool {
        if self.vertices.len() < MIN_POLYGON_VERTICES {
            return false;
        }
        let vertices = std::mem::take(&mut self.vertices);
        self.closed.push(Polygon::new(vertices));
        true
    }

    fn take_closed(&mut self) -> Vec<Polygon> {
        std::mem::take(&mut self.closed)
    }

    pub(super) fn clear(&mut self) {
        self.vertices.clear();
        self.closed.clear();
    }
}

impl AnnotationEditor {
    /// Move the given masks into a group and clear the selection.
    ///
    /// Ids that match no mask are skipped, and the group id is not checked
    /// against the registry (a dangling reference renders as unassigned).
    /// Nothing is recorded when no id matched.
    pub fn assign_masks_to_group<'a>(
        &mut self,
        mask_ids: impl IntoIterator<Item = &'a MaskId>,
        group_id: &GroupId,
    ) -> usize {
        let wanted: BTreeSet<&MaskId> = mask_ids.into_iter().collect();
        let mut previous = Vec::new();
        for mask in self.data.masks.iter_mut().filter(|m| wanted.contains(&m.id)) {
            previous.push((mask.id.clone(), mask.group_id.replace(group_id.clone())));
        }

        self.selection.clear();
        self.overlay = None;

        let count = previous.len();
        if count == 0 {
            log::debug!("No masks matched reassignment to {}", group_id);
            return 0;
        }
        if !self.data.groups.contains_key(group_id) {
            log::warn!("Assigned {} masks to unknown group {}", count, group_id);
        }
        log::info!("🏷️ Assigned {} masks to group {}", count, group_id);
        self.record(Command::ReassignMasks {
            group_id: group_id.clone(),
            previous,
        });
        count
    }

    /// Move every selected mask into a group.
    pub fn assign_selection_to_group(&mut self, group_id: &GroupId) -> usize {
        let selected: Vec<MaskId> = self.selection.iter().cloned().collect();
        self.assign_masks_to_group(&selected, group_id)
    }

    /// Delete the given masks and clear the selection.
    ///
    /// Unknown ids are skipped; nothing is recorded when no id matched.
    pub fn delete_masks<'a>(&mut self, mask_ids: impl IntoIterator<Item = &'a MaskId>) -> usize {
        let wanted: BTreeSet<&MaskId> = mask_ids.into_iter().collect();
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.data.masks.len());
        for (index, mask) in std::mem::take(&mut self.data.masks).into_iter().enumerate() {
            if wanted.contains(&mask.id) {
                removed.push((index, mask));
            } else {
                kept.push(mask);
            }
        }
        self.data.masks = kept;

        self.selection.clear();
        self.overlay = None;

        let count = removed.len();
        if count == 0 {
            return 0;
        }
        log::info!("🗑️ Deleted {} masks", count);
        self.record(Command::RemoveMasks { removed });
        count
    }

    /// Delete every selected mask.
    pub fn delete_selection(&mut self) -> usize {
        let selected: Vec<MaskId> = self.selection.iter().cloned().collect();
        self.delete_masks(&selected)
    }

    // ------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------

    /// Add a vertex to the outline being drawn.
    pub fn add_vertex(&mut self, point: Point) {
        self.drawing.push(point);
        log::trace!(
            "✏️ Added vertex at ({:.1}, {:.1}), total: {}",
            point.x,
            point.y,
            self.drawing.vertices.len()
        );
    }

    /// Close the outline being drawn. Needs at least three vertices.
    pub fn close_polygon(&mut self) -> bool {
        let closed = self.drawing.close();
        if !closed {
            log::debug!(
                "📝 Polygon needs at least {} points, currently has {}",
                MIN_POLYGON_VERTICES,
                self.drawing.vertices.len()
            );
        }
        closed
    }

    /// Close the open outline (if valid) and stage every closed outline.
    ///
    /// An open outline too short to close stays in the drawing so the
    /// user can keep adding to it or cancel it.
    pub fn complete_drawing(&mut self) -> bool {
        if !self.drawing.close() && !self.drawing.vertices.is_empty() {
            log::debug!(
                "📝 Keeping open outline with {} points out of the staged drawing",
                self.drawing.vertices.len()
            );
        }
        let polygons = self.drawing.take_closed();
        self.finish_drawing(polygons)
    }

    /// Stage finished outlines for group assignment.
    ///
    /// Touches neither masks nor history. An empty list stages nothing.
    pub fn finish_drawing(&mut self, polygons: Vec<Polygon>) -> bool {
        if polygons.is_empty() {
            return false;
        }
        log::debug!("📐 Drawing finished with {} outlines", polygons.len());
        self.pending_polygons = Some(polygons);
        true
    }

    /// Turn the staged outlines into a user mask in `group_id`.
    ///
    /// The group becomes active. Without staged outlines this does nothing.
    pub fn commit_pending_mask(&mut self, group_id: &GroupId) -> Option<MaskId> {
        let polygons = self.pending_polygons.take()?;
        let id = self.allocate_mask_id();
        let mask = Mask::new(id.clone(), polygons)
            .with_group(group_id.clone())
            .with_source(MaskSource::User);

        self.data.masks.push(mask.clone());
        self.active_group = Some(group_id.clone());
        log::info!("✅ Created mask {} in group {}", id, group_id);
        self.record(Command::AddMask { mask });
        Some(id)
    }

    /// Discard in-progress drawing, staged outlines, drag box and popups.
    ///
    /// Returns true if anything was discarded. Never touches history.
    pub fn cancel(&mut self) -> bool {
        let had_anything = self.drawing.is_drawing()
            || self.pending_polygons.is_some()
            || self.drag_select.is_some()
            || self.overlay.is_some();
        self.drawing.clear();
        self.pending_polygons = None;
        self.drag_select = None;
        self.overlay = None;
        if had_anything {
            log::debug!("❌ Cancelled pending interaction");
        }
        had_anything
    }
}
