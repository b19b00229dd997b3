//! Annotation editor state machine.
//!
//! `AnnotationEditor` owns the group registry, the mask collection, the
//! selection, the editor mode and the undo history. It knows nothing about
//! rendering or storage: a render surface feeds it pointer and keyboard
//! events (see [`input`]) and reads back [`style::RenderStyle`]s, while the
//! caller moves [`EditorDocument`]s in and out.

mod groups;
pub mod input;
mod masks;
mod message;
mod selection;
pub mod style;


use std::collections::BTreeSet;
use std::time::Duration;

pub use masks::DrawingState;
pub use message::{EditorMessage, Outcome};

use crate::auto_save::AutoSaveManager;
use crate::config::EditorConfig;
use crate::document::EditorDocument;
use crate::error::DocumentError;
use crate::keybindings::KeyBindings;
use crate::model::{AnnotationSet, BoundingBox, Group, GroupId, Mask, MaskId, Point, Polygon};
use crate::persist::DocumentStore;
use crate::undo::{self, Command, UndoConfig, UndoStack};
use input::Overlay;
use style::OpacityPolicy;

/// Top-level view mode of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// Every mask shown, no group emphasis
    #[default]
    All,
    /// Group-centric view with an optional active group
    Group,
}

/// The editor state container.
#[derive(Debug)]
pub struct AnnotationEditor {
    /// Groups and masks (the undoable part of the state)
    data: AnnotationSet,
    /// Selected mask ids
    selection: BTreeSet<MaskId>,
    /// Group emphasized in group mode
    active_group: Option<GroupId>,
    mode: EditorMode,
    /// Multi-select reassignment sub-mode, only meaningful in group mode
    reassign_mode: bool,
    history: UndoStack,
    /// In-progress outline being clicked out on the canvas
    drawing: DrawingState,
    /// Finished outlines awaiting a group before becoming a mask
    pending_polygons: Option<Vec<Polygon>>,
    /// Corners of an in-progress drag-select box
    drag_select: Option<(Point, Point)>,
    /// Transient popup (group picker or context menu)
    overlay: Option<Overlay>,
    /// Size of the render surface, for popup placement
    viewport: Option<(f32, f32)>,
    opacity: OpacityPolicy,
    keybindings: KeyBindings,
    auto_save: AutoSaveManager,
    next_group_seq: u64,
    next_mask_seq: u64,
}

impl Default for AnnotationEditor {
    fn default() -> Self {
        Self::new()
    }
}

impl AnnotationEditor {
    /// Create an empty editor with default settings.
    pub fn new() -> Self {
        Self {
            data: AnnotationSet::new(),
            selection: BTreeSet::new(),
            active_group: None,
            mode: EditorMode::default(),
            reassign_mode: false,
            history: UndoStack::new(),
            drawing: DrawingState::default(),
            pending_polygons: None,
            drag_select: None,
            overlay: None,
            viewport: None,
            opacity: OpacityPolicy::default(),
            keybindings: KeyBindings::default(),
            auto_save: AutoSaveManager::disabled(),
            next_group_seq: 1,
            next_mask_seq: 1,
        }
    }

    /// Create an empty editor configured from `config`.
    pub fn with_config(config: &EditorConfig) -> Self {
        let mut editor = Self::new();
        editor.apply_config(config);
        editor
    }

    /// Create an editor holding the groups and masks of a loaded document.
    pub fn from_document(document: EditorDocument) -> Result<Self, DocumentError> {
        let mut editor = Self::new();
        editor.load_document(document)?;
        Ok(editor)
    }

    /// Apply history limit, opacity policy, keybindings and auto-save timing.
    ///
    /// A history limit of zero is raised to one so edits stay undoable.
    pub fn apply_config(&mut self, config: &EditorConfig) {
        let prefs = &config.preferences;
        if prefs.history_limit == 0 {
            log::warn!("History limit of 0 would disable undo; keeping 1 edit");
        }
        self.history = UndoStack::with_config(UndoConfig {
            max_history: prefs.history_limit.max(1),
        });
        self.opacity = config.opacity.clone();
        self.keybindings = config.keybindings.clone();
        self.auto_save = if prefs.auto_save.enabled {
            AutoSaveManager::new()
                .with_debounce_delay(Duration::from_secs(prefs.auto_save.debounce_secs))
                .with_save_interval(Duration::from_secs(prefs.auto_save.interval_secs))
        } else {
            AutoSaveManager::disabled()
        };
        log::debug!(
            "⚙️ Editor configured: history limit {}, auto-save {}",
            prefs.history_limit,
            prefs.auto_save.enabled
        );
    }

    /// Replace all groups and masks with a loaded document.
    ///
    /// History, selection, drawing and popups are reset; the load itself is
    /// not undoable.
    pub fn load_document(&mut self, document: EditorDocument) -> Result<(), DocumentError> {
        let data = document.into_annotation_set()?;
        log::info!(
            "📂 Loaded {} groups and {} masks",
            data.groups.len(),
            data.masks.len()
        );
        self.data = data;
        self.selection.clear();
        self.active_group = None;
        self.mode = EditorMode::All;
        self.reassign_mode = false;
        self.history.clear();
        self.drawing.clear();
        self.pending_polygons = None;
        self.drag_select = None;
        self.overlay = None;
        self.auto_save.reset();
        Ok(())
    }

    /// Snapshot groups and masks into a serializable document.
    pub fn to_document(&self) -> EditorDocument {
        EditorDocument::from_annotation_set(&self.data)
    }

    // ------------------------------------------------------------------
    // Read access
    // ------------------------------------------------------------------

    /// Groups and masks.
    pub fn annotations(&self) -> &AnnotationSet {
        &self.data
    }

    /// Group registry in id order.
    pub fn groups(&self) -> impl Iterator<Item = &Group> {
        self.data.groups.values()
    }

    pub fn group(&self, id: &GroupId) -> Option<&Group> {
        self.data.group(id)
    }

    /// Masks in draw order.
    pub fn masks(&self) -> &[Mask] {
        &self.data.masks
    }

    pub fn mask(&self, id: &MaskId) -> Option<&Mask> {
        self.data.mask(id)
    }

    pub fn selection(&self) -> &BTreeSet<MaskId> {
        &self.selection
    }

    pub fn is_selected(&self, id: &MaskId) -> bool {
        self.selection.contains(id)
    }

    pub fn active_group(&self) -> Option<&GroupId> {
        self.active_group.as_ref()
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn reassign_mode(&self) -> bool {
        self.reassign_mode
    }

    /// Outlines waiting for a group assignment, if any.
    pub fn pending_polygons(&self) -> Option<&[Polygon]> {
        self.pending_polygons.as_deref()
    }

    /// Outline currently being drawn.
    pub fn drawing(&self) -> &DrawingState {
        &self.drawing
    }

    /// Normalized drag-select rectangle while a drag is in progress.
    pub fn drag_select_box(&self) -> Option<BoundingBox> {
        self.drag_select
            .map(|(start, end)| BoundingBox::from_corners(start, end))
    }

    /// Open popup, if any.
    pub fn overlay(&self) -> Option<&Overlay> {
        self.overlay.as_ref()
    }

    pub fn keybindings(&self) -> &KeyBindings {
        &self.keybindings
    }

    pub fn opacity_policy(&self) -> &OpacityPolicy {
        &self.opacity
    }

    // ------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------

    /// Switch the view mode.
    ///
    /// Leaving group mode forces reassign mode off, clears the selection and
    /// closes any popup.
    pub fn set_mode(&mut self, mode: EditorMode) {
        if mode != EditorMode::Group {
            self.reassign_mode = false;
            self.selection.clear();
            self.overlay = None;
        }
        if self.mode != mode {
            log::debug!("🔀 Mode: {:?} -> {:?}", self.mode, mode);
        }
        self.mode = mode;
    }

    /// Turn reassign mode on or off. Only possible in group mode.
    ///
    /// Returns the resulting flag.
    pub fn set_reassign_mode(&mut self, enabled: bool) -> bool {
        if self.mode != EditorMode::Group {
            log::debug!("Reassign mode ignored outside group mode");
            return self.reassign_mode;
        }
        if !enabled {
            self.overlay = None;
        }
        self.reassign_mode = enabled;
        log::debug!("🔁 Reassign mode: {}", enabled);
        self.reassign_mode
    }

    /// Flip reassign mode; see [`Self::set_reassign_mode`].
    pub fn toggle_reassign_mode(&mut self) -> bool {
        self.set_reassign_mode(!self.reassign_mode)
    }

    /// Focus a group from the group list: enters group mode with it active.
    ///
    /// Unknown ids are ignored.
    pub fn select_group(&mut self, id: &GroupId) -> bool {
        if !self.data.groups.contains_key(id) {
            log::debug!("Ignoring selection of unknown group {}", id);
            return false;
        }
        self.active_group = Some(id.clone());
        self.set_mode(EditorMode::Group);
        true
    }

    /// Drop the active group without leaving group mode.
    pub fn clear_active_group(&mut self) {
        self.active_group = None;
    }

    // ------------------------------------------------------------------
    // History
    // ------------------------------------------------------------------

    /// Record an already-applied command.
    fn record(&mut self, command: Command) {
        self.history.push(command);
        self.auto_save.mark_dirty();
    }

    /// Step back one command. No-op at the start of history.
    pub fn undo(&mut self) -> bool {
        if !undo::undo_command(&mut self.history, &mut self.data) {
            return false;
        }
        self.after_history_jump();
        true
    }

    /// Step forward one command. No-op at the end of history.
    pub fn redo(&mut self) -> bool {
        if !undo::redo_command(&mut self.history, &mut self.data) {
            return false;
        }
        self.after_history_jump();
        true
    }

    /// Drop references the restored state no longer backs.
    fn after_history_jump(&mut self) {
        let data = &self.data;
        self.selection.retain(|id| data.contains_mask(id));
        if self
            .active_group
            .as_ref()
            .is_some_and(|id| !data.groups.contains_key(id))
        {
            self.active_group = None;
        }
        self.auto_save.mark_dirty();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Number of states in the linear history, current one included.
    pub fn history_len(&self) -> usize {
        self.history.state_count()
    }

    /// Index of the current state within the history.
    pub fn history_index(&self) -> usize {
        self.history.position()
    }

    /// Description of the command `undo` would revert.
    pub fn undo_description(&self) -> Option<String> {
        self.history.undo_description()
    }

    /// Description of the command `redo` would re-apply.
    pub fn redo_description(&self) -> Option<String> {
        self.history.redo_description()
    }

    // ------------------------------------------------------------------
    // Auto-save
    // ------------------------------------------------------------------

    /// Hand back a document when the auto-save timers allow a save.
    ///
    /// The caller writes it and reports the result through
    /// [`Self::auto_save_mut`].
    pub fn poll_auto_save(&self) -> Option<EditorDocument> {
        self.auto_save.should_save().then(|| self.to_document())
    }

    /// Write the document to `store` if an auto-save is due.
    ///
    /// Returns whether a save was attempted; failures keep the edits
    /// pending and are returned.
    pub fn auto_save_to(&mut self, store: &mut impl DocumentStore) -> Result<bool, DocumentError> {
        let Some(document) = self.poll_auto_save() else {
            return Ok(false);
        };
        let result = store.save(&document);
        self.auto_save.report(&result);
        result.map(|()| true)
    }

    /// Write the document to `store` now, regardless of the timers.
    pub fn save_to(&mut self, store: &mut impl DocumentStore) -> Result<(), DocumentError> {
        let result = store.save(&self.to_document());
        self.auto_save.report(&result);
        if result.is_ok() {
            log::info!("💾 Saved to {}", store.describe());
        }
        result
    }

    /// Whether there are changes since the last reported save.
    pub fn is_dirty(&self) -> bool {
        self.auto_save.is_dirty()
    }

    pub fn auto_save_mut(&mut self) -> &mut AutoSaveManager {
        &mut self.auto_save
    }

    // ------------------------------------------------------------------
    // Id allocation
    // ------------------------------------------------------------------

    fn allocate_group_id(&mut self) -> GroupId {
        loop {
            let id = GroupId::new(format!("group_{}", self.next_group_seq));
            self.next_group_seq += 1;
            if !self.data.groups.contains_key(&id) {
                return id;
            }
        }
    }

    fn allocate_mask_id(&mut self) -> MaskId {
        loop {
            let id = MaskId::new(format!("mask_{}", self.next_mask_seq));
            self.next_mask_seq += 1;
            if !self.data.contains_mask(&id) {
                return id;
            }
        }
    }
}
