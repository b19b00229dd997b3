//! Render styles as a pure function of mask and editor state.
//!
//! Every mask falls into exactly one [`Emphasis`]; the opacity for each is
//! configurable through [`OpacityPolicy`], colors come from the mask's live
//! group (dangling references render as unassigned).

use serde::{Deserialize, Serialize};

use super::{AnnotationEditor, EditorMode};
use crate::constants::{
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, SELECTED_STROKE_COLOR, SELECTED_STROKE_WIDTH,
    UNASSIGNED_COLOR,
};
use crate::model::{Mask, MaskId};

/// How prominently a mask is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Emphasis {
    /// All-masks view: every mask alike
    Uniform,
    /// Group view without an active group
    Faint,
    /// Member of the active group
    Focused,
    /// Not a member of the active group
    Background,
    /// Reassign mode, member of the active group
    ReassignFocused,
    /// Reassign mode, everything else
    Reassignable,
}

/// Fill opacity for each [`Emphasis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpacityPolicy {
    pub uniform: f32,
    pub faint: f32,
    pub focused: f32,
    pub background: f32,
    pub reassign_focused: f32,
    pub reassignable: f32,
}

impl Default for OpacityPolicy {
    fn default() -> Self {
        Self {
            uniform: 0.4,
            faint: 0.15,
            focused: 0.8,
            background: 0.05,
            reassign_focused: 0.75,
            reassignable: 0.35,
        }
    }
}

impl OpacityPolicy {
    pub fn opacity(&self, emphasis: Emphasis) -> f32 {
        match emphasis {
            Emphasis::Uniform => self.uniform,
            Emphasis::Faint => self.faint,
            Emphasis::Focused => self.focused,
            Emphasis::Background => self.background,
            Emphasis::ReassignFocused => self.reassign_focused,
            Emphasis::Reassignable => self.reassignable,
        }
    }
}

/// Everything a render surface needs to draw one mask.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    pub emphasis: Emphasis,
    /// Fill color: the group color, or gray when unassigned
    pub fill: [u8; 3],
    pub opacity: f32,
    pub stroke: [u8; 3],
    pub stroke_width: f32,
    pub selected: bool,
    /// No group, or a group that no longer exists
    pub unassigned: bool,
}

impl AnnotationEditor {
    /// Emphasis class of a mask in the current state.
    pub fn emphasis(&self, mask: &Mask) -> Emphasis {
        let in_active = self
            .active_group
            .as_ref()
            .is_some_and(|active| mask.belongs_to(active));

        match (self.mode, self.reassign_mode, self.active_group.is_some()) {
            (EditorMode::All, _, _) => Emphasis::Uniform,
            (EditorMode::Group, false, false) => Emphasis::Faint,
            (EditorMode::Group, false, true) if in_active => Emphasis::Focused,
            (EditorMode::Group, false, true) => Emphasis::Background,
            (EditorMode::Group, true, _) if in_active => Emphasis::ReassignFocused,
            (EditorMode::Group, true, _) => Emphasis::Reassignable,
        }
    }

    /// Style for one mask.
    pub fn render_style(&self, mask: &Mask) -> RenderStyle {
        let emphasis = self.emphasis(mask);
        let group = self.data.group_of(mask);
        let selected = self.selection.contains(&mask.id);

        RenderStyle {
            emphasis,
            fill: group.map_or(UNASSIGNED_COLOR, |g| g.color),
            opacity: self.opacity.opacity(emphasis),
            stroke: if selected {
                SELECTED_STROKE_COLOR
            } else {
                DEFAULT_STROKE_COLOR
            },
            stroke_width: if selected {
                SELECTED_STROKE_WIDTH
            } else {
                DEFAULT_STROKE_WIDTH
            },
            selected,
            unassigned: group.is_none(),
        }
    }

    /// Styles for every mask, in draw order.
    pub fn render_styles(&self) -> Vec<(&MaskId, RenderStyle)> {
        self.data
            .masks
            .iter()
            .map(|mask| (&mask.id, self.render_style(mask)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GroupDraft, GroupId, Polygon};

    fn square() -> Vec<Polygon> {
        vec![Polygon::from_coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)])]
    }

    fn editor_with_masks() -> (AnnotationEditor, GroupId) {
        let mut editor = AnnotationEditor::new();
        let group = editor
            .create_group(GroupDraft::new("Chairs", "CH").with_color([10, 20, 30]))
            .expect("valid group");
        editor.finish_drawing(square());
        editor.commit_pending_mask(&group);
        editor.finish_drawing(square());
        editor.commit_pending_mask(&GroupId::new("gone"));
        (editor, group)
    }

    fn emphases(editor: &AnnotationEditor) -> Vec<Emphasis> {
        editor.render_styles().iter().map(|(_, s)| s.emphasis).collect()
    }

    #[test]
    fn test_all_mode_is_uniform() {
        let (mut editor, _) = editor_with_masks();
        editor.set_mode(EditorMode::All);
        assert_eq!(emphases(&editor), vec![Emphasis::Uniform, Emphasis::Uniform]);
        assert!(editor.render_styles().iter().all(|(_, s)| s.opacity == 0.4));
    }

    #[test]
    fn test_group_mode_focus() {
        let (mut editor, group) = editor_with_masks();
        editor.select_group(&group);
        assert_eq!(
            emphases(&editor),
            vec![Emphasis::Focused, Emphasis::Background]
        );

        editor.clear_active_group();
        assert_eq!(emphases(&editor), vec![Emphasis::Faint, Emphasis::Faint]);
    }

    #[test]
    fn test_reassign_mode_raises_floor() {
        let (mut editor, group) = editor_with_masks();
        editor.select_group(&group);
        editor.set_reassign_mode(true);
        let styles = editor.render_styles();
        assert_eq!(styles[0].1.emphasis, Emphasis::ReassignFocused);
        assert_eq!(styles[1].1.emphasis, Emphasis::Reassignable);
        assert!(styles[0].1.opacity > styles[1].1.opacity);
        assert!(styles[1].1.opacity > editor.opacity_policy().background);
    }

    #[test]
    fn test_colors_and_selection_stroke() {
        let (mut editor, _) = editor_with_masks();
        let first = editor.masks()[0].id.clone();
        editor.toggle_selection(&first, false);

        let styles = editor.render_styles();
        assert_eq!(styles[0].1.fill, [10, 20, 30]);
        assert!(styles[0].1.selected);
        assert_eq!(styles[0].1.stroke, SELECTED_STROKE_COLOR);
        assert_eq!(styles[0].1.stroke_width, SELECTED_STROKE_WIDTH);

        assert!(styles[1].1.unassigned);
        assert_eq!(styles[1].1.fill, UNASSIGNED_COLOR);
        assert_eq!(styles[1].1.stroke_width, DEFAULT_STROKE_WIDTH);
    }
}
