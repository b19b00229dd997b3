//! Floor-plan annotator - mask editor core
//!
//! State machine behind a floor-plan mask editor: a registry of colored
//! groups, polygon masks that may belong to a group, selection, an
//! all-masks/group view with a multi-select reassign sub-mode, and linear
//! undo/redo. Rendering, storage and networking live outside; the editor is
//! driven through [`AnnotationEditor`] methods or [`EditorMessage`]s and
//! exchanges [`EditorDocument`]s with the outside world.

pub mod auto_save;
pub mod color_utils;
pub mod config;
pub mod constants;
pub mod document;
pub mod editor;
pub mod error;
pub mod keybindings;
pub mod model;
pub mod persist;
pub mod undo;

pub use config::EditorConfig;
pub use document::EditorDocument;
pub use editor::input::{ContextMenuChoice, Modifiers, Overlay, PickerPurpose};
pub use editor::style::{Emphasis, OpacityPolicy, RenderStyle};
pub use editor::{AnnotationEditor, DrawingState, EditorMessage, EditorMode, Outcome};
pub use error::{ConfigError, DocumentError, ValidationError};
pub use model::{
    AnnotationSet, BoundingBox, Group, GroupDraft, GroupId, GroupType, Mask, MaskId, MaskSource,
    Point, Polygon,
};
