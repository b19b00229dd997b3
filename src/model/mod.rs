//! Data models for the floor-plan annotator.

mod geometry;
mod group;
mod mask;
mod set;

pub use geometry::{BoundingBox, Point, Polygon};
pub use group::{Group, GroupDraft, GroupId, GroupType};
pub use mask::{Mask, MaskId, MaskSource};
pub use set::AnnotationSet;
