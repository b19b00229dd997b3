//! Mask data model: polygon annotations optionally classified into a group.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use super::geometry::{BoundingBox, Polygon};
use super::group::GroupId;

/// Unique identifier of a mask.
///
/// Externally extracted masks may carry numeric ids; they are kept as their
/// decimal string so every id compares the same way.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MaskId(String);

impl MaskId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MaskId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl<'de> Deserialize<'de> for MaskId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => MaskId(text),
            RawId::Number(n) => MaskId(n.to_string()),
        })
    }
}

/// Where a mask came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskSource {
    /// Produced by the extraction service
    #[default]
    External,
    /// Drawn in the editor
    User,
}

/// A polygon annotation, possibly made of several outlines.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    /// Unique identifier within the collection
    pub id: MaskId,
    /// Weak reference to a group; None or a dangling id both mean "unassigned"
    #[serde(default)]
    pub group_id: Option<GroupId>,
    /// Outlines making up the mask
    #[serde(default)]
    pub polygons: Vec<Polygon>,
    /// Origin of the mask
    #[serde(default)]
    pub source: MaskSource,
}

impl Mask {
    /// Create an unassigned, externally sourced mask.
    pub fn new(id: MaskId, polygons: Vec<Polygon>) -> Self {
        Self {
            id,
            group_id: None,
            polygons,
            source: MaskSource::External,
        }
    }

    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_source(mut self, source: MaskSource) -> Self {
        self.source = source;
        self
    }

    /// Bounding box over every point of every outline.
    ///
    /// None when the mask has no points at all.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::enclosing(self.polygons.iter().flat_map(|p| p.vertices()))
    }

    /// Check whether the mask references the given group.
    pub fn belongs_to(&self, group_id: &GroupId) -> bool {
        self.group_id.as_ref() == Some(group_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounding_box_spans_all_polygons() {
        let mask = Mask::new(
            MaskId::new("m1"),
            vec![
                Polygon::from_coords(&[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0)]),
                Polygon::from_coords(&[(50.0, 60.0), (70.0, 60.0), (70.0, 90.0)]),
            ],
        );
        assert_eq!(
            mask.bounding_box(),
            Some(BoundingBox::new(10.0, 10.0, 60.0, 80.0))
        );
    }

    #[test]
    fn test_empty_mask_has_no_bounding_box() {
        let mask = Mask::new(MaskId::new("m1"), vec![Polygon::default()]);
        assert_eq!(mask.bounding_box(), None);
    }

    #[test]
    fn test_parse_external_mask() {
        let json = r#"{"id": 17, "group_id": null, "polygons": [[[0, 0], [4, 0], [4, 3]]]}"#;
        let mask: Mask = serde_json::from_str(json).expect("parse mask");
        assert_eq!(mask.id, MaskId::new("17"));
        assert_eq!(mask.group_id, None);
        assert_eq!(mask.source, MaskSource::External);
        assert_eq!(mask.polygons[0].len(), 3);
    }

    #[test]
    fn test_user_source_serializes_lowercase() {
        let mask = Mask::new(MaskId::new("m1"), Vec::new())
            .with_group(GroupId::new("g1"))
            .with_source(MaskSource::User);
        let json = serde_json::to_string(&mask).expect("serialize mask");
        assert!(json.contains("\"source\":\"user\""));
        assert!(json.contains("\"group_id\":\"g1\""));
        assert!(mask.belongs_to(&GroupId::new("g1")));
    }
}
