//! Serializable editor document.
//!
//! `EditorDocument` is the boundary format of the editor: it is what a
//! loader hands in at startup and what a persist request hands back. It
//! mirrors the `{groups, masks}` structure produced by the floor-plan
//! backend and adds a format version.
//!
//! # Versioning
//!
//! Documents use semantic versioning (MAJOR.MINOR.PATCH). Any 0.x document
//! is read, with a warning when the minor version differs. Documents
//! without a version field are treated as current.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::model::{AnnotationSet, Group, GroupId, Mask};

/// Groups and masks as stored or transferred.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorDocument {
    /// Format version for compatibility checking.
    #[serde(default = "current_version")]
    pub version: String,

    /// Group registry keyed by group id.
    #[serde(default)]
    pub groups: BTreeMap<GroupId, Group>,

    /// Masks in draw order.
    #[serde(default)]
    pub masks: Vec<Mask>,
}

fn current_version() -> String {
    EditorDocument::CURRENT_VERSION.to_string()
}

impl Default for EditorDocument {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorDocument {
    /// Current version of the document format.
    pub const CURRENT_VERSION: &'static str = "0.1.0";

    /// Major version number for compatibility checking.
    pub const VERSION_MAJOR: u32 = 0;

    /// Minor version number.
    pub const VERSION_MINOR: u32 = 1;

    /// Create an empty document.
    pub fn new() -> Self {
        Self {
            version: current_version(),
            groups: BTreeMap::new(),
            masks: Vec::new(),
        }
    }

    /// Snapshot an annotation set.
    pub fn from_annotation_set(data: &AnnotationSet) -> Self {
        Self {
            version: current_version(),
            groups: data.groups.clone(),
            masks: data.masks.clone(),
        }
    }

    /// Validate the document and turn it into an annotation set.
    ///
    /// Duplicate mask ids and registry keys that disagree with the group's
    /// own id are rejected. Masks referencing missing groups are kept (they
    /// render as unassigned) and logged.
    pub fn into_annotation_set(self) -> Result<AnnotationSet, DocumentError> {
        for (key, group) in &self.groups {
            if key != &group.id {
                return Err(DocumentError::GroupKeyMismatch {
                    key: key.clone(),
                    id: group.id.clone(),
                });
            }
        }

        let mut seen = BTreeSet::new();
        for mask in &self.masks {
            if !seen.insert(&mask.id) {
                return Err(DocumentError::DuplicateMaskId(mask.id.clone()));
            }
        }

        let dangling = self.dangling_masks().count();
        if dangling > 0 {
            log::warn!(
                "{} masks reference groups that do not exist; they will show as unassigned",
                dangling
            );
        }

        Ok(AnnotationSet {
            groups: self.groups,
            masks: self.masks,
        })
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parse a document from JSON, checking its version.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let document: Self = serde_json::from_str(json)?;

        if !Self::is_version_readable(&document.version) {
            return Err(DocumentError::UnsupportedVersion {
                expected: Self::CURRENT_VERSION.to_string(),
                found: document.version,
            });
        }

        if !Self::is_version_compatible(&document.version) {
            log::warn!(
                "Document version {} may not be fully compatible with current version {}",
                document.version,
                Self::CURRENT_VERSION
            );
        }

        Ok(document)
    }

    /// Parse a version string into (major, minor, patch) components.
    pub fn parse_version(version: &str) -> Option<(u32, u32, u32)> {
        let mut parts = version.split('.');
        let major = parts.next()?.parse().ok()?;
        let minor = parts.next()?.parse().ok()?;
        let patch = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some((major, minor, patch))
    }

    /// Check if a version is fully compatible with the current version.
    ///
    /// For 0.x.x only an exact minor match is compatible; from 1.x.x on, any
    /// file with the same major version is.
    pub fn is_version_compatible(file_version: &str) -> bool {
        let Some((file_major, file_minor, _)) = Self::parse_version(file_version) else {
            return false;
        };

        if Self::VERSION_MAJOR == 0 {
            file_major == 0 && file_minor == Self::VERSION_MINOR
        } else {
            file_major == Self::VERSION_MAJOR
        }
    }

    /// Check if a version can be read at all, possibly with warnings.
    pub fn is_version_readable(file_version: &str) -> bool {
        let Some((file_major, _, _)) = Self::parse_version(file_version) else {
            return false;
        };
        file_major == 0 || file_major == Self::VERSION_MAJOR
    }

    /// Masks with a group reference that the registry does not back.
    pub fn dangling_masks(&self) -> impl Iterator<Item = &Mask> {
        self.masks.iter().filter(|m| {
            m.group_id
                .as_ref()
                .is_some_and(|id| !self.groups.contains_key(id))
        })
    }
}
