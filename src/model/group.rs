//! Group data model: named, colored buckets that masks are classified into.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color_utils::DEFAULT_GROUP_COLOR;
use crate::error::ValidationError;

/// Opaque, stable identifier of a group.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for GroupId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Procurement classification of a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupType {
    /// Furniture, fixtures and equipment
    #[default]
    #[serde(rename = "FF&E")]
    Ffe,
    /// Owner furnished, contractor installed
    #[serde(rename = "OFCI")]
    Ofci,
}

/// A named, colored classification bucket for masks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Group {
    /// Unique identifier within the registry
    pub id: GroupId,
    /// Display name, never empty
    pub name: String,
    /// Optional short code (e.g. a budget line reference)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    /// RGB color used when rendering member masks
    pub color: [u8; 3],
    /// Procurement type
    #[serde(rename = "type", default)]
    pub group_type: GroupType,
}

impl Group {
    pub fn new(id: GroupId, name: impl Into<String>, color: [u8; 3]) -> Self {
        Self {
            id,
            name: name.into(),
            code: None,
            color,
            group_type: GroupType::default(),
        }
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn with_type(mut self, group_type: GroupType) -> Self {
        self.group_type = group_type;
        self
    }

    /// Check whether `query` (already lowercased) occurs in the name or code.
    pub(crate) fn matches_lowercase(&self, query: &str) -> bool {
        self.name.to_lowercase().contains(query)
            || self
                .code
                .as_deref()
                .is_some_and(|code| code.to_lowercase().contains(query))
    }

    /// Trim name and code in place, dropping a blank code.
    ///
    /// Fails if the trimmed name is empty.
    pub(crate) fn normalize(&mut self) -> Result<(), ValidationError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(ValidationError::EmptyName);
        }
        self.name = name.to_string();
        self.code = self
            .code
            .as_deref()
            .map(str::trim)
            .filter(|code| !code.is_empty())
            .map(str::to_string);
        Ok(())
    }
}

/// User input for creating a group; the id is assigned by the editor.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupDraft {
    pub name: String,
    pub code: String,
    pub color: [u8; 3],
    pub group_type: GroupType,
}

impl GroupDraft {
    /// Create a draft with the default color and type.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            color: DEFAULT_GROUP_COLOR,
            group_type: GroupType::default(),
        }
    }

    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    pub fn with_type(mut self, group_type: GroupType) -> Self {
        self.group_type = group_type;
        self
    }

    /// Check that name and code are non-empty once trimmed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.code.trim().is_empty() {
            return Err(ValidationError::EmptyCode);
        }
        Ok(())
    }

    /// Validate the draft and build the group it describes, trimmed.
    pub fn into_group(self, id: GroupId) -> Result<Group, ValidationError> {
        self.validate()?;
        Ok(Group::new(id, self.name.trim(), self.color)
            .with_code(self.code.trim())
            .with_type(self.group_type))
    }
}
