//! Storage backends for editor documents.
//!
//! The editor itself never touches storage; these stores let a caller write
//! what [`AnnotationEditor::to_document`](crate::AnnotationEditor::to_document)
//! or an auto-save poll hands back, and read it again at startup.

use crate::document::EditorDocument;
use crate::error::DocumentError;

/// A place documents can be loaded from and saved to.
pub trait DocumentStore {
    /// Load the stored document. `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<EditorDocument>, DocumentError>;

    /// Save a document, replacing what was stored.
    fn save(&mut self, document: &EditorDocument) -> Result<(), DocumentError>;

    /// Human-readable location, for log messages.
    fn describe(&self) -> String;
}

/// JSON file on the local filesystem.
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Clone)]
pub struct FileStore {
    path: std::path::PathBuf,
}

#[cfg(not(target_arch = "wasm32"))]
impl FileStore {
    pub fn new(path: impl Into<std::path::PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl DocumentStore for FileStore {
    fn load(&self) -> Result<Option<EditorDocument>, DocumentError> {
        if !self.path.exists() {
            log::debug!("No document found at {:?}", self.path);
            return Ok(None);
        }
        let json = std::fs::read_to_string(&self.path)?;
        let document = EditorDocument::from_json(&json)?;
        log::info!("📂 Loaded document from {:?}", self.path);
        Ok(Some(document))
    }

    fn save(&mut self, document: &EditorDocument) -> Result<(), DocumentError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = document.to_json()?;
        std::fs::write(&self.path, json)?;
        log::info!("💾 Saved document to {:?}", self.path);
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Browser localStorage entry (WASM only).
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone)]
pub struct LocalStorageStore {
    key: String,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    /// Default localStorage key for the editor document.
    pub const DEFAULT_KEY: &'static str = "floorplan-annotator-document";

    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }

    fn storage() -> Result<web_sys::Storage, DocumentError> {
        let window = web_sys::window()
            .ok_or_else(|| DocumentError::Storage("No window object available".to_string()))?;
        window
            .local_storage()
            .map_err(|e| DocumentError::Storage(format!("localStorage access error: {:?}", e)))?
            .ok_or_else(|| DocumentError::Storage("localStorage not available".to_string()))
    }
}

#[cfg(target_arch = "wasm32")]
impl Default for LocalStorageStore {
    fn default() -> Self {
        Self::new(Self::DEFAULT_KEY)
    }
}

#[cfg(target_arch = "wasm32")]
impl DocumentStore for LocalStorageStore {
    fn load(&self) -> Result<Option<EditorDocument>, DocumentError> {
        let storage = Self::storage()?;
        let json = storage
            .get_item(&self.key)
            .map_err(|e| DocumentError::Storage(format!("Failed to read localStorage: {:?}", e)))?;
        match json {
            Some(json) => {
                let document = EditorDocument::from_json(&json)?;
                log::info!("📂 Loaded document from localStorage");
                Ok(Some(document))
            }
            None => {
                log::debug!("No document found in localStorage");
                Ok(None)
            }
        }
    }

    fn save(&mut self, document: &EditorDocument) -> Result<(), DocumentError> {
        let storage = Self::storage()?;
        let json = document.to_json()?;
        storage.set_item(&self.key, &json).map_err(|e| {
            DocumentError::Storage(format!("Failed to save to localStorage: {:?}", e))
        })?;
        log::info!("💾 Saved document to localStorage");
        Ok(())
    }

    fn describe(&self) -> String {
        format!("localStorage[{}]", self.key)
    }
}

/// In-memory store, mainly for tests and previews.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    document: Option<EditorDocument>,
    saves: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saves since creation.
    pub fn save_count(&self) -> usize {
        self.saves
    }
}

impl DocumentStore for MemoryStore {
    fn load(&self) -> Result<Option<EditorDocument>, DocumentError> {
        Ok(self.document.clone())
    }

    fn save(&mut self, document: &EditorDocument) -> Result<(), DocumentError> {
        self.document = Some(document.clone());
        self.saves += 1;
        Ok(())
    }

    fn describe(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Group, GroupId};

    fn sample_document() -> EditorDocument {
        let mut document = EditorDocument::new();
        let group = Group::new(GroupId::new("g1"), "Desks", [1, 2, 3]).with_code("DK");
        document.groups.insert(group.id.clone(), group);
        document
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryStore::new();
        assert!(store.load().expect("load").is_none());

        store.save(&sample_document()).expect("save");
        assert_eq!(store.save_count(), 1);
        assert_eq!(store.load().expect("load"), Some(sample_document()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().expect("temp dir");
        let mut store = FileStore::new(dir.path().join("nested").join("plan.json"));
        assert!(store.load().expect("missing file is fine").is_none());

        store.save(&sample_document()).expect("save");
        assert!(store.path().exists());
        assert_eq!(store.load().expect("load"), Some(sample_document()));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_file_store_rejects_garbage() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("plan.json");
        std::fs::write(&path, "not json").expect("write");
        let store = FileStore::new(&path);
        assert!(matches!(store.load(), Err(DocumentError::Json(_))));
    }
}
