//! cashbook-storage-json
//!
//! Filesystem-backed document store: one JSON file per document path, with
//! merge-write semantics and atomic replacement.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use cashbook_core::store::{merge_document, DocumentStore};
use cashbook_core::StoreError;

const DOCUMENT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Stores each document at `<root>/<path>.json`.
///
/// Writes follow the same merge contract as the remote store: existing
/// fields not included in the write are preserved. Files are replaced
/// atomically via a temp file and rename so a crashed write never leaves a
/// truncated document behind.
#[derive(Debug, Clone)]
pub struct JsonDocumentStore {
    root: PathBuf,
}

impl JsonDocumentStore {
    pub fn new(root: PathBuf) -> Result<Self, StoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a document path to its backing file, rejecting segments that
    /// would escape the root.
    pub fn document_file(&self, path: &str) -> Result<PathBuf, StoreError> {
        let mut file = self.root.clone();
        for segment in path.split('/') {
            if segment.is_empty()
                || segment == "."
                || segment == ".."
                || segment.contains('\\')
                || segment.contains(':')
            {
                return Err(StoreError::Backend(format!(
                    "invalid document path `{path}`"
                )));
            }
            file.push(segment);
        }
        file.set_extension(DOCUMENT_EXTENSION);
        Ok(file)
    }
}

impl DocumentStore for JsonDocumentStore {
    fn get(&self, path: &str) -> Result<Option<Value>, StoreError> {
        let file = self.document_file(path)?;
        if !file.exists() {
            return Ok(None);
        }
        let data = fs::read_to_string(&file)?;
        let value =
            serde_json::from_str(&data).map_err(|err| StoreError::Serde(err.to_string()))?;
        Ok(Some(value))
    }

    fn set_merge(&self, path: &str, fields: Value) -> Result<(), StoreError> {
        let file = self.document_file(path)?;
        let merged = merge_document(self.get(path)?, fields);
        let json = serde_json::to_string_pretty(&merged)
            .map_err(|err| StoreError::Serde(err.to_string()))?;
        let tmp = tmp_path(&file);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &file)?;
        debug!(path, "document written");
        Ok(())
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
