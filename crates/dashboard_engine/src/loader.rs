use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, Result};

/// Reads and parses one statement document.
///
/// The whole document is parsed into its typed record up front, so a shape
/// mismatch is reported once, here, with the file name and the serde location.
pub fn load_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let raw = read_document(path)?;
    let doc = parse_document(&raw, path)?;
    tracing::debug!("Loaded {}", path.display());
    Ok(doc)
}

pub fn read_document(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| EngineError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses document text already read from `path`.
pub fn parse_document<T: DeserializeOwned>(raw: &str, path: &Path) -> Result<T> {
    serde_json::from_str(raw).map_err(|source| EngineError::Schema {
        path: path.to_path_buf(),
        source,
    })
}
