use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} does not match the expected document shape: {source}", path.display())]
    Schema {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Document incomplete: '{item}' in {section} has no value for {year}")]
    DocumentIncomplete {
        section: String,
        item: String,
        year: String,
    },

    #[error("Value for {year} of '{item}' in {section} is not a number")]
    NonNumeric {
        section: String,
        item: String,
        year: String,
    },

    #[error("Chart '{chart}' references missing column '{column}'")]
    MissingColumn { chart: String, column: String },

    #[error("Chart '{chart}' expects numbers in column '{column}'")]
    InvalidCell { chart: String, column: String },

    #[error("Row does not serialize to a record: {0}")]
    InvalidRecord(String),

    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Template rendering failed: {0}")]
    Template(#[from] askama::Error),
}

impl EngineError {
    /// True when the document itself is at fault (as opposed to a bug or an I/O problem).
    pub fn is_document_error(&self) -> bool {
        matches!(
            self,
            EngineError::Schema { .. }
                | EngineError::DocumentIncomplete { .. }
                | EngineError::NonNumeric { .. }
        )
    }

    pub fn is_missing_file(&self) -> bool {
        matches!(self, EngineError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
