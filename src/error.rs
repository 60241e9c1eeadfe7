//! Error taxonomy for catalog operations.
//!
//! Field-level parsing failures are deliberately NOT represented here:
//! per the normalizer contract they degrade to defaults and never
//! propagate. Errors are reserved for genuinely missing required data,
//! dangling ids, collaborator failures, and file-store I/O.

use thiserror::Error;

use crate::llm::ExtractionError;

#[derive(Debug, Error)]
pub enum CatalogError {
    /// A required field is genuinely missing, or the guarded creation
    /// path hit an exact duplicate. The catalog is left unchanged.
    #[error("validation failed: {0}")]
    Validation(String),

    /// An operation referenced an id that does not exist.
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The external text-extraction collaborator failed. The document
    /// record and catalog are left in their pre-call state.
    #[error("extraction failed: {0}")]
    Extraction(#[from] ExtractionError),

    /// File store I/O failure.
    #[error("storage error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn record_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "catalog record",
            id,
        }
    }

    pub fn document_not_found(id: i64) -> Self {
        Self::NotFound {
            entity: "document",
            id,
        }
    }
}
