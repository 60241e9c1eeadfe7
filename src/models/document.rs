//! Source document model.
//!
//! An uploaded file (brochure, quote sheet) tagged with a brand and a model
//! or series name. Documents are never hard-linked to catalog records; the
//! association is a fuzzy string relation recomputed on demand.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Processing status of an uploaded document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentStatus {
    Uploaded,
    Processed,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Uploaded => "uploaded",
            Self::Processed => "processed",
            Self::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "uploaded" => Some(Self::Uploaded),
            "processed" => Some(Self::Processed),
            "failed" => Some(Self::Failed),
            _ => None,
        }
    }
}

/// An uploaded source document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Assigned by the repository counter on creation.
    pub id: i64,
    pub brand: String,
    /// Free text; may name a series ("8FG Series") rather than an exact model.
    pub model_name: String,
    pub file_size_bytes: u64,
    pub uploaded_at: DateTime<Utc>,
    /// Opaque pointer into the file store.
    pub file_ref: String,
    pub status: DocumentStatus,
}

impl SourceDocument {
    /// Create a freshly uploaded document.
    pub fn new(
        id: i64,
        brand: String,
        model_name: String,
        file_size_bytes: u64,
        file_ref: String,
    ) -> Self {
        Self {
            id,
            brand,
            model_name,
            file_size_bytes,
            uploaded_at: Utc::now(),
            file_ref,
            status: DocumentStatus::Uploaded,
        }
    }
}
