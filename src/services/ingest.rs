//! Brochure ingestion service.
//!
//! Orchestrates the upload path: store the file, record the document,
//! run the extraction collaborator, and fold the result into the catalog
//! through the merge policy. An extraction failure must not corrupt the
//! catalog: the document record is kept (marked failed), the merge step
//! is skipped, and the failure is surfaced to the caller.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::CatalogError;
use crate::llm::SpecExtractor;
use crate::merge;
use crate::models::{CatalogRecord, DocumentStatus, SourceDocument};
use crate::repository::{CatalogRepository, DocumentRepository};
use crate::storage;

/// Result of ingesting one brochure.
#[derive(Debug, Clone)]
pub struct IngestOutcome {
    pub document: SourceDocument,
    pub record: CatalogRecord,
    /// True when the merge created a new catalog record.
    pub created: bool,
}

/// Service wiring the file store, document table, extractor, and catalog.
pub struct IngestService {
    catalog: CatalogRepository,
    documents: DocumentRepository,
    extractor: Arc<dyn SpecExtractor>,
    documents_dir: PathBuf,
}

impl IngestService {
    pub fn new(
        catalog: CatalogRepository,
        documents: DocumentRepository,
        extractor: Arc<dyn SpecExtractor>,
        documents_dir: PathBuf,
    ) -> Self {
        Self {
            catalog,
            documents,
            extractor,
            documents_dir,
        }
    }

    /// Whether the extraction backend is reachable.
    pub async fn is_available(&self) -> bool {
        self.extractor.is_available().await
    }

    /// Ingest one uploaded brochure for a (brand, model) pair.
    pub async fn ingest(
        &self,
        brand: &str,
        model_name: &str,
        filename: &str,
        content: &[u8],
    ) -> Result<IngestOutcome, CatalogError> {
        let brand = brand.trim();
        let model_name = model_name.trim();
        if brand.is_empty() {
            return Err(CatalogError::validation("brand is required"));
        }
        if model_name.is_empty() {
            return Err(CatalogError::validation("model name is required"));
        }

        let extension = storage::detect_extension(content, filename);
        let file_ref = storage::save(&self.documents_dir, content, &extension)?;

        let document = self
            .documents
            .create(|id| {
                SourceDocument::new(
                    id,
                    brand.to_string(),
                    model_name.to_string(),
                    content.len() as u64,
                    file_ref.clone(),
                )
            })
            .await;

        let text = String::from_utf8_lossy(content);
        let mut fields = match self.extractor.extract(&text).await {
            Ok(fields) => fields,
            Err(err) => {
                warn!(document = document.id, error = %err, "extraction failed");
                self.documents
                    .set_status(document.id, DocumentStatus::Failed)
                    .await?;
                return Err(err.into());
            }
        };

        // The upload form's pair is the fallback when the extractor did
        // not find one in the document itself.
        if fields.brand.is_none() {
            fields.brand = Some(brand.to_string());
        }
        if fields.model_name.is_none() {
            fields.model_name = Some(model_name.to_string());
        }

        let outcome = merge::upsert(&self.catalog, &fields).await?;

        // Link the brochure to the record unless one is already attached.
        let record = self
            .catalog
            .update_atomically(|table| {
                let mut record = match table.get(outcome.record.id).cloned() {
                    Some(r) => r,
                    None => return outcome.record.clone(),
                };
                if record.document_url.is_none() {
                    record.document_url = Some(document.file_ref.clone());
                    table.put(record.clone());
                }
                record
            })
            .await;

        self.documents
            .set_status(document.id, DocumentStatus::Processed)
            .await?;

        info!(
            document = document.id,
            record = record.id,
            created = outcome.created,
            "brochure ingested"
        );

        Ok(IngestOutcome {
            document: SourceDocument {
                status: DocumentStatus::Processed,
                ..document
            },
            record,
            created: outcome.created,
        })
    }
}
