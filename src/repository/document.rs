//! In-memory source-document table.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::CatalogError;
use crate::models::{DocumentStatus, SourceDocument};

#[derive(Debug, Default)]
struct DocumentTable {
    documents: HashMap<i64, SourceDocument>,
    next_id: i64,
}

/// Shared handle to the document table.
#[derive(Clone, Default)]
pub struct DocumentRepository {
    inner: Arc<RwLock<DocumentTable>>,
}

impl DocumentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the table contents, resuming the id counter past the
    /// highest id present.
    pub async fn hydrate(&self, documents: Vec<SourceDocument>) {
        let mut table = self.inner.write().await;
        table.next_id = documents.iter().map(|d| d.id).max().unwrap_or(0);
        table.documents = documents.into_iter().map(|d| (d.id, d)).collect();
    }

    /// All documents in id order.
    pub async fn get_all(&self) -> Vec<SourceDocument> {
        let table = self.inner.read().await;
        let mut documents: Vec<_> = table.documents.values().cloned().collect();
        documents.sort_by_key(|d| d.id);
        documents
    }

    pub async fn get(&self, id: i64) -> Option<SourceDocument> {
        self.inner.read().await.documents.get(&id).cloned()
    }

    /// Allocate an id and insert the document built from it.
    pub async fn create(
        &self,
        build: impl FnOnce(i64) -> SourceDocument,
    ) -> SourceDocument {
        let mut table = self.inner.write().await;
        table.next_id += 1;
        let document = build(table.next_id);
        table.documents.insert(document.id, document.clone());
        document
    }

    pub async fn put(&self, document: SourceDocument) {
        self.inner
            .write()
            .await
            .documents
            .insert(document.id, document);
    }

    /// Status transitions are the only mutation documents undergo.
    pub async fn set_status(
        &self,
        id: i64,
        status: DocumentStatus,
    ) -> Result<(), CatalogError> {
        let mut table = self.inner.write().await;
        match table.documents.get_mut(&id) {
            Some(document) => {
                document.status = status;
                Ok(())
            }
            None => Err(CatalogError::document_not_found(id)),
        }
    }

    pub async fn delete(&self, id: i64) -> Result<SourceDocument, CatalogError> {
        self.inner
            .write()
            .await
            .documents
            .remove(&id)
            .ok_or_else(|| CatalogError::document_not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.documents.len()
    }
}
