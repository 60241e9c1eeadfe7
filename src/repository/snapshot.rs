//! JSON snapshot persistence for the in-memory tables.
//!
//! The tables themselves are plain keyed maps; between CLI invocations
//! their contents live in a single pretty-printed JSON file under the
//! data directory. Loading an absent file yields empty tables.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::models::{CatalogRecord, SourceDocument};

use super::{CatalogRepository, DocumentRepository};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Snapshot {
    records: Vec<CatalogRecord>,
    documents: Vec<SourceDocument>,
}

/// Load both tables from the snapshot file.
pub async fn load(
    path: &Path,
) -> anyhow::Result<(CatalogRepository, DocumentRepository)> {
    let snapshot = if path.exists() {
        let text = std::fs::read_to_string(path)?;
        serde_json::from_str(&text)?
    } else {
        Snapshot::default()
    };

    let catalog = CatalogRepository::new();
    catalog.hydrate(snapshot.records).await;
    let documents = DocumentRepository::new();
    documents.hydrate(snapshot.documents).await;
    Ok((catalog, documents))
}

/// Write both tables back to the snapshot file.
pub async fn save(
    path: &Path,
    catalog: &CatalogRepository,
    documents: &DocumentRepository,
) -> anyhow::Result<()> {
    let snapshot = Snapshot {
        records: catalog.get_all().await,
        documents: documents.get_all().await,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, serde_json::to_string_pretty(&snapshot)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::merge;
    use crate::models::RawFields;
    use serde_json::json;

    #[tokio::test]
    async fn test_round_trip_preserves_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("state.json");

        let catalog = CatalogRepository::new();
        let documents = DocumentRepository::new();
        merge::upsert(
            &catalog,
            &RawFields::from_value(&json!({"brand": "Toyota", "model_name": "8FG25"})),
        )
        .await
        .unwrap();
        save(&path, &catalog, &documents).await.unwrap();

        let (catalog2, _documents2) = load(&path).await.unwrap();
        let outcome = merge::upsert(
            &catalog2,
            &RawFields::from_value(&json!({"brand": "Linde", "model_name": "H25"})),
        )
        .await
        .unwrap();
        // Counter resumes past the highest persisted id.
        assert_eq!(outcome.record.id, 2);
    }

    #[tokio::test]
    async fn test_missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let (catalog, documents) = load(&dir.path().join("absent.json")).await.unwrap();
        assert_eq!(catalog.len().await, 0);
        assert_eq!(documents.len().await, 0);
    }
}
