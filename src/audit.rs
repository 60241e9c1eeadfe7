//! Catalog integrity checker.
//!
//! A batch pass over the whole catalog and the document table. Reports
//! which documents are linked to a catalog entry, which are orphaned, and
//! builds a brand -> series -> documents index. A separate repair pass
//! back-fills `document_url` on records that lack one. Repair errors are
//! collected and returned, never raised.

use std::collections::{BTreeMap, HashSet};

use serde::Serialize;
use tracing::info;

use crate::models::{CatalogRecord, SourceDocument};
use crate::repository::CatalogRepository;
use crate::resolve::{is_associated, models_overlap, series_prefix};

/// A document together with the record it resolved to.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentLink {
    pub document: SourceDocument,
    pub record_id: i64,
}

/// Per-brand slice of the catalog.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BrandGroup {
    /// Distinct non-empty series prefixes among this brand's records.
    pub series: Vec<String>,
    pub records: Vec<CatalogRecord>,
    pub documents: Vec<SourceDocument>,
}

/// Result of an audit pass.
#[derive(Debug, Clone, Serialize)]
pub struct AuditReport {
    pub linked: Vec<DocumentLink>,
    pub orphaned: Vec<SourceDocument>,
    pub brand_index: BTreeMap<String, BrandGroup>,
}

/// Result of a repair pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RepairSummary {
    pub updated: usize,
    pub skipped: usize,
    pub errors: Vec<String>,
}

/// Classify every document and index the catalog by brand.
///
/// A document is linked when any record of the same brand passes the
/// resolver's substring test against the document's model field;
/// otherwise it is orphaned. Full scan on both tables.
pub fn audit(records: &[CatalogRecord], documents: &[SourceDocument]) -> AuditReport {
    let mut linked = Vec::new();
    let mut orphaned = Vec::new();

    for document in documents {
        let hit = records.iter().find(|record| {
            record.brand.eq_ignore_ascii_case(&document.brand)
                && models_overlap(&record.model_name, &document.model_name)
        });
        match hit {
            Some(record) => linked.push(DocumentLink {
                document: document.clone(),
                record_id: record.id,
            }),
            None => orphaned.push(document.clone()),
        }
    }

    let mut brand_index: BTreeMap<String, BrandGroup> = BTreeMap::new();
    for record in records {
        let group = brand_index.entry(record.brand.clone()).or_default();
        let prefix = series_prefix(&record.model_name);
        if !prefix.is_empty() && !group.series.iter().any(|s| s.eq_ignore_ascii_case(prefix)) {
            group.series.push(prefix.to_string());
        }
        group.records.push(record.clone());
    }
    for (brand, group) in brand_index.iter_mut() {
        group.series.sort();
        group.documents = documents
            .iter()
            .filter(|d| d.brand.eq_ignore_ascii_case(brand))
            .cloned()
            .collect();
    }

    AuditReport {
        linked,
        orphaned,
        brand_index,
    }
}

/// Back-fill `document_url` on records that have none.
///
/// A candidate document must share the record's brand, pass the
/// association test (substring or series), and its file_ref must not
/// already be claimed by another record — one brochure never backs two
/// records in a single pass. Records that already carry a url, or find no
/// candidate, are skipped.
pub async fn repair(
    catalog: &CatalogRepository,
    documents: &[SourceDocument],
) -> RepairSummary {
    let records = catalog.get_all().await;
    let mut claimed: HashSet<String> = records
        .iter()
        .filter_map(|r| r.document_url.clone())
        .collect();

    let mut summary = RepairSummary::default();

    for record in &records {
        if record.document_url.is_some() {
            summary.skipped += 1;
            continue;
        }

        let candidate = documents.iter().find(|d| {
            d.brand.eq_ignore_ascii_case(&record.brand)
                && is_associated(&record.model_name, &d.model_name)
                && !claimed.contains(&d.file_ref)
        });

        let Some(document) = candidate else {
            summary.skipped += 1;
            continue;
        };

        let file_ref = document.file_ref.clone();
        let applied = catalog
            .update_atomically(|table| match table.get(record.id).cloned() {
                Some(mut current) if current.document_url.is_none() => {
                    current.document_url = Some(file_ref.clone());
                    table.put(current);
                    true
                }
                _ => false,
            })
            .await;

        if applied {
            claimed.insert(document.file_ref.clone());
            summary.updated += 1;
        } else {
            summary
                .errors
                .push(format!("record {} changed during repair", record.id));
        }
    }

    info!(
        updated = summary.updated,
        skipped = summary.skipped,
        errors = summary.errors.len(),
        "repair pass complete"
    );
    summary
}
