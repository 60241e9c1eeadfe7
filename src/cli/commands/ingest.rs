//! Brochure ingestion command.

use std::path::Path;
use std::sync::Arc;

use console::style;

use crate::config::Settings;
use crate::llm::LlmExtractor;
use crate::repository::snapshot;
use crate::services::IngestService;

/// Ingest one brochure file for a (brand, model) pair.
pub async fn cmd_ingest(
    settings: &Settings,
    file: &Path,
    brand: &str,
    model: &str,
) -> anyhow::Result<()> {
    settings.ensure_directories()?;
    let content = std::fs::read(file)?;
    let filename = file
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("upload.bin");

    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;
    let extractor = Arc::new(LlmExtractor::new(settings.extractor.clone())?);
    let service = IngestService::new(
        catalog.clone(),
        documents.clone(),
        extractor,
        settings.documents_dir(),
    );

    if !service.is_available().await {
        println!(
            "{} Extraction service at {} is not reachable",
            style("!").yellow(),
            settings.extractor.endpoint
        );
    }

    let result = service.ingest(brand, model, filename, &content).await;
    // The document record exists even when extraction failed; persist it
    // either way.
    snapshot::save(&settings.state_path(), &catalog, &documents).await?;

    let outcome = result?;
    let verb = if outcome.created { "Created" } else { "Updated" };
    println!(
        "{} Stored document #{} ({} bytes)",
        style("✓").green(),
        outcome.document.id,
        outcome.document.file_size_bytes
    );
    println!(
        "{} {} record #{} {} {} ({})",
        style("✓").green(),
        verb,
        outcome.record.id,
        outcome.record.brand,
        outcome.record.model_name,
        outcome.record.capacity_range_label
    );
    Ok(())
}
