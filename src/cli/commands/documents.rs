//! Document table commands.

use console::style;

use crate::config::Settings;
use crate::repository::snapshot;
use crate::storage;

/// List uploaded documents.
pub async fn cmd_list(settings: &Settings) -> anyhow::Result<()> {
    let (_catalog, documents) = snapshot::load(&settings.state_path()).await?;
    let docs = documents.get_all().await;

    if docs.is_empty() {
        println!("{} No documents uploaded", style("!").yellow());
        return Ok(());
    }

    for doc in &docs {
        println!(
            "#{:<4} {:<10} {:<16} {:<10} {:>8} bytes  {}",
            doc.id,
            doc.brand,
            doc.model_name,
            doc.status.as_str(),
            doc.file_size_bytes,
            doc.uploaded_at.format("%Y-%m-%d %H:%M")
        );
    }
    println!("  {} documents", docs.len());
    Ok(())
}

/// Remove a document record and its stored file.
pub async fn cmd_rm(settings: &Settings, id: i64) -> anyhow::Result<()> {
    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;

    let doc = documents.delete(id).await?;
    if !storage::delete(&settings.documents_dir(), &doc.file_ref) {
        println!(
            "  {} stored file {} was already gone",
            style("!").yellow(),
            doc.file_ref
        );
    }
    snapshot::save(&settings.state_path(), &catalog, &documents).await?;

    println!(
        "{} Removed document #{} {} {}",
        style("✓").green(),
        doc.id,
        doc.brand,
        doc.model_name
    );
    Ok(())
}
