//! Integrity audit command.

use console::style;

use crate::audit;
use crate::config::Settings;
use crate::repository::snapshot;

/// Audit document/catalog cross-references, optionally repairing missing
/// document links.
pub async fn cmd_audit(settings: &Settings, repair: bool, json: bool) -> anyhow::Result<()> {
    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;
    let records = catalog.get_all().await;
    let docs = documents.get_all().await;

    let report = audit::audit(&records, &docs);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} {} documents linked, {} orphaned",
            style("→").cyan(),
            report.linked.len(),
            report.orphaned.len()
        );
        for orphan in &report.orphaned {
            println!(
                "  {} #{} {} {} ({})",
                style("✗").red(),
                orphan.id,
                orphan.brand,
                orphan.model_name,
                orphan.status.as_str()
            );
        }
        for (brand, group) in &report.brand_index {
            let series = if group.series.is_empty() {
                "-".to_string()
            } else {
                group.series.join(", ")
            };
            println!(
                "  {:<12} {} records, {} documents, series: {}",
                brand,
                group.records.len(),
                group.documents.len(),
                series
            );
        }
    }

    if repair {
        let summary = audit::repair(&catalog, &docs).await;
        snapshot::save(&settings.state_path(), &catalog, &documents).await?;
        println!(
            "{} Repair: {} updated, {} skipped, {} errors",
            style("✓").green(),
            summary.updated,
            summary.skipped,
            summary.errors.len()
        );
        for error in &summary.errors {
            println!("  {} {}", style("✗").red(), error);
        }
    }

    Ok(())
}
