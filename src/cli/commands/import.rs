//! Bulk row import command.

use std::path::Path;
use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::config::Settings;
use crate::merge;
use crate::models::RawFields;
use crate::repository::snapshot;

/// Import rows from a JSON array file through the merge policy.
///
/// Rows that fail validation are reported and skipped; the batch never
/// aborts part-way.
pub async fn cmd_import(settings: &Settings, file: &Path) -> anyhow::Result<()> {
    settings.ensure_directories()?;
    let text = std::fs::read_to_string(file)?;
    let rows: Vec<serde_json::Value> = serde_json::from_str(&text)?;

    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;

    let bar = ProgressBar::new(rows.len() as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
            .unwrap()
            .progress_chars("#>-"),
    );
    bar.enable_steady_tick(Duration::from_millis(100));

    let mut created = 0usize;
    let mut updated = 0usize;
    let mut failed = 0usize;

    for (index, row) in rows.iter().enumerate() {
        let fields = RawFields::from_value(row);
        match merge::upsert(&catalog, &fields).await {
            Ok(outcome) => {
                if outcome.created {
                    created += 1;
                } else {
                    updated += 1;
                }
                bar.set_message(format!("{} {}", outcome.record.brand, outcome.record.model_name));
            }
            Err(err) => {
                failed += 1;
                bar.suspend(|| {
                    println!("  {} row {}: {}", style("✗").red(), index + 1, err);
                });
            }
        }
        bar.inc(1);
    }
    bar.finish_and_clear();

    snapshot::save(&settings.state_path(), &catalog, &documents).await?;

    println!(
        "{} Imported {} rows: {} created, {} updated, {} failed",
        style("✓").green(),
        rows.len(),
        created,
        updated,
        failed
    );
    Ok(())
}
