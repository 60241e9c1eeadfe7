//! Catalog record commands: add, update, remove, show, list.

use console::style;

use crate::config::Settings;
use crate::merge;
use crate::models::{RawFields, RawValue};
use crate::repository::snapshot;

use super::RecordArgs;

impl RecordArgs {
    /// Lower the CLI flags into the loose field bag the merge policy
    /// consumes. Every value stays text; the normalizers do the rest.
    pub fn into_fields(self) -> RawFields {
        let text = |v: Option<String>| v.map(RawValue::Text);
        RawFields {
            brand: self.brand,
            model_name: self.model,
            tier: text(self.tier),
            load_capacity_kg: text(self.capacity),
            lift_height_cm: text(self.lift_height),
            power_type: text(self.power),
            operating_weight_kg: text(self.weight),
            turn_radius_cm: text(self.turn_radius),
            travel_speed_kmh: text(self.speed),
            price_range_min: text(self.price_min),
            price_range_max: text(self.price_max),
            warranty_months: text(self.warranty),
            availability: text(self.availability),
            overall_score: text(self.score),
            capacity_range_label: text(self.capacity_label),
            document_url: None,
        }
    }
}

/// Add a record through the duplicate-guarded creation path.
pub async fn cmd_add(settings: &Settings, args: RecordArgs) -> anyhow::Result<()> {
    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;

    let outcome = merge::create_guarded(&catalog, &args.into_fields()).await?;
    snapshot::save(&settings.state_path(), &catalog, &documents).await?;

    let record = outcome.record;
    if outcome.created {
        println!(
            "{} Added #{} {} {} ({})",
            style("✓").green(),
            record.id,
            record.brand,
            record.model_name,
            record.capacity_range_label
        );
    } else {
        // The guard only rejects exact pairs; a series-level match still
        // routes through the merge policy as an update.
        println!(
            "{} Merged into existing #{} {} {}",
            style("!").yellow(),
            record.id,
            record.brand,
            record.model_name
        );
    }
    Ok(())
}

/// Update fields of a record by id.
pub async fn cmd_update(settings: &Settings, id: i64, args: RecordArgs) -> anyhow::Result<()> {
    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;

    let record = merge::apply_update(&catalog, id, &args.into_fields()).await?;
    snapshot::save(&settings.state_path(), &catalog, &documents).await?;

    println!(
        "{} Updated #{} {} {}",
        style("✓").green(),
        record.id,
        record.brand,
        record.model_name
    );
    Ok(())
}

/// Remove a record by id.
pub async fn cmd_rm(settings: &Settings, id: i64) -> anyhow::Result<()> {
    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;

    let record = catalog.delete(id).await?;
    snapshot::save(&settings.state_path(), &catalog, &documents).await?;

    println!(
        "{} Removed #{} {} {}",
        style("✓").green(),
        record.id,
        record.brand,
        record.model_name
    );
    Ok(())
}

/// Print one record as JSON.
pub async fn cmd_show(settings: &Settings, id: i64) -> anyhow::Result<()> {
    let (catalog, _documents) = snapshot::load(&settings.state_path()).await?;
    let record = catalog
        .get(id)
        .await
        .ok_or(crate::error::CatalogError::record_not_found(id))?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

/// List catalog records.
pub async fn cmd_list(settings: &Settings, json: bool) -> anyhow::Result<()> {
    let (catalog, _documents) = snapshot::load(&settings.state_path()).await?;
    let records = catalog.get_all().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("{} Catalog is empty. Run 'lift init' to seed it.", style("!").yellow());
        return Ok(());
    }

    for record in &records {
        println!(
            "#{:<4} {:<10} {:<14} {:<10} {:>6} kg  {:<14} {}",
            record.id,
            record.brand,
            record.model_name,
            record.tier.as_str(),
            record.load_capacity_kg,
            record.capacity_range_label,
            record.availability
        );
    }
    println!("  {} records", records.len());
    Ok(())
}
