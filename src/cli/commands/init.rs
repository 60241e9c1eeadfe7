//! Initialize command.

use console::style;

use crate::config::Settings;
use crate::repository::snapshot;
use crate::seed;

/// Initialize the data directory, write a starter config, and seed the
/// catalog.
pub async fn cmd_init(settings: &Settings) -> anyhow::Result<()> {
    settings.ensure_directories()?;

    if let Some(config_path) = Settings::default_config_path() {
        if !config_path.exists() {
            if let Some(parent) = config_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&config_path, toml::to_string_pretty(settings)?)?;
            println!(
                "  {} Wrote config to {}",
                style("✓").green(),
                config_path.display()
            );
        }
    }

    let (catalog, documents) = snapshot::load(&settings.state_path()).await?;
    let created = seed::seed_catalog(&catalog).await?;
    snapshot::save(&settings.state_path(), &catalog, &documents).await?;

    if created > 0 {
        println!("  {} Seeded {} records", style("✓").green(), created);
    }
    println!(
        "{} Initialized Liftdex in {}",
        style("✓").green(),
        settings.data_dir.display()
    );
    Ok(())
}
