//! Export and catalog command implementations

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use renewals_core::export::write_export;
use renewals_core::ExportFormat;

use super::Dashboard;

pub fn cmd_export(dashboard: &Dashboard, format: &str, output: Option<&Path>) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow!(e))?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_export(&dashboard.records, format, &mut writer)
                .context("Failed to export renewals")?;
            writer.flush()?;
            eprintln!(
                "✅ Exported {} renewals as {} to {}",
                dashboard.records.len(),
                format,
                path.display()
            );
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_export(&dashboard.records, format, &mut handle)
                .context("Failed to export renewals")?;
        }
    }

    Ok(())
}

pub fn cmd_catalog(dashboard: &Dashboard, json: bool) -> Result<()> {
    let catalog = &dashboard.config.catalog;

    if json {
        println!("{}", serde_json::to_string_pretty(catalog.apps())?);
        return Ok(());
    }

    println!();
    println!("📦 Application Catalog ({} apps)", catalog.len());
    println!("   ─────────────────────────────────────────────");
    println!("   {:24} │ {}", "Application", "Category");
    println!("   ─────────────────────────┼────────────────────");
    for app in catalog.apps() {
        println!("   {:24} │ {}", app.name, app.category);
    }

    let generator = &dashboard.config.generator;
    println!();
    println!(
        "   {}-{} renewals per month, ${}-${} per cycle",
        generator.min_per_month, generator.max_per_month, generator.min_price, generator.max_price
    );

    Ok(())
}
