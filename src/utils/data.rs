use crate::models::PredictionRecord;
use anyhow::{Context, Result};
use std::path::Path;

/// Save the raw fetched page so the markup can be inspected later
pub fn save_debug_html(html: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create debug directory")?;
    }
    std::fs::write(path, html).context("Failed to write debug HTML")?;
    Ok(())
}

/// Load a previously saved page instead of fetching it
pub fn load_html_from_file(path: impl AsRef<Path>) -> Result<String> {
    let path = path.as_ref();
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read HTML file {}", path.display()))
}

/// Save records to CSV
pub fn save_records_to_csv(records: &[PredictionRecord], path: impl AsRef<Path>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("Failed to create CSV file")?;
    for record in records {
        writer
            .serialize(record)
            .context("Failed to write CSV record")?;
    }
    writer.flush().context("Failed to flush CSV file")?;
    Ok(())
}

/// Save records to a pretty-printed JSON file
pub fn save_records_to_json(records: &[PredictionRecord], path: impl AsRef<Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(records).context("Failed to serialize records")?;
    std::fs::write(path, json).context("Failed to write JSON file")?;
    Ok(())
}
