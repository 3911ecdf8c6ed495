pub mod config;
pub mod error;
pub mod models;
pub mod scrapers;
pub mod utils;

pub use config::Config;
pub use error::*;
pub use models::*;
pub use scrapers::*;
pub use utils::*;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use scrapers::over25tips::Over25TipsScraper;
use scrapers::pipeline::{run, RunContext, RunReport};
use std::path::{Path, PathBuf};
use tracing::info;
use utils::data::{load_html_from_file, save_debug_html};
use utils::store::PredictionStore;

/// Options for a single scrape run
#[derive(Debug, Clone, Default)]
pub struct ScrapeOptions {
    /// Save the raw page and keep row markup for failures
    pub debug: bool,
    /// Read the page from disk instead of fetching it
    pub html_file: Option<PathBuf>,
    /// Extract only, do not touch the database
    pub dry_run: bool,
}

/// Fetch the tips page, extract the predictions and store them
pub async fn scrape_and_store(config: &Config, options: &ScrapeOptions) -> Result<RunReport> {
    let html = match &options.html_file {
        Some(path) => {
            info!("Loading HTML from {}", path.display());
            load_html_from_file(path)?
        }
        None => Over25TipsScraper::new(config.source_url.clone())?
            .fetch_html()
            .await
            .context("Failed to fetch football tips page")?,
    };

    if options.debug {
        save_debug_html(&html, &config.debug_html_path)?;
        info!(
            "HTML saved to {} for debugging",
            config.debug_html_path.display()
        );
    }

    let ctx = RunContext::now(options.debug);

    if options.dry_run {
        let mut records: Vec<PredictionRecord> = Vec::new();
        return Ok(run(&html, &ctx, &mut records));
    }

    let mut store = open_store(&config.database_path)?;
    Ok(run(&html, &ctx, &mut store))
}

/// Stored predictions for a day
pub fn load_predictions(config: &Config, date: NaiveDate) -> Result<Vec<StoredPrediction>> {
    let store = open_store(&config.database_path)?;
    let predictions = store
        .list_for_date(date)
        .context("Failed to load stored predictions")?;
    Ok(predictions)
}

pub fn open_store(path: &Path) -> Result<PredictionStore> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).context("Failed to create database directory")?;
    }
    PredictionStore::open(path)
        .with_context(|| format!("Failed to open database {}", path.display()))
}
