use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use football_tips::data::{save_records_to_csv, save_records_to_json};
use football_tips::pipeline::RunStatus;
use football_tips::{load_predictions, scrape_and_store, Config, ScrapeOptions};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(author, version, about = "Scrape free football betting tips into a local database")]
struct Cli {
    /// Verbose logging; for `scrape` also saves the raw page and failing rows
    #[arg(long, global = true)]
    debug: bool,

    /// SQLite database file
    #[arg(long, global = true, env = "DATABASE_PATH")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch today's tips and store them
    Scrape {
        /// Page to scrape
        #[arg(long, env = "FOOTBALL_TIPS_URL")]
        url: Option<String>,

        /// Read the page from a saved HTML file instead of fetching it
        #[arg(long)]
        html_file: Option<PathBuf>,

        /// Also export the stored records to CSV
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Also export the stored records to JSON
        #[arg(long)]
        json: Option<PathBuf>,

        /// Extract and print only, do not write to the database
        #[arg(long)]
        dry_run: bool,
    },
    /// Print stored tips for a day
    List {
        /// Day to list (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    let mut config = Config::from_env();
    if let Some(db) = cli.db {
        config.database_path = db;
    }

    match cli.command {
        Command::Scrape {
            url,
            html_file,
            csv,
            json,
            dry_run,
        } => {
            if let Some(url) = url {
                config.source_url = url;
            }
            let options = ScrapeOptions {
                debug: cli.debug,
                html_file,
                dry_run,
            };
            scrape(&config, &options, csv, json).await
        }
        Command::List { date } => {
            let date = date.unwrap_or_else(|| Local::now().date_naive());
            list(&config, date)
        }
    }
}

async fn scrape(
    config: &Config,
    options: &ScrapeOptions,
    csv: Option<PathBuf>,
    json: Option<PathBuf>,
) -> Result<()> {
    println!("Football Tips Scraper\n");
    if options.html_file.is_none() {
        println!("Fetching data from {}...\n", config.source_url);
    }

    let report = scrape_and_store(config, options).await?;

    if report.status == RunStatus::NoRows {
        eprintln!("{}", report.format());
        return Ok(());
    }

    println!("Found {} potential rows to process\n", report.candidate_rows);
    for (i, record) in report.records.iter().enumerate() {
        println!("{}. {}", i + 1, record.format());
        if options.debug {
            println!("   {}", record.description);
        }
    }

    if !report.row_errors.is_empty() {
        println!();
        for failure in &report.row_errors {
            eprintln!("Error in row: {}", failure.message);
            if let Some(markup) = &failure.markup {
                eprintln!("{}", markup);
            }
        }
    }

    if let Some(path) = csv {
        save_records_to_csv(&report.records, &path)?;
        println!("\nSaved records to {}", path.display());
    }
    if let Some(path) = json {
        save_records_to_json(&report.records, &path)?;
        println!("\nSaved records to {}", path.display());
    }

    println!("\n{}", report.format());
    if options.dry_run {
        println!("Dry run, nothing was written to {}", config.database_path.display());
    }

    Ok(())
}

fn list(config: &Config, date: NaiveDate) -> Result<()> {
    let predictions = load_predictions(config, date)?;

    if predictions.is_empty() {
        println!("No predictions stored for {}.", date.format("%Y-%m-%d"));
        return Ok(());
    }

    println!(
        "{} predictions for {}:\n",
        predictions.len(),
        date.format("%Y-%m-%d")
    );
    for (i, stored) in predictions.iter().enumerate() {
        println!("{}. {}", i + 1, stored.record.format());
        println!("   {}", stored.record.description);
    }

    Ok(())
}
