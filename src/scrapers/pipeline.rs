use crate::error::{RowError, StoreError};
use crate::models::{PredictionRecord, RowFailure};
use crate::scrapers::rows::process_row;
use crate::scrapers::table::locate_rows;
use chrono::{Local, NaiveDateTime};
use scraper::Html;
use serde::Serialize;
use tracing::{debug, error, info, warn};

/// Per-run settings shared by every row
#[derive(Debug, Clone, Copy)]
pub struct RunContext {
    /// Local time the run started; supplies the match date and fallback kickoff time
    pub run_at: NaiveDateTime,
    /// Keep row markup on failures and log every assembled record
    pub debug: bool,
}

impl RunContext {
    pub fn now(debug: bool) -> Self {
        Self {
            run_at: Local::now().naive_local(),
            debug,
        }
    }
}

/// Where assembled records go. Each call is independent of the others.
pub trait RecordSink {
    fn store(&mut self, record: &PredictionRecord) -> Result<(), StoreError>;
}

impl RecordSink for Vec<PredictionRecord> {
    fn store(&mut self, record: &PredictionRecord) -> Result<(), StoreError> {
        self.push(record.clone());
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RunStatus {
    Completed,
    /// Neither the predictions table nor the whole-page scan produced a data row
    NoRows,
}

/// Records extracted from one document, before storage
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub records: Vec<PredictionRecord>,
    pub row_errors: Vec<RowFailure>,
    pub candidate_rows: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub status: RunStatus,
    pub candidate_rows: usize,
    /// Records that made it into the sink
    pub records: Vec<PredictionRecord>,
    pub inserted_count: usize,
    pub row_errors: Vec<RowFailure>,
}

impl RunReport {
    pub fn format(&self) -> String {
        match self.status {
            RunStatus::NoRows => "No valid rows found in the table".to_string(),
            RunStatus::Completed => format!(
                "Successfully inserted {} records ({} candidate rows, {} errors)",
                self.inserted_count,
                self.candidate_rows,
                self.row_errors.len()
            ),
        }
    }
}

/// Parse the document and process every candidate row
pub fn extract(html: &str, ctx: &RunContext) -> Extraction {
    let document = Html::parse_document(html);
    let rows = locate_rows(&document.root_element());

    let mut extraction = Extraction {
        candidate_rows: rows.len(),
        ..Default::default()
    };
    if rows.is_empty() {
        return extraction;
    }
    info!("Found {} potential rows to process", rows.len());

    for row in &rows {
        match process_row(row, ctx) {
            Ok(record) => {
                if ctx.debug {
                    debug!("Extracted data: {:?}", record);
                }
                extraction.records.push(record);
            }
            Err(failure) => {
                log_row_failure(&failure);
                extraction.row_errors.push(failure);
            }
        }
    }

    extraction
}

/// Extract records from `html` and hand each one to `sink`.
///
/// A failing row or a failing store call is logged and counted; the rest of
/// the batch still goes through. An empty page is left to the caller to report.
pub fn run<S: RecordSink>(html: &str, ctx: &RunContext, sink: &mut S) -> RunReport {
    let extraction = extract(html, ctx);

    if extraction.candidate_rows == 0 {
        return RunReport {
            status: RunStatus::NoRows,
            candidate_rows: 0,
            records: Vec::new(),
            inserted_count: 0,
            row_errors: Vec::new(),
        };
    }

    let mut row_errors = extraction.row_errors;
    let mut stored = Vec::with_capacity(extraction.records.len());

    for record in extraction.records {
        match sink.store(&record) {
            Ok(()) => stored.push(record),
            Err(e) => {
                let failure = RowFailure {
                    message: RowError::from(e).to_string(),
                    markup: None,
                };
                log_row_failure(&failure);
                row_errors.push(failure);
            }
        }
    }

    info!("Successfully inserted {} records", stored.len());

    RunReport {
        status: RunStatus::Completed,
        candidate_rows: extraction.candidate_rows,
        inserted_count: stored.len(),
        records: stored,
        row_errors,
    }
}

fn log_row_failure(failure: &RowFailure) {
    error!("Error processing row: {}", failure.message);
    if let Some(markup) = &failure.markup {
        warn!("Offending row: {}", markup);
    }
}
