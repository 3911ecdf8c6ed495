use thiserror::Error;

/// Run-level failures. Anything listed here ends the run without records.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Failed to connect to the website")]
    Fetch(#[from] reqwest::Error),
    #[error("Website answered with status {0}")]
    Status(reqwest::StatusCode),
}

/// Selector failure while querying markup
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkupError {
    #[error("Invalid selector '{selector}': {reason}")]
    InvalidSelector { selector: String, reason: String },
}

/// Failure while assembling a single record
#[derive(Error, Debug)]
pub enum RowError {
    #[error("{field} is {len} chars long, limit is {max}")]
    FieldTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },
    #[error("Failed to store record: {0}")]
    Store(#[from] StoreError),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("Invalid stored value in column {column}: {value}")]
    InvalidValue { column: &'static str, value: String },
}
