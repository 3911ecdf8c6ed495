use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Storage limits for the text columns of the predictions table
pub const MAX_DATE_LEN: usize = 10;
pub const MAX_TIME_LEN: usize = 30;
pub const MAX_PREDICTION_LEN: usize = 50;

/// One match prediction scraped from the tips table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub match_date: NaiveDate,
    pub kickoff_time: String, // "HH:MM" or "H:MM" as found on the page
    pub league: String,
    pub home_team: String,
    pub away_team: String,
    pub prediction: String, // Already translated
    pub description: String,
}

impl PredictionRecord {
    pub fn format(&self) -> String {
        format!(
            "{} {} [{}] {} x {} -> {}",
            self.match_date.format("%Y-%m-%d"),
            self.kickoff_time,
            self.league,
            self.home_team,
            self.away_team,
            self.prediction
        )
    }
}

/// Average goals scored/conceded for both sides of a match
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchStats {
    pub home_scored: f64,
    pub home_conceded: f64,
    pub away_scored: f64,
    pub away_conceded: f64,
}

/// A row that could not be turned into a record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    pub message: String,
    /// Raw row markup, only captured in debug mode
    pub markup: Option<String>,
}

/// A record as read back from storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredPrediction {
    pub id: i64,
    #[serde(flatten)]
    pub record: PredictionRecord,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
