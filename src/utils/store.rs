use crate::error::StoreError;
use crate::models::{PredictionRecord, StoredPrediction};
use crate::scrapers::pipeline::RecordSink;
use chrono::{Local, NaiveDate, NaiveDateTime};
use rusqlite::{params, Connection};
use std::path::Path;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const CREATE_TABLE_SQL: &str = "
CREATE TABLE IF NOT EXISTS football_predictions (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    match_date VARCHAR(10) NOT NULL,
    kickoff_time VARCHAR(30) NOT NULL,
    league TEXT NOT NULL,
    home_team TEXT NOT NULL,
    away_team TEXT NOT NULL,
    prediction VARCHAR(50) NOT NULL,
    description TEXT NOT NULL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS idx_football_predictions_date
    ON football_predictions (match_date);
";

/// SQLite-backed table of scraped predictions
pub struct PredictionStore {
    conn: Connection,
}

impl PredictionStore {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open(path)?,
        };
        store.ensure_table()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self, StoreError> {
        let store = Self {
            conn: Connection::open_in_memory()?,
        };
        store.ensure_table()?;
        Ok(store)
    }

    /// Create the table if missing. Safe to call repeatedly.
    pub fn ensure_table(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(CREATE_TABLE_SQL)?;
        Ok(())
    }

    /// Insert one record and return its row id
    pub fn insert(&self, record: &PredictionRecord) -> Result<i64, StoreError> {
        let now = Local::now().naive_local().format(TIMESTAMP_FORMAT).to_string();
        self.conn.execute(
            "INSERT INTO football_predictions
                (match_date, kickoff_time, league, home_team, away_team,
                 prediction, description, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
            params![
                record.match_date.format(DATE_FORMAT).to_string(),
                record.kickoff_time,
                record.league,
                record.home_team,
                record.away_team,
                record.prediction,
                record.description,
                now,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Predictions stored for `date`, ordered by kickoff time
    pub fn list_for_date(&self, date: NaiveDate) -> Result<Vec<StoredPrediction>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, match_date, kickoff_time, league, home_team, away_team,
                    prediction, description, created_at, updated_at
             FROM football_predictions
             WHERE match_date = ?1
             ORDER BY length(kickoff_time), kickoff_time, id",
        )?;

        let rows = stmt.query_map(params![date.format(DATE_FORMAT).to_string()], |row| {
            Ok(RawStoredRow {
                id: row.get(0)?,
                match_date: row.get(1)?,
                kickoff_time: row.get(2)?,
                league: row.get(3)?,
                home_team: row.get(4)?,
                away_team: row.get(5)?,
                prediction: row.get(6)?,
                description: row.get(7)?,
                created_at: row.get(8)?,
                updated_at: row.get(9)?,
            })
        })?;

        let mut predictions = Vec::new();
        for row in rows {
            predictions.push(row?.into_stored()?);
        }
        Ok(predictions)
    }

    pub fn count(&self) -> Result<usize, StoreError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM football_predictions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl RecordSink for PredictionStore {
    fn store(&mut self, record: &PredictionRecord) -> Result<(), StoreError> {
        self.insert(record).map(|_| ())
    }
}

struct RawStoredRow {
    id: i64,
    match_date: String,
    kickoff_time: String,
    league: String,
    home_team: String,
    away_team: String,
    prediction: String,
    description: String,
    created_at: String,
    updated_at: String,
}

impl RawStoredRow {
    fn into_stored(self) -> Result<StoredPrediction, StoreError> {
        let match_date = NaiveDate::parse_from_str(&self.match_date, DATE_FORMAT).map_err(|_| {
            StoreError::InvalidValue {
                column: "match_date",
                value: self.match_date.clone(),
            }
        })?;

        Ok(StoredPrediction {
            id: self.id,
            record: PredictionRecord {
                match_date,
                kickoff_time: self.kickoff_time,
                league: self.league,
                home_team: self.home_team,
                away_team: self.away_team,
                prediction: self.prediction,
                description: self.description,
            },
            created_at: parse_timestamp("created_at", &self.created_at)?,
            updated_at: parse_timestamp("updated_at", &self.updated_at)?,
        })
    }
}

fn parse_timestamp(column: &'static str, value: &str) -> Result<NaiveDateTime, StoreError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT).map_err(|_| StoreError::InvalidValue {
        column,
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: NaiveDate, time: &str, home: &str) -> PredictionRecord {
        PredictionRecord {
            match_date: date,
            kickoff_time: time.to_string(),
            league: "Serie A".to_string(),
            home_team: home.to_string(),
            away_team: "Roma".to_string(),
            prediction: "Acima de 2.5 gols".to_string(),
            description: format!("{}: marca 1.0, sofre 1.0 | Roma: marca 1.0, sofre 1.0", home),
        }
    }

    #[test]
    fn test_insert_and_list() {
        let store = PredictionStore::open_in_memory().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let tomorrow = NaiveDate::from_ymd_opt(2025, 6, 5).unwrap();

        store.insert(&record(today, "20:45", "Lazio")).unwrap();
        store.insert(&record(today, "9:30", "Milan")).unwrap();
        store.insert(&record(tomorrow, "18:00", "Inter")).unwrap();

        assert_eq!(store.count().unwrap(), 3);

        let listed = store.list_for_date(today).unwrap();
        assert_eq!(listed.len(), 2);
        assert_eq!(listed[0].record.home_team, "Milan");
        assert_eq!(listed[1].record.home_team, "Lazio");
        assert_eq!(listed[1].record, record(today, "20:45", "Lazio"));
        assert_eq!(listed[0].created_at, listed[0].updated_at);
    }

    #[test]
    fn test_ensure_table_is_idempotent() {
        let store = PredictionStore::open_in_memory().unwrap();
        store.ensure_table().unwrap();
        store.ensure_table().unwrap();
        assert_eq!(store.count().unwrap(), 0);
    }

    #[test]
    fn test_store_as_sink() {
        let mut store = PredictionStore::open_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        store.store(&record(date, "15:00", "Napoli")).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_invalid_stored_date() {
        let store = PredictionStore::open_in_memory().unwrap();
        store
            .conn
            .execute(
                "INSERT INTO football_predictions
                    (match_date, kickoff_time, league, home_team, away_team,
                     prediction, description, created_at, updated_at)
                 VALUES ('2025-06-04', '10:00', '', '', '', '', '', 'garbage', 'garbage')",
                [],
            )
            .unwrap();

        let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
        let result = store.list_for_date(date);
        assert!(matches!(
            result,
            Err(StoreError::InvalidValue {
                column: "created_at",
                ..
            })
        ));
    }

    #[test]
    fn test_open_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tips.db");
        {
            let store = PredictionStore::open(&path).unwrap();
            let date = NaiveDate::from_ymd_opt(2025, 6, 4).unwrap();
            store.insert(&record(date, "21:00", "Torino")).unwrap();
        }
        let store = PredictionStore::open(&path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }
}
