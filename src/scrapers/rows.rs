use crate::error::RowError;
use crate::models::{
    MatchStats, PredictionRecord, RowFailure, MAX_DATE_LEN, MAX_PREDICTION_LEN, MAX_TIME_LEN,
};
use crate::scrapers::fields::{
    extract_text, extract_trimmed, parse_kickoff_time, parse_stat,
    AWAY_TEAM_SELECTORS, HOME_TEAM_SELECTORS, LEAGUE_SELECTORS, PREDICTION_SELECTORS,
};
use crate::scrapers::markup::MarkupNode;
use crate::scrapers::pipeline::RunContext;
use crate::scrapers::translate::translate_prediction;

/// Turn one table row into a record. Failures stay local to the row.
pub fn process_row<N: MarkupNode>(
    row: &N,
    ctx: &RunContext,
) -> Result<PredictionRecord, RowFailure> {
    assemble_record(row, ctx).map_err(|e| RowFailure {
        message: e.to_string(),
        markup: ctx.debug.then(|| row.outer_markup()),
    })
}

fn assemble_record<N: MarkupNode>(
    row: &N,
    ctx: &RunContext,
) -> Result<PredictionRecord, RowError> {
    let kickoff_time = parse_kickoff_time(row, ctx.run_at.time());
    let league = extract_trimmed(row, LEAGUE_SELECTORS);
    let home_team = extract_trimmed(row, HOME_TEAM_SELECTORS);
    let away_team = extract_trimmed(row, AWAY_TEAM_SELECTORS);

    let raw_prediction = extract_text(row, PREDICTION_SELECTORS);
    let prediction = translate_prediction(&raw_prediction).trim().to_string();

    let stats = MatchStats {
        home_scored: parse_stat(row, "home-scored"),
        home_conceded: parse_stat(row, "home-conceded"),
        away_scored: parse_stat(row, "away-scored"),
        away_conceded: parse_stat(row, "away-conceded"),
    };
    let description = build_description(&home_team, &away_team, &stats);

    let record = PredictionRecord {
        match_date: ctx.run_at.date(),
        kickoff_time,
        league,
        home_team,
        away_team,
        prediction,
        description,
    };
    validate_record(&record)?;

    Ok(record)
}

pub fn build_description(home_team: &str, away_team: &str, stats: &MatchStats) -> String {
    format!(
        "{}: marca {:.1}, sofre {:.1} | {}: marca {:.1}, sofre {:.1}",
        home_team,
        stats.home_scored,
        stats.home_conceded,
        away_team,
        stats.away_scored,
        stats.away_conceded
    )
}

/// Check the record fits the storage columns
pub fn validate_record(record: &PredictionRecord) -> Result<(), RowError> {
    let date = record.match_date.format("%Y-%m-%d").to_string();
    check_len("match_date", &date, MAX_DATE_LEN)?;
    check_len("kickoff_time", &record.kickoff_time, MAX_TIME_LEN)?;
    check_len("prediction", &record.prediction, MAX_PREDICTION_LEN)?;
    Ok(())
}

fn check_len(field: &'static str, value: &str, max: usize) -> Result<(), RowError> {
    let len = value.chars().count();
    if len > max {
        return Err(RowError::FieldTooLong { field, len, max });
    }
    Ok(())
}
