use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use chrono::{Local, NaiveDate, NaiveDateTime};
use football_tips::{load_predictions, scrape_and_store, Config, ScrapeOptions, StoredPrediction};
use serde::Deserialize;
use std::sync::Arc;
use tower_http::services::ServeDir;

// Custom filters for formatting
mod filters {
    use chrono::NaiveDateTime;

    pub fn clock(value: &NaiveDateTime) -> ::askama::Result<String> {
        Ok(value.format("%H:%M").to_string())
    }
}

#[derive(Template)]
#[template(path = "predictions.html")]
struct PredictionsTemplate {
    date_label: String,
    prev_date: String,
    next_date: String,
    last_updated: NaiveDateTime,
    predictions: Vec<StoredPrediction>,
}

struct HtmlTemplate<T>(T);

impl<T> IntoResponse for HtmlTemplate<T>
where
    T: Template,
{
    fn into_response(self) -> Response {
        match self.0.render() {
            Ok(html) => Html(html).into_response(),
            Err(err) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to render template: {}", err),
            )
                .into_response(),
        }
    }
}

type SharedConfig = Arc<Config>;

#[derive(Debug, Deserialize)]
struct DateQuery {
    date: Option<NaiveDate>,
}

async fn fetch_day(
    config: SharedConfig,
    date: NaiveDate,
) -> Result<Vec<StoredPrediction>, Response> {
    let result = tokio::task::spawn_blocking(move || load_predictions(&config, date)).await;

    match result {
        Ok(Ok(predictions)) => Ok(predictions),
        Ok(Err(e)) => {
            tracing::error!("Failed to load predictions: {:#}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to load predictions").into_response())
        }
        Err(e) => {
            tracing::error!("Database task failed: {}", e);
            Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to load predictions").into_response())
        }
    }
}

async fn render_day(config: SharedConfig, date: NaiveDate) -> Response {
    let predictions = match fetch_day(config, date).await {
        Ok(predictions) => predictions,
        Err(response) => return response,
    };

    let last_updated = predictions
        .iter()
        .map(|p| p.updated_at)
        .max()
        .unwrap_or_else(|| date.and_hms_opt(0, 0, 0).unwrap_or_default());

    let template = PredictionsTemplate {
        date_label: date.format("%Y-%m-%d").to_string(),
        prev_date: date.pred_opt().unwrap_or(date).format("%Y-%m-%d").to_string(),
        next_date: date.succ_opt().unwrap_or(date).format("%Y-%m-%d").to_string(),
        last_updated,
        predictions,
    };

    HtmlTemplate(template).into_response()
}

async fn today(State(config): State<SharedConfig>) -> impl IntoResponse {
    render_day(config, Local::now().date_naive()).await
}

async fn by_date(
    State(config): State<SharedConfig>,
    Path(date): Path<String>,
) -> impl IntoResponse {
    match NaiveDate::parse_from_str(&date, "%Y-%m-%d") {
        Ok(date) => render_day(config, date).await,
        Err(_) => (StatusCode::BAD_REQUEST, format!("Invalid date: {}", date)).into_response(),
    }
}

async fn api_predictions(
    State(config): State<SharedConfig>,
    Query(query): Query<DateQuery>,
) -> impl IntoResponse {
    let date = query.date.unwrap_or_else(|| Local::now().date_naive());
    match fetch_day(config, date).await {
        Ok(predictions) => Json(predictions).into_response(),
        Err(response) => response,
    }
}

fn app(config: SharedConfig) -> Router {
    Router::new()
        .nest_service("/static", ServeDir::new("static"))
        .route("/", get(today))
        .route("/date/:date", get(by_date))
        .route("/api/predictions", get(api_predictions))
        .with_state(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::fmt::init();

    // Optionally refresh today's tips before serving
    if std::env::var("SCRAPE_ON_START").unwrap_or_default() == "1" {
        println!("Fetching football tips...");
        match scrape_and_store(&config, &ScrapeOptions::default()).await {
            Ok(report) => println!("{}", report.format()),
            Err(e) => {
                eprintln!("Error fetching tips: {:#}", e);
                eprintln!("Server will start with previously stored data");
            }
        }
    }

    println!("\nStarting web server at http://{}", config.web_addr);
    println!("Press Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(&config.web_addr).await?;
    axum::serve(listener, app(Arc::new(config))).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use football_tips::{open_store, PredictionRecord};
    use tower::ServiceExt;

    fn seeded_config(dir: &std::path::Path) -> SharedConfig {
        let config = Config {
            database_path: dir.join("tips.db"),
            ..Config::default()
        };
        let store = open_store(&config.database_path).unwrap();
        store
            .insert(&PredictionRecord {
                match_date: NaiveDate::from_ymd_opt(2025, 6, 4).unwrap(),
                kickoff_time: "20:30".to_string(),
                league: "Premier League".to_string(),
                home_team: "Arsenal".to_string(),
                away_team: "Chelsea".to_string(),
                prediction: "Acima de 2.5 gols".to_string(),
                description: "Arsenal: marca 1.8, sofre 0.9 | Chelsea: marca 1.5, sofre 1.1"
                    .to_string(),
            })
            .unwrap();
        Arc::new(config)
    }

    async fn get_body(config: SharedConfig, uri: &str) -> (StatusCode, String) {
        let response = app(config)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_day_page_lists_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_body(seeded_config(dir.path()), "/date/2025-06-04").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Arsenal"));
        assert!(body.contains("Acima de 2.5 gols"));
        assert!(body.contains("/date/2025-06-03"));
        assert!(body.contains("/date/2025-06-05"));
    }

    #[tokio::test]
    async fn test_empty_day_page() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) = get_body(seeded_config(dir.path()), "/date/2025-06-05").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Nenhuma dica salva"));
    }

    #[tokio::test]
    async fn test_invalid_date() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _) = get_body(seeded_config(dir.path()), "/date/yesterday").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_api_predictions() {
        let dir = tempfile::tempdir().unwrap();
        let (status, body) =
            get_body(seeded_config(dir.path()), "/api/predictions?date=2025-06-04").await;

        assert_eq!(status, StatusCode::OK);
        let json: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json.as_array().unwrap().len(), 1);
        assert_eq!(json[0]["home_team"], "Arsenal");
        assert_eq!(json[0]["match_date"], "2025-06-04");
    }
}
