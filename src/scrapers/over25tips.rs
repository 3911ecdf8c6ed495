use crate::error::ScrapeError;
use std::time::Duration;
use tracing::info;

pub const OVER25TIPS_URL: &str = "https://www.over25tips.com/free-football-betting-tips/";

/// Fetches the free tips page
pub struct Over25TipsScraper {
    client: reqwest::Client,
    url: String,
}

impl Over25TipsScraper {
    pub fn new(url: impl Into<String>) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    /// Download the raw page. Any transport error or non-success status is fatal.
    pub async fn fetch_html(&self) -> Result<String, ScrapeError> {
        info!("Fetching data from {}", self.url);
        let response = self.client.get(&self.url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status(status));
        }

        Ok(response.text().await?)
    }
}
