use crate::scrapers::over25tips::OVER25TIPS_URL;
use std::path::PathBuf;

const DEFAULT_DATABASE_PATH: &str = "data/football_tips.db";
const DEFAULT_DEBUG_HTML_PATH: &str = "logs/football_tips.html";
const DEFAULT_WEB_ADDR: &str = "127.0.0.1:3000";

/// Settings read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub source_url: String,
    pub database_path: PathBuf,
    pub debug_html_path: PathBuf,
    pub web_addr: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source_url: OVER25TIPS_URL.to_string(),
            database_path: PathBuf::from(DEFAULT_DATABASE_PATH),
            debug_html_path: PathBuf::from(DEFAULT_DEBUG_HTML_PATH),
            web_addr: DEFAULT_WEB_ADDR.to_string(),
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Self {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            source_url: non_empty("FOOTBALL_TIPS_URL").unwrap_or(defaults.source_url),
            database_path: non_empty("DATABASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.database_path),
            debug_html_path: non_empty("DEBUG_HTML_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.debug_html_path),
            web_addr: non_empty("WEB_ADDR").unwrap_or(defaults.web_addr),
        }
    }
}
