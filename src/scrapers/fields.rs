//! Field extraction with ordered selector fallbacks.

use crate::scrapers::markup::MarkupNode;
use chrono::NaiveTime;
use regex::Regex;
use std::fmt::Write;
use std::sync::LazyLock;
use tracing::debug;

pub const TIME_SELECTORS: &[&str] = &[
    ".hour_start",
    ".match-time",
    "td:nth-child(1)",
    "td:first-child",
];
pub const LEAGUE_SELECTORS: &[&str] = &[".league-name", "span", "td:nth-child(2)"];
pub const HOME_TEAM_SELECTORS: &[&str] = &[".home-team", ".team-home", "td:nth-child(3)"];
pub const AWAY_TEAM_SELECTORS: &[&str] = &[".away-team", ".team-away", "td:nth-child(5)"];
pub const PREDICTION_SELECTORS: &[&str] = &[".prediction", "td:nth-child(10)", "td:last-child"];

const TIME_FORMAT: &str = "%H:%M";
const MIDNIGHT: &str = "00:00";

// ASCII digits only, the page never uses anything else
static RE_KICKOFF_TIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[0-9]{1,2}:[0-9]{2}").expect("invalid regex: kickoff time"));

/// Text of the first element matched by the first selector that matches
/// anything. Broken selectors are skipped; no match gives an empty string.
pub fn extract_text<N, S>(row: &N, selectors: &[S]) -> String
where
    N: MarkupNode,
    S: AsRef<str>,
{
    for selector in selectors {
        let selector = selector.as_ref();
        match row.query(selector) {
            Ok(nodes) => {
                if let Some(node) = nodes.first() {
                    return node.text_content();
                }
            }
            Err(e) => {
                debug!("Skipping selector {}: {}", selector, e);
                continue;
            }
        }
    }
    String::new()
}

/// Trimmed text for league and team name columns
pub fn extract_trimmed<N: MarkupNode>(row: &N, selectors: &[&str]) -> String {
    extract_text(row, selectors).trim().to_string()
}

/// First `H:MM`/`HH:MM` substring in `text`
pub fn find_kickoff_time(text: &str) -> Option<&str> {
    RE_KICKOFF_TIME.find(text).map(|m| m.as_str())
}

/// Kickoff time for the row. Falls back to `now` when the row carries no
/// time, so a markup change never costs the whole row.
pub fn parse_kickoff_time<N: MarkupNode>(row: &N, now: NaiveTime) -> String {
    let text = extract_text(row, TIME_SELECTORS);
    match find_kickoff_time(&text) {
        Some(time) => time.to_string(),
        None => format_time_of_day(now),
    }
}

fn format_time_of_day(now: NaiveTime) -> String {
    let mut out = String::new();
    match write!(out, "{}", now.format(TIME_FORMAT)) {
        Ok(()) => out,
        Err(_) => MIDNIGHT.to_string(),
    }
}

/// Stat value from `.{name}` or `.{name}-stat`, `0.0` when absent or garbled
pub fn parse_stat<N: MarkupNode>(row: &N, name: &str) -> f64 {
    let selectors = [format!(".{}", name), format!(".{}-stat", name)];
    parse_number(&extract_text(row, &selectors))
}

/// Lenient float parsing: drops everything except digits, signs and decimal
/// points, then reads the longest leading number with at most one decimal
/// separator. Returns `0.0` if nothing numeric is left.
pub fn parse_number(text: &str) -> f64 {
    let sanitized: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
        .collect();
    leading_number(&sanitized).unwrap_or(0.0)
}

fn leading_number(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }

    if !seen_digit {
        return None;
    }
    s[..end].parse::<f64>().ok().filter(|v| v.is_finite())
}
