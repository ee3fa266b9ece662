use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Venue {
    #[serde(rename = "h")]
    Home,
    #[serde(rename = "a")]
    Away,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchResult {
    #[serde(rename = "w")]
    Win,
    #[serde(rename = "d")]
    Draw,
    #[serde(rename = "l")]
    Loss,
}

/// One historical match as seen by a single team. Read-only once ingested.
///
/// Every tracked metric is optional: upstream feeds drop fields per match,
/// and a missing metric must not sink the whole record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    #[serde(rename = "h_a")]
    pub venue: Venue,
    #[serde(default)]
    pub scored: Option<u32>,
    // The feed calls goals conceded "missed".
    #[serde(default, rename = "missed")]
    pub conceded: Option<u32>,
    #[serde(default, rename = "xG")]
    pub xg: Option<f64>,
    #[serde(default, rename = "xGA")]
    pub xga: Option<f64>,
    #[serde(default)]
    pub result: Option<MatchResult>,
    #[serde(default)]
    pub date: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamHistory {
    pub team_id: String,
    pub league: String,
    #[serde(default)]
    pub matches: Vec<MatchRecord>,
}

/// Restore chronological order. Feed dates are ISO-ish, so string comparison
/// is an acceptable fallback when parsing fails.
pub fn sort_history(matches: &mut [MatchRecord]) {
    matches.sort_by(|a, b| match (parse_date(&a.date), parse_date(&b.date)) {
        (Some(x), Some(y)) => x.cmp(&y),
        _ => a.date.cmp(&b.date),
    });
}

fn parse_date(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}
