use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FeedConfig {
    pub feeds_dir: PathBuf,
    /// File names containing any of these markers hold reference data, not matches.
    pub auxiliary_markers: Vec<String>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            feeds_dir: PathBuf::from("2024-25"),
            auxiliary_markers: vec!["clubs".to_string()],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExportConfig {
    pub path: PathBuf,
    pub include_score: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("fixtures.csv"),
            include_score: false,
        }
    }
}

/// Inclusive date range a fixture must fall in to count as upcoming.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeasonWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SeasonWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// The July-to-June season that `date` belongs to.
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() >= 7 { date.year() } else { date.year() - 1 };
        Self {
            start: NaiveDate::from_ymd_opt(start_year, 7, 1).unwrap_or(date),
            end: NaiveDate::from_ymd_opt(start_year + 1, 6, 30).unwrap_or(date),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Default for SeasonWindow {
    fn default() -> Self {
        Self::containing(Local::now().date_naive())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DisplayConfig {
    /// Leagues (case-insensitive substring of the league name) shown with the extended offset.
    pub extended_offset_leagues: Vec<String>,
    pub default_offset_hours: i64,
    pub extended_offset_hours: i64,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            extended_offset_leagues: vec!["Premier League".to_string(), "Championship".to_string()],
            default_offset_hours: 1,
            extended_offset_hours: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3200,
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsConfig {
    pub python: String,
    pub script: PathBuf,
    pub timeout_secs: u64,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            python: "python3".to_string(),
            script: PathBuf::from("backend/app.py"),
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppConfig {
    pub feeds: FeedConfig,
    pub export: ExportConfig,
    pub season: SeasonWindow,
    pub display: DisplayConfig,
    pub web: WebConfig,
    pub stats: StatsConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("GAMESCOUT_FEEDS_DIR") {
            config.feeds.feeds_dir = PathBuf::from(dir);
        }
        if let Ok(markers) = env::var("GAMESCOUT_AUX_MARKERS") {
            config.feeds.auxiliary_markers = split_list(&markers);
        }
        if let Ok(path) = env::var("GAMESCOUT_EXPORT_PATH") {
            config.export.path = PathBuf::from(path);
        }
        if let Some(include) = parse_var::<bool>("GAMESCOUT_EXPORT_SCORE") {
            config.export.include_score = include;
        }
        if let Some(start) = parse_date_var("GAMESCOUT_SEASON_START") {
            config.season.start = start;
        }
        if let Some(end) = parse_date_var("GAMESCOUT_SEASON_END") {
            config.season.end = end;
        }
        if let Ok(leagues) = env::var("GAMESCOUT_EXTENDED_OFFSET_LEAGUES") {
            config.display.extended_offset_leagues = split_list(&leagues);
        }
        if let Some(hours) = parse_var::<i64>("GAMESCOUT_DEFAULT_OFFSET_HOURS") {
            config.display.default_offset_hours = hours;
        }
        if let Some(hours) = parse_var::<i64>("GAMESCOUT_EXTENDED_OFFSET_HOURS") {
            config.display.extended_offset_hours = hours;
        }
        if let Ok(host) = env::var("GAMESCOUT_HOST") {
            config.web.host = host;
        }
        if let Some(port) = parse_var::<u16>("GAMESCOUT_PORT") {
            config.web.port = port;
        }
        if let Ok(dir) = env::var("GAMESCOUT_STATIC_DIR") {
            config.web.static_dir = Some(PathBuf::from(dir));
        }
        if let Ok(python) = env::var("GAMESCOUT_STATS_PYTHON") {
            config.stats.python = python;
        }
        if let Ok(script) = env::var("GAMESCOUT_STATS_SCRIPT") {
            config.stats.script = PathBuf::from(script);
        }
        if let Some(timeout) = parse_var::<u64>("GAMESCOUT_STATS_TIMEOUT_SECS") {
            config.stats.timeout_secs = timeout;
        }

        config
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse::<T>().ok())
}

fn parse_date_var(name: &str) -> Option<NaiveDate> {
    env::var(name)
        .ok()
        .and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
