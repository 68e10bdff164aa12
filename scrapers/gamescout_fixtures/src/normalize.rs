use crate::types::{Fixture, RawMatch, RawScore, NOT_AVAILABLE, TIME_TBD};

/// Builds the canonical fixture for one feed record. The league always comes
/// from the enclosing feed, `default_round` from the enclosing round if any.
pub fn normalize_match(raw: &RawMatch, league: &str, default_round: Option<&str>) -> Fixture {
    let round = raw
        .round
        .as_deref()
        .or(default_round)
        .unwrap_or(NOT_AVAILABLE)
        .to_string();

    Fixture {
        round,
        date: or_not_available(raw.date.as_deref()),
        time: normalize_time(raw.time.as_deref()),
        team1: or_not_available(raw.team1.as_deref()),
        team2: or_not_available(raw.team2.as_deref()),
        league: league.to_string(),
        score: render_score(&raw.score),
    }
}

pub fn normalize_time(time: Option<&str>) -> String {
    match time {
        Some(t) if t.contains(':') => t.to_string(),
        _ => TIME_TBD.to_string(),
    }
}

pub fn render_score(score: &RawScore) -> String {
    match score {
        RawScore::FullTime { home, away } => format!("{}-{}", home, away),
        RawScore::Text(text) => text.clone(),
        RawScore::Pending => NOT_AVAILABLE.to_string(),
    }
}

fn or_not_available(value: Option<&str>) -> String {
    value.unwrap_or(NOT_AVAILABLE).to_string()
}
