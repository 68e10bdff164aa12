use chrono::NaiveDate;

use crate::{
    config::SeasonWindow,
    types::{Fixture, RawMatch},
};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_fixture_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).ok()
}

/// Zero-padded `YYYY-MM-DD`, the form the exported table is keyed by.
pub fn canonical_date(date: &str) -> Option<String> {
    parse_fixture_date(date).map(|d| d.format(DATE_FORMAT).to_string())
}

/// A match is upcoming when it has no completed score and its date lies in the window.
/// Undated or unparseable dates are never upcoming.
pub fn is_upcoming(raw: &RawMatch, fixture: &Fixture, window: &SeasonWindow) -> bool {
    if raw.score.is_completed() {
        return false;
    }
    parse_fixture_date(&fixture.date).is_some_and(|date| window.contains(date))
}
