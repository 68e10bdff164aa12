use chrono::{Duration, NaiveTime};
use tracing::debug;

use crate::{config::DisplayConfig, types::TIME_TBD};

const TIME_FORMAT: &str = "%H:%M";

/// Shifts feed kickoff times into the audience's display time zone.
#[derive(Debug, Clone)]
pub struct TimeAdjuster {
    extended_leagues: Vec<String>,
    default_offset: Duration,
    extended_offset: Duration,
}

impl TimeAdjuster {
    pub fn new(config: &DisplayConfig) -> Self {
        Self {
            extended_leagues: config
                .extended_offset_leagues
                .iter()
                .map(|l| l.to_lowercase())
                .collect(),
            default_offset: offset_hours(config.default_offset_hours),
            extended_offset: offset_hours(config.extended_offset_hours),
        }
    }

    pub fn offset_for(&self, league: &str) -> Duration {
        let league = league.to_lowercase();
        if self.extended_leagues.iter().any(|l| league.contains(l.as_str())) {
            self.extended_offset
        } else {
            self.default_offset
        }
    }

    /// Only the time of day moves; a kickoff pushed past midnight wraps
    /// around and the fixture keeps its original date.
    pub fn adjust(&self, time: &str, league: &str) -> String {
        if time == TIME_TBD {
            return time.to_string();
        }

        match NaiveTime::parse_from_str(time.trim(), TIME_FORMAT) {
            Ok(kickoff) => {
                let (adjusted, _) = kickoff.overflowing_add_signed(self.offset_for(league));
                adjusted.format(TIME_FORMAT).to_string()
            }
            Err(e) => {
                debug!("Leaving unparseable kickoff time '{}' for {} as is: {}", time, league, e);
                time.to_string()
            }
        }
    }
}

// Only the time of day is shifted, so whole days drop out and any configured value is in range.
fn offset_hours(hours: i64) -> Duration {
    Duration::hours(hours.rem_euclid(24))
}

impl Default for TimeAdjuster {
    fn default() -> Self {
        Self::new(&DisplayConfig::default())
    }
}
