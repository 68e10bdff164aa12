use chrono::NaiveDate;
use std::{fs::File, path::PathBuf};
use tracing::{debug, error};

use crate::{
    error::Result,
    filter::parse_fixture_date,
    metrics::MetricsCollector,
    sort::{group_by_league, sort_fixtures},
    time_adjust::TimeAdjuster,
    types::{Fixture, LeagueFixtures},
};

/// Read side of the exported fixtures table.
#[derive(Clone)]
pub struct FixtureStore {
    path: PathBuf,
    adjuster: TimeAdjuster,
    metrics: MetricsCollector,
}

impl FixtureStore {
    pub fn new(path: impl Into<PathBuf>, adjuster: TimeAdjuster, metrics: MetricsCollector) -> Self {
        Self {
            path: path.into(),
            adjuster,
            metrics,
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Fixtures on `date`, kickoff times shifted for display and sorted.
    pub fn try_fixtures_for_date(&self, date: NaiveDate) -> Result<Vec<Fixture>> {
        let file = File::open(&self.path)?;
        let mut rdr = csv::Reader::from_reader(file);

        let mut fixtures = Vec::new();
        for result in rdr.deserialize::<Fixture>() {
            let mut fixture = result?;
            if parse_fixture_date(&fixture.date) != Some(date) {
                continue;
            }
            fixture.time = self.adjuster.adjust(&fixture.time, &fixture.league);
            fixtures.push(fixture);
        }

        sort_fixtures(&mut fixtures);
        Ok(fixtures)
    }

    /// Like [`try_fixtures_for_date`](Self::try_fixtures_for_date), but a table that
    /// cannot be read yields an empty list. The failure is logged and counted
    /// separately from a date that simply has no fixtures.
    pub fn fixtures_for_date(&self, date: NaiveDate) -> Vec<Fixture> {
        match self.try_fixtures_for_date(date) {
            Ok(fixtures) => {
                if fixtures.is_empty() {
                    debug!("No fixtures on {} in {:?}", date, self.path);
                }
                self.metrics.record_query(fixtures.len());
                fixtures
            }
            Err(e) => {
                error!("Failed to read fixtures table {:?}: {}", self.path, e);
                self.metrics.record_read_error(e.to_string());
                Vec::new()
            }
        }
    }

    pub fn grouped_fixtures_for_date(&self, date: NaiveDate) -> Vec<LeagueFixtures> {
        group_by_league(self.fixtures_for_date(date))
    }
}
