use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::info;

use crate::{
    config::{AppConfig, SeasonWindow},
    error::Result,
    export::export_fixtures,
    feed_reader::{FeedReader, LeagueFeed},
    filter::{canonical_date, is_upcoming},
    normalize::normalize_match,
    sort::sort_fixtures,
    types::Fixture,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
    pub files_read: usize,
    pub files_skipped: usize,
    pub matches_seen: usize,
    pub fixtures_exported: usize,
}

/// Feeds directory in, upcoming fixtures table out.
#[derive(Debug, Clone)]
pub struct IngestPipeline {
    pub feeds_dir: PathBuf,
    pub auxiliary_markers: Vec<String>,
    pub export_path: PathBuf,
    pub include_score: bool,
    pub window: SeasonWindow,
}

impl IngestPipeline {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            feeds_dir: config.feeds.feeds_dir.clone(),
            auxiliary_markers: config.feeds.auxiliary_markers.clone(),
            export_path: config.export.path.clone(),
            include_score: config.export.include_score,
            window: config.season,
        }
    }

    /// Normalized, filtered and sorted fixtures from every readable feed.
    pub fn collect(&self) -> Result<(Vec<Fixture>, IngestReport)> {
        let reader = FeedReader::new(&self.feeds_dir, self.auxiliary_markers.clone());
        let scan = reader.read_all()?;

        let report = IngestReport {
            files_read: scan.feeds.len(),
            files_skipped: scan.skipped.len(),
            matches_seen: scan.feeds.iter().map(|f| f.matches.len()).sum(),
            fixtures_exported: 0,
        };

        let mut fixtures: Vec<Fixture> = scan
            .feeds
            .iter()
            .flat_map(|feed| self.upcoming(feed))
            .collect();
        sort_fixtures(&mut fixtures);

        Ok((fixtures, report))
    }

    fn upcoming<'a>(&'a self, feed: &'a LeagueFeed) -> impl Iterator<Item = Fixture> + 'a {
        feed.matches.iter().filter_map(move |(raw, round)| {
            let mut fixture = normalize_match(raw, &feed.league, round.as_deref());
            if !is_upcoming(raw, &fixture, &self.window) {
                return None;
            }
            fixture.date = canonical_date(&fixture.date)?;
            Some(fixture)
        })
    }

    pub fn run(&self) -> Result<IngestReport> {
        info!(
            "Ingesting feeds from {:?} for {} to {}",
            self.feeds_dir, self.window.start, self.window.end
        );
        let (fixtures, mut report) = self.collect()?;
        export_fixtures(&self.export_path, &fixtures, self.include_score)?;
        report.fixtures_exported = fixtures.len();

        info!(
            "Processed {} matches from {} files ({} skipped), exported {} fixtures",
            report.matches_seen, report.files_read, report.files_skipped, report.fixtures_exported
        );
        Ok(report)
    }
}
