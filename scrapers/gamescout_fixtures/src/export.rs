use std::{
    fs,
    path::{Path, PathBuf},
};
use tracing::{error, info};

use crate::{
    error::{FixtureError, Result},
    types::Fixture,
};

pub const HEADER: [&str; 6] = ["Round", "Date", "Time", "Team 1", "Team 2", "League"];
pub const SCORE_HEADER: &str = "Score";

/// Replaces the fixtures table at `path` with `fixtures`.
///
/// Rows go to a sibling `.tmp` file which is renamed over the target once fully
/// flushed, so readers see either the previous table or the new one. On failure
/// the temporary file is removed and the previous table is left untouched.
pub fn export_fixtures(path: &Path, fixtures: &[Fixture], include_score: bool) -> Result<()> {
    let tmp_path = temp_path(path);

    let result = write_table(&tmp_path, fixtures, include_score)
        .and_then(|_| fs::rename(&tmp_path, path).map_err(FixtureError::from));

    if let Err(e) = result {
        error!("Export to {:?} failed: {}", path, e);
        let _ = fs::remove_file(&tmp_path);
        return Err(FixtureError::Export {
            path: path.to_path_buf(),
            source: Box::new(e),
        });
    }

    info!("Wrote {} fixtures to {:?}", fixtures.len(), path);
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_else(|| "fixtures.csv".into());
    name.push(".tmp");
    path.with_file_name(name)
}

fn write_table(path: &Path, fixtures: &[Fixture], include_score: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut wtr = csv::Writer::from_path(path)?;

    let mut header: Vec<&str> = HEADER.to_vec();
    if include_score {
        header.push(SCORE_HEADER);
    }
    wtr.write_record(&header)?;

    for fixture in fixtures {
        let mut record = vec![
            fixture.round.as_str(),
            fixture.date.as_str(),
            fixture.time.as_str(),
            fixture.team1.as_str(),
            fixture.team2.as_str(),
            fixture.league.as_str(),
        ];
        if include_score {
            record.push(fixture.score.as_str());
        }
        wtr.write_record(&record)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    fn fixture(team1: &str) -> Fixture {
        Fixture {
            round: "Matchday 14".to_string(),
            date: "2024-12-01".to_string(),
            time: "TBD".to_string(),
            team1: team1.to_string(),
            team2: "Inter".to_string(),
            league: "Serie A 2024/25".to_string(),
            score: "N/A".to_string(),
        }
    }

    #[test]
    fn test_export_writes_header_and_rows() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixtures.csv");

        export_fixtures(&path, &[fixture("Parma, Calcio")], false).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(
            content,
            "Round,Date,Time,Team 1,Team 2,League\n\
             Matchday 14,2024-12-01,TBD,\"Parma, Calcio\",Inter,Serie A 2024/25\n"
        );
        assert!(!dir.path().join("fixtures.csv.tmp").exists());
    }

    #[test]
    fn test_export_with_score_column() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("out/fixtures.csv");

        export_fixtures(&path, &[fixture("Roma")], true).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Round,Date,Time,Team 1,Team 2,League,Score"));
        assert_eq!(lines.next(), Some("Matchday 14,2024-12-01,TBD,Roma,Inter,Serie A 2024/25,N/A"));
    }

    #[test]
    fn test_export_overwrites_previous_table() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("fixtures.csv");

        export_fixtures(&path, &[fixture("Roma"), fixture("Lazio")], false).unwrap();
        export_fixtures(&path, &[], false).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "Round,Date,Time,Team 1,Team 2,League\n");
    }

    #[test]
    fn test_export_failure_is_reported() {
        let dir = tempdir().unwrap();
        // The target's parent is a regular file, so nothing can be created under it.
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "").unwrap();
        let path = blocker.join("fixtures.csv");

        let result = export_fixtures(&path, &[fixture("Roma")], false);
        assert!(matches!(result, Err(FixtureError::Export { .. })));
        assert!(!path.exists());
    }
}
