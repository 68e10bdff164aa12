use std::{cmp::Ordering, collections::HashMap};

use crate::{
    filter::parse_fixture_date,
    types::{Fixture, LeagueFixtures},
};

/// Date ascending, then kickoff ascending with `TBD` after every concrete time.
/// Unparseable dates sort after real ones.
pub fn compare_fixtures(a: &Fixture, b: &Fixture) -> Ordering {
    compare_dates(&a.date, &b.date).then_with(|| compare_times(a, b))
}

fn compare_dates(a: &str, b: &str) -> Ordering {
    match (parse_fixture_date(a), parse_fixture_date(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.cmp(b),
    }
}

fn compare_times(a: &Fixture, b: &Fixture) -> Ordering {
    match (a.is_tbd(), b.is_tbd()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => a.time.cmp(&b.time),
    }
}

pub fn sort_fixtures(fixtures: &mut [Fixture]) {
    fixtures.sort_by(compare_fixtures);
}

/// Partitions fixtures by league, leagues in order of first appearance.
pub fn group_by_league(fixtures: Vec<Fixture>) -> Vec<LeagueFixtures> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<LeagueFixtures> = Vec::new();

    for fixture in fixtures {
        let slot = *index.entry(fixture.league.clone()).or_insert_with(|| {
            groups.push(LeagueFixtures {
                league: fixture.league.clone(),
                fixtures: Vec::new(),
            });
            groups.len() - 1
        });
        groups[slot].fixtures.push(fixture);
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn fixture(date: &str, time: &str, league: &str, team1: &str) -> Fixture {
        Fixture {
            round: "N/A".to_string(),
            date: date.to_string(),
            time: time.to_string(),
            team1: team1.to_string(),
            team2: "Opponent".to_string(),
            league: league.to_string(),
            score: "N/A".to_string(),
        }
    }

    fn teams(fixtures: &[Fixture]) -> Vec<&str> {
        fixtures.iter().map(|f| f.team1.as_str()).collect()
    }

    #[test]
    fn test_sort_by_date_then_time() {
        let mut fixtures = vec![
            fixture("2024-12-02", "12:00", "L", "d"),
            fixture("2024-12-01", "TBD", "L", "c"),
            fixture("2024-12-01", "20:00", "L", "b"),
            fixture("2024-12-01", "15:00", "L", "a"),
        ];
        sort_fixtures(&mut fixtures);
        assert_eq!(teams(&fixtures), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_tbd_always_after_timed_on_same_date() {
        let tbd = fixture("2024-12-01", "TBD", "L", "tbd");
        for time in ["00:00", "12:30", "23:59"] {
            let timed = fixture("2024-12-01", time, "L", "timed");
            assert_eq!(compare_fixtures(&tbd, &timed), Ordering::Greater);
            assert_eq!(compare_fixtures(&timed, &tbd), Ordering::Less);
        }
        assert_eq!(compare_fixtures(&tbd, &tbd.clone()), Ordering::Equal);
    }

    #[test]
    fn test_unparseable_dates_last() {
        let mut fixtures = vec![
            fixture("N/A", "10:00", "L", "undated"),
            fixture("2025-05-25", "16:00", "L", "dated"),
        ];
        sort_fixtures(&mut fixtures);
        assert_eq!(teams(&fixtures), vec!["dated", "undated"]);
    }

    #[test]
    fn test_sort_is_stable_for_ties() {
        let mut fixtures = vec![
            fixture("2024-12-01", "TBD", "L", "first"),
            fixture("2024-12-01", "TBD", "L", "second"),
        ];
        sort_fixtures(&mut fixtures);
        assert_eq!(teams(&fixtures), vec!["first", "second"]);
    }

    #[test]
    fn test_group_by_league_preserves_order() {
        let fixtures = vec![
            fixture("2024-12-01", "13:00", "Serie A", "a"),
            fixture("2024-12-01", "14:00", "Premier League", "b"),
            fixture("2024-12-01", "15:00", "Serie A", "c"),
            fixture("2024-12-01", "TBD", "Premier League", "d"),
        ];
        let groups = group_by_league(fixtures);

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].league, "Serie A");
        assert_eq!(teams(&groups[0].fixtures), vec!["a", "c"]);
        assert_eq!(groups[1].league, "Premier League");
        assert_eq!(teams(&groups[1].fixtures), vec!["b", "d"]);
        assert!(group_by_league(Vec::new()).is_empty());
    }
}
