use axum::http::StatusCode;
use axum_test::TestServer;
use pretty_assertions::assert_eq;
use serde_json::Value;
use std::fs;
use tempfile::TempDir;

use gamescout_fixtures::{
    config::AppConfig,
    metrics::{MetricsCollector, ServiceMetrics},
    types::{Fixture, LeagueFixtures},
    web::{router, AppState},
};

const TABLE: &str = "Round,Date,Time,Team 1,Team 2,League\n\
    N/A,2024-12-01,15:00,A,B,Premier League 2024/25\n\
    Matchday 13,2024-12-01,TBD,Napoli,Torino,Serie A 2024/25\n\
    Matchday 13,2024-12-01,18:00,Milan,Empoli,Serie A 2024/25\n";

fn server(table: Option<&str>) -> (TempDir, TestServer) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = AppConfig::default();
    config.export.path = dir.path().join("fixtures.csv");
    config.stats.python = "sh".to_string();
    config.stats.script = dir.path().join("stats.sh");

    if let Some(table) = table {
        fs::write(&config.export.path, table).unwrap();
    }
    fs::write(
        &config.stats.script,
        r#"if [ "$2" = "Nowhere" ]; then echo '{"error": "Could not find club ID for Nowhere"}'; else printf '{"high_scoring": true, "team1": {"input_name": "%s"}}' "$2"; fi"#,
    )
    .unwrap();

    let state = AppState::from_config(&config, MetricsCollector::new());
    let server = TestServer::new(router(state, None)).unwrap();
    (dir, server)
}

#[tokio::test]
async fn test_fixtures_for_date() {
    let (_dir, server) = server(Some(TABLE));

    let response = server.get("/api/fixtures").add_query_param("date", "2024-12-01").await;
    response.assert_status_ok();

    let fixtures: Vec<Fixture> = response.json();
    let summary: Vec<_> = fixtures
        .iter()
        .map(|f| (f.team1.as_str(), f.time.as_str()))
        .collect();
    assert_eq!(summary, vec![("A", "17:00"), ("Milan", "19:00"), ("Napoli", "TBD")]);
}

#[tokio::test]
async fn test_grouped_fixtures() {
    let (_dir, server) = server(Some(TABLE));

    let response = server
        .get("/api/fixtures/grouped")
        .add_query_param("date", "2024-12-01")
        .await;
    response.assert_status_ok();

    let groups: Vec<LeagueFixtures> = response.json();
    let leagues: Vec<_> = groups.iter().map(|g| g.league.as_str()).collect();
    assert_eq!(leagues, vec!["Premier League 2024/25", "Serie A 2024/25"]);
    assert_eq!(groups[1].fixtures[0].team1, "Milan");
}

#[tokio::test]
async fn test_invalid_date_is_bad_request() {
    let (_dir, server) = server(Some(TABLE));

    let response = server.get("/api/fixtures").add_query_param("date", "01/12/2024").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("01/12/2024"));
}

#[tokio::test]
async fn test_missing_table_returns_empty_and_counts_error() {
    let (_dir, server) = server(None);

    let response = server.get("/api/fixtures").add_query_param("date", "2024-12-01").await;
    response.assert_status_ok();
    let fixtures: Vec<Fixture> = response.json();
    assert!(fixtures.is_empty());

    let metrics: ServiceMetrics = server.get("/api/metrics").await.json();
    assert_eq!(metrics.read_errors, 1);
    assert_eq!(metrics.empty_results, 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_stats_proxy() {
    let (_dir, server) = server(Some(TABLE));

    let response = server
        .get("/api/stats")
        .add_query_param("team1", "Arsenal")
        .add_query_param("team2", "Chelsea")
        .await;
    response.assert_status_ok();
    let stats: Value = response.json();
    assert_eq!(stats["team1"]["input_name"], "Arsenal");
    assert_eq!(stats["high_scoring"], true);

    let response = server
        .get("/api/stats")
        .add_query_param("team1", "Nowhere")
        .add_query_param("team2", "Chelsea")
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_stats_requires_both_teams() {
    let (_dir, server) = server(Some(TABLE));

    let response = server.get("/api/stats").add_query_param("team1", "Arsenal").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (_dir, server) = server(None);
    server.get("/health").await.assert_text("GameScout API is running");
}
