use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tokio::task::{self, JoinError};
use tracing::{error, info, warn};

use crate::{
    config::{AppConfig, WebConfig},
    error::FixtureError,
    filter::parse_fixture_date,
    metrics::{MetricsCollector, ServiceMetrics},
    query::FixtureStore,
    stats::{StatsClient, StatsError},
    time_adjust::TimeAdjuster,
    types::{Fixture, LeagueFixtures},
};

#[derive(Clone)]
pub struct AppState {
    pub store: FixtureStore,
    pub stats: StatsClient,
    pub metrics: MetricsCollector,
}

impl AppState {
    pub fn from_config(config: &AppConfig, metrics: MetricsCollector) -> Self {
        Self {
            store: FixtureStore::new(
                config.export.path.clone(),
                TimeAdjuster::new(&config.display),
                metrics.clone(),
            ),
            stats: StatsClient::new(&config.stats),
            metrics,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct DateParams {
    pub date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatsParams {
    pub team1: Option<String>,
    pub team2: Option<String>,
}

pub struct ApiError {
    status: StatusCode,
    body: serde_json::Value,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: json!({ "error": message.into() }),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

impl From<FixtureError> for ApiError {
    fn from(err: FixtureError) -> Self {
        match err {
            FixtureError::InvalidDate(_) => Self::bad_request(err.to_string()),
            other => Self {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                body: json!({ "error": other.to_string() }),
            },
        }
    }
}

impl From<JoinError> for ApiError {
    fn from(err: JoinError) -> Self {
        error!("Fixture query task failed: {}", err);
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: json!({ "error": "Fixture query failed" }),
        }
    }
}

impl From<StatsError> for ApiError {
    fn from(err: StatsError) -> Self {
        let status = match err {
            StatsError::Script(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            body: json!({ "error": err.to_string() }),
        }
    }
}

fn requested_date(params: &DateParams) -> Result<NaiveDate, FixtureError> {
    match params.date.as_deref() {
        None => Ok(Local::now().date_naive()),
        Some(raw) => parse_fixture_date(raw).ok_or_else(|| FixtureError::InvalidDate(raw.to_string())),
    }
}

#[axum::debug_handler]
pub async fn fixtures_handler(
    State(state): State<AppState>,
    Query(params): Query<DateParams>,
) -> Result<Json<Vec<Fixture>>, ApiError> {
    let date = requested_date(&params)?;
    let fixtures = task::spawn_blocking(move || state.store.fixtures_for_date(date)).await?;
    Ok(Json(fixtures))
}

#[axum::debug_handler]
pub async fn grouped_fixtures_handler(
    State(state): State<AppState>,
    Query(params): Query<DateParams>,
) -> Result<Json<Vec<LeagueFixtures>>, ApiError> {
    let date = requested_date(&params)?;
    let groups = task::spawn_blocking(move || state.store.grouped_fixtures_for_date(date)).await?;
    Ok(Json(groups))
}

#[axum::debug_handler]
pub async fn stats_handler(
    State(state): State<AppState>,
    Query(params): Query<StatsParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let team1 = params.team1.as_deref().map(str::trim).unwrap_or_default();
    let team2 = params.team2.as_deref().map(str::trim).unwrap_or_default();
    if team1.is_empty() || team2.is_empty() {
        return Err(ApiError::bad_request("Both team1 and team2 are required"));
    }

    match state.stats.game_stats(team1, team2).await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            warn!("Stats lookup for {} vs {} failed: {}", team1, team2, e);
            Err(e.into())
        }
    }
}

#[axum::debug_handler]
pub async fn metrics_handler(State(state): State<AppState>) -> Json<ServiceMetrics> {
    Json(state.metrics.get_metrics())
}

pub async fn health_handler() -> &'static str {
    "GameScout API is running"
}

pub fn router(state: AppState, static_dir: Option<&std::path::Path>) -> Router {
    let api = Router::new()
        .route("/api/fixtures", get(fixtures_handler))
        .route("/api/fixtures/grouped", get(grouped_fixtures_handler))
        .route("/api/stats", get(stats_handler))
        .route("/api/metrics", get(metrics_handler))
        .route("/health", get(health_handler))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };

    app.layer(TraceLayer::new_for_http())
}

pub async fn serve(state: AppState, config: &WebConfig) -> anyhow::Result<()> {
    let app = router(state, config.static_dir.as_deref());

    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server started on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutting down");
        })
        .await?;

    Ok(())
}
