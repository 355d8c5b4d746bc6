use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::analyzer::{Analyzer, AnalyzerConfig};
use crate::equity::{EquityTally, simulate};
use crate::range::{Hand, parse, parse_with_report};
use crate::report::{AnalysisReport, AnalysisRequest};

pub const MAX_ITERATIONS: u32 = 20_000;

#[derive(Clone)]
struct AppState {
    defaults: Arc<AnalyzerConfig>,
}

impl AppState {
    fn new(defaults: AnalyzerConfig) -> Self {
        Self {
            defaults: Arc::new(defaults),
        }
    }

    fn config_for(
        &self,
        iterations: Option<u32>,
        seed: Option<u64>,
    ) -> Result<AnalyzerConfig, ApiError> {
        let mut config = (*self.defaults).clone();
        if let Some(iterations) = iterations {
            config.iterations = iterations;
        }
        if config.iterations > MAX_ITERATIONS {
            return Err(ApiError::TooManyIterations {
                requested: config.iterations,
                max: MAX_ITERATIONS,
            });
        }
        if seed.is_some() {
            config.seed = seed;
        }
        config.no_color = true;
        Ok(config)
    }
}

#[derive(Debug, Deserialize)]
struct ParseRequest {
    range: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseResponse {
    pub combos: Vec<Hand>,
    pub count: usize,
    pub skipped: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EquityResponse {
    pub equity: f64,
    pub tally: EquityTally,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, thiserror::Error)]
enum ApiError {
    #[error("iterations must not exceed {max}, got {requested}")]
    TooManyIterations { requested: u32, max: u32 },
    #[error("analysis task failed")]
    Worker(#[from] tokio::task::JoinError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::TooManyIterations { .. } => StatusCode::BAD_REQUEST,
            ApiError::Worker(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(ErrorResponse {
            error: self.to_string(),
        });
        (status, body).into_response()
    }
}

pub async fn serve(addr: SocketAddr, defaults: AnalyzerConfig) -> Result<()> {
    let app = build_router(AppState::new(defaults));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    let api = Router::new()
        .route("/parse", post(parse_range))
        .route("/equity", post(equity))
        .route("/analyze", post(analyze));

    Router::new()
        .route("/healthz", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub fn router() -> Router {
    build_router(AppState::new(AnalyzerConfig::default()))
}

async fn health() -> &'static str {
    "ok"
}

async fn parse_range(Json(req): Json<ParseRequest>) -> Json<ParseResponse> {
    let report = parse_with_report(&req.range);
    Json(ParseResponse {
        count: report.range.len(),
        combos: report.range.hands().to_vec(),
        skipped: report.skipped,
    })
}

async fn equity(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<EquityResponse>, ApiError> {
    let config = state.config_for(req.iterations, req.seed)?;
    let tally = tokio::task::spawn_blocking(move || {
        let mut rng = StdRng::seed_from_u64(config.seed.unwrap_or_else(rand::random));
        let hero = parse(&req.hero);
        let villain = parse(&req.villain);
        simulate(&hero, &villain, &req.board, config.iterations, &mut rng)
    })
    .await?;
    Ok(Json(EquityResponse {
        equity: tally.equity(),
        tally,
    }))
}

async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalysisRequest>,
) -> Result<Json<AnalysisReport>, ApiError> {
    let config = state.config_for(req.iterations, req.seed)?;
    let report = tokio::task::spawn_blocking(move || {
        Analyzer::new(config).analyze(&req.hero, &req.villain, &req.board)
    })
    .await?;
    Ok(Json(report))
}
