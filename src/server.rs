//! HTTP surface for the doctor search
//!
//! `GET /health` and `GET /search/doctors`, backed by the same shared
//! `SearchEngine` the CLI and MCP modes use.

use crate::cli::SearchArgs;
use crate::error::AppError;
use crate::search::{SearchEngine, SearchResponse};
use crate::tools::health::{health_status, HealthStatus};
use crate::tools::search::run_search;
use anyhow::{Context, Result};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, warn};

/// Query string of `GET /search/doctors`
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    /// Disease or specialty or free text; required, may be blank
    pub q: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    /// payer_code or payer_name
    pub insurance: Option<String>,
    /// Preferred spoken language (e.g., Chinese, English)
    pub language: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
    pub lang: Option<String>,
}

impl TryFrom<SearchParams> for SearchArgs {
    type Error = AppError;

    fn try_from(params: SearchParams) -> Result<Self, AppError> {
        let query = params
            .q
            .ok_or_else(|| AppError::InvalidInput("Missing required query parameter 'q'".to_string()))?;
        Ok(SearchArgs {
            query,
            city: params.city,
            state: params.state,
            insurance: params.insurance,
            language: params.language,
            limit: params.limit,
            offset: params.offset,
            lang: params.lang,
            json: true,
        })
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = serde_json::json!({
            "code": self.error_code(),
            "message": self.message(),
        });
        (status, Json(body)).into_response()
    }
}

/// Build the router over a shared engine
pub fn router(engine: Arc<SearchEngine>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/search/doctors", get(search_doctors))
        .with_state(engine)
}

async fn health(State(engine): State<Arc<SearchEngine>>) -> Json<HealthStatus> {
    Json(health_status(&engine))
}

async fn search_doctors(
    State(engine): State<Arc<SearchEngine>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError> {
    match SearchArgs::try_from(params).and_then(|args| run_search(&engine, &args)) {
        Ok(response) => Ok(Json(response)),
        Err(e) => {
            warn!("Rejected search request: {}", e);
            Err(e)
        }
    }
}

/// Bind `bind` and serve until Ctrl-C
pub async fn serve(engine: Arc<SearchEngine>, bind: &str) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .with_context(|| format!("Failed to bind HTTP server to {}", bind))?;

    info!("HTTP server listening on {}", listener.local_addr()?);

    axum::serve(listener, router(engine))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")?;

    info!("HTTP server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
