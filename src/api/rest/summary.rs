//! Dashboard summary and ping endpoints

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use super::ApiError;
use crate::api::state::AppState;
use crate::types::DashboardSummary;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

/// GET /api/summary/dashboard - Scan counts for today and this month
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
) -> Result<Json<SummaryResponse>, ApiError> {
    let log = state.log.clone();
    let summary = tokio::task::spawn_blocking(move || log.summary())
        .await
        .map_err(|e| ApiError::internal(format!("summary task failed: {}", e)))?;

    Ok(Json(SummaryResponse { ok: true, summary }))
}

#[derive(Debug, Serialize)]
pub struct PingResponse {
    pub ok: bool,
    pub msg: String,
}

/// GET /api/ping
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse {
        ok: true,
        msg: format!("{} {} alive", crate::NAME, crate::VERSION),
    })
}
