//! History endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use serde::Serialize;

use super::ApiError;
use crate::api::state::AppState;
use crate::types::{History, HistoryParams};

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub ok: bool,
    #[serde(flatten)]
    pub history: History,
}

/// GET /api/history?packagingId=..&from=..&to=..
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    params: Result<Query<HistoryParams>, QueryRejection>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let Query(params) = params.map_err(|e| ApiError::bad_request(e.body_text()))?;
    let query = params.into_query();

    // Reads share the store lock with fsyncing appends
    let log = state.log.clone();
    let history = tokio::task::spawn_blocking(move || log.history(&query))
        .await
        .map_err(|e| ApiError::internal(format!("history task failed: {}", e)))??;
    Ok(Json(HistoryResponse { ok: true, history }))
}
