//! Scan recording endpoint

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Serialize;

use super::ApiError;
use crate::api::state::AppState;
use crate::types::{ScanDraft, ScanEvent};

#[derive(Debug, Serialize)]
pub struct RecordResponse {
    pub ok: bool,
    pub record: ScanEvent,
}

/// POST /api/scan - Validate and store one scan
pub async fn record_scan(
    State(state): State<Arc<AppState>>,
    body: Result<Json<ScanDraft>, JsonRejection>,
) -> Result<Json<RecordResponse>, ApiError> {
    let Json(draft) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    // The durable write fsyncs; keep it off the async workers
    let log = state.log.clone();
    let record = tokio::task::spawn_blocking(move || log.record(draft))
        .await
        .map_err(|e| ApiError::internal(format!("record task failed: {}", e)))??;

    Ok(Json(RecordResponse { ok: true, record }))
}
