//! HTTP request handlers.

use axum::{
    extract::{Query, State},
    Json,
};
use focus_engine::Resolution;
use serde::Deserialize;

use crate::error::ApiError;
use crate::AppState;

/// Query parameters for `GET /api/focus/suggest`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SuggestQuery {
    /// Requested minutes. Kept raw so bad values fall back to the default
    /// instead of rejecting the request.
    #[serde(default)]
    pub duration: Option<String>,
}

/// `GET /health`
pub async fn health_check(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "ok": true,
        "service": "focus-server",
        "time": state.now().to_rfc3339(),
    }))
}

/// `GET /api/focus/suggest?duration=<minutes>`
///
/// `200 {ok: true, suggestion}` when a slot is found, `200 {ok: false,
/// reason}` when neither day has room, `500 {error}` when the event store
/// fails.
pub async fn suggest_focus(
    State(state): State<AppState>,
    Query(query): Query<SuggestQuery>,
) -> Result<Json<Resolution>, ApiError> {
    let minutes = state.bounds.clamp_raw(query.duration.as_deref());
    let now = state.now();
    tracing::debug!(minutes, %now, "resolving focus window");

    let resolution = state
        .resolver
        .resolve(state.store.as_ref(), chrono::Duration::minutes(minutes), now)
        .await?;

    match &resolution {
        Resolution::Suggested(s) => tracing::info!(start = %s.start, minutes, "suggested focus window"),
        Resolution::NoSlot { .. } => tracing::info!(minutes, "no focus window available"),
    }
    Ok(Json(resolution))
}
