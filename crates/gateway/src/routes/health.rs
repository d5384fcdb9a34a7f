use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

use crate::state::AppState;

/// GET /healthcheck — pass-through of the upstream scheduler's own health
/// probe status.
pub async fn healthcheck(State(state): State<AppState>) -> Response {
    match state.upstream.ping().await {
        Ok(status) => (
            status,
            Json(json!({
                "upstream_status": status.as_u16(),
                "timestamp": chrono::Utc::now().to_rfc3339(),
            })),
        )
            .into_response(),
        Err(err) => {
            warn!(error = %err, "upstream health probe failed");
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({"error": "upstream scheduler unreachable"})),
            )
                .into_response()
        }
    }
}
