//! Relaying handlers for the mirrored scheduler paths.

use axum::body::Body;
use axum::extract::{Path, Request, State};
use axum::http::{header, request::Parts, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;

use crate::auth::AuthContext;
use crate::error::GatewayError;
use crate::filters::{RequestPipeline, ResponsePipeline};
use crate::models::{AppSpec, Deployment};
use crate::state::AppState;
use crate::upstream::Relayed;

/// Matches the router-level body limit.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

/// GET / — dashboard entry point.
pub async fn index_redirect() -> impl IntoResponse {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, "/v2/apps")],
    )
}

/// Authenticated catch-all relay for scheduler paths without a filter
/// chain of their own.
pub async fn relay_any(
    State(state): State<AppState>,
    _ctx: AuthContext,
    request: Request,
) -> Result<Relayed, GatewayError> {
    relay_inner(&state, request).await
}

/// Unauthenticated relay for the static dashboard assets.
pub async fn relay_public(
    State(state): State<AppState>,
    request: Request,
) -> Result<Relayed, GatewayError> {
    relay_inner(&state, request).await
}

async fn relay_inner(state: &AppState, request: Request) -> Result<Relayed, GatewayError> {
    let (parts, body) = request.into_parts();
    let body = read_body(body).await?;
    let content_type = content_type_of(&parts);
    state
        .upstream
        .relay(
            parts.method.clone(),
            &path_and_query_of(&parts),
            content_type.as_deref(),
            body,
        )
        .await
}

/// GET /v2/deployments — relay, then narrow the listing to the caller's
/// namespace through the response pipeline.
pub async fn list_deployments(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Response, GatewayError> {
    let relayed = state
        .upstream
        .relay(Method::GET, "/v2/deployments", None, Bytes::new())
        .await?;
    if !relayed.status.is_success() {
        return Ok(relayed.into_response());
    }

    let deployments: Vec<Deployment> = serde_json::from_slice(&relayed.body)
        .map_err(|err| GatewayError::UpstreamPayload(err.to_string()))?;
    let visible = ResponsePipeline::standard().apply(&ctx, deployments);

    Ok((relayed.status, Json(visible)).into_response())
}

/// DELETE /v2/deployments/{id} — destructive single-resource call: the
/// response pipeline is skipped outright and the upstream body comes back
/// untouched.
pub async fn delete_deployment(
    State(state): State<AppState>,
    _ctx: AuthContext,
    Path(id): Path<String>,
) -> Result<Relayed, GatewayError> {
    state
        .upstream
        .relay(
            Method::DELETE,
            &format!("/v2/deployments/{id}"),
            None,
            Bytes::new(),
        )
        .await
}

/// PUT/POST on /v2/apps — run the outbound spec through the request
/// pipeline, then relay the rewritten body.
pub async fn write_app(
    State(state): State<AppState>,
    ctx: AuthContext,
    request: Request,
) -> Result<Relayed, GatewayError> {
    let (parts, body) = request.into_parts();
    let body = read_body(body).await?;

    let mut app: AppSpec = serde_json::from_slice(&body)
        .map_err(|err| GatewayError::InvalidBody(err.to_string()))?;
    if app.id.is_empty() {
        // Partial-update bodies may omit the id; the targeted path carries it.
        if let Some(target) = target_app_id(parts.uri.path()) {
            app.id = target;
        }
    }

    // Creates have no deployed counterpart; default-merging filters treat
    // an empty spec as "nothing to merge".
    let original = AppSpec::default();
    RequestPipeline::standard().apply(&ctx, &mut app, &original)?;

    let body =
        serde_json::to_vec(&app).map_err(|err| GatewayError::InvalidBody(err.to_string()))?;
    state
        .upstream
        .relay(
            parts.method.clone(),
            &path_and_query_of(&parts),
            Some("application/json"),
            Bytes::from(body),
        )
        .await
}

/// `/v2/apps/foo/bar` -> `/foo/bar`.
fn target_app_id(path: &str) -> Option<String> {
    path.strip_prefix("/v2/apps")
        .map(|rest| rest.trim_end_matches('/'))
        .filter(|rest| !rest.is_empty())
        .map(str::to_string)
}

async fn read_body(body: Body) -> Result<Bytes, GatewayError> {
    axum::body::to_bytes(body, BODY_LIMIT)
        .await
        .map_err(|err| GatewayError::InvalidBody(err.to_string()))
}

fn content_type_of(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}

fn path_and_query_of(parts: &Parts) -> String {
    parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string())
}
