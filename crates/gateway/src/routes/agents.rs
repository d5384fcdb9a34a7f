//! Namespace-scoped inventory endpoints backed by the cluster crate.

use std::collections::HashMap;

use axum::extract::{Path, Query, State};
use axum::Json;
use cluster::{App, Task};
use serde_json::{json, Value};

use crate::auth::AuthContext;
use crate::error::GatewayError;
use crate::state::AppState;

/// GET /agents — every agent owned by the caller's namespace.
pub async fn list_agents(
    State(state): State<AppState>,
    ctx: AuthContext,
) -> Result<Json<Value>, GatewayError> {
    let agents = state
        .backend
        .list_agents(&ctx.namespace, &HashMap::new())
        .await?;
    Ok(Json(json!({ "agents": agents })))
}

/// GET /agents/with_attrs?key=value — every query pair is an exact-match
/// attribute filter; all must hold.
pub async fn list_agents_with_attrs(
    State(state): State<AppState>,
    ctx: AuthContext,
    Query(filters): Query<HashMap<String, String>>,
) -> Result<Json<Value>, GatewayError> {
    let agents = state.backend.list_agents(&ctx.namespace, &filters).await?;
    Ok(Json(json!({ "agents": agents })))
}

/// GET /agents/{id}/apps — empty when the agent is absent or not ours.
pub async fn list_apps(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path(agent_id): Path<String>,
) -> Result<Json<Vec<App>>, GatewayError> {
    let apps = state.backend.list_apps(&ctx.namespace, &agent_id).await?;
    Ok(Json(apps))
}

/// GET /agents/{id}/apps/{app_id}/tasks — empty when the agent or the app
/// grouping is absent.
pub async fn list_tasks(
    State(state): State<AppState>,
    ctx: AuthContext,
    Path((agent_id, app_id)): Path<(String, String)>,
) -> Result<Json<Vec<Task>>, GatewayError> {
    let tasks = state
        .backend
        .list_tasks(&ctx.namespace, &agent_id, &app_id)
        .await?;
    Ok(Json(tasks))
}
