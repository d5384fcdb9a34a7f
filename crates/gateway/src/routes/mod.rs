//! HTTP surface: mirrored scheduler paths plus the gateway's own
//! inventory and health endpoints.

mod agents;
mod health;
mod proxy;

use std::time::Duration;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method, StatusCode};
use axum::routing::{delete, get, put};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn build_router(state: AppState) -> Router {
    // CORS configuration
    let cors = if state.config.server.enable_cors {
        let origins = state
            .config
            .server
            .cors_origins
            .iter()
            .filter_map(|origin| origin.parse::<axum::http::HeaderValue>().ok())
            .collect::<Vec<_>>();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
            .allow_credentials(true)
    } else {
        // When CORS is disabled, use a restrictive layer (same-origin only)
        CorsLayer::new()
    };

    let request_timeout = Duration::from_secs(state.config.server.request_timeout_secs);

    Router::new()
        // Gateway-added endpoints
        .route("/healthcheck", get(health::healthcheck))
        .route("/", get(proxy::index_redirect))
        .route("/ui/{*path}", get(proxy::relay_public))
        // Mirrored scheduler paths with filter chains attached
        .route(
            "/v2/deployments",
            get(proxy::list_deployments).fallback(proxy::relay_any),
        )
        .route(
            "/v2/deployments/{id}",
            delete(proxy::delete_deployment).fallback(proxy::relay_any),
        )
        .route(
            "/v2/apps",
            put(proxy::write_app)
                .post(proxy::write_app)
                .fallback(proxy::relay_any),
        )
        .route(
            "/v2/apps/{*path}",
            put(proxy::write_app)
                .post(proxy::write_app)
                .fallback(proxy::relay_any),
        )
        // Namespace-scoped inventory API
        .route("/agents", get(agents::list_agents))
        .route("/agents/with_attrs", get(agents::list_agents_with_attrs))
        .route("/agents/{id}/apps", get(agents::list_apps))
        .route(
            "/agents/{id}/apps/{app_id}/tasks",
            get(agents::list_tasks),
        )
        // Every other scheduler path relays as-is (still authenticated)
        .fallback(proxy::relay_any)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                // Timeout for requests (prevents indefinitely hanging connections)
                .layer(TimeoutLayer::with_status_code(
                    StatusCode::REQUEST_TIMEOUT,
                    request_timeout,
                ))
                // Limit request body size to 2MB to prevent abuse
                .layer(DefaultBodyLimit::max(2 * 1024 * 1024))
                .layer(cors),
        )
        .with_state(state)
}
