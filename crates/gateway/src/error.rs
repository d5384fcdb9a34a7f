use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cluster::ClusterError;
use serde_json::json;
use thiserror::Error;

use crate::filters::FilterError;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("missing or invalid authorization")]
    Unauthorized,

    #[error(transparent)]
    FilterRejected(#[from] FilterError),

    #[error("invalid request body: {0}")]
    InvalidBody(String),

    #[error("upstream request failed: {0}")]
    Upstream(#[source] reqwest::Error),

    #[error("upstream returned an unreadable payload: {0}")]
    UpstreamPayload(String),

    #[error(transparent)]
    Cluster(#[from] ClusterError),
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            GatewayError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                json!({"error": self.to_string()}),
            ),
            GatewayError::FilterRejected(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"error": err.reason, "filter": err.filter}),
            ),
            GatewayError::InvalidBody(_) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({"error": self.to_string()}),
            ),
            GatewayError::Upstream(err) => {
                // Log the transport detail server-side, keep the client body generic
                tracing::error!(error = %err, "upstream scheduler request failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({"error": "upstream scheduler unavailable"}),
                )
            }
            GatewayError::UpstreamPayload(detail) => {
                tracing::error!(detail = %detail, "upstream scheduler payload unreadable");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({"error": "upstream scheduler returned an invalid response"}),
                )
            }
            GatewayError::Cluster(ClusterError::UnknownBackend(_)) => {
                tracing::error!(error = %self, "cluster backend misconfigured");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({"error": "cluster backend misconfigured"}),
                )
            }
            GatewayError::Cluster(err) => {
                tracing::error!(error = %err, "cluster inventory call failed");
                (
                    StatusCode::BAD_GATEWAY,
                    json!({"error": "cluster unavailable"}),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_rejections_name_the_filter() {
        let response = GatewayError::FilterRejected(FilterError {
            filter: "appname",
            reason: "bad spec".to_string(),
        })
        .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn leader_loss_maps_to_bad_gateway() {
        let response = GatewayError::Cluster(ClusterError::LeaderUnavailable).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn missing_auth_maps_to_unauthorized() {
        let response = GatewayError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
