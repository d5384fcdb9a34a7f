//! Relay to the primary scheduler address.
//!
//! Method, path, query and body go through as received; response framing
//! headers are sanitized before anything is handed back to a caller.

use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Body;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use bytes::Bytes;

use crate::config::UpstreamConfig;
use crate::error::GatewayError;

#[derive(Clone)]
pub struct Upstream {
    client: reqwest::Client,
    base: String,
}

/// A sanitized upstream response, ready to hand back or to run through a
/// response filter first.
#[derive(Debug)]
pub struct Relayed {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl Upstream {
    pub fn new(config: &UpstreamConfig) -> Result<Self> {
        let base = config
            .marathon_addresses
            .first()
            .context("no upstream scheduler address configured")?
            .trim_end_matches('/')
            .to_string();
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("failed to build the upstream http client")?;
        Ok(Self { client, base })
    }

    /// Forward one request and read the full response body. Hop-by-hop
    /// request headers are not forwarded; only the content type travels.
    pub async fn relay(
        &self,
        method: Method,
        path_and_query: &str,
        content_type: Option<&str>,
        body: Bytes,
    ) -> Result<Relayed, GatewayError> {
        let url = format!("{}{}", self.base, path_and_query);
        tracing::debug!(%method, %url, "relaying to upstream");

        let mut request = self.client.request(method, &url);
        if let Some(content_type) = content_type {
            request = request.header(header::CONTENT_TYPE, content_type);
        }
        if !body.is_empty() {
            request = request.body(body);
        }

        let response = request.send().await.map_err(GatewayError::Upstream)?;
        let status = response.status();
        let mut headers = response.headers().clone();
        sanitize_response_headers(&mut headers);
        let body = response.bytes().await.map_err(GatewayError::Upstream)?;

        Ok(Relayed {
            status,
            headers,
            body,
        })
    }

    /// Upstream's own health probe; the caller passes its status through.
    pub async fn ping(&self) -> Result<StatusCode, reqwest::Error> {
        let response = self.client.get(format!("{}/ping", self.base)).send().await?;
        Ok(response.status())
    }
}

/// Strip headers that describe the upstream hop rather than ours.
/// `Transfer-Encoding` framing ended at the client; `Content-Length` is
/// recomputed from the relayed body. `Content-Encoding` is never added.
pub fn sanitize_response_headers(headers: &mut HeaderMap) {
    headers.remove(header::TRANSFER_ENCODING);
    headers.remove(header::CONTENT_LENGTH);
    headers.remove(header::CONNECTION);
}

impl IntoResponse for Relayed {
    fn into_response(self) -> Response {
        let mut response = Response::new(Body::from(self.body));
        *response.status_mut() = self.status;
        *response.headers_mut() = self.headers;
        response
    }
}
