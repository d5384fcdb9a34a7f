//! Resolved-account plumbing.
//!
//! Token issuance and verification are external concerns; the gateway only
//! maps an opaque bearer token to an already-vetted user and namespace.
//! Requests without a resolvable token stop here, before any filter or
//! backend runs.

use std::collections::HashMap;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::config::AuthConfig;
use crate::error::GatewayError;
use crate::state::AppState;

/// Header scheme: `Authorization: JWT <token>`.
const AUTH_SCHEME: &str = "JWT ";

/// The resolved caller. Namespace is derived from the account, never from
/// unvalidated client input.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user: String,
    pub namespace: String,
}

/// Seam for the external account service.
pub trait AccountResolver: Send + Sync {
    fn resolve(&self, token: &str) -> Option<AuthContext>;
}

/// Config-backed resolver: a static token table.
pub struct StaticTokenResolver {
    tokens: HashMap<String, AuthContext>,
}

impl StaticTokenResolver {
    pub fn from_config(config: &AuthConfig) -> Self {
        let tokens = config
            .static_tokens
            .iter()
            .map(|entry| {
                (
                    entry.token.clone(),
                    AuthContext {
                        user: entry.user.clone(),
                        namespace: entry.namespace.clone(),
                    },
                )
            })
            .collect();
        Self { tokens }
    }
}

impl AccountResolver for StaticTokenResolver {
    fn resolve(&self, token: &str) -> Option<AuthContext> {
        self.tokens.get(token).cloned()
    }
}

impl FromRequestParts<AppState> for AuthContext {
    type Rejection = GatewayError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(GatewayError::Unauthorized)?;
        let token = header
            .strip_prefix(AUTH_SCHEME)
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or(GatewayError::Unauthorized)?;
        state
            .resolver
            .resolve(token)
            .ok_or(GatewayError::Unauthorized)
    }
}
