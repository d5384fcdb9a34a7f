//! Request/response filter pipelines.
//!
//! Ordered, stateless transformers between tenants and the shared
//! scheduler: the request side stamps ownership onto outbound app specs,
//! the response side narrows scheduler answers to what the calling
//! namespace owns. Pipelines are built fresh per request; nothing is
//! shared across calls.

pub mod label;

mod appname;
mod namespace;

pub use appname::AppNameFilter;
pub use namespace::NamespaceVisibilityFilter;

use thiserror::Error;

use crate::auth::AuthContext;
use crate::models::{AppSpec, Deployment};

/// A filter refusing a request; surfaced as a validation failure naming
/// the offending filter.
#[derive(Debug, Error)]
#[error("filter '{filter}' rejected the request: {reason}")]
pub struct FilterError {
    pub filter: &'static str,
    pub reason: String,
}

/// Transformer applied to an outbound app spec before it is relayed.
///
/// `request_app` is mutated in place; `original_app` is the currently
/// deployed spec, available for default-merging filters only.
pub trait RequestFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(
        &self,
        ctx: &AuthContext,
        request_app: &mut AppSpec,
        original_app: &AppSpec,
    ) -> Result<(), FilterError>;
}

/// Transformer applied to a relayed deployment listing before it reaches
/// the caller.
pub trait ResponseFilter: Send + Sync {
    fn name(&self) -> &'static str;

    fn apply(&self, ctx: &AuthContext, deployments: Vec<Deployment>) -> Vec<Deployment>;
}

pub struct RequestPipeline {
    filters: Vec<Box<dyn RequestFilter>>,
}

impl RequestPipeline {
    /// The standard outbound chain.
    pub fn standard() -> Self {
        Self {
            filters: vec![Box::new(AppNameFilter)],
        }
    }

    #[cfg(test)]
    pub fn with_filters(filters: Vec<Box<dyn RequestFilter>>) -> Self {
        Self { filters }
    }

    /// Run every filter in order; the first refusal aborts the request.
    pub fn apply(
        &self,
        ctx: &AuthContext,
        request_app: &mut AppSpec,
        original_app: &AppSpec,
    ) -> Result<(), FilterError> {
        for filter in &self.filters {
            tracing::debug!(filter = filter.name(), app_id = %request_app.id, "applying request filter");
            filter.apply(ctx, request_app, original_app)?;
        }
        Ok(())
    }
}

pub struct ResponsePipeline {
    filters: Vec<Box<dyn ResponseFilter>>,
}

impl ResponsePipeline {
    /// The standard inbound chain.
    ///
    /// Handlers relaying destructive single-resource calls never construct
    /// this at all; that bypass is theirs to decide per call.
    pub fn standard() -> Self {
        Self {
            filters: vec![Box::new(NamespaceVisibilityFilter)],
        }
    }

    pub fn apply(&self, ctx: &AuthContext, mut deployments: Vec<Deployment>) -> Vec<Deployment> {
        for filter in &self.filters {
            deployments = filter.apply(ctx, deployments);
        }
        deployments
    }
}
