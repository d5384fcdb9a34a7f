use std::sync::Arc;

use anyhow::{Context, Result};
use cluster::ClusterBackend;

use crate::auth::{AccountResolver, StaticTokenResolver};
use crate::config::GatewayConfig;
use crate::upstream::Upstream;

/// Shared handles threaded through the router. Everything here is safe for
/// concurrent use; per-request state (filter pipelines, auth context) is
/// built fresh in the handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<GatewayConfig>,
    pub upstream: Upstream,
    pub backend: Arc<dyn ClusterBackend>,
    pub resolver: Arc<dyn AccountResolver>,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let upstream =
            Upstream::new(&config.upstream).context("Failed to build the upstream relay")?;
        let backend = cluster::create_backend(&config.cluster)
            .context("Failed to build the cluster backend")?;
        let resolver = Arc::new(StaticTokenResolver::from_config(&config.auth));
        Ok(Self {
            config: Arc::new(config),
            upstream,
            backend,
            resolver,
        })
    }
}
