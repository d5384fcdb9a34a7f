//! Cluster-backend capability set.
//!
//! Callers program against [`ClusterBackend`]; the concrete implementation
//! is selected by configuration through [`create_backend`], so adding
//! another scheduler flavor never touches call sites.

mod mesos;

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub use async_trait::async_trait;
pub use mesos::MesosBackend;

use crate::error::ClusterResult;
use crate::models::{Agent, App, Task};

/// Namespace-scoped inventory operations every backend provides.
#[async_trait]
pub trait ClusterBackend: std::fmt::Debug + Send + Sync {
    /// Agents owned by `namespace` whose attributes match every entry of
    /// `attr_filters`, in the leader's listing order.
    async fn list_agents(
        &self,
        namespace: &str,
        attr_filters: &HashMap<String, String>,
    ) -> ClusterResult<Vec<Agent>>;

    /// One agent by id. `None` covers both "does not exist" and "not owned
    /// by this namespace"; callers cannot tell the two apart.
    async fn get_agent(&self, namespace: &str, agent_id: &str) -> ClusterResult<Option<Agent>>;

    /// Application inventory of one agent; empty when the agent is absent.
    async fn list_apps(&self, namespace: &str, agent_id: &str) -> ClusterResult<Vec<App>>;

    /// Tasks of one app on one agent; empty when the agent or the app
    /// grouping is absent.
    async fn list_tasks(
        &self,
        namespace: &str,
        agent_id: &str,
        app_id: &str,
    ) -> ClusterResult<Vec<Task>>;
}

/// Backend selection and tuning knobs.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Which backend implementation to build.
    pub kind: String,
    /// Scheduler master addresses probed for the leader, in order.
    pub master_addresses: Vec<String>,
    /// Connect timeout for leader and agent requests (seconds).
    pub connect_timeout_secs: u64,
    /// Budget for one agent's introspection query (seconds).
    pub agent_timeout_secs: u64,
    /// Bound on concurrent per-agent introspection queries.
    pub agent_concurrency: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            kind: "mesos".to_string(),
            master_addresses: Vec::new(),
            connect_timeout_secs: 2,
            agent_timeout_secs: 2,
            agent_concurrency: 8,
        }
    }
}

/// Build the configured backend.
pub fn create_backend(settings: &BackendSettings) -> ClusterResult<Arc<dyn ClusterBackend>> {
    match settings.kind.as_str() {
        "mesos" => {
            tracing::info!(
                masters = settings.master_addresses.len(),
                concurrency = settings.agent_concurrency,
                "using mesos cluster backend"
            );
            Ok(Arc::new(MesosBackend::new(settings)?))
        }
        other => Err(crate::error::ClusterError::UnknownBackend(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClusterError;

    #[test]
    fn mesos_is_the_default_kind() {
        let settings = BackendSettings::default();
        assert_eq!(settings.kind, "mesos");
        assert!(create_backend(&settings).is_ok());
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let settings = BackendSettings {
            kind: "nomad".to_string(),
            ..BackendSettings::default()
        };
        let err = create_backend(&settings).unwrap_err();
        assert!(matches!(err, ClusterError::UnknownBackend(kind) if kind == "nomad"));
    }
}
