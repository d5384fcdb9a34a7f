//! Mesos-flavored cluster backend.
//!
//! Talks to the leader for the agent listing and to each agent's own
//! `/containers` endpoint for its inventory. Per-agent failures are isolated
//! into the agent's `errors` map; only losing the leader fails a call.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use serde::Deserialize;
use tracing::warn;

use super::{BackendSettings, ClusterBackend};
use crate::error::{ClusterError, ClusterResult};
use crate::inventory::{self, ContainerRecord};
use crate::leader::LeaderLocator;
use crate::models::{Agent, App, Task};
use crate::stats;

const OWNER_ATTRIBUTE: &str = "owner";

#[derive(Debug)]
pub struct MesosBackend {
    client: reqwest::Client,
    leader: LeaderLocator,
    agent_timeout: Duration,
    agent_concurrency: usize,
}

#[derive(Debug, Deserialize)]
struct SlaveListing {
    #[serde(default)]
    slaves: Vec<Agent>,
}

impl MesosBackend {
    pub fn new(settings: &BackendSettings) -> ClusterResult<Self> {
        let connect_timeout = Duration::from_secs(settings.connect_timeout_secs);
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ClusterError::ClientSetup)?;
        let leader = LeaderLocator::new(settings.master_addresses.clone(), connect_timeout)?;
        Ok(Self {
            client,
            leader,
            agent_timeout: Duration::from_secs(settings.agent_timeout_secs),
            agent_concurrency: settings.agent_concurrency.max(1),
        })
    }

    async fn fetch_slaves(
        &self,
        leader: &str,
        slave_id: Option<&str>,
    ) -> ClusterResult<Vec<Agent>> {
        let url = format!("{leader}/slaves");
        let mut request = self.client.get(&url);
        if let Some(id) = slave_id {
            request = request.query(&[("slave_id", id)]);
        }
        let response = request
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| ClusterError::http(&url, err))?;
        let listing: SlaveListing = response
            .json()
            .await
            .map_err(|err| ClusterError::http(&url, err))?;
        Ok(listing.slaves)
    }

    async fn fetch_containers(&self, agent: &Agent) -> ClusterResult<Vec<ContainerRecord>> {
        let url = format!("{}/containers", agent.base_url());
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|err| ClusterError::http(&url, err))?;
        response
            .json()
            .await
            .map_err(|err| ClusterError::http(&url, err))
    }

    /// Populate one agent's derived fields. Never fails: introspection and
    /// stats problems become `unavailable` markers on the agent itself.
    async fn introspect(&self, mut agent: Agent) -> Agent {
        match tokio::time::timeout(self.agent_timeout, self.fetch_containers(&agent)).await {
            Ok(Ok(records)) => {
                agent.applications = inventory::apps_of(&records);
                agent.total_apps = agent.applications.len();
            }
            Ok(Err(err)) => {
                warn!(agent_id = %agent.id, error = %err, "agent introspection failed");
                agent.mark_unavailable("applications");
            }
            Err(_) => {
                warn!(
                    agent_id = %agent.id,
                    timeout_secs = self.agent_timeout.as_secs(),
                    "agent introspection timed out"
                );
                agent.mark_unavailable("applications");
            }
        }

        match stats::compute(&agent.used_resources, &agent.resources) {
            Ok(computed) => agent.stats = Some(computed),
            Err(err) => {
                warn!(agent_id = %agent.id, error = %err, "agent stats undefined");
                agent.mark_unavailable("stats");
            }
        }

        agent
    }
}

#[async_trait]
impl ClusterBackend for MesosBackend {
    async fn list_agents(
        &self,
        namespace: &str,
        attr_filters: &HashMap<String, String>,
    ) -> ClusterResult<Vec<Agent>> {
        let leader = self.leader.leader_address().await?;
        let retained: Vec<Agent> = self
            .fetch_slaves(&leader, None)
            .await?
            .into_iter()
            .filter(|agent| {
                agent.attr_equals(OWNER_ATTRIBUTE, namespace) && agent.matches_attrs(attr_filters)
            })
            .collect();

        // Bounded fan-out; branches are joined by index so the output keeps
        // the leader's listing order no matter which query finishes first.
        let mut joined: Vec<(usize, Agent)> = stream::iter(
            retained
                .into_iter()
                .enumerate()
                .map(|(index, agent)| async move { (index, self.introspect(agent).await) }),
        )
        .buffer_unordered(self.agent_concurrency)
        .collect()
        .await;
        joined.sort_by_key(|(index, _)| *index);

        Ok(joined.into_iter().map(|(_, agent)| agent).collect())
    }

    async fn get_agent(&self, namespace: &str, agent_id: &str) -> ClusterResult<Option<Agent>> {
        let leader = self.leader.leader_address().await?;
        let slaves = self.fetch_slaves(&leader, Some(agent_id)).await?;
        // Absent and owned-by-someone-else collapse into the same answer.
        let Some(agent) = slaves.into_iter().next() else {
            return Ok(None);
        };
        if !agent.attr_equals(OWNER_ATTRIBUTE, namespace) {
            return Ok(None);
        }
        Ok(Some(self.introspect(agent).await))
    }

    async fn list_apps(&self, namespace: &str, agent_id: &str) -> ClusterResult<Vec<App>> {
        Ok(self
            .get_agent(namespace, agent_id)
            .await?
            .map(|agent| agent.applications)
            .unwrap_or_default())
    }

    async fn list_tasks(
        &self,
        namespace: &str,
        agent_id: &str,
        app_id: &str,
    ) -> ClusterResult<Vec<Task>> {
        let Some(agent) = self.get_agent(namespace, agent_id).await? else {
            return Ok(Vec::new());
        };
        let records =
            match tokio::time::timeout(self.agent_timeout, self.fetch_containers(&agent)).await {
                Ok(Ok(records)) => records,
                Ok(Err(err)) => {
                    warn!(agent_id = %agent.id, error = %err, "agent introspection failed");
                    return Ok(Vec::new());
                }
                Err(_) => {
                    warn!(agent_id = %agent.id, "agent introspection timed out");
                    return Ok(Vec::new());
                }
            };
        let mut groups = inventory::tasks_by_app(&records);
        Ok(groups.remove(app_id).unwrap_or_default())
    }
}
