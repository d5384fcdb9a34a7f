//! Scheduler-leader discovery.
//!
//! Mesos masters expose `/redirect`: followers answer with a 3xx pointing at
//! the current leader, the leader itself answers 2xx. The locator probes the
//! configured masters in order and resolves the first usable answer.

use std::time::Duration;

use reqwest::header::LOCATION;
use reqwest::redirect::Policy;
use tracing::warn;
use url::Url;

use crate::error::{ClusterError, ClusterResult};

#[derive(Debug)]
pub struct LeaderLocator {
    client: reqwest::Client,
    masters: Vec<String>,
}

impl LeaderLocator {
    pub fn new(masters: Vec<String>, probe_timeout: Duration) -> ClusterResult<Self> {
        // Redirects stay unfollowed: the Location header *is* the answer.
        let client = reqwest::Client::builder()
            .redirect(Policy::none())
            .connect_timeout(probe_timeout)
            .timeout(probe_timeout)
            .build()
            .map_err(ClusterError::ClientSetup)?;
        Ok(Self { client, masters })
    }

    /// Base URL of the current leader. All masters failing the probe is
    /// fatal; no inventory call is meaningful without a leader.
    pub async fn leader_address(&self) -> ClusterResult<String> {
        for master in &self.masters {
            let master = master.trim_end_matches('/');
            let probe = format!("{master}/redirect");
            match self.client.get(&probe).send().await {
                Ok(resp) if resp.status().is_redirection() => {
                    let location = resp
                        .headers()
                        .get(LOCATION)
                        .and_then(|value| value.to_str().ok());
                    match location {
                        Some(location) => return normalize_location(master, location),
                        None => warn!(master, "leader redirect carried no location header"),
                    }
                }
                Ok(resp) if resp.status().is_success() => return Ok(master.to_string()),
                Ok(resp) => {
                    warn!(master, status = %resp.status(), "unexpected status from leader probe");
                }
                Err(err) => {
                    warn!(master, error = %err, "leader probe failed");
                }
            }
        }
        Err(ClusterError::LeaderUnavailable)
    }
}

/// Mesos emits scheme-relative redirects (`//host:port`); absolute and
/// path-only forms are handled for completeness.
fn normalize_location(master: &str, location: &str) -> ClusterResult<String> {
    let candidate = if let Some(rest) = location.strip_prefix("//") {
        format!("http://{rest}")
    } else if location.starts_with("http://") || location.starts_with("https://") {
        location.to_string()
    } else {
        format!("{master}{location}")
    };
    let candidate = candidate.trim_end_matches('/').to_string();
    Url::parse(&candidate)
        .map_err(|err| ClusterError::payload(format!("{master}/redirect"), err.to_string()))?;
    Ok(candidate)
}
