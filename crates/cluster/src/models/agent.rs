use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AgentStats, App};

/// Resource totals as reported by the leader's agent listing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceFigures {
    #[serde(default, with = "rust_decimal::serde::float")]
    pub cpus: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub mem: Decimal,
    #[serde(default, with = "rust_decimal::serde::float")]
    pub disk: Decimal,
}

/// A cluster worker node.
///
/// The identity fields deserialize straight from the leader's `/slaves`
/// payload; `applications`, `total_apps`, `stats` and `errors` are derived
/// per request by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub id: String,
    pub hostname: String,
    pub port: u16,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub resources: ResourceFigures,
    #[serde(default)]
    pub used_resources: ResourceFigures,

    // Derived fields, never present in the leader payload
    #[serde(default)]
    pub total_apps: usize,
    #[serde(default)]
    pub applications: Vec<App>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<AgentStats>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub errors: HashMap<String, String>,
}

impl Agent {
    /// Exact-match check on a single attribute.
    pub fn attr_equals(&self, key: &str, value: &str) -> bool {
        self.attributes.get(key).map(String::as_str) == Some(value)
    }

    /// All filters must match; an empty filter set matches everything.
    pub fn matches_attrs(&self, filters: &HashMap<String, String>) -> bool {
        filters.iter().all(|(key, value)| self.attr_equals(key, value))
    }

    /// Base URL of the agent's own introspection endpoint.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.hostname, self.port)
    }

    /// Record a derived field as unavailable instead of failing the call.
    pub fn mark_unavailable(&mut self, field: &str) {
        self.errors.insert(field.to_string(), "unavailable".to_string());
    }
}
