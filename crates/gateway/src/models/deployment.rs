use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A scheduler-reported in-flight change.
///
/// Only list membership is ever decided by the gateway; step and action
/// payloads pass through in the flattened remainder untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deployment {
    pub id: String,
    #[serde(rename = "affectedApps", default)]
    pub affected_apps: Vec<String>,
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}
