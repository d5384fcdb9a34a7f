use serde::{Deserialize, Serialize};

/// Task identity reconstructed from an agent's executor records,
/// grouped under its owning app id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
}
