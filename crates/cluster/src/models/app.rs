use serde::{Deserialize, Serialize};

/// Application identity reconstructed from an agent's executor records.
///
/// Unique per agent; distinct from the gateway-side application spec.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct App {
    pub id: String,
}
