use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-agent resource usage percentages.
///
/// Serialized as strings so the fixed two-decimal scale survives the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentStats {
    #[serde(with = "rust_decimal::serde::str")]
    pub cpu_pct: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub ram_pct: Decimal,
}
