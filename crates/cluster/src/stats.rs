//! Resource-usage percentage calculator.
//!
//! Pure decimal arithmetic; no binary floating point anywhere, so repeated
//! aggregation never accumulates rounding error.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

use crate::models::{AgentStats, ResourceFigures};

/// Fixed scale of the reported percentages.
const PCT_DECIMAL_PLACES: u32 = 2;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatsError {
    #[error("resource total is zero, usage percentage is undefined")]
    DivisionUndefined,
}

/// Normalized usage percentages for one agent, computed from figures the
/// leader already reported. No network involved.
pub fn compute(used: &ResourceFigures, total: &ResourceFigures) -> Result<AgentStats, StatsError> {
    Ok(AgentStats {
        cpu_pct: percentage(used.cpus, total.cpus)?,
        ram_pct: percentage(used.mem, total.mem)?,
    })
}

/// `used / total * 100`, rounded up (ceiling) to two decimal places.
fn percentage(used: Decimal, total: Decimal) -> Result<Decimal, StatsError> {
    if total.is_zero() {
        return Err(StatsError::DivisionUndefined);
    }
    let mut pct = (used / total * Decimal::ONE_HUNDRED)
        .round_dp_with_strategy(PCT_DECIMAL_PLACES, RoundingStrategy::ToPositiveInfinity);
    pct.rescale(PCT_DECIMAL_PLACES);
    Ok(pct)
}
