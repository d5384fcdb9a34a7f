//! Inventory data model shared by every cluster backend.
//!
//! All records are built fresh per request; nothing here is cached or
//! shared across calls, and every collection-valued field gets its own
//! independent container per instance.

mod agent;
mod app;
mod stats;
mod task;

pub use agent::{Agent, ResourceFigures};
pub use app::App;
pub use stats::AgentStats;
pub use task::Task;
