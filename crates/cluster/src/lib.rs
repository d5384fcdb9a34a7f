// Namespace-scoped cluster inventory over a shared Mesos-style scheduler.

// Core infrastructure
pub mod error;
pub mod models;

// Domain modules
pub mod backend;
pub mod inventory;
pub mod leader;
pub mod stats;

pub use backend::{create_backend, BackendSettings, ClusterBackend, MesosBackend};
pub use error::ClusterError;
pub use models::{Agent, AgentStats, App, ResourceFigures, Task};
