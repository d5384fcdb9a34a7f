// Multi-tenant gateway in front of a shared Marathon/Mesos scheduler.

// Core infrastructure
pub mod config;
pub mod error;
pub mod state;

// Domain modules
pub mod auth;
pub mod filters;
pub mod models;
pub mod routes;
pub mod upstream;
