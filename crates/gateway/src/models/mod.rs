//! Wire models for the proxied scheduler surface.
//!
//! Only the fields the filter pipelines touch are typed; everything else
//! round-trips verbatim through flattened maps so the gateway never drops
//! payload it does not understand.

mod app;
mod deployment;

pub use app::{AppSpec, Container, Docker, DockerParameter};
pub use deployment::Deployment;
