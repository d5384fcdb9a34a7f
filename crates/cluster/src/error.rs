use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClusterError {
    #[error("no mesos master answered the leader probe")]
    LeaderUnavailable,

    #[error("request to {endpoint} failed: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("unexpected payload from {endpoint}: {detail}")]
    Payload { endpoint: String, detail: String },

    #[error("failed to build http client: {0}")]
    ClientSetup(#[source] reqwest::Error),

    #[error("unknown cluster backend kind: {0}")]
    UnknownBackend(String),
}

impl ClusterError {
    pub fn http(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn payload(endpoint: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Payload {
            endpoint: endpoint.into(),
            detail: detail.into(),
        }
    }
}

// Convenience type alias
pub type ClusterResult<T> = Result<T, ClusterError>;
