use anyhow::{Context, Result};
use cluster::BackendSettings;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub cluster: BackendSettings,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            request_timeout_secs: 30,
            enable_cors: false,
            cors_origins: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UpstreamConfig {
    /// Scheduler addresses; the first entry is the primary relay target.
    pub marathon_addresses: Vec<String>,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            marathon_addresses: Vec::new(),
            connect_timeout_secs: 2,
            request_timeout_secs: 30,
        }
    }
}

/// Token issuance and verification live outside the gateway; this table is
/// the shipped resolver's source of already-vetted accounts.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub static_tokens: Vec<StaticToken>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StaticToken {
    pub token: String,
    pub user: String,
    pub namespace: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info,gateway=debug".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

impl GatewayConfig {
    /// Load configuration from gateway.toml and environment variables
    pub fn load() -> Result<Self> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        // Start with compile-time defaults as the foundation
        let defaults = config::Config::try_from(&GatewayConfig::default())
            .context("Failed to serialize default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);

        // Layer config files (overrides defaults)
        // Try these locations in order:
        // 1. /etc/bifrost/gateway.toml (Docker/production)
        // 2. config/gateway.toml (local development)
        // 3. crates/gateway/config/gateway.toml (workspace root)
        let config_paths = vec![
            "/etc/bifrost/gateway",
            "config/gateway",
            "crates/gateway/config/gateway",
        ];

        for path in config_paths {
            builder = builder.add_source(config::File::with_name(path).required(false));
        }

        // Layer environment variables (overrides everything)
        // Use double underscore for nested keys: GATEWAY_SERVER__BIND_ADDRESS
        builder = builder.add_source(
            config::Environment::with_prefix("GATEWAY")
                .separator("__")
                .try_parsing(true),
        );

        builder
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.server
            .bind_address
            .parse::<std::net::SocketAddr>()
            .context("Invalid bind_address")?;

        if self.upstream.marathon_addresses.is_empty() {
            anyhow::bail!("At least one upstream.marathon_addresses entry is required");
        }
        if self.cluster.master_addresses.is_empty() {
            anyhow::bail!("At least one cluster.master_addresses entry is required");
        }
        if self.server.request_timeout_secs == 0 {
            anyhow::bail!("server.request_timeout_secs must be greater than zero");
        }
        if self.cluster.agent_timeout_secs == 0 {
            anyhow::bail!("cluster.agent_timeout_secs must be greater than zero");
        }
        if self.cluster.agent_concurrency == 0 {
            anyhow::bail!("cluster.agent_concurrency must be greater than zero");
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn populated() -> GatewayConfig {
        let mut config = GatewayConfig::default();
        config.upstream.marathon_addresses = vec!["http://marathon:8080".to_string()];
        config.cluster.master_addresses = vec!["http://mesos:5050".to_string()];
        config
    }

    #[test]
    fn defaults_need_upstream_and_masters() {
        assert!(GatewayConfig::default().validate().is_err());
        assert!(populated().validate().is_ok());
    }

    #[test]
    fn zero_concurrency_is_rejected() {
        let mut config = populated();
        config.cluster.agent_concurrency = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn bad_bind_address_is_rejected() {
        let mut config = populated();
        config.server.bind_address = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }
}
