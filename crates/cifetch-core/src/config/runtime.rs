//! Runtime configuration types for operational parameters
//!
//! These types control how registry requests are made: deadlines for the
//! endpoint probe and the manifest fetch, the transport security policy,
//! and where registry credentials are read from.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Complete runtime configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RuntimeConfig {
    /// Network and HTTP configuration
    #[serde(default)]
    pub network: NetworkConfig,

    /// Transport security policy
    #[serde(default)]
    pub tls: TlsConfig,

    /// Credential lookup settings
    #[serde(default)]
    pub credentials: CredentialsConfig,
}

/// Network and HTTP configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct NetworkConfig {
    /// TCP/TLS connect timeout in seconds
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Deadline for each endpoint probe attempt in seconds
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,

    /// Deadline for the manifest request in seconds
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// User agent string for HTTP requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Retry the endpoint probe over plain HTTP when HTTPS fails at the transport level
    #[serde(default = "default_plain_http_fallback")]
    pub plain_http_fallback: bool,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            probe_timeout_secs: default_probe_timeout(),
            fetch_timeout_secs: default_fetch_timeout(),
            user_agent: default_user_agent(),
            plain_http_fallback: default_plain_http_fallback(),
        }
    }
}

impl NetworkConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

fn default_connect_timeout() -> u64 {
    10
}
fn default_probe_timeout() -> u64 {
    30
}
fn default_fetch_timeout() -> u64 {
    60
}
fn default_plain_http_fallback() -> bool {
    true
}
fn default_user_agent() -> String {
    format!(
        "cifetch/{} ({}; {})",
        env!("CARGO_PKG_VERSION"),
        std::env::consts::OS,
        std::env::consts::ARCH
    )
}

/// Transport security policy
///
/// Certificate validation is on unless explicitly disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TlsConfig {
    /// Accept invalid or self-signed registry certificates
    #[serde(default)]
    pub insecure_skip_verify: bool,
}

/// Credential lookup settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CredentialsConfig {
    /// Directory holding the Docker client `config.json`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docker_config_dir: Option<String>,
}
