//! HTTP transport construction
//!
//! One client is built per operation from the runtime config and dropped with
//! it; nothing is pooled or reused across invocations.

use crate::error::{RegistryError, Result};
use cifetch_core::{NetworkConfig, RuntimeConfig};
use std::fmt;
use std::time::Duration;
use tracing::warn;

/// Transport scheme used to reach a registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scheme {
    Https,
    Http,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Https => "https",
            Scheme::Http => "http",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTTP settings shared by the probe and the manifest fetch
#[derive(Debug, Clone)]
pub struct Transport {
    client: reqwest::Client,
    network: NetworkConfig,
}

impl Transport {
    /// Build a transport honoring the configured TLS policy and deadlines
    pub fn new(config: &RuntimeConfig) -> Result<Self> {
        if config.tls.insecure_skip_verify {
            warn!("TLS certificate verification is disabled");
        }

        let client = reqwest::Client::builder()
            .user_agent(config.network.user_agent.clone())
            .connect_timeout(config.network.connect_timeout())
            .danger_accept_invalid_certs(config.tls.insecure_skip_verify)
            .build()
            .map_err(|e| RegistryError::transport("<client>", e))?;

        Ok(Self {
            client,
            network: config.network.clone(),
        })
    }

    pub fn client(&self) -> &reqwest::Client {
        &self.client
    }

    pub fn probe_timeout(&self) -> Duration {
        self.network.probe_timeout()
    }

    pub fn fetch_timeout(&self) -> Duration {
        self.network.fetch_timeout()
    }

    pub fn plain_http_fallback(&self) -> bool {
        self.network.plain_http_fallback
    }
}
