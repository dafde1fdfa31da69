//! CLI command implementations

pub mod layers;
pub mod manifest;
pub mod version;

use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use cifetch_core::{HierarchicalConfigLoader, RuntimeConfig};

/// Settings taken from global CLI flags, applied over every other config source
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub config: Option<Utf8PathBuf>,
    pub insecure: bool,
    pub timeout_secs: Option<u64>,
}

/// Load the runtime config and apply CLI flags on top
pub fn load_config(overrides: &ConfigOverrides) -> Result<RuntimeConfig> {
    let loader = HierarchicalConfigLoader::new().context("Failed to locate config directory")?;

    let mut config = match &overrides.config {
        Some(path) => loader
            .load_runtime_config_from(path)
            .with_context(|| format!("Failed to load config from {}", path))?,
        None => loader
            .load_runtime_config()
            .context("Failed to load runtime config")?,
    };

    if overrides.insecure {
        config.tls.insecure_skip_verify = true;
    }
    if let Some(secs) = overrides.timeout_secs {
        config.network.probe_timeout_secs = secs;
        config.network.fetch_timeout_secs = secs;
    }

    Ok(config)
}
