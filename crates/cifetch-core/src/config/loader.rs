//! Hierarchical configuration loader with precedence
//!
//! Loads configuration from multiple sources with the following precedence (low to high):
//! 1. Built-in defaults
//! 2. Global config (~/.cifetch/config.yaml) or an explicit `--config` file
//! 3. Environment variables (CIFETCH_* prefix, plus DOCKER_CONFIG)
//! 4. CLI flags (handled by caller)

use crate::config::RuntimeConfig;
use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use camino::{Utf8Path, Utf8PathBuf};
use serde::de::DeserializeOwned;
use std::env;
use std::fs;
use std::str::FromStr;
use tracing::debug;

const CONFIG_FILE_NAME: &str = "config.yaml";

/// Configuration hierarchy loader
pub struct HierarchicalConfigLoader {
    /// Base directory for configuration files
    config_dir: Utf8PathBuf,
}

impl HierarchicalConfigLoader {
    /// Create a new hierarchical config loader rooted at ~/.cifetch
    pub fn new() -> Result<Self> {
        let config_dir = Self::get_config_dir()?;
        Ok(Self { config_dir })
    }

    /// Create a loader with a custom config directory
    pub fn with_dir(config_dir: Utf8PathBuf) -> Self {
        Self { config_dir }
    }

    fn get_config_dir() -> Result<Utf8PathBuf> {
        let home = get_home_dir()?;
        let home = Utf8PathBuf::from_path_buf(home)
            .map_err(|p| Error::invalid_config(format!("Non UTF-8 home directory: {}", p.display())))?;
        Ok(home.join(".cifetch"))
    }

    /// Load runtime configuration with hierarchical precedence
    ///
    /// A missing global config file is not an error.
    pub fn load_runtime_config(&self) -> Result<RuntimeConfig> {
        let mut config = RuntimeConfig::default();

        let global_path = self.config_dir.join(CONFIG_FILE_NAME);
        if global_path.exists() {
            debug!("Loading config from {}", global_path);
            let file_config = self.load_yaml_file::<RuntimeConfig>(&global_path)?;
            config = Self::merge_runtime_config(config, file_config);
        }

        Self::apply_env_overrides(config).and_then(Self::validate)
    }

    /// Load runtime configuration from an explicit file, which must exist
    pub fn load_runtime_config_from(&self, path: &Utf8Path) -> Result<RuntimeConfig> {
        if !path.exists() {
            return Err(Error::config_not_found(path.as_str()));
        }

        debug!("Loading config from {}", path);
        let file_config = self.load_yaml_file::<RuntimeConfig>(path)?;
        let config = Self::merge_runtime_config(RuntimeConfig::default(), file_config);

        Self::apply_env_overrides(config).and_then(Self::validate)
    }

    /// Load a YAML file and parse it
    fn load_yaml_file<T: DeserializeOwned>(&self, path: &Utf8Path) -> Result<T> {
        let content = fs::read_to_string(path)?;
        let config: T = serde_yaml_ng::from_str(&content)
            .map_err(|e| Error::invalid_config(format!("Failed to parse {}: {}", path, e)))?;
        Ok(config)
    }

    /// Merge two runtime configs (base is overridden by overlay)
    fn merge_runtime_config(base: RuntimeConfig, overlay: RuntimeConfig) -> RuntimeConfig {
        RuntimeConfig {
            network: overlay.network,
            tls: overlay.tls,
            credentials: crate::config::CredentialsConfig {
                docker_config_dir: overlay
                    .credentials
                    .docker_config_dir
                    .or(base.credentials.docker_config_dir),
            },
        }
    }

    /// Apply environment variable overrides to runtime config
    fn apply_env_overrides(mut config: RuntimeConfig) -> Result<RuntimeConfig> {
        if let Some(val) = parse_env("CIFETCH_CONNECT_TIMEOUT_SECS", "a valid number")? {
            config.network.connect_timeout_secs = val;
        }

        if let Some(val) = parse_env("CIFETCH_PROBE_TIMEOUT_SECS", "a valid number")? {
            config.network.probe_timeout_secs = val;
        }

        if let Some(val) = parse_env("CIFETCH_FETCH_TIMEOUT_SECS", "a valid number")? {
            config.network.fetch_timeout_secs = val;
        }

        if let Ok(val) = env::var("CIFETCH_USER_AGENT") {
            config.network.user_agent = val;
        }

        if let Some(val) = parse_env("CIFETCH_PLAIN_HTTP_FALLBACK", "true or false")? {
            config.network.plain_http_fallback = val;
        }

        if let Some(val) = parse_env("CIFETCH_INSECURE_SKIP_VERIFY", "true or false")? {
            config.tls.insecure_skip_verify = val;
        }

        if let Ok(val) = env::var("DOCKER_CONFIG") {
            if !val.is_empty() {
                config.credentials.docker_config_dir = Some(val);
            }
        }

        Ok(config)
    }

    /// Reject settings no request could succeed with
    fn validate(config: RuntimeConfig) -> Result<RuntimeConfig> {
        let deadlines = [
            ("connect-timeout-secs", config.network.connect_timeout_secs),
            ("probe-timeout-secs", config.network.probe_timeout_secs),
            ("fetch-timeout-secs", config.network.fetch_timeout_secs),
        ];
        if let Some((key, _)) = deadlines.iter().find(|(_, secs)| *secs == 0) {
            return Err(Error::invalid_config(format!(
                "network.{} must be at least 1",
                key
            )));
        }
        Ok(config)
    }

    /// Get the config directory path
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }
}

fn parse_env<T: FromStr>(name: &str, expected: &str) -> Result<Option<T>> {
    match env::var(name) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| Error::invalid_config(format!("{} must be {}", name, expected))),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    fn create_temp_loader() -> (HierarchicalConfigLoader, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_dir =
            Utf8PathBuf::from_path_buf(temp_dir.path().to_path_buf()).expect("Invalid UTF-8 path");
        let loader = HierarchicalConfigLoader::with_dir(config_dir);
        (loader, temp_dir)
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_defaults() {
        let (loader, _temp) = create_temp_loader();
        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.network.probe_timeout_secs, 30);
        assert!(!config.tls.insecure_skip_verify);
    }

    #[test]
    #[serial]
    fn test_load_runtime_config_from_global_file() {
        let (loader, _temp) = create_temp_loader();

        let config_content = r#"
network:
  probe-timeout-secs: 3
  fetch-timeout-secs: 7
tls:
  insecure-skip-verify: true
credentials:
  docker-config-dir: "/etc/cifetch/docker"
"#;
        fs::write(loader.config_dir().join(CONFIG_FILE_NAME), config_content).unwrap();

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.network.probe_timeout_secs, 3);
        assert_eq!(config.network.fetch_timeout_secs, 7);
        assert!(config.tls.insecure_skip_verify);
        assert_eq!(
            config.credentials.docker_config_dir.as_deref(),
            Some("/etc/cifetch/docker")
        );
    }

    #[test]
    #[serial]
    fn test_explicit_config_must_exist() {
        let (loader, _temp) = create_temp_loader();
        let missing = loader.config_dir().join("nope.yaml");

        let err = loader.load_runtime_config_from(&missing).unwrap_err();
        assert!(matches!(err, Error::ConfigNotFound { .. }));
    }

    #[test]
    #[serial]
    fn test_malformed_file_is_invalid_config() {
        let (loader, _temp) = create_temp_loader();
        let path = loader.config_dir().join("broken.yaml");
        fs::write(&path, "network: [not, a, map]").unwrap();

        let err = loader.load_runtime_config_from(&path).unwrap_err();
        assert!(matches!(err, Error::InvalidConfig { .. }));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("CIFETCH_FETCH_TIMEOUT_SECS", "120");
        env::set_var("CIFETCH_PLAIN_HTTP_FALLBACK", "false");
        env::set_var("DOCKER_CONFIG", "/tmp/docker-cfg");

        let config = loader.load_runtime_config().unwrap();
        assert_eq!(config.network.fetch_timeout_secs, 120);
        assert!(!config.network.plain_http_fallback);
        assert_eq!(
            config.credentials.docker_config_dir.as_deref(),
            Some("/tmp/docker-cfg")
        );

        env::remove_var("CIFETCH_FETCH_TIMEOUT_SECS");
        env::remove_var("CIFETCH_PLAIN_HTTP_FALLBACK");
        env::remove_var("DOCKER_CONFIG");
    }

    #[test]
    #[serial]
    fn test_invalid_env_value() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("CIFETCH_PROBE_TIMEOUT_SECS", "soon");
        let result = loader.load_runtime_config();
        env::remove_var("CIFETCH_PROBE_TIMEOUT_SECS");

        match result {
            Err(Error::InvalidConfig { message }) => {
                assert!(message.contains("CIFETCH_PROBE_TIMEOUT_SECS"))
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_zero_deadline_in_file_rejected() {
        let (loader, _temp) = create_temp_loader();
        let path = loader.config_dir().join("zero.yaml");
        fs::write(&path, "network:\n  fetch-timeout-secs: 0\n").unwrap();

        match loader.load_runtime_config_from(&path) {
            Err(Error::InvalidConfig { message }) => {
                assert!(message.contains("fetch-timeout-secs"))
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_zero_deadline_from_env_rejected() {
        let (loader, _temp) = create_temp_loader();

        env::set_var("CIFETCH_PROBE_TIMEOUT_SECS", "0");
        let result = loader.load_runtime_config();
        env::remove_var("CIFETCH_PROBE_TIMEOUT_SECS");

        match result {
            Err(Error::InvalidConfig { message }) => {
                assert!(message.contains("probe-timeout-secs"))
            }
            other => panic!("expected InvalidConfig, got {:?}", other),
        }
    }

    #[test]
    fn test_merge_keeps_base_docker_dir() {
        let mut base = RuntimeConfig::default();
        base.credentials.docker_config_dir = Some("/base".to_string());
        let mut overlay = RuntimeConfig::default();
        overlay.network.fetch_timeout_secs = 1;

        let merged = HierarchicalConfigLoader::merge_runtime_config(base, overlay);
        assert_eq!(merged.network.fetch_timeout_secs, 1);
        assert_eq!(merged.credentials.docker_config_dir.as_deref(), Some("/base"));
    }
}
