//! Registry credential lookup
//!
//! Reads username/password pairs from the Docker client `config.json`
//! (`$DOCKER_CONFIG/config.json` or `~/.docker/config.json`). Only plain
//! `auths` entries are understood; credential helpers are not invoked.

use crate::config::CredentialsConfig;
use crate::error::{Error, Result};
use crate::utils::get_home_dir;
use base64::Engine;
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

/// Public hostname of the default registry
const DOCKER_HOSTNAME: &str = "docker.io";

/// Key under which the Docker client stores default registry credentials
const DOCKER_AUTH_KEY: &str = "https://index.docker.io/v1/";

/// Username/password pair for a registry
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// True when no credentials are configured
    pub fn is_empty(&self) -> bool {
        self.username.is_empty() && self.password.is_empty()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Default, Deserialize)]
struct DockerConfigFile {
    #[serde(default)]
    auths: HashMap<String, DockerAuthEntry>,
}

#[derive(Debug, Default, Deserialize)]
struct DockerAuthEntry {
    /// Base64-encoded "username:password"
    #[serde(default)]
    auth: Option<String>,
    #[serde(default)]
    username: Option<String>,
    #[serde(default)]
    password: Option<String>,
}

/// Credential store backed by the Docker client configuration
#[derive(Debug, Default)]
pub struct CredentialStore {
    path: Option<PathBuf>,
    auths: HashMap<String, DockerAuthEntry>,
}

impl CredentialStore {
    /// Load the store using the configured directory or the Docker default
    ///
    /// A missing config file yields an empty store.
    pub fn load(config: &CredentialsConfig) -> Result<Self> {
        let dir = match &config.docker_config_dir {
            Some(dir) => PathBuf::from(dir),
            None => get_home_dir()?.join(".docker"),
        };
        Self::from_file(dir.join("config.json"))
    }

    /// Load the store from a specific `config.json`
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No credential file at {}", path.display());
            return Ok(Self {
                path: Some(path.to_path_buf()),
                auths: HashMap::new(),
            });
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::credentials(path.display().to_string(), e.to_string()))?;
        let file: DockerConfigFile = serde_json::from_str(&content)
            .map_err(|e| Error::credentials(path.display().to_string(), e.to_string()))?;

        trace!(
            "Loaded {} credential entries from {}",
            file.auths.len(),
            path.display()
        );

        Ok(Self {
            path: Some(path.to_path_buf()),
            auths: file.auths,
        })
    }

    /// Look up credentials for a registry hostname
    ///
    /// Returns empty credentials when nothing is configured for the host.
    pub fn get(&self, hostname: &str) -> Result<Credentials> {
        for key in lookup_keys(hostname) {
            if let Some(entry) = self.auths.get(&key) {
                debug!("Using credentials stored under {}", key);
                return self.decode_entry(&key, entry);
            }
        }
        Ok(Credentials::default())
    }

    fn decode_entry(&self, key: &str, entry: &DockerAuthEntry) -> Result<Credentials> {
        if let (Some(username), Some(password)) = (&entry.username, &entry.password) {
            return Ok(Credentials::new(username, password));
        }

        let Some(auth) = entry.auth.as_deref().filter(|a| !a.is_empty()) else {
            return Ok(Credentials::default());
        };

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(auth.trim())
            .map_err(|e| self.entry_error(key, format!("invalid base64 auth: {}", e)))?;
        let decoded = String::from_utf8(decoded)
            .map_err(|_| self.entry_error(key, "auth is not valid UTF-8"))?;
        let (username, password) = decoded
            .split_once(':')
            .ok_or_else(|| self.entry_error(key, "auth is not in user:password form"))?;

        Ok(Credentials::new(username, password))
    }

    fn entry_error(&self, key: &str, message: impl fmt::Display) -> Error {
        let path = self
            .path
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_default();
        Error::credentials(path, format!("{}: {}", key, message))
    }
}

fn lookup_keys(hostname: &str) -> Vec<String> {
    if hostname == DOCKER_HOSTNAME {
        return vec![DOCKER_AUTH_KEY.to_string(), hostname.to_string()];
    }
    vec![hostname.to_string(), format!("https://{}", hostname)]
}
